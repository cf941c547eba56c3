use crate::constants::LEGEND_ID;
use crate::overlay;
use ohmlab_core::{action_for_key, ControlAction, Simulator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Form controls handle their own keys.
fn target_is_form_control(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .map(|t| {
            t.dyn_ref::<web::HtmlInputElement>().is_some()
                || t.dyn_ref::<web::HtmlSelectElement>().is_some()
        })
        .unwrap_or(false)
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    sim: &Rc<RefCell<Simulator>>,
    document: &web::Document,
) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || target_is_form_control(ev) {
        return;
    }
    let Some(action) = action_for_key(&ev.key(), ev.shift_key()) else {
        return;
    };
    match action {
        ControlAction::ToggleLegend => overlay::toggle(document, LEGEND_ID),
        other => {
            let changed = sim.borrow_mut().apply(other);
            log::debug!("[keys] {:?} changed={}", other, changed);
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(sim: Rc<RefCell<Simulator>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &sim, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
