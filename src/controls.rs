use crate::constants::*;
use crate::dom;
use ohmlab_core::{ControlAction, PerformanceMode, Simulator};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Bind the sliders, selects, checkboxes and reset button to the simulator.
///
/// Handlers only mutate the simulator; the frame loop notices the revision
/// change and redraws.
pub fn wire_controls(document: &web::Document, sim: &Rc<RefCell<Simulator>>) {
    wire_number_input(document, sim, VOLTAGE_SLIDER_ID, ControlAction::SetVoltage);
    wire_number_input(
        document,
        sim,
        RESISTANCE_SLIDER_ID,
        ControlAction::SetResistance,
    );

    {
        let sim = sim.clone();
        let doc = document.clone();
        dom::add_listener(document, PERF_MODE_ID, "change", move |_| {
            let Some(el) = dom::select_element(&doc, PERF_MODE_ID) else {
                return;
            };
            match el.value().parse::<PerformanceMode>() {
                Ok(mode) => {
                    sim.borrow_mut().apply(ControlAction::SetMode(mode));
                }
                Err(e) => log::warn!("{e}"),
            }
        });
    }

    wire_checkbox(document, sim, SMOKE_TOGGLE_ID, ControlAction::SetSmoke);
    wire_checkbox(document, sim, BLOOM_TOGGLE_ID, ControlAction::SetBloom);

    let sim = sim.clone();
    dom::add_click_listener(document, RESET_BUTTON_ID, move || {
        sim.borrow_mut().apply(ControlAction::Reset);
    });
}

fn wire_number_input(
    document: &web::Document,
    sim: &Rc<RefCell<Simulator>>,
    id: &'static str,
    action: fn(f64) -> ControlAction,
) {
    let sim = sim.clone();
    let doc = document.clone();
    dom::add_listener(document, id, "input", move |_| {
        if let Some(el) = dom::input_element(&doc, id) {
            let v = el.value_as_number();
            if v.is_finite() {
                sim.borrow_mut().apply(action(v));
            }
        }
    });
}

fn wire_checkbox(
    document: &web::Document,
    sim: &Rc<RefCell<Simulator>>,
    id: &'static str,
    action: fn(bool) -> ControlAction,
) {
    let sim = sim.clone();
    let doc = document.clone();
    dom::add_listener(document, id, "change", move |_| {
        if let Some(el) = dom::input_element(&doc, id) {
            sim.borrow_mut().apply(action(el.checked()));
        }
    });
}
