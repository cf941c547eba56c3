use crate::input::{wheel_zoom_factor, DragState};
use glam::Vec2;
use ohmlab_core::OrbitCamera;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Drag on the canvas orbits the camera, the wheel zooms it.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    {
        let drag = drag.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut().begin(ev.pointer_id(), client_pos(&ev));
            _ = target.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let drag = drag.clone();
        let orbit = orbit.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let step = drag.borrow_mut().update(ev.pointer_id(), client_pos(&ev));
            if let Some((d_yaw, d_pitch)) = step {
                orbit.borrow_mut().drag(d_yaw, d_pitch);
            }
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    for event in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut().end(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        orbit.borrow_mut().zoom(wheel_zoom_factor(ev.delta_y()));
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
