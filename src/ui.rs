use crate::constants::*;
use crate::dom;
use ohmlab_core::diagram::render_svg;
use ohmlab_core::{Label, Readouts, Snapshot};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Bring every DOM view of the simulator in line with `snap`.
pub fn refresh(document: &web::Document, snap: &Snapshot, effects_available: bool) {
    let r = Readouts::new(&snap.inputs, &snap.outputs);
    dom::set_text(document, VOLTAGE_READOUT_ID, &r.voltage);
    dom::set_text(document, RESISTANCE_READOUT_ID, &r.resistance);
    dom::set_text(document, CURRENT_READOUT_ID, &r.current);
    dom::set_text(document, MILLIAMPS_READOUT_ID, &r.milliamps);
    dom::set_text(document, POWER_READOUT_ID, &r.power);

    // keyboard changes must move the sliders too
    if let Some(el) = dom::input_element(document, VOLTAGE_SLIDER_ID) {
        el.set_value(&snap.inputs.voltage.to_string());
    }
    if let Some(el) = dom::input_element(document, RESISTANCE_SLIDER_ID) {
        el.set_value(&snap.inputs.resistance.to_string());
    }
    if let Some(el) = dom::select_element(document, PERF_MODE_ID) {
        el.set_value(snap.settings.mode.as_str());
    }
    if let Some(el) = dom::input_element(document, SMOKE_TOGGLE_ID) {
        el.set_checked(snap.settings.smoke);
    }
    if let Some(el) = dom::input_element(document, BLOOM_TOGGLE_ID) {
        el.set_checked(snap.settings.bloom);
        el.set_disabled(!effects_available || snap.tier.is_low());
    }

    if let Some(el) = document.get_element_by_id(DIAGRAM_ID) {
        el.set_inner_html(&render_svg(snap));
    }
}

/// Pin the floating labels over the canvas; labels behind the camera are hidden.
pub fn place_labels(document: &web::Document, labels: &[Label]) {
    for label in labels {
        let Some(el) = document
            .get_element_by_id(label.id)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        if el.text_content().as_deref() != Some(label.text.as_str()) {
            el.set_text_content(Some(&label.text));
        }
        let style = el.style();
        match label.css_percent {
            Some(p) => {
                _ = style.set_property("display", "block");
                _ = style.set_property("left", &format!("{:.2}%", p.x));
                _ = style.set_property("top", &format!("{:.2}%", p.y));
            }
            None => {
                _ = style.set_property("display", "none");
            }
        }
    }
}

/// WebGPU is missing: drop the canvas and leave the SVG diagram as the only view.
pub fn show_svg_only(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    _ = canvas.class_list().add_1("hidden");
    for id in ["label-battery", "label-resistor", "label-current"] {
        if let Some(el) = document.get_element_by_id(id) {
            _ = el.class_list().add_1("hidden");
        }
    }
}
