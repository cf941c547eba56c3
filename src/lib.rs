#![cfg(target_arch = "wasm32")]
use ohmlab_core::{CapabilityProbe, OrbitCamera, Settings, Simulator};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod capability;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

use constants::CANVAS_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, sim: &Rc<RefCell<Simulator>>) {
    let canvas_resize = canvas.clone();
    let sim = sim.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let cap = sim.borrow().snapshot().visuals.budget.max_pixel_ratio;
        dom::sync_canvas_backing_size(&canvas_resize, cap);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ohmlab-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // capabilities are queried once; the tier follows the mode afterwards
    let probe = capability::NavigatorProbe::new(&window);
    let caps = probe.capabilities();
    let auto_low = caps.is_constrained();
    log::info!(
        "[caps] cores={} memory={}GB mobile={} auto_low={}",
        caps.cores(),
        caps.memory_gb(),
        caps.is_mobile(),
        auto_low
    );

    let sim = Rc::new(RefCell::new(Simulator::new(Settings::default(), auto_low)));
    let orbit = Rc::new(RefCell::new(OrbitCamera::default()));

    let budget = sim.borrow().snapshot().visuals.budget;
    dom::sync_canvas_backing_size(&canvas, budget.max_pixel_ratio);
    wire_canvas_resize(&canvas, &sim);

    controls::wire_controls(&document, &sim);
    events::wire_global_keydown(sim.clone(), document.clone());

    let gpu = if probe.has_webgpu() {
        frame::init_gpu(&canvas).await
    } else {
        log::warn!("WebGPU not exposed by this browser");
        None
    };
    match &gpu {
        Some(g) => {
            sim.borrow_mut().set_effects_available(g.bloom_available());
            events::wire_orbit_controls(&canvas, orbit.clone());
        }
        None => {
            sim.borrow_mut().set_effects_available(false);
            ui::show_svg_only(&document, &canvas);
        }
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        sim, orbit, document, canvas, gpu,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
