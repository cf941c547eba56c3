use crate::constants::*;
use crate::dom;
use crate::render;
use crate::ui;
use instant::Instant;
use ohmlab_core::{build_primitives, FlowTrail, OrbitCamera, SceneLayout, Simulator, SmokePlume};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub sim: Rc<RefCell<Simulator>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub layout: SceneLayout,
    pub top_trail: FlowTrail,
    pub bottom_trail: FlowTrail,
    pub smoke: SmokePlume,
    pub gpu: Option<render::GpuState<'a>>,
    /// Simulator revision the DOM was last refreshed for.
    pub seen_revision: Option<u64>,
    pub last_instant: Instant,
    pub time_sec: f32,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        sim: Rc<RefCell<Simulator>>,
        orbit: Rc<RefCell<OrbitCamera>>,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        let layout = SceneLayout::default();
        let budget = sim.borrow().snapshot().visuals.budget;
        Self {
            top_trail: FlowTrail::new(&layout.top_wire, budget.trail, TOP_TRAIL_SEED),
            bottom_trail: FlowTrail::new(&layout.bottom_wire, budget.trail, BOTTOM_TRAIL_SEED),
            smoke: SmokePlume::new(layout.resistor, budget.smoke, SMOKE_SEED),
            layout,
            sim,
            orbit,
            document,
            canvas,
            gpu,
            seen_revision: None,
            last_instant: Instant::now(),
            time_sec: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        self.time_sec += dt_sec;

        let (snap, revision, effects_available) = {
            let sim = self.sim.borrow();
            (sim.snapshot(), sim.revision(), sim.effects_available())
        };

        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            let budget = snap.visuals.budget;
            ui::refresh(&self.document, &snap, effects_available);
            self.top_trail.set_count(budget.trail);
            self.bottom_trail.set_count(budget.trail);
            self.smoke.set_count(budget.smoke);
            dom::sync_canvas_backing_size(&self.canvas, budget.max_pixel_ratio);
            log::debug!(
                "[frame] rev={} V={} R={} I={:.3} P={:.2} tier={:?}",
                revision,
                snap.inputs.voltage,
                snap.inputs.resistance,
                snap.outputs.current,
                snap.outputs.power,
                snap.tier
            );
        }

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let speed = snap.visuals.flow_speed as f32;
        self.top_trail.step(dt_sec, speed);
        self.bottom_trail.step(dt_sec, speed);
        self.smoke.step(dt_sec, snap.visuals.smoke_intensity);

        let w = self.canvas.width();
        let h = self.canvas.height();
        let camera = self.orbit.borrow().camera(w.max(1) as f32 / h.max(1) as f32);
        let prims = build_primitives(
            &self.layout,
            &camera,
            &snap,
            &[&self.top_trail, &self.bottom_trail],
            Some(&self.smoke),
            self.time_sec,
        );
        ui::place_labels(&self.document, &prims.labels);

        gpu.resize_if_needed(w, h);
        if let Err(e) = gpu.render(dt_sec, &prims, snap.visuals.budget.antialias) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
