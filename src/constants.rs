// View tuning for the web front-end. Circuit ranges and visual calibration
// live in `ohmlab_core::constants`; these only affect the browser view.

// Scene background, linear RGB (slate)
pub const CLEAR_RGB: [f32; 3] = [0.059, 0.090, 0.165];

// Composite exposure before tone mapping
pub const BLOOM_EXPOSURE: f32 = 1.1;

// Orbit controls
pub const ORBIT_RADIANS_PER_PX: f32 = 0.006;
pub const WHEEL_ZOOM_PER_DELTA: f32 = 0.0015;
pub const WHEEL_ZOOM_MIN_FACTOR: f32 = 0.5;
pub const WHEEL_ZOOM_MAX_FACTOR: f32 = 2.0;

// Long pauses (tab switch) must not teleport particles
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Particle seeds
pub const TOP_TRAIL_SEED: u64 = 11;
pub const BOTTOM_TRAIL_SEED: u64 = 23;
pub const SMOKE_SEED: u64 = 37;

// DOM ids
pub const CANVAS_ID: &str = "ohm-canvas";
pub const DIAGRAM_ID: &str = "circuit-diagram";
pub const LEGEND_ID: &str = "legend";
pub const VOLTAGE_SLIDER_ID: &str = "voltage-slider";
pub const RESISTANCE_SLIDER_ID: &str = "resistance-slider";
pub const PERF_MODE_ID: &str = "perf-mode";
pub const SMOKE_TOGGLE_ID: &str = "smoke-toggle";
pub const BLOOM_TOGGLE_ID: &str = "bloom-toggle";
pub const RESET_BUTTON_ID: &str = "reset-button";

// Readout ids paired with the text they display
pub const VOLTAGE_READOUT_ID: &str = "voltage-value";
pub const RESISTANCE_READOUT_ID: &str = "resistance-value";
pub const CURRENT_READOUT_ID: &str = "current-value";
pub const MILLIAMPS_READOUT_ID: &str = "milliamps-value";
pub const POWER_READOUT_ID: &str = "power-value";
