// Shared circuit ranges and visual calibration used by both web and native frontends.

// Control surface
pub const VOLTAGE_MIN: f64 = 0.0;
pub const VOLTAGE_MAX: f64 = 24.0;
pub const VOLTAGE_STEP: f64 = 0.5;
pub const RESISTANCE_MIN: f64 = 1.0;
pub const RESISTANCE_MAX: f64 = 100.0;
pub const RESISTANCE_STEP: f64 = 1.0;

// Values restored on load and on reset
pub const DEFAULT_VOLTAGE: f64 = 12.0;
pub const DEFAULT_RESISTANCE: f64 = 10.0;

// Wire color endpoints (RGB, 0..255)
pub const WIRE_COLD_RGB: [u8; 3] = [50, 50, 50];
pub const WIRE_HOT_RGB: [u8; 3] = [255, 255, 0];

// Resistor heat palette
pub const RESISTOR_BASE_HEX: u32 = 0xD2B48C; // tan body
pub const RESISTOR_HOT_HEX: u32 = 0xFF6B6B; // red-hot glow
pub const RESISTOR_LIGHT_WARM_HEX: u32 = 0xFFA500; // light color shifts toward orange
pub const EMISSIVE_BASE: f32 = 0.2;
pub const EMISSIVE_SPAN: f32 = 2.0;
pub const LIGHT_BASE: f32 = 0.2;
pub const LIGHT_SPAN: f32 = 2.5;
pub const LIGHT_WARM_SHIFT: f32 = 0.5; // fraction of t used for the orange shift

// Power (W) at which heat-driven effects saturate
pub const HOT_POWER_W: f64 = 50.0;
// Scales used by the individual views before they were unified
pub const SMOKE_POWER_W_PER_VIEW: f64 = 40.0;
pub const BLOOM_POWER_W_PER_VIEW: f64 = 30.0;

// Current flow
pub const FLOW_CURRENT_FLOOR: f64 = 0.01; // keeps particles moving at 0 A
pub const FLOW_SPEED_GAIN: f64 = 2.0;

// SVG diagram
pub const GLOW_RADIUS_PER_AMP: f64 = 2.0;
pub const GLOW_RADIUS_MAX: f64 = 15.0;
pub const SVG_PARTICLE_CYCLE_SEC: f64 = 2.0;
pub const SVG_PARTICLE_MIN_CURRENT: f64 = 0.5; // slowest particle period is 4 s
pub const SVG_PARTICLE_BRIGHT_ABOVE_V: f64 = 12.0;
pub const SVG_OVERLAY_ALPHA_POWER_W: f64 = 100.0;
pub const SVG_OVERLAY_ALPHA_MAX: f64 = 0.7;
pub const HEAT_WAVES_ABOVE_W: f64 = 5.0;

// Bloom
pub const BLOOM_BASE: f32 = 0.6;
pub const BLOOM_SPAN: f32 = 1.2;
pub const BLOOM_LUMINANCE_THRESHOLD: f32 = 0.2;

// Resistor pulse
pub const PULSE_RATE: f32 = 6.0; // rad/s
pub const PULSE_DEPTH: f32 = 0.02;

// Particle budgets per tier
pub const SMOKE_COUNT_HIGH: usize = 40;
pub const SMOKE_COUNT_LOW: usize = 10;
pub const TRAIL_COUNT_HIGH: usize = 8;
pub const TRAIL_COUNT_LOW: usize = 3;
pub const PIXEL_RATIO_CAP_HIGH: f64 = 2.0;
pub const PIXEL_RATIO_CAP_LOW: f64 = 1.0;

// Auto-detection thresholds; missing navigator values count as 4
pub const LOW_PERF_MAX_CORES: u32 = 2;
pub const LOW_PERF_MAX_MEMORY_GB: f64 = 2.0;
pub const ASSUMED_CORES: u32 = 4;
pub const ASSUMED_MEMORY_GB: f64 = 4.0;
