//! Mapping of voltage, current and power onto presentation parameters.
//!
//! Every mapping normalizes its driving quantity with [`ratio_clamp`] before
//! interpolating, so out-of-calibration inputs saturate at the "fully hot"
//! end instead of producing out-of-range colors.

use crate::circuit::{CircuitInputs, CircuitOutputs};
use crate::color::{Color, Rgb8};
use crate::constants::*;
use crate::performance::ParticleBudget;
use std::fmt;

/// Power scales (W) at which each heat-driven effect saturates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub heat_power: f64,
    pub smoke_power: f64,
    pub bloom_power: f64,
}

impl Default for Calibration {
    /// One scale for every effect, so the resistor color, smoke density and
    /// bloom all reach their maximum at the same power.
    fn default() -> Self {
        Self {
            heat_power: HOT_POWER_W,
            smoke_power: HOT_POWER_W,
            bloom_power: HOT_POWER_W,
        }
    }
}

impl Calibration {
    /// Separate scales per effect (50 W heat, 40 W smoke, 30 W bloom).
    pub fn per_view() -> Self {
        Self {
            heat_power: HOT_POWER_W,
            smoke_power: SMOKE_POWER_W_PER_VIEW,
            bloom_power: BLOOM_POWER_W_PER_VIEW,
        }
    }
}

/// `min(x / scale, 1)`, additionally floored at 0 and total over NaN.
#[inline]
pub fn ratio_clamp(x: f64, scale: f64) -> f64 {
    let r = x / scale;
    if r.is_nan() {
        return 0.0;
    }
    r.clamp(0.0, 1.0)
}

/// Dark gray at 0 V, yellow at 24 V and above.
pub fn wire_color(voltage: f64) -> Rgb8 {
    let ratio = ratio_clamp(voltage, VOLTAGE_MAX);
    let [cr, cg, cb] = WIRE_COLD_RGB;
    let [hr, hg, hb] = WIRE_HOT_RGB;
    let ch = |cold: u8, hot: u8| (cold as f64 + (hot as f64 - cold as f64) * ratio).floor() as u8;
    Rgb8::new(ch(cr, hr), ch(cg, hg), ch(cb, hb))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatMapping {
    /// Normalized power in [0, 1].
    pub color_ratio: f32,
    pub emissive_color: Color,
    pub emissive_intensity: f32,
    pub light_intensity: f32,
    pub light_color: Color,
}

pub fn heat_mapping(power: f64, power_scale: f64) -> HeatMapping {
    let t = ratio_clamp(power, power_scale) as f32;
    let base = Color::from_hex(RESISTOR_BASE_HEX);
    let hot = Color::from_hex(RESISTOR_HOT_HEX);
    let warm = Color::from_hex(RESISTOR_LIGHT_WARM_HEX);
    HeatMapping {
        color_ratio: t,
        emissive_color: base.lerp(hot, t),
        emissive_intensity: EMISSIVE_BASE + t * EMISSIVE_SPAN,
        light_intensity: LIGHT_BASE + t * LIGHT_SPAN,
        light_color: hot.lerp(warm, t * LIGHT_WARM_SHIFT),
    }
}

/// Speed of the flow particles; floored so the animation never freezes.
#[inline]
pub fn flow_speed(current: f64) -> f64 {
    current.max(FLOW_CURRENT_FLOOR) * FLOW_SPEED_GAIN
}

/// Gaussian blur radius of the SVG wire glow.
#[inline]
pub fn glow_radius(current: f64) -> f64 {
    (current.max(0.0) * GLOW_RADIUS_PER_AMP).min(GLOW_RADIUS_MAX)
}

/// Seconds for one SVG particle to cross a wire.
#[inline]
pub fn svg_particle_period(current: f64) -> f64 {
    SVG_PARTICLE_CYCLE_SEC / current.max(SVG_PARTICLE_MIN_CURRENT)
}

/// `None` when there is no voltage to drive particles.
pub fn svg_particle_fill(voltage: f64) -> Option<&'static str> {
    if voltage <= 0.0 {
        None
    } else if voltage > SVG_PARTICLE_BRIGHT_ABOVE_V {
        Some("#FFFF00")
    } else {
        Some("#FFD700")
    }
}

/// Translucent overlay tinting the SVG resistor body. Channels are kept
/// unrounded; CSS accepts fractional `rgba()` components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatOverlay {
    pub red: f64,
    pub green: f64,
    pub alpha: f64,
}

impl fmt::Display for HeatOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, 0, {})", self.red, self.green, self.alpha)
    }
}

pub fn heat_overlay(power: f64, power_scale: f64) -> HeatOverlay {
    let heat = ratio_clamp(power, power_scale) * 255.0;
    let cool = 255.0 - heat;
    HeatOverlay {
        red: heat,
        green: cool / 4.0,
        alpha: (power.max(0.0) / SVG_OVERLAY_ALPHA_POWER_W).min(SVG_OVERLAY_ALPHA_MAX),
    }
}

#[inline]
pub fn heat_waves_visible(power: f64) -> bool {
    power > HEAT_WAVES_ABOVE_W
}

/// Bloom strength fed to the post-process.
#[inline]
pub fn bloom_intensity(power: f64, power_scale: f64) -> f32 {
    BLOOM_BASE + ratio_clamp(power, power_scale) as f32 * BLOOM_SPAN
}

#[inline]
pub fn smoke_intensity(power: f64, power_scale: f64) -> f32 {
    ratio_clamp(power, power_scale) as f32
}

/// Uniform scale of the resistor mesh at `time_sec`.
#[inline]
pub fn resistor_pulse(heat_ratio: f32, time_sec: f32) -> f32 {
    1.0 + (time_sec * PULSE_RATE).sin() * heat_ratio * PULSE_DEPTH
}

/// Everything a view needs to draw one state of the circuit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualMapping {
    pub wire_color: Rgb8,
    pub heat: HeatMapping,
    pub heat_overlay: HeatOverlay,
    pub heat_waves: bool,
    pub flow_speed: f64,
    pub glow_radius: f64,
    pub svg_particle_period: f64,
    pub svg_particle_fill: Option<&'static str>,
    pub smoke_intensity: f32,
    pub bloom_intensity: f32,
    pub budget: ParticleBudget,
}

impl VisualMapping {
    pub fn derive(
        inputs: &CircuitInputs,
        outputs: &CircuitOutputs,
        calibration: &Calibration,
        budget: ParticleBudget,
    ) -> Self {
        Self {
            wire_color: wire_color(inputs.voltage),
            heat: heat_mapping(outputs.power, calibration.heat_power),
            heat_overlay: heat_overlay(outputs.power, calibration.heat_power),
            heat_waves: heat_waves_visible(outputs.power),
            flow_speed: flow_speed(outputs.current),
            glow_radius: glow_radius(outputs.current),
            svg_particle_period: svg_particle_period(outputs.current),
            svg_particle_fill: svg_particle_fill(inputs.voltage),
            smoke_intensity: smoke_intensity(outputs.power, calibration.smoke_power),
            bloom_intensity: bloom_intensity(outputs.power, calibration.bloom_power),
            budget,
        }
    }
}
