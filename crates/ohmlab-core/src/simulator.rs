//! User-facing state: the circuit inputs plus effect toggles.
//!
//! Front-ends mutate a [`Simulator`] from input events and pull a fresh
//! [`Snapshot`] whenever [`Simulator::revision`] has moved since they last
//! drew. Snapshots are plain values; nothing derived is stored here.

use crate::circuit::{snap_resistance, snap_voltage, CircuitInputs, CircuitOutputs};
use crate::constants::*;
use crate::performance::{particle_budget, PerformanceMode, PerformanceTier};
use crate::visual::{Calibration, VisualMapping};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub mode: PerformanceMode,
    pub smoke: bool,
    pub bloom: bool,
    pub calibration: Calibration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: PerformanceMode::Auto,
            smoke: true,
            bloom: true,
            calibration: Calibration::default(),
        }
    }
}

/// Discrete user intents, shared by keyboard and DOM controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    SetVoltage(f64),
    SetResistance(f64),
    NudgeVoltage(f64),
    NudgeResistance(f64),
    SetMode(PerformanceMode),
    CycleMode,
    SetSmoke(bool),
    ToggleSmoke,
    SetBloom(bool),
    ToggleBloom,
    Reset,
    /// Handled by the view; leaves the simulator untouched.
    ToggleLegend,
}

/// Map a `KeyboardEvent.key` value to an action. Shift selects coarse steps.
pub fn action_for_key(key: &str, shift: bool) -> Option<ControlAction> {
    let v_step = if shift { 4.0 } else { 1.0 } * VOLTAGE_STEP;
    let r_step = if shift { 10.0 } else { 1.0 } * RESISTANCE_STEP;
    match key {
        "ArrowUp" => Some(ControlAction::NudgeVoltage(v_step)),
        "ArrowDown" => Some(ControlAction::NudgeVoltage(-v_step)),
        "ArrowRight" => Some(ControlAction::NudgeResistance(r_step)),
        "ArrowLeft" => Some(ControlAction::NudgeResistance(-r_step)),
        "p" | "P" => Some(ControlAction::CycleMode),
        "s" | "S" => Some(ControlAction::ToggleSmoke),
        "b" | "B" => Some(ControlAction::ToggleBloom),
        "r" | "R" => Some(ControlAction::Reset),
        "h" | "H" => Some(ControlAction::ToggleLegend),
        _ => None,
    }
}

/// Immutable view of one simulator state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub inputs: CircuitInputs,
    pub outputs: CircuitOutputs,
    pub visuals: VisualMapping,
    pub settings: Settings,
    pub tier: PerformanceTier,
    /// Smoke is drawn only when enabled and the resistor dissipates power.
    pub smoke_visible: bool,
    /// Bloom needs the toggle, the high tier and the effects module.
    pub bloom_active: bool,
}

pub struct Simulator {
    inputs: CircuitInputs,
    settings: Settings,
    auto_low: bool,
    effects_available: bool,
    revision: u64,
}

impl Simulator {
    /// `auto_low` is the result of the one-off capability query.
    pub fn new(settings: Settings, auto_low: bool) -> Self {
        Self {
            inputs: CircuitInputs::default(),
            settings,
            auto_low,
            effects_available: true,
            revision: 0,
        }
    }

    pub fn inputs(&self) -> CircuitInputs {
        self.inputs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auto_low(&self) -> bool {
        self.auto_low
    }

    pub fn effects_available(&self) -> bool {
        self.effects_available
    }

    /// Increments on every change that affects a snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_if(&mut self, changed: bool) -> bool {
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn set_voltage(&mut self, v: f64) -> bool {
        let v = snap_voltage(v);
        let changed = v != self.inputs.voltage;
        self.inputs.voltage = v;
        self.bump_if(changed)
    }

    pub fn set_resistance(&mut self, r: f64) -> bool {
        let r = snap_resistance(r);
        let changed = r != self.inputs.resistance;
        self.inputs.resistance = r;
        self.bump_if(changed)
    }

    /// Replace both inputs as given. Unlike the slider setters this does not
    /// snap to the control step; `inputs` is already clamped by construction.
    pub fn set_inputs(&mut self, inputs: CircuitInputs) -> bool {
        let changed = inputs != self.inputs;
        self.inputs = inputs;
        self.bump_if(changed)
    }

    pub fn nudge_voltage(&mut self, delta: f64) -> bool {
        self.set_voltage(self.inputs.voltage + delta)
    }

    pub fn nudge_resistance(&mut self, delta: f64) -> bool {
        self.set_resistance(self.inputs.resistance + delta)
    }

    pub fn set_performance_mode(&mut self, mode: PerformanceMode) -> bool {
        let changed = mode != self.settings.mode;
        self.settings.mode = mode;
        if changed {
            log::debug!(
                "performance mode {mode} -> tier {:?}",
                PerformanceTier::resolve(mode, self.auto_low)
            );
        }
        self.bump_if(changed)
    }

    pub fn cycle_performance_mode(&mut self) -> PerformanceMode {
        self.set_performance_mode(self.settings.mode.next());
        self.settings.mode
    }

    pub fn set_smoke(&mut self, on: bool) -> bool {
        let changed = on != self.settings.smoke;
        self.settings.smoke = on;
        self.bump_if(changed)
    }

    pub fn set_bloom(&mut self, on: bool) -> bool {
        let changed = on != self.settings.bloom;
        self.settings.bloom = on;
        self.bump_if(changed)
    }

    pub fn set_calibration(&mut self, calibration: Calibration) -> bool {
        let changed = calibration != self.settings.calibration;
        self.settings.calibration = calibration;
        self.bump_if(changed)
    }

    /// Record whether the optional post-processing module could be set up.
    pub fn set_effects_available(&mut self, available: bool) -> bool {
        let changed = available != self.effects_available;
        self.effects_available = available;
        if changed && !available {
            log::info!("visual effects unavailable, bloom disabled");
        }
        self.bump_if(changed)
    }

    /// Restore the load-time inputs; toggles are kept.
    pub fn reset(&mut self) -> bool {
        let changed = self.inputs != CircuitInputs::default();
        self.inputs = CircuitInputs::default();
        self.bump_if(changed)
    }

    /// Returns whether the action changed anything.
    pub fn apply(&mut self, action: ControlAction) -> bool {
        match action {
            ControlAction::SetVoltage(v) => self.set_voltage(v),
            ControlAction::SetResistance(r) => self.set_resistance(r),
            ControlAction::NudgeVoltage(d) => self.nudge_voltage(d),
            ControlAction::NudgeResistance(d) => self.nudge_resistance(d),
            ControlAction::SetMode(m) => self.set_performance_mode(m),
            ControlAction::CycleMode => {
                self.cycle_performance_mode();
                true
            }
            ControlAction::SetSmoke(on) => self.set_smoke(on),
            ControlAction::ToggleSmoke => self.set_smoke(!self.settings.smoke),
            ControlAction::SetBloom(on) => self.set_bloom(on),
            ControlAction::ToggleBloom => self.set_bloom(!self.settings.bloom),
            ControlAction::Reset => self.reset(),
            ControlAction::ToggleLegend => false,
        }
    }

    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::resolve(self.settings.mode, self.auto_low)
    }

    pub fn snapshot(&self) -> Snapshot {
        let inputs = self.inputs;
        let outputs = inputs.outputs();
        let budget = particle_budget(self.settings.mode, self.auto_low);
        let visuals = VisualMapping::derive(&inputs, &outputs, &self.settings.calibration, budget);
        let tier = budget.tier;
        Snapshot {
            inputs,
            outputs,
            visuals,
            settings: self.settings,
            tier,
            smoke_visible: self.settings.smoke && outputs.power > 0.0,
            bloom_active: self.settings.bloom
                && !tier.is_low()
                && self.effects_available,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Settings::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inputs_keeps_off_step_values() {
        let mut sim = Simulator::default();
        assert!(sim.set_inputs(CircuitInputs::new(3.3, 7.5)));
        assert_eq!(sim.inputs().voltage, 3.3);
        assert_eq!(sim.inputs().resistance, 7.5);
        assert!(!sim.set_inputs(CircuitInputs::new(3.3, 7.5)));
        // slider input still snaps
        sim.set_voltage(3.3);
        assert_eq!(sim.inputs().voltage, 3.5);
    }

    #[test]
    fn revision_moves_only_on_change() {
        let mut sim = Simulator::default();
        assert_eq!(sim.revision(), 0);
        assert!(!sim.set_voltage(12.0));
        assert_eq!(sim.revision(), 0);
        assert!(sim.set_voltage(12.3));
        assert_eq!(sim.inputs().voltage, 12.5);
        assert_eq!(sim.revision(), 1);
        assert!(!sim.set_voltage(12.4));
        assert_eq!(sim.revision(), 1);
    }

    #[test]
    fn nudges_clamp_at_range_ends() {
        let mut sim = Simulator::default();
        for _ in 0..100 {
            sim.nudge_voltage(VOLTAGE_STEP);
            sim.nudge_resistance(-RESISTANCE_STEP);
        }
        assert_eq!(sim.inputs().voltage, 24.0);
        assert_eq!(sim.inputs().resistance, 1.0);
        let snap = sim.snapshot();
        assert_eq!(snap.outputs.current, 24.0);
        assert_eq!(snap.outputs.power, 576.0);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_toggles() {
        let mut sim = Simulator::default();
        sim.set_voltage(3.0);
        sim.set_smoke(false);
        assert!(sim.reset());
        assert_eq!(sim.inputs(), CircuitInputs::default());
        assert!(!sim.settings().smoke);
        assert!(!sim.reset());
    }

    #[test]
    fn effective_toggles() {
        let mut sim = Simulator::new(Settings::default(), false);
        let snap = sim.snapshot();
        assert!(snap.smoke_visible);
        assert!(snap.bloom_active);

        sim.set_voltage(0.0);
        assert!(!sim.snapshot().smoke_visible);

        sim.set_performance_mode(PerformanceMode::Low);
        assert!(!sim.snapshot().bloom_active);
        sim.set_performance_mode(PerformanceMode::High);
        sim.set_effects_available(false);
        assert!(!sim.snapshot().bloom_active);
    }

    #[test]
    fn auto_mode_follows_detection() {
        let sim = Simulator::new(Settings::default(), true);
        let snap = sim.snapshot();
        assert_eq!(snap.tier, PerformanceTier::Low);
        assert_eq!(snap.visuals.budget.smoke, SMOKE_COUNT_LOW);
        assert!(!snap.bloom_active);
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for_key("ArrowUp", false), Some(ControlAction::NudgeVoltage(0.5)));
        assert_eq!(action_for_key("ArrowDown", true), Some(ControlAction::NudgeVoltage(-2.0)));
        assert_eq!(action_for_key("ArrowRight", true), Some(ControlAction::NudgeResistance(10.0)));
        assert_eq!(action_for_key("B", false), Some(ControlAction::ToggleBloom));
        assert_eq!(action_for_key("x", false), None);

        let mut sim = Simulator::default();
        assert!(!sim.apply(ControlAction::ToggleLegend));
        assert!(sim.apply(ControlAction::ToggleSmoke));
        assert!(!sim.settings().smoke);
        assert!(sim.apply(ControlAction::CycleMode));
        assert_eq!(sim.settings().mode, PerformanceMode::Low);
    }
}
