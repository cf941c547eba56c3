//! Ohm's-law model for a single battery driving a single resistor.
//!
//! `CircuitInputs` is the only state a user controls. `CircuitOutputs` is
//! always derived from it and never stored alongside it.

use crate::constants::*;
use crate::error::CircuitError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitInputs {
    /// Volts, within [`VOLTAGE_MIN`, `VOLTAGE_MAX`].
    pub voltage: f64,
    /// Ohms, within [`RESISTANCE_MIN`, `RESISTANCE_MAX`]; never zero.
    pub resistance: f64,
}

impl Default for CircuitInputs {
    fn default() -> Self {
        Self {
            voltage: DEFAULT_VOLTAGE,
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl CircuitInputs {
    /// Build inputs, clamping both values into the control range.
    ///
    /// Non-finite values fall back to the default for that field.
    pub fn new(voltage: f64, resistance: f64) -> Self {
        Self {
            voltage: clamp_voltage(voltage),
            resistance: clamp_resistance(resistance),
        }
    }

    /// Build inputs without clamping, rejecting anything outside the control range.
    pub fn try_new(voltage: f64, resistance: f64) -> Result<Self, CircuitError> {
        if !voltage.is_finite() {
            return Err(CircuitError::NonFiniteVoltage(voltage));
        }
        if !resistance.is_finite() {
            return Err(CircuitError::NonFiniteResistance(resistance));
        }
        if !(VOLTAGE_MIN..=VOLTAGE_MAX).contains(&voltage) {
            return Err(CircuitError::VoltageOutOfRange {
                value: voltage,
                min: VOLTAGE_MIN,
                max: VOLTAGE_MAX,
            });
        }
        if !(RESISTANCE_MIN..=RESISTANCE_MAX).contains(&resistance) {
            return Err(CircuitError::ResistanceOutOfRange {
                value: resistance,
                min: RESISTANCE_MIN,
                max: RESISTANCE_MAX,
            });
        }
        Ok(Self {
            voltage,
            resistance,
        })
    }

    pub fn outputs(&self) -> CircuitOutputs {
        compute(self.voltage, self.resistance)
    }
}

/// Current and power for a given set of inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitOutputs {
    /// Amperes.
    pub current: f64,
    /// Watts.
    pub power: f64,
}

impl CircuitOutputs {
    pub fn current_milliamps(&self) -> i64 {
        (self.current * 1000.0).round() as i64
    }
}

/// `I = V / R`, `P = V * I`. Callers guarantee `resistance > 0`.
#[inline]
pub fn compute(voltage: f64, resistance: f64) -> CircuitOutputs {
    let current = voltage / resistance;
    CircuitOutputs {
        current,
        power: voltage * current,
    }
}

#[inline]
pub fn clamp_voltage(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(VOLTAGE_MIN, VOLTAGE_MAX)
    } else {
        DEFAULT_VOLTAGE
    }
}

#[inline]
pub fn clamp_resistance(r: f64) -> f64 {
    if r.is_finite() {
        r.clamp(RESISTANCE_MIN, RESISTANCE_MAX)
    } else {
        DEFAULT_RESISTANCE
    }
}

/// Round to the nearest slider step, then clamp.
#[inline]
pub fn snap_voltage(v: f64) -> f64 {
    clamp_voltage((v / VOLTAGE_STEP).round() * VOLTAGE_STEP)
}

#[inline]
pub fn snap_resistance(r: f64) -> f64 {
    clamp_resistance((r / RESISTANCE_STEP).round() * RESISTANCE_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_load_state() {
        let inputs = CircuitInputs::default();
        assert_eq!(inputs.voltage, 12.0);
        assert_eq!(inputs.resistance, 10.0);
        let out = inputs.outputs();
        assert!((out.current - 1.2).abs() < 1e-12);
        assert!((out.power - 14.4).abs() < 1e-9);
        assert_eq!(out.current_milliamps(), 1200);
    }

    #[test]
    fn new_clamps_and_replaces_non_finite() {
        let inputs = CircuitInputs::new(99.0, 0.0);
        assert_eq!(inputs.voltage, VOLTAGE_MAX);
        assert_eq!(inputs.resistance, RESISTANCE_MIN);

        let inputs = CircuitInputs::new(f64::NAN, f64::INFINITY);
        assert_eq!(inputs.voltage, DEFAULT_VOLTAGE);
        assert_eq!(inputs.resistance, DEFAULT_RESISTANCE);

        let inputs = CircuitInputs::new(-3.0, -1.0);
        assert_eq!(inputs.voltage, 0.0);
        assert_eq!(inputs.resistance, 1.0);
    }

    #[test]
    fn try_new_rejects_zero_resistance() {
        let err = CircuitInputs::try_new(5.0, 0.0).unwrap_err();
        assert!(matches!(err, CircuitError::ResistanceOutOfRange { .. }));
        assert!(matches!(
            CircuitInputs::try_new(f64::NAN, 10.0),
            Err(CircuitError::NonFiniteVoltage(_))
        ));
        assert!(matches!(
            CircuitInputs::try_new(25.0, 10.0),
            Err(CircuitError::VoltageOutOfRange { .. })
        ));
        assert!(CircuitInputs::try_new(24.0, 1.0).is_ok());
    }

    #[test]
    fn snapping_follows_slider_steps() {
        assert_eq!(snap_voltage(3.74), 3.5);
        assert_eq!(snap_voltage(3.76), 4.0);
        assert_eq!(snap_voltage(30.0), 24.0);
        assert_eq!(snap_resistance(42.4), 42.0);
        assert_eq!(snap_resistance(0.2), 1.0);
    }
}
