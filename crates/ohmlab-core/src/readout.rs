use crate::circuit::{CircuitInputs, CircuitOutputs};

/// Fixed-precision display strings for one circuit state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readouts {
    pub voltage: String,
    pub resistance: String,
    pub current: String,
    pub milliamps: String,
    pub power: String,
    /// "1.20 A (1200 mA)", shown under the 3D scene.
    pub current_label: String,
    /// Labels floating above the battery and the resistor.
    pub battery_label: String,
    pub resistor_label: String,
}

impl Readouts {
    pub fn new(inputs: &CircuitInputs, outputs: &CircuitOutputs) -> Self {
        let ma = outputs.current_milliamps();
        Self {
            voltage: format!("{:.1} V", inputs.voltage),
            resistance: format!("{:.1} Ω", inputs.resistance),
            current: format!("{:.2} A", outputs.current),
            milliamps: format!("{ma} mA"),
            power: format!("{:.2} W", outputs.power),
            current_label: format!("{:.2} A ({ma} mA)", outputs.current),
            battery_label: format!("{:.1} V", inputs.voltage),
            resistor_label: format!("{} Ω", trim_number(inputs.resistance)),
        }
    }
}

/// Shortest decimal form: `10` for 10.0, `12.5` for 12.5.
pub fn trim_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_readouts() {
        let inputs = CircuitInputs::default();
        let r = Readouts::new(&inputs, &inputs.outputs());
        assert_eq!(r.voltage, "12.0 V");
        assert_eq!(r.resistance, "10.0 Ω");
        assert_eq!(r.current, "1.20 A");
        assert_eq!(r.milliamps, "1200 mA");
        assert_eq!(r.power, "14.40 W");
        assert_eq!(r.current_label, "1.20 A (1200 mA)");
        assert_eq!(r.resistor_label, "10 Ω");
    }

    #[test]
    fn small_currents_round_to_milliamps() {
        let inputs = CircuitInputs::new(0.5, 100.0);
        let r = Readouts::new(&inputs, &inputs.outputs());
        assert_eq!(r.current, "0.01 A");
        assert_eq!(r.milliamps, "5 mA");
        assert_eq!(r.power, "0.00 W");
    }

    #[test]
    fn trim_number_drops_zero_fraction() {
        assert_eq!(trim_number(10.0), "10");
        assert_eq!(trim_number(12.5), "12.5");
    }
}
