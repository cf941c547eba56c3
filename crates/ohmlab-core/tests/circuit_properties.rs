use ohmlab_core::*;

/// Every slider position on both axes.
fn grid() -> impl Iterator<Item = (f64, f64)> {
    (0..=48).flat_map(|i| (1..=100).map(move |r| (i as f64 * VOLTAGE_STEP, r as f64)))
}

#[test]
fn outputs_follow_ohms_law_over_the_whole_domain() {
    for (v, r) in grid() {
        let out = compute(v, r);
        assert_eq!(out.current, v / r);
        assert_eq!(out.power, v * (v / r));
        assert!(out.current.is_finite() && out.current >= 0.0);
        assert!(out.power.is_finite() && out.power >= 0.0);
    }
}

#[test]
fn compute_is_pure() {
    for (v, r) in grid().step_by(37) {
        let a = compute(v, r);
        let b = compute(v, r);
        assert_eq!(a.current.to_bits(), b.current.to_bits());
        assert_eq!(a.power.to_bits(), b.power.to_bits());
    }
}

#[test]
fn current_and_power_are_monotonic() {
    for r in 1..=100 {
        let r = r as f64;
        let mut prev = compute(0.0, r);
        for i in 1..=48 {
            let next = compute(i as f64 * VOLTAGE_STEP, r);
            assert!(next.current >= prev.current);
            assert!(next.power >= prev.power);
            prev = next;
        }
    }
    for i in 0..=48 {
        let v = i as f64 * VOLTAGE_STEP;
        let mut prev = compute(v, 1.0);
        for r in 2..=100 {
            let next = compute(v, r as f64);
            assert!(next.current <= prev.current);
            prev = next;
        }
    }
}

#[test]
fn zero_volts_means_no_current_at_any_resistance() {
    for r in 1..=100 {
        let out = compute(0.0, r as f64);
        assert_eq!(out.current, 0.0);
        assert_eq!(out.power, 0.0);
    }
}

#[test]
fn maximum_stress_point() {
    let out = compute(24.0, 1.0);
    assert_eq!(out.current, 24.0);
    assert_eq!(out.power, 576.0);
}

#[test]
fn ratios_clamp_at_their_scales() {
    for v in [24.0, 30.0, 1e9] {
        assert_eq!(wire_color(v), wire_color(24.0));
    }
    let cal = Calibration::default();
    for p in [cal.heat_power, 100.0, 576.0] {
        assert_eq!(heat_mapping(p, cal.heat_power).color_ratio, 1.0);
    }
    assert!(heat_mapping(cal.heat_power * 0.5, cal.heat_power).color_ratio < 1.0);
}

#[test]
fn flow_speed_never_stops() {
    assert!((flow_speed(0.0) - 0.02).abs() < 1e-12);
    assert!(flow_speed(1.2) > flow_speed(0.0));
}

#[test]
fn default_scenario() {
    let inputs = CircuitInputs::default();
    assert_eq!((inputs.voltage, inputs.resistance), (12.0, 10.0));
    let out = inputs.outputs();
    assert!((out.current - 1.2).abs() < 1e-12);
    assert!((out.power - 14.4).abs() < 1e-9);
    assert_eq!(out.current_milliamps(), 1200);
}

#[test]
fn stress_scenario_clamps_every_visual() {
    let inputs = CircuitInputs::new(24.0, 1.0);
    let out = inputs.outputs();
    let budget = particle_budget(PerformanceMode::High, false);
    for cal in [Calibration::default(), Calibration::per_view()] {
        let vis = VisualMapping::derive(&inputs, &out, &cal, budget);
        assert_eq!(vis.heat.color_ratio, 1.0);
        assert!(vis.heat.emissive_intensity <= EMISSIVE_BASE + EMISSIVE_SPAN + 1e-6);
        assert!(vis.heat.light_intensity <= LIGHT_BASE + LIGHT_SPAN + 1e-6);
        assert!(vis.smoke_intensity <= 1.0);
        assert!(vis.bloom_intensity <= BLOOM_BASE + BLOOM_SPAN + 1e-6);
        assert!(vis.heat_overlay.alpha <= SVG_OVERLAY_ALPHA_MAX);
        assert!(vis.glow_radius <= GLOW_RADIUS_MAX);
    }
}

#[test]
fn constructors_clamp_or_reject() {
    let clamped = CircuitInputs::new(-3.0, 0.0);
    assert_eq!((clamped.voltage, clamped.resistance), (0.0, 1.0));
    let fallback = CircuitInputs::new(f64::NAN, f64::INFINITY);
    assert_eq!(fallback, CircuitInputs::default());
    assert!(CircuitInputs::try_new(12.0, 0.5).is_err());
    assert!(CircuitInputs::try_new(12.0, f64::NAN).is_err());
}
