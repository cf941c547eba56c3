use ohmlab_core::diagram::render_svg;
use ohmlab_core::*;

#[test]
fn revision_tracks_real_changes_only() {
    let mut sim = Simulator::default();
    let r0 = sim.revision();
    assert!(!sim.set_voltage(12.0));
    assert_eq!(sim.revision(), r0);

    assert!(sim.set_voltage(12.3)); // snaps to 12.5
    assert_eq!(sim.inputs().voltage, 12.5);
    let r1 = sim.revision();
    assert!(r1 > r0);

    assert!(!sim.set_voltage(12.4));
    assert_eq!(sim.revision(), r1);
}

#[test]
fn keyboard_drives_the_same_actions_as_controls() {
    let mut sim = Simulator::default();
    for _ in 0..100 {
        let action = action_for_key("ArrowUp", true).unwrap();
        sim.apply(action);
    }
    assert_eq!(sim.inputs().voltage, VOLTAGE_MAX);
    for _ in 0..20 {
        sim.apply(action_for_key("ArrowLeft", true).unwrap());
    }
    assert_eq!(sim.inputs().resistance, RESISTANCE_MIN);

    let snap = sim.snapshot();
    assert_eq!(snap.outputs.power, 576.0);

    sim.apply(action_for_key("r", false).unwrap());
    assert_eq!(sim.inputs(), CircuitInputs::default());
}

#[test]
fn legend_key_leaves_simulator_untouched() {
    let mut sim = Simulator::default();
    let rev = sim.revision();
    assert!(!sim.apply(ControlAction::ToggleLegend));
    assert_eq!(sim.revision(), rev);
}

#[test]
fn missing_effects_disable_bloom_but_not_smoke() {
    let mut sim = Simulator::new(Settings::default(), false);
    assert!(sim.snapshot().bloom_active);
    sim.set_effects_available(false);
    let snap = sim.snapshot();
    assert!(!snap.bloom_active);
    assert!(snap.smoke_visible);
}

#[test]
fn constrained_device_starts_low_until_mode_is_forced() {
    let probe = StaticProbe(DeviceCapabilities {
        hardware_concurrency: Some(8),
        device_memory_gb: Some(8.0),
        user_agent: "Mozilla/5.0 (Linux; Android 14) Mobile".into(),
    });
    let mut sim = Simulator::new(Settings::default(), probe.capabilities().is_constrained());
    let snap = sim.snapshot();
    assert_eq!(snap.tier, PerformanceTier::Low);
    assert_eq!(snap.visuals.budget.smoke, SMOKE_COUNT_LOW);
    assert!(!snap.bloom_active);

    sim.set_performance_mode(PerformanceMode::High);
    let snap = sim.snapshot();
    assert_eq!(snap.visuals.budget.trail, TRAIL_COUNT_HIGH);
    assert!(snap.bloom_active);
}

#[test]
fn diagram_follows_the_snapshot() {
    let mut sim = Simulator::default();
    let svg = render_svg(&sim.snapshot());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("12V"));
    assert!(svg.contains("10Ω"));
    assert!(svg.contains("class=\"heat-wave\""));

    sim.set_voltage(0.0);
    let svg = render_svg(&sim.snapshot());
    assert!(!svg.contains("class=\"particle\""));
    assert!(!svg.contains("class=\"heat-wave\""));
    assert!(svg.contains("rgb(50, 50, 50)"));
}

#[test]
fn a_second_of_animation_stays_in_bounds() {
    let layout = SceneLayout::default();
    let sim = Simulator::default();
    let snap = sim.snapshot();
    let budget = snap.visuals.budget;
    let mut trail = FlowTrail::new(&layout.top_wire, budget.trail, 5);
    let mut plume = SmokePlume::new(layout.resistor, budget.smoke, 6);
    for _ in 0..60 {
        trail.step(1.0 / 60.0, snap.visuals.flow_speed as f32);
        plume.step(1.0 / 60.0, snap.visuals.smoke_intensity);
    }
    assert!(trail.phases().iter().all(|t| (0.0..=1.0).contains(t)));
    assert!(plume.samples().all(|s| (0.0..=1.0).contains(&s.opacity)));

    let camera = OrbitCamera::default().camera(1.5);
    let prims = build_primitives(&layout, &camera, &snap, &[&trail], Some(&plume), 1.0);
    assert!(prims.capsules.len() <= MAX_CAPSULES);
    assert!(prims.dots.len() <= MAX_DOTS);
    assert!(prims.puffs.len() <= MAX_PUFFS);
}

#[test]
fn per_view_calibration_heats_smoke_and_bloom_sooner() {
    let mut sim = Simulator::default();
    sim.set_voltage(6.0); // 3.6 W at 10 Ω
    let unified = sim.snapshot().visuals;

    let rev = sim.revision();
    assert!(sim.set_calibration(Calibration::per_view()));
    assert!(sim.revision() > rev);
    assert!(!sim.set_calibration(Calibration::per_view()));

    let per_view = sim.snapshot().visuals;
    assert_eq!(per_view.heat, unified.heat);
    assert!(per_view.smoke_intensity > unified.smoke_intensity);
    assert!(per_view.bloom_intensity > unified.bloom_intensity);
}
