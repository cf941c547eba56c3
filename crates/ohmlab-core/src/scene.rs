//! 3D layout of the circuit and its projection into screen-space primitives.
//!
//! The renderer draws signed-distance capsules, dots and smoke puffs in a
//! single full-screen pass, so everything here is flattened through the
//! camera on the CPU. Coordinates in [`ScenePrimitives`] are aspect-corrected
//! NDC (`x * aspect`, `y`), radii are in NDC-y units.

use crate::camera::Camera;
use crate::color::Color;
use crate::particles::{FlowTrail, SmokePlume};
use crate::readout::Readouts;
use crate::simulator::Snapshot;
use crate::visual::resistor_pulse;
use glam::{Vec2, Vec3, Vec4};
use smallvec::SmallVec;

pub const MAX_CAPSULES: usize = 12;
pub const MAX_DOTS: usize = 16;
pub const MAX_PUFFS: usize = 40;

const WIRE_RADIUS: f32 = 0.06;
const TRAIL_DOT_RADIUS: f32 = 0.12;
const BATTERY_HALF_HEIGHT: f32 = 1.2;
const BATTERY_RADIUS: f32 = 0.6;
const RESISTOR_HALF_LENGTH: f32 = 0.9;
const RESISTOR_RADIUS: f32 = 0.6;
const TERMINAL_RADIUS: f32 = 0.1;
const BATTERY_LEAD_OFFSET: f32 = 1.2;

const BATTERY_BODY_HEX: u32 = 0x2C3E50;
const TERMINAL_POS_HEX: u32 = 0xE74C3C;
const TERMINAL_NEG_HEX: u32 = 0x3498DB;
const TRAIL_HEX: u32 = 0xFFD700;
const TRAIL_EMISSIVE_HEX: u32 = 0xFFFF66;
const SMOKE_HEX: u32 = 0x444444;

/// Fixed positions of the circuit parts in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub battery: Vec3,
    pub resistor: Vec3,
    pub top_wire: [Vec3; 2],
    pub bottom_wire: [Vec3; 2],
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            battery: Vec3::new(-3.0, 0.0, 0.0),
            resistor: Vec3::new(3.0, 0.0, 0.0),
            top_wire: [Vec3::new(-2.0, 1.2, 0.0), Vec3::new(2.0, 1.2, 0.0)],
            bottom_wire: [Vec3::new(2.0, -1.2, 0.0), Vec3::new(-2.0, -1.2, 0.0)],
        }
    }
}

impl SceneLayout {
    fn battery_lead(&self) -> Vec3 {
        self.battery + Vec3::X * BATTERY_LEAD_OFFSET
    }

    fn resistor_lead(&self) -> Vec3 {
        self.resistor - Vec3::X * BATTERY_LEAD_OFFSET
    }

    /// The six wire runs forming the loop, battery → resistor → battery.
    pub fn wire_segments(&self) -> [(Vec3, Vec3); 6] {
        let [top_a, top_b] = self.top_wire;
        let [bottom_a, bottom_b] = self.bottom_wire;
        [
            (self.battery_lead(), top_a),
            (top_a, top_b),
            (top_b, self.resistor_lead()),
            (self.resistor_lead(), bottom_a),
            (bottom_a, bottom_b),
            (bottom_b, self.battery_lead()),
        ]
    }

    pub fn battery_label_anchor(&self) -> Vec3 {
        self.battery + Vec3::Y * 2.2
    }

    pub fn resistor_label_anchor(&self) -> Vec3 {
        self.resistor + Vec3::Y * 1.8
    }

    pub fn current_label_anchor(&self) -> Vec3 {
        Vec3::new(0.0, -3.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub a: Vec2,
    pub b: Vec2,
    pub radius: f32,
    pub color: Vec4,
    /// Emissive multiplier; values above 1 feed the bloom pass.
    pub glow: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec4,
    pub glow: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Puff {
    pub center: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Alpha carries the puff opacity.
    pub color: Vec4,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec3,
    pub intensity: f32,
}

/// A text label pinned to a world point, placed in CSS percent of the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub id: &'static str,
    pub text: String,
    pub css_percent: Option<Vec2>,
}

#[derive(Clone, Debug, Default)]
pub struct ScenePrimitives {
    pub capsules: SmallVec<[Capsule; MAX_CAPSULES]>,
    pub dots: SmallVec<[Dot; MAX_DOTS]>,
    pub puffs: Vec<Puff>,
    pub light: Option<PointLight>,
    pub labels: Vec<Label>,
    pub bloom: f32,
}

struct Projector<'a> {
    camera: &'a Camera,
}

impl Projector<'_> {
    fn point(&self, world: Vec3) -> Option<(Vec2, f32)> {
        self.camera
            .project(world)
            .map(|p| (p.view(self.camera.aspect), p.depth))
    }

    fn capsule(&self, a: Vec3, b: Vec3, radius: f32, color: Vec4, glow: f32) -> Option<Capsule> {
        let (pa, da) = self.point(a)?;
        let (pb, db) = self.point(b)?;
        let depth = 0.5 * (da + db);
        Some(Capsule {
            a: pa,
            b: pb,
            radius: self.camera.projected_radius(radius, depth),
            color,
            glow,
        })
    }

    fn dot(&self, center: Vec3, radius: f32, color: Vec4, glow: f32) -> Option<Dot> {
        let (c, depth) = self.point(center)?;
        Some(Dot {
            center: c,
            radius: self.camera.projected_radius(radius, depth),
            color,
            glow,
        })
    }
}

/// Flatten the circuit for one frame.
///
/// `trails` and `smoke` are the live particle systems; smoke is skipped
/// when the snapshot says it should not be visible.
pub fn build_primitives(
    layout: &SceneLayout,
    camera: &Camera,
    snap: &Snapshot,
    trails: &[&FlowTrail],
    smoke: Option<&SmokePlume>,
    time_sec: f32,
) -> ScenePrimitives {
    let proj = Projector { camera };
    let mut prims = ScenePrimitives {
        bloom: if snap.bloom_active {
            snap.visuals.bloom_intensity
        } else {
            0.0
        },
        ..Default::default()
    };

    let wire = snap.visuals.wire_color.to_color().to_vec4(1.0);
    for (a, b) in layout.wire_segments() {
        prims.capsules.extend(proj.capsule(a, b, WIRE_RADIUS, wire, 1.0));
    }

    // battery body with its two terminals
    let up = Vec3::Y * BATTERY_HALF_HEIGHT;
    prims.capsules.extend(proj.capsule(
        layout.battery - up,
        layout.battery + up,
        BATTERY_RADIUS,
        Color::from_hex(BATTERY_BODY_HEX).to_vec4(1.0),
        0.0,
    ));
    let term = Vec3::X * 0.3;
    let top = layout.battery + Vec3::Y * 1.4;
    let bottom = layout.battery - Vec3::Y * 1.4;
    prims.capsules.extend(proj.capsule(
        top - term,
        top + term,
        TERMINAL_RADIUS,
        Color::from_hex(TERMINAL_POS_HEX).to_vec4(1.0),
        0.2,
    ));
    prims.capsules.extend(proj.capsule(
        bottom - term * 1.3,
        bottom + term * 1.3,
        TERMINAL_RADIUS,
        Color::from_hex(TERMINAL_NEG_HEX).to_vec4(1.0),
        0.2,
    ));

    // resistor: vertical cylinder that swells slightly as it heats
    let heat = &snap.visuals.heat;
    let pulse = resistor_pulse(heat.color_ratio, time_sec);
    let axis = Vec3::Y * RESISTOR_HALF_LENGTH * pulse;
    prims.capsules.extend(proj.capsule(
        layout.resistor - axis,
        layout.resistor + axis,
        RESISTOR_RADIUS * pulse,
        heat.emissive_color.to_vec4(1.0),
        heat.emissive_intensity,
    ));
    if let Some((center, depth)) = proj.point(layout.resistor + Vec3::Y * 0.6) {
        prims.light = Some(PointLight {
            center,
            radius: camera.projected_radius(6.0, depth),
            color: heat.light_color.to_vec3(),
            intensity: heat.light_intensity,
        });
    }

    let dot_color = Color::from_hex(TRAIL_HEX)
        .lerp(Color::from_hex(TRAIL_EMISSIVE_HEX), 0.5)
        .to_vec4(1.0);
    'trails: for trail in trails {
        for p in trail.positions() {
            if prims.dots.len() >= MAX_DOTS {
                break 'trails;
            }
            prims.dots.extend(proj.dot(p, TRAIL_DOT_RADIUS, dot_color, 1.2));
        }
    }

    if snap.smoke_visible {
        if let Some(plume) = smoke {
            let base = Color::from_hex(SMOKE_HEX);
            for s in plume.samples().take(MAX_PUFFS) {
                if let Some((center, depth)) = proj.point(s.position) {
                    prims.puffs.push(Puff {
                        center,
                        radius: camera.projected_radius(0.5 * s.scale, depth),
                        rotation: s.rotation,
                        color: base.to_vec4(s.opacity),
                    });
                }
            }
        }
    }

    let readouts = Readouts::new(&snap.inputs, &snap.outputs);
    let pin = |id: &'static str, text: String, world: Vec3| Label {
        id,
        text,
        css_percent: camera.project(world).map(|p| p.css_percent()),
    };
    prims.labels = vec![
        pin(
            "label-battery",
            readouts.battery_label,
            layout.battery_label_anchor(),
        ),
        pin(
            "label-resistor",
            readouts.resistor_label,
            layout.resistor_label_anchor(),
        ),
        pin(
            "label-current",
            readouts.current_label,
            layout.current_label_anchor(),
        ),
    ];

    prims
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use crate::simulator::Simulator;

    fn trails(layout: &SceneLayout, count: usize) -> (FlowTrail, FlowTrail) {
        (
            FlowTrail::new(&layout.top_wire, count, 1),
            FlowTrail::new(&layout.bottom_wire, count, 2),
        )
    }

    #[test]
    fn wire_loop_is_closed() {
        let segs = SceneLayout::default().wire_segments();
        for w in segs.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
        assert_eq!(segs[5].1, segs[0].0);
    }

    #[test]
    fn front_view_has_every_part() {
        let layout = SceneLayout::default();
        let camera = OrbitCamera::default().camera(16.0 / 9.0);
        let snap = Simulator::default().snapshot();
        let (top, bottom) = trails(&layout, snap.visuals.budget.trail);
        let plume = SmokePlume::new(layout.resistor, snap.visuals.budget.smoke, 3);
        let prims = build_primitives(&layout, &camera, &snap, &[&top, &bottom], Some(&plume), 0.0);
        // six wires, battery, two terminals, resistor
        assert_eq!(prims.capsules.len(), 10);
        assert_eq!(prims.dots.len(), 16);
        assert_eq!(prims.puffs.len(), 40);
        assert!(prims.light.is_some());
        assert!((prims.bloom - snap.visuals.bloom_intensity).abs() < 1e-6);
        assert_eq!(prims.labels[2].text, "1.20 A (1200 mA)");
        assert!(prims.labels.iter().all(|l| l.css_percent.is_some()));
    }

    #[test]
    fn resistor_sits_right_of_battery_on_screen() {
        let layout = SceneLayout::default();
        let camera = OrbitCamera::default().camera(1.0);
        let snap = Simulator::default().snapshot();
        let prims = build_primitives(&layout, &camera, &snap, &[], None, 0.0);
        let battery = prims.capsules[6];
        let resistor = prims.capsules[9];
        assert!(resistor.a.x > battery.a.x);
        assert!(resistor.radius > 0.0);
    }

    #[test]
    fn smoke_and_bloom_follow_snapshot_toggles() {
        let layout = SceneLayout::default();
        let camera = OrbitCamera::default().camera(1.0);
        let mut sim = Simulator::default();
        sim.set_smoke(false);
        sim.set_bloom(false);
        let snap = sim.snapshot();
        let plume = SmokePlume::new(layout.resistor, 10, 3);
        let prims = build_primitives(&layout, &camera, &snap, &[], Some(&plume), 0.0);
        assert!(prims.puffs.is_empty());
        assert_eq!(prims.bloom, 0.0);
    }
}
