// Host-side tests for scene uniform packing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod uniforms {
    include!("../src/render/uniforms.rs");
}

use ohmlab_core::*;
use uniforms::*;

fn frame(antialias: bool) -> FrameParams {
    FrameParams {
        width: 1600,
        height: 900,
        time: 2.0,
        clear_color: [0.1, 0.1, 0.2, 1.0],
        antialias,
    }
}

#[test]
fn layout_is_vec4_aligned() {
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<CapsuleGpu>(), 48);
    assert_eq!(std::mem::size_of::<DotGpu>(), 32);
    assert_eq!(std::mem::size_of::<PuffGpu>(), 32);
}

#[test]
fn packs_the_default_scene() {
    let layout = SceneLayout::default();
    let sim = Simulator::default();
    let snap = sim.snapshot();
    let top = FlowTrail::new(&layout.top_wire, snap.visuals.budget.trail, 1);
    let camera = OrbitCamera::default().camera(16.0 / 9.0);
    let prims = build_primitives(&layout, &camera, &snap, &[&top], None, 0.0);

    let u = SceneUniforms::pack(&prims, &frame(true));
    assert_eq!(u.counts[0] as usize, prims.capsules.len());
    assert_eq!(u.counts[1] as usize, prims.dots.len());
    assert_eq!(u.counts[2], 0);
    assert_eq!(u.counts[3], 1);
    assert!((u.aspect - 16.0 / 9.0).abs() < 1e-6);

    let c = prims.capsules[0];
    assert_eq!(u.capsules[0].ab, [c.a.x, c.a.y, c.b.x, c.b.y]);
    assert_eq!(u.capsules[0].params[0], c.radius);

    let light = prims.light.unwrap();
    assert_eq!(u.light[3], light.intensity);
    assert_eq!(u.light_color[3], 1.0);
}

#[test]
fn empty_scene_packs_to_zero_counts() {
    let u = SceneUniforms::pack(&ScenePrimitives::default(), &frame(false));
    assert_eq!(u.counts, [0, 0, 0, 0]);
    assert_eq!(u.light, [0.0; 4]);
}
