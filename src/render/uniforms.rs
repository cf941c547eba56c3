// Uniform layout of the scene shader, packed from projected primitives.
// Mirrors `SceneUniforms` in `scene.wgsl`; every member is a vec4 multiple so
// the uniform layout rules add no padding.

use ohmlab_core::{ScenePrimitives, MAX_CAPSULES, MAX_DOTS, MAX_PUFFS};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CapsuleGpu {
    pub ab: [f32; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DotGpu {
    pub center_radius: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PuffGpu {
    pub center_radius: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub aspect: f32,
    pub counts: [u32; 4],
    pub light: [f32; 4],
    pub light_color: [f32; 4],
    pub clear_color: [f32; 4],
    pub capsules: [CapsuleGpu; MAX_CAPSULES],
    pub dots: [DotGpu; MAX_DOTS],
    pub puffs: [PuffGpu; MAX_PUFFS],
}

/// Per-frame values that do not come from the scene itself.
#[derive(Copy, Clone, Debug)]
pub struct FrameParams {
    pub width: u32,
    pub height: u32,
    pub time: f32,
    pub clear_color: [f32; 4],
    pub antialias: bool,
}

impl SceneUniforms {
    pub fn pack(prims: &ScenePrimitives, frame: &FrameParams) -> Self {
        let mut u: Self = bytemuck::Zeroable::zeroed();
        let w = frame.width.max(1) as f32;
        let h = frame.height.max(1) as f32;
        u.resolution = [w, h];
        u.time = frame.time;
        u.aspect = w / h;
        u.clear_color = frame.clear_color;

        let mut n_caps = 0;
        for (dst, c) in u.capsules.iter_mut().zip(prims.capsules.iter()) {
            *dst = CapsuleGpu {
                ab: [c.a.x, c.a.y, c.b.x, c.b.y],
                color: c.color.to_array(),
                params: [c.radius, c.glow, 0.0, 0.0],
            };
            n_caps += 1;
        }
        let mut n_dots = 0;
        for (dst, d) in u.dots.iter_mut().zip(prims.dots.iter()) {
            *dst = DotGpu {
                center_radius: [d.center.x, d.center.y, d.radius, d.glow],
                color: d.color.to_array(),
            };
            n_dots += 1;
        }
        let mut n_puffs = 0;
        for (dst, p) in u.puffs.iter_mut().zip(prims.puffs.iter()) {
            *dst = PuffGpu {
                center_radius: [p.center.x, p.center.y, p.radius, p.rotation],
                color: p.color.to_array(),
            };
            n_puffs += 1;
        }
        u.counts = [n_caps, n_dots, n_puffs, frame.antialias as u32];

        if let Some(light) = &prims.light {
            u.light = [light.center.x, light.center.y, light.radius, light.intensity];
            u.light_color = light.color.extend(1.0).to_array();
        }
        u
    }
}
