use super::helpers;
use super::targets::HDR_FORMAT;
use super::uniforms::SceneUniforms;

/// Full-screen circuit pass. `hdr_pipeline` feeds the bloom chain,
/// `direct_pipeline` draws straight to the swapchain when bloom is unavailable.
pub(crate) struct SceneResources {
    pub(crate) hdr_pipeline: wgpu::RenderPipeline,
    pub(crate) direct_pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(ohmlab_core::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let hdr_pipeline = helpers::make_fullscreen_pipeline(
        device,
        "scene_hdr_pipeline",
        &pl,
        &shader,
        "fs_scene",
        HDR_FORMAT,
        None,
    );
    let direct_pipeline = helpers::make_fullscreen_pipeline(
        device,
        "scene_direct_pipeline",
        &pl,
        &shader,
        "fs_scene",
        swap_format,
        None,
    );
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "scene_uniforms",
        std::mem::size_of::<SceneUniforms>(),
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    SceneResources {
        hdr_pipeline,
        direct_pipeline,
        uniform_buffer,
        bind_group,
    }
}

pub(crate) fn draw(
    encoder: &mut wgpu::CommandEncoder,
    scene: &SceneResources,
    pipeline: &wgpu::RenderPipeline,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
) {
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("scene_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    rpass.set_pipeline(pipeline);
    rpass.set_bind_group(0, &scene.bind_group, &[]);
    rpass.draw(0..3, 0..1);
}
