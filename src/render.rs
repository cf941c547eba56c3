use crate::constants::{BLOOM_EXPOSURE, CLEAR_RGB};
use ohmlab_core::{ScenePrimitives, BLOOM_LUMINANCE_THRESHOLD};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
pub mod uniforms;

use post::{PostBindGroups, PostResources, PostUniforms};
use scene::SceneResources;
use targets::RenderTargets;
use uniforms::{FrameParams, SceneUniforms};

/// The bloom chain; absent when its pipelines failed validation.
struct Bloom {
    post: PostResources,
    targets: RenderTargets,
    sampler: wgpu::Sampler,
    bind_groups: PostBindGroups,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    bloom: Option<Bloom>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = scene::create_scene_resources(&device, format);
        let bloom = Self::create_bloom(&device, format, width, height).await;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            bloom,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0] as f64,
                g: CLEAR_RGB[1] as f64,
                b: CLEAR_RGB[2] as f64,
                a: 1.0,
            },
            time_accum: 0.0,
        })
    }

    async fn create_bloom(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Option<Bloom> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let post = post::create_post_resources(device, format);
        let targets = RenderTargets::new(device, width, height);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bind_groups = post::create_bind_groups(device, &post, &sampler, &targets);
        if let Some(err) = device.pop_error_scope().await {
            log::warn!("bloom disabled: {err}");
            return None;
        }
        Some(Bloom {
            post,
            targets,
            sampler,
            bind_groups,
        })
    }

    pub fn bloom_available(&self) -> bool {
        self.bloom.is_some()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            if let Some(b) = &mut self.bloom {
                b.targets.recreate(&self.device, width, height);
                b.bind_groups =
                    post::create_bind_groups(&self.device, &b.post, &b.sampler, &b.targets);
            }
        }
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        prims: &ScenePrimitives,
        antialias: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let u = SceneUniforms::pack(
            prims,
            &FrameParams {
                width: self.width,
                height: self.height,
                time: self.time_accum,
                clear_color: [CLEAR_RGB[0], CLEAR_RGB[1], CLEAR_RGB[2], 1.0],
                antialias,
            },
        );
        self.queue
            .write_buffer(&self.scene.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        match &self.bloom {
            Some(b) => {
                let (bw, bh) = targets::bloom_size(self.width, self.height);
                post::write_uniforms(
                    &self.queue,
                    &b.post,
                    PostUniforms {
                        resolution: [bw as f32, bh as f32],
                        time: self.time_accum,
                        bloom_strength: prims.bloom,
                        blur_dir: [0.0, 0.0],
                        threshold: BLOOM_LUMINANCE_THRESHOLD,
                        exposure: BLOOM_EXPOSURE,
                    },
                );
                scene::draw(
                    &mut encoder,
                    &self.scene,
                    &self.scene.hdr_pipeline,
                    &b.targets.hdr_view,
                    self.clear_color,
                );
                post::blit(
                    &mut encoder,
                    "bright_pass",
                    &b.targets.bloom_a_view,
                    wgpu::Color::BLACK,
                    &b.post.bright_pipeline,
                    &b.bind_groups.hdr,
                    None,
                );
                post::blit(
                    &mut encoder,
                    "blur_h",
                    &b.targets.bloom_b_view,
                    wgpu::Color::BLACK,
                    &b.post.blur_pipeline,
                    &b.bind_groups.from_bloom_a,
                    None,
                );
                post::blit(
                    &mut encoder,
                    "blur_v",
                    &b.targets.bloom_a_view,
                    wgpu::Color::BLACK,
                    &b.post.blur_pipeline,
                    &b.bind_groups.from_bloom_b,
                    None,
                );
                post::blit(
                    &mut encoder,
                    "composite",
                    &view,
                    self.clear_color,
                    &b.post.composite_pipeline,
                    &b.bind_groups.hdr,
                    Some(&b.bind_groups.bloom_a_only),
                );
            }
            None => scene::draw(
                &mut encoder,
                &self.scene,
                &self.scene.direct_pipeline,
                &view,
                self.clear_color,
            ),
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
