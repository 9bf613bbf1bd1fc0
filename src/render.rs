use crate::constants::*;
use crate::core::{FrameUpdate, SceneGeometry, SceneRenderer};
use web_sys as web;
use wgpu;

mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources, PostUniforms};
use scene::SceneResources;
use targets::{RenderTargets, HDR_FORMAT};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    disposed: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        geometry: &SceneGeometry,
    ) -> anyhow::Result<Self> {
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

        let scene = SceneResources::new(&device, HDR_FORMAT, geometry);
        let targets = RenderTargets::new(&device, width, height);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let post_groups = post.bind_groups(&device, &targets);

        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
            disposed: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Reconfigure the surface after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        if !self.disposed {
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, frame_update: &FrameUpdate) -> Result<(), wgpu::SurfaceError> {
        if self.disposed {
            return Ok(());
        }
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.scene
            .write_uniforms(&self.queue, frame_update, self.width, self.height);
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.draw(&mut rpass, frame_update);
        }

        // Each pass gets its own encoder submission so the per-pass uniform
        // writes land in order.
        let (bw, bh) = targets::bloom_size(self.width, self.height);
        let mut uniforms = PostUniforms {
            resolution: [bw as f32, bh as f32],
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            bloom_radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
            exposure: TONE_MAPPING_EXPOSURE,
        };
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        self.queue.submit(Some(encoder.finish()));

        let passes = [
            ([1.0, 0.0], "blur_h", &self.targets.bloom_b_view, &self.post_groups.from_bloom_a),
            ([0.0, 1.0], "blur_v", &self.targets.bloom_a_view, &self.post_groups.from_bloom_b),
        ];
        for (dir, label, target, source) in passes {
            uniforms.blur_dir = dir;
            self.queue
                .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
            post::blit(
                &mut encoder,
                label,
                target,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                source,
                None,
            );
            self.queue.submit(Some(encoder.finish()));
        }

        uniforms.blur_dir = [0.0, 0.0];
        uniforms.resolution = [self.width as f32, self.height as f32];
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("composite"),
            });
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneRenderer for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, width: u32, height: u32) {
        self.resize_if_needed(width, height);
    }

    fn render_frame(&mut self, frame: &FrameUpdate) -> Result<(), Self::Error> {
        self.render(frame)
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scene.destroy();
        self.targets.destroy();
        self.post.uniform_buffer.destroy();
        log::info!("[teardown] GPU resources released");
    }
}
