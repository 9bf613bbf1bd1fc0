use super::helpers::{self, ScenePipelineDesc};
use crate::constants::*;
use crate::core::geometry::{hex_rgb, PlaneVertex, SceneGeometry, ShellVertex, StarVertex};
use crate::core::{Camera, FrameUpdate};
use smallvec::SmallVec;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    eye_fog: [f32; 4],
    times: [f32; 4],
    viewport: [f32; 4],
    nebula: [f32; 4],
    nebula_a: [f32; 4],
    nebula_b: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn new(frame: &FrameUpdate, width: u32, height: u32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera = Camera::for_frame(frame, aspect);
        let eye = camera.eye;
        let a = hex_rgb(NEBULA_COLOR_A);
        let b = hex_rgb(NEBULA_COLOR_B);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            eye_fog: [eye.x, eye.y, eye.z, FOG_DENSITY],
            times: [
                frame.clock.star_time(),
                frame.clock.nebula_time(),
                frame.clock.atmosphere_pulse(),
                0.0,
            ],
            viewport: [width as f32, height as f32, 0.0, 0.0],
            nebula: [frame.nebula_depth, NEBULA_OPACITY, 0.0, 0.0],
            nebula_a: [a[0], a[1], a[2], 1.0],
            nebula_b: [b[0], b[1], b[2], 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LayerUniforms {
    offset_opacity: [f32; 4],
    color: [f32; 4],
}

struct MountainLayer {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 3],
    opacity: f32,
}

struct IndexedBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl IndexedBuffers {
    fn destroy(&self) {
        self.vertices.destroy();
        self.indices.destroy();
    }
}

/// GPU copies of the scene content plus the pipelines that draw it.
pub(crate) struct SceneResources {
    uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    star_pipeline: wgpu::RenderPipeline,
    nebula_pipeline: wgpu::RenderPipeline,
    mountain_pipeline: wgpu::RenderPipeline,
    atmosphere_pipeline: wgpu::RenderPipeline,
    stars: wgpu::Buffer,
    star_count: u32,
    nebula: IndexedBuffers,
    atmosphere: IndexedBuffers,
    mountains: Vec<MountainLayer>,
}

impl SceneResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        geometry: &SceneGeometry,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let layer_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("layer_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let mountain_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mountain_pl"),
            bind_group_layouts: &[&scene_bgl, &layer_bgl],
            push_constant_ranges: &[],
        });

        let star_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x3, 3 => Float32];
        let plane_attrs = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
        let shell_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let ridge_attrs = wgpu::vertex_attr_array![0 => Float32x2];

        let star_pipeline = helpers::make_scene_pipeline(
            device,
            &scene_pl,
            &shader,
            color_format,
            &ScenePipelineDesc {
                label: "star_pipeline",
                vs_entry: "vs_star",
                fs_entry: "fs_star",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StarVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &star_attrs,
                }],
                cull_mode: None,
                blend: helpers::additive_blend(),
            },
        );
        let nebula_pipeline = helpers::make_scene_pipeline(
            device,
            &scene_pl,
            &shader,
            color_format,
            &ScenePipelineDesc {
                label: "nebula_pipeline",
                vs_entry: "vs_nebula",
                fs_entry: "fs_nebula",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PlaneVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &plane_attrs,
                }],
                cull_mode: None,
                blend: helpers::additive_blend(),
            },
        );
        // Only the inside of the shell is drawn.
        let atmosphere_pipeline = helpers::make_scene_pipeline(
            device,
            &scene_pl,
            &shader,
            color_format,
            &ScenePipelineDesc {
                label: "atmosphere_pipeline",
                vs_entry: "vs_atmosphere",
                fs_entry: "fs_atmosphere",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ShellVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &shell_attrs,
                }],
                cull_mode: Some(wgpu::Face::Front),
                blend: helpers::additive_blend(),
            },
        );
        let mountain_pipeline = helpers::make_scene_pipeline(
            device,
            &mountain_pl,
            &shader,
            color_format,
            &ScenePipelineDesc {
                label: "mountain_pipeline",
                vs_entry: "vs_mountain",
                fs_entry: "fs_mountain",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ridge_attrs,
                }],
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );

        let stars = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stars"),
            contents: bytemuck::cast_slice(&geometry.stars),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let nebula = IndexedBuffers {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("nebula_vertices"),
                contents: bytemuck::cast_slice(&geometry.nebula.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("nebula_indices"),
                contents: bytemuck::cast_slice(&geometry.nebula.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: geometry.nebula.indices.len() as u32,
        };
        let atmosphere = IndexedBuffers {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("atmosphere_vertices"),
                contents: bytemuck::cast_slice(&geometry.atmosphere.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("atmosphere_indices"),
                contents: bytemuck::cast_slice(&geometry.atmosphere.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: geometry.atmosphere.indices.len() as u32,
        };
        let mountains = geometry
            .mountains
            .iter()
            .enumerate()
            .map(|(i, mesh)| {
                let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("mountain_{i}")),
                    contents: bytemuck::cast_slice(&mesh.triangles),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("mountain_{i}_uniforms")),
                    size: std::mem::size_of::<LayerUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("mountain_{i}_bg")),
                    layout: &layer_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniforms.as_entire_binding(),
                    }],
                });
                MountainLayer {
                    vertices,
                    vertex_count: mesh.triangles.len() as u32,
                    uniforms,
                    bind_group,
                    color: mesh.color,
                    opacity: mesh.opacity,
                }
            })
            .collect();

        log::info!(
            "[gpu] scene uploaded: {} stars, {} mountain layers",
            geometry.stars.len(),
            geometry.mountains.len()
        );

        Self {
            uniform_buffer,
            scene_bind_group,
            star_pipeline,
            nebula_pipeline,
            mountain_pipeline,
            atmosphere_pipeline,
            star_count: geometry.stars.len() as u32,
            stars,
            nebula,
            atmosphere,
            mountains,
        }
    }

    /// Upload this frame's uniforms. Must run before `draw` records its pass.
    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        frame: &FrameUpdate,
        width: u32,
        height: u32,
    ) {
        let uniforms = SceneUniforms::new(frame, width, height);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        for layer in &frame.layers {
            if let Some(gpu) = self.mountains.get(layer.index) {
                let p = layer.position();
                let u = LayerUniforms {
                    offset_opacity: [p.x, p.y, p.z, gpu.opacity],
                    color: [gpu.color[0], gpu.color[1], gpu.color[2], 1.0],
                };
                queue.write_buffer(&gpu.uniforms, 0, bytemuck::bytes_of(&u));
            }
        }
    }

    /// Record scene draws: atmosphere, stars, nebula, then mountains far to near.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, frame: &FrameUpdate) {
        pass.set_bind_group(0, &self.scene_bind_group, &[]);

        pass.set_pipeline(&self.atmosphere_pipeline);
        pass.set_vertex_buffer(0, self.atmosphere.vertices.slice(..));
        pass.set_index_buffer(self.atmosphere.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.atmosphere.index_count, 0, 0..1);

        pass.set_pipeline(&self.star_pipeline);
        pass.set_vertex_buffer(0, self.stars.slice(..));
        pass.draw(0..6, 0..self.star_count);

        pass.set_pipeline(&self.nebula_pipeline);
        pass.set_vertex_buffer(0, self.nebula.vertices.slice(..));
        pass.set_index_buffer(self.nebula.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.nebula.index_count, 0, 0..1);

        let mut order: SmallVec<[(usize, f32); 4]> = frame
            .layers
            .iter()
            .filter(|l| !l.is_parked())
            .map(|l| (l.index, l.current_depth))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));

        pass.set_pipeline(&self.mountain_pipeline);
        for (index, _) in order {
            if let Some(layer) = self.mountains.get(index) {
                pass.set_bind_group(1, &layer.bind_group, &[]);
                pass.set_vertex_buffer(0, layer.vertices.slice(..));
                pass.draw(0..layer.vertex_count, 0..1);
            }
        }
    }

    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.stars.destroy();
        self.nebula.destroy();
        self.atmosphere.destroy();
        for layer in &self.mountains {
            layer.vertices.destroy();
            layer.uniforms.destroy();
        }
    }
}
