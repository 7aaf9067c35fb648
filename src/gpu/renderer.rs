//! GPU renderer for the particle backdrop.
//!
//! Draws the particle field as camera-facing quads in a single instanced call.
//! The renderer only needs a device, queue and target format, so the windowed
//! and offline paths share it; all animation state lives in [`Backdrop`].

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::backdrop::Backdrop;
use crate::gpu::pipeline;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ParticleUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    color: [f32; 4],
    // x = particle size in world units, yzw padding
    params: [f32; 4],
}

impl ParticleUniforms {
    fn from_backdrop(backdrop: &Backdrop) -> Self {
        let camera = backdrop.camera();
        let config = backdrop.config();
        let right = camera.right();
        let up = camera.camera_up();

        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            model: backdrop.field().model_matrix().to_cols_array_2d(),
            camera_right: [right.x, right.y, right.z, 0.0],
            camera_up: [up.x, up.y, up.z, 0.0],
            color: [
                config.point_color[0],
                config.point_color[1],
                config.point_color[2],
                config.point_opacity,
            ],
            params: [config.point_size, 0.0, 0.0, 0.0],
        }
    }
}

pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    particle_pipeline: wgpu::RenderPipeline,
    #[allow(dead_code)]
    particle_bind_group_layout: wgpu::BindGroupLayout,
    particle_uniform_buffer: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    clear_color: wgpu::Color,
    #[allow(dead_code)]
    format: wgpu::TextureFormat,
}

impl Renderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        backdrop: &Backdrop,
    ) -> Self {
        let uniforms = ParticleUniforms::from_backdrop(backdrop);
        let particle_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let particle_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ParticleUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
                label: Some("particle_bind_group_layout"),
            });

        let particle_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &particle_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: particle_uniform_buffer.as_entire_binding(),
            }],
            label: Some("particle_bind_group"),
        });

        let particle_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Pipeline Layout"),
                bind_group_layouts: &[&particle_bind_group_layout],
                push_constant_ranges: &[],
            });

        let particle_pipeline =
            pipeline::create_particle_pipeline(&device, &particle_pipeline_layout, format);

        // Quad geometry shared by every particle (4 vertices, 6 indices)
        let quad_vertices: [f32; 8] = [
            -0.5, -0.5, // bottom-left
            0.5, -0.5, // bottom-right
            0.5, 0.5, // top-right
            -0.5, 0.5, // top-left
        ];
        let quad_indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Quad Index Buffer"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Particle positions never change, so the instance buffer is filled
        // once here and only the uniforms are rewritten per frame
        let positions = backdrop.field().positions();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Instance Buffer"),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let clear = backdrop.config().clear_color;
        let clear_color = wgpu::Color {
            r: clear[0] as f64,
            g: clear[1] as f64,
            b: clear[2] as f64,
            a: clear[3] as f64,
        };

        Self {
            device,
            queue,
            particle_pipeline,
            particle_bind_group_layout,
            particle_uniform_buffer,
            particle_bind_group,
            quad_vertex_buffer,
            quad_index_buffer,
            instance_buffer,
            instance_count: positions.len() as u32,
            clear_color,
            format,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Render one frame of the backdrop into the given target view.
    pub fn render(&mut self, view: &wgpu::TextureView, backdrop: &Backdrop) {
        let uniforms = ParticleUniforms::from_backdrop(backdrop);
        self.queue.write_buffer(
            &self.particle_uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
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

            render_pass.set_pipeline(&self.particle_pipeline);
            render_pass.set_bind_group(0, &self.particle_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass
                .set_index_buffer(self.quad_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..6, 0, 0..self.instance_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
