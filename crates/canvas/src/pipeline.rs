//! The single render pipeline everything on the canvas is drawn with.
//!
//! Group 0 holds the viewport projection, group 1 the glyph mask atlas and its sampler.
use graphics::Vertex;
use wgpu::{BindGroup, BindGroupLayout, Device, Queue, TextureView, util::DeviceExt};

use crate::projection::Projection;

#[derive(Debug)]
pub struct DrawPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    projection_layout: BindGroupLayout,
    mask_layout: BindGroupLayout,
    mask_sampler: wgpu::Sampler,
}

/// Bind groups matching the layouts of a [`DrawPipeline`].
#[derive(Debug)]
pub struct Binds {
    pub projection: ProjectionUniform,
    pub glyph_mask: BindGroup,
}

impl DrawPipeline {
    pub fn new(device: &Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("shaders/canvas.wgsl"));

        let projection_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("projection bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        // The mask is R8Unorm and sampled texel exact, so no filtering is needed.
        let mask_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glyph mask bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });
        let mask_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph mask sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("canvas pipeline layout"),
            bind_group_layouts: &[&projection_layout, &mask_layout],
            push_constant_ranges: &[],
        });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("canvas pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Vertex colors are premultiplied.
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            projection_layout,
            mask_layout,
            mask_sampler,
        }
    }

    pub fn new_binds(&self, device: &Device, projection: &Projection, glyph_mask: &TextureView) -> Binds {
        Binds {
            projection: ProjectionUniform::new(device, &self.projection_layout, projection),
            glyph_mask: self.glyph_mask_bind_group(device, glyph_mask),
        }
    }

    /// Needed again whenever the atlas texture was replaced by a larger one.
    pub fn glyph_mask_bind_group(&self, device: &Device, glyph_mask: &TextureView) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glyph mask bind group"),
            layout: &self.mask_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(glyph_mask),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.mask_sampler),
                },
            ],
        })
    }
}

/// The uniform buffer holding the viewport to clip space matrix.
#[derive(Debug)]
pub struct ProjectionUniform {
    buffer: wgpu::Buffer,
    pub bind_group: BindGroup,
}

impl ProjectionUniform {
    fn new(device: &Device, layout: &BindGroupLayout, projection: &Projection) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection uniform"),
            contents: bytemuck::cast_slice(&projection.viewport_to_uv().to_arrays()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &Queue, projection: &Projection) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&projection.viewport_to_uv().to_arrays()),
        );
    }
}
