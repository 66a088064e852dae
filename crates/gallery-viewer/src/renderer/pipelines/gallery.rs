//! Render pipeline for the distorted gallery planes.

use crate::data::types::{ItemGpu, ItemUniformStd140, PlaneVertex};
use wgpu::util::DeviceExt;

/// Segments per side of an item plane. The vertex stage bends the surface,
/// so the mesh needs real subdivision.
pub const PLANE_SEGMENTS: u32 = 20;

pub struct GalleryPipeline {
    pipeline: wgpu::RenderPipeline,
    item_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    plane_vb: wgpu::Buffer,
    plane_ib: wgpu::Buffer,
    index_count: u32,
}

impl GalleryPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
    ) -> Self {
        let item_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Gallery Item BGL"),
            entries: &[
                // Per-item uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<
                            ItemUniformStd140,
                        >()
                            as u64),
                    },
                    count: None,
                },
                // Image texture
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Displacement texture (shared across items)
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaders/gallery.wgsl"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/gallery.wgsl").into()),
        });

        let (vertices, indices) = plane_grid(PLANE_SEGMENTS);
        let plane_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gallery Plane VB"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let plane_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gallery Plane IB"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Gallery Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Gallery PipelineLayout"),
            bind_group_layouts: &[&item_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Gallery Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PlaneVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            shader_location: 0,
                            offset: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            shader_location: 1,
                            offset: 8,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The planes bend, so both faces can come into view.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_fmt,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_fmt,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            pipeline,
            item_layout,
            sampler,
            plane_vb,
            plane_ib,
            index_count: indices.len() as u32,
        }
    }

    /// Builds the GPU half of one gallery item: its uniform buffer plus the
    /// bind group tying it to the image and displacement textures.
    pub fn create_item(
        &self,
        device: &wgpu::Device,
        image: &wgpu::TextureView,
        displacement: &wgpu::TextureView,
        uniform: &ItemUniformStd140,
        label: &str,
    ) -> ItemGpu {
        let ubo_label = format!("Item UBO {label}");
        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&ubo_label),
            contents: bytemuck::bytes_of(uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_label = format!("Item Bind {label}");
        let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&bind_label),
            layout: &self.item_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(image),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(displacement),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        ItemGpu { ubo, bind }
    }

    pub fn draw_item<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, item: &'a ItemGpu) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &item.bind, &[]);
        rpass.set_vertex_buffer(0, self.plane_vb.slice(..));
        rpass.set_index_buffer(self.plane_ib.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Unit plane spanning [-0.5, 0.5]^2 subdivided `segments` times per side.
/// Texture v runs 0 at the top so image rows land the right way up.
pub fn plane_grid(segments: u32) -> (Vec<PlaneVertex>, Vec<u16>) {
    let side = segments + 1;
    let mut vertices = Vec::with_capacity((side * side) as usize);
    for row in 0..side {
        for col in 0..side {
            let fx = col as f32 / segments as f32;
            let fy = row as f32 / segments as f32;
            vertices.push(PlaneVertex {
                corner: [fx - 0.5, fy - 0.5],
                uv: [fx, 1.0 - fy],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for row in 0..segments {
        for col in 0..segments {
            let i = (row * side + col) as u16;
            let right = i + 1;
            let above = i + side as u16;
            let above_right = above + 1;
            indices.extend_from_slice(&[i, right, above_right, i, above_right, above]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_grid_has_the_expected_counts() {
        let (vertices, indices) = plane_grid(PLANE_SEGMENTS);
        let side = PLANE_SEGMENTS + 1;
        assert_eq!(vertices.len(), (side * side) as usize);
        assert_eq!(indices.len(), (PLANE_SEGMENTS * PLANE_SEGMENTS * 6) as usize);
        let max = *indices.iter().max().unwrap();
        assert!((max as usize) < vertices.len());
    }

    #[test]
    fn plane_grid_spans_the_unit_square_with_v_flipped() {
        let (vertices, _) = plane_grid(2);
        let first = vertices.first().unwrap();
        let last = vertices.last().unwrap();
        assert_eq!(first.corner, [-0.5, -0.5]);
        assert_eq!(first.uv, [0.0, 1.0]);
        assert_eq!(last.corner, [0.5, 0.5]);
        assert_eq!(last.uv, [1.0, 0.0]);
    }

    #[test]
    fn plane_grid_triangles_stay_inside_one_quad() {
        let (vertices, indices) = plane_grid(3);
        // Every triangle's corners must sit within one cell of each other.
        for tri in indices.chunks(3) {
            let xs: Vec<f32> = tri.iter().map(|&i| vertices[i as usize].corner[0]).collect();
            let ys: Vec<f32> = tri.iter().map(|&i| vertices[i as usize].corner[1]).collect();
            let dx = xs.iter().cloned().fold(f32::MIN, f32::max)
                - xs.iter().cloned().fold(f32::MAX, f32::min);
            let dy = ys.iter().cloned().fold(f32::MIN, f32::max)
                - ys.iter().cloned().fold(f32::MAX, f32::min);
            assert!(dx <= 1.0 / 3.0 + 1e-6);
            assert!(dy <= 1.0 / 3.0 + 1e-6);
        }
    }
}
