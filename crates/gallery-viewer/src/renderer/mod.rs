//! Rendering orchestrator. Owns the GPU context, render targets, and the
//! scene pipelines; records and submits one pass per frame.

pub mod context;
pub mod pipelines;
pub mod targets;

use anyhow::Result;
use glam::Mat4;
use std::sync::Arc;
use winit::window::Window;

use self::context::GfxContext;
use self::pipelines::flat::FlatPipeline;
use self::pipelines::gallery::GalleryPipeline;
use self::targets::Targets;
use crate::data::types::ItemGpu;

/// The demo page background is white.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

pub struct Renderer {
    pub gfx: GfxContext,
    pub targets: Targets,
    pub gallery: GalleryPipeline,
    pub flat: FlatPipeline,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let gfx = GfxContext::new(window).await?;
        let targets = Targets::new(&gfx.device, gfx.size);
        let gallery = GalleryPipeline::new(&gfx.device, gfx.config.format, targets.depth_fmt);
        let flat = FlatPipeline::new(&gfx.device, gfx.config.format, targets.depth_fmt);
        let egui_renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            targets,
            gallery,
            flat,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
            self.targets.resize(&self.gfx.device, new_size);
        }
    }

    /// Clears to the page background and draws every item in index order.
    pub fn render_gallery(&mut self, swap_view: &wgpu::TextureView, items: &[ItemGpu]) {
        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Gallery Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for item in items {
                self.gallery.draw_item(&mut pass, item);
            }
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Draws the single colored quad of the orbit scene.
    pub fn render_plane(
        &mut self,
        swap_view: &wgpu::TextureView,
        model_view_proj: Mat4,
        color: [f32; 4],
    ) {
        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Plane Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.flat
                .draw(&mut pass, &self.gfx.queue, model_view_proj, color);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
