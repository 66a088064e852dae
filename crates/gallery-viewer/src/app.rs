//! Application state and per-frame orchestration.

use anyhow::Result;
use pagespace::{ColumnLayout, SmoothScroll, Viewport};
use std::sync::Arc;
use std::time::Instant;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::camera::PageCamera;
use crate::config::{Config, SceneKind};
use crate::data::images::load_gallery_images;
use crate::data::textures;
use crate::data::types::ItemGpu;
use crate::input::InputCollector;
use crate::plane::{PlaneScene, PLANE_COLOR};
use crate::renderer::Renderer;
use crate::scene::{GalleryScene, Settings};
use crate::ui;

/// Everything the gallery mode owns besides the shared renderer.
pub struct GalleryRig {
    pub scene: GalleryScene,
    pub camera: PageCamera,
    pub scroll: SmoothScroll,
    pub input: InputCollector,
    pub settings: Settings,
    /// GPU items, index-aligned with `scene.items`.
    pub items_gpu: Vec<ItemGpu>,
}

impl GalleryRig {
    /// Preloads both asset halves behind a join barrier, then builds the
    /// scene and its GPU resources.
    fn new(renderer: &Renderer, viewport: Viewport, config: &Config) -> Result<Self> {
        let started = Instant::now();
        let max_dim = renderer.gfx.device.limits().max_texture_dimension_2d;
        let (images, displacement) = rayon::join(
            || load_gallery_images(&config.images_dir, max_dim),
            || textures::load_displacement(config.displacement.as_deref(), max_dim),
        );
        let displacement = displacement?;
        log::info!(
            "preload finished in {} ms | {} images + displacement",
            started.elapsed().as_millis(),
            images.len()
        );

        let camera = PageCamera::new(viewport);
        let scene = GalleryScene::new(viewport, ColumnLayout::default(), &images, &camera);

        let mut scroll = SmoothScroll::new(config.ease);
        scroll.set_limit(scene.scroll_limit());

        let device = &renderer.gfx.device;
        let queue = &renderer.gfx.queue;
        let displacement_view = textures::upload_rgba(
            device,
            queue,
            "Displacement Map",
            displacement.width,
            displacement.height,
            &displacement.rgba,
            false,
        );
        let items_gpu: Vec<ItemGpu> = images
            .iter()
            .zip(&scene.items)
            .map(|(img, item)| {
                let view = textures::upload_rgba(
                    device,
                    queue,
                    &img.label,
                    img.width,
                    img.height,
                    &img.rgba,
                    true,
                );
                renderer
                    .gallery
                    .create_item(device, &view, &displacement_view, &item.uniform, &img.label)
            })
            .collect();
        debug_assert_eq!(items_gpu.len(), scene.items.len());

        Ok(Self {
            scene,
            camera,
            scroll,
            input: InputCollector::new(),
            settings: Settings::default(),
            items_gpu,
        })
    }
}

pub enum SceneMode {
    Gallery(GalleryRig),
    Plane(PlaneScene),
}

pub struct App {
    pub renderer: Renderer,
    pub mode: SceneMode,
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
}

impl App {
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;
        let size = renderer.gfx.size;
        let viewport = Viewport::new(size.width.max(1) as f32, size.height.max(1) as f32);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        let mode = match config.scene {
            SceneKind::Gallery => SceneMode::Gallery(GalleryRig::new(&renderer, viewport, config)?),
            SceneKind::Plane => SceneMode::Plane(PlaneScene::new(viewport)),
        };

        Ok(Self {
            renderer,
            mode,
            egui_ctx,
            egui_state,
        })
    }

    /// Routes a window event. Returns true when the event was consumed by
    /// the UI layer and should not reach application shortcuts.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        match &mut self.mode {
            SceneMode::Gallery(rig) => {
                let response = self.egui_state.on_window_event(window, event);
                // The picking ray follows the cursor even over UI panels.
                rig.input.handle_pointer(event);
                if response.consumed {
                    return true;
                }
                rig.input.handle_wheel(event);
            }
            SceneMode::Plane(plane) => {
                plane.handle_event(event);
            }
        }

        if let WindowEvent::Resized(physical_size) = event {
            self.resize(*physical_size);
        }

        false
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.renderer.resize(new_size);

        let viewport = Viewport::new(new_size.width as f32, new_size.height as f32);
        match &mut self.mode {
            SceneMode::Gallery(rig) => {
                rig.scene.resize(viewport);
                rig.camera.resize(viewport);
                rig.scene.set_view_proj(rig.camera.view_proj());
                rig.scroll.set_limit(rig.scene.scroll_limit());
                rig.scene.set_positions();
            }
            SceneMode::Plane(plane) => {
                plane.resize(viewport);
            }
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let viewport = Viewport::new(
            self.renderer.gfx.size.width as f32,
            self.renderer.gfx.size.height as f32,
        );

        match &mut self.mode {
            SceneMode::Gallery(rig) => {
                let frame_input = rig.input.take_frame(viewport);
                rig.scene
                    .update(&frame_input, &mut rig.scroll, &rig.camera, &rig.settings);

                debug_assert_eq!(rig.scene.items.len(), rig.items_gpu.len());
                for (item, gpu) in rig.scene.items.iter().zip(&rig.items_gpu) {
                    self.renderer
                        .gfx
                        .queue
                        .write_buffer(&gpu.ubo, 0, bytemuck::bytes_of(&item.uniform));
                }

                self.renderer.render_gallery(&swap_view, &rig.items_gpu);
            }
            SceneMode::Plane(plane) => {
                plane.update();
                self.renderer
                    .render_plane(&swap_view, plane.plane_mvp(), PLANE_COLOR);
            }
        }

        // The UI overlay only exists in gallery mode.
        if let SceneMode::Gallery(rig) = &mut self.mode {
            let egui_input = self.egui_state.take_egui_input(window);
            self.egui_ctx.begin_frame(egui_input);

            ui::draw_hud(
                &self.egui_ctx,
                rig.scene.items.len(),
                rig.scene.scroll_px(),
                rig.scene.page_height(),
            );
            ui::draw_controls(&self.egui_ctx, &mut rig.settings);

            let egui_output = self.egui_ctx.end_frame();
            let shapes = self
                .egui_ctx
                .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [
                    self.renderer.gfx.config.width,
                    self.renderer.gfx.config.height,
                ],
                pixels_per_point: self.egui_ctx.pixels_per_point(),
            };

            let mut encoder =
                self.renderer
                    .gfx
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("UI Encoder"),
                    });

            for (id, delta) in &egui_output.textures_delta.set {
                self.renderer.egui_renderer.update_texture(
                    &self.renderer.gfx.device,
                    &self.renderer.gfx.queue,
                    *id,
                    delta,
                );
            }

            self.renderer.egui_renderer.update_buffers(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                &mut encoder,
                &shapes,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("EGUI Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &swap_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

                self.renderer
                    .egui_renderer
                    .render(&mut render_pass, &shapes, &screen_descriptor);
            }

            for id in &egui_output.textures_delta.free {
                self.renderer.egui_renderer.free_texture(id);
            }

            self.renderer
                .gfx
                .queue
                .submit(std::iter::once(encoder.finish()));
        }

        frame.present();
        Ok(())
    }
}
