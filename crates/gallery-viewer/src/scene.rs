//! The gallery scene: item layout, picking, and the per-frame update.

use glam::{Mat4, Vec2, Vec3};
use pagespace::{
    world_position, ColumnLayout, PageRect, Ray, ScrollState, SmoothScroll, Viewport,
};

use crate::camera::PageCamera;
use crate::data::types::{GalleryImage, ItemUniformStd140};
use crate::input::FrameInput;

/// Fixed per-frame increment of the animation clock.
pub const TIME_STEP: f32 = 0.05;

/// Live user-tunable state, owned by the app and edited by the UI layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Settings {
    /// Distortion amount in [0, 1], broadcast to every item each frame.
    pub progress: f32,
}

/// One gallery entry: its page rect, world position, and the CPU mirror of
/// its uniform block.
#[derive(Clone, Debug)]
pub struct ImageItem {
    pub label: String,
    /// Native image size in pixels; fixes the aspect ratio in the layout.
    pub source_size: (u32, u32),
    pub rect: PageRect,
    pub position: Vec2,
    pub uniform: ItemUniformStd140,
}

pub struct GalleryScene {
    pub items: Vec<ImageItem>,
    viewport: Viewport,
    column: ColumnLayout,
    page_height: f32,
    time: f32,
    gate: ScrollState,
}

impl GalleryScene {
    pub fn new(
        viewport: Viewport,
        column: ColumnLayout,
        images: &[GalleryImage],
        camera: &PageCamera,
    ) -> Self {
        let items = images
            .iter()
            .map(|img| ImageItem {
                label: img.label.clone(),
                source_size: img.size(),
                rect: PageRect::new(0.0, 0.0, 0.0, 0.0),
                position: Vec2::ZERO,
                uniform: ItemUniformStd140::default(),
            })
            .collect();

        let mut scene = Self {
            items,
            viewport,
            column,
            page_height: 0.0,
            time: 0.0,
            gate: ScrollState::default(),
        };
        scene.relayout(viewport);
        scene.set_view_proj(camera.view_proj());
        scene.set_positions();
        scene
    }

    /// Scrollable range of the current layout.
    pub fn scroll_limit(&self) -> f32 {
        (self.page_height - self.viewport.height).max(0.0)
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    /// Smoothed scroll offset the items currently sit at.
    pub fn scroll_px(&self) -> f32 {
        self.gate.current()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Re-runs the column layout, refreshing every rect and scale uniform.
    fn relayout(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let sizes: Vec<(u32, u32)> = self.items.iter().map(|it| it.source_size).collect();
        let page = self.column.arrange(viewport, &sizes);
        self.page_height = page.height;
        for (item, rect) in self.items.iter_mut().zip(page.rects) {
            item.rect = rect;
            item.uniform.scale = [rect.width, rect.height];
        }
    }

    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        let m = view_proj.to_cols_array_2d();
        for item in &mut self.items {
            item.uniform.view_proj = m;
        }
    }

    /// Recomputes every item's world position from its rect and the current
    /// smoothed scroll offset.
    pub fn set_positions(&mut self) {
        let scroll = self.gate.current();
        for item in &mut self.items {
            item.position = world_position(item.rect, self.viewport, scroll);
            item.uniform.translate = item.position.to_array();
        }
    }

    /// Nearest intersection of the ray with any item's page-plane rect.
    pub fn pick(&self, ray: &Ray) -> Option<Vec3> {
        let mut nearest: Option<(f32, Vec3)> = None;
        for item in &self.items {
            let size = Vec2::new(item.rect.width, item.rect.height);
            if let Some(point) = ray.hit_rect_z0(item.position, size) {
                let dist = (point - ray.origin).length_squared();
                if nearest.map_or(true, |(d, _)| dist < d) {
                    nearest = Some((dist, point));
                }
            }
        }
        nearest.map(|(_, point)| point)
    }

    /// One tick of the gallery.
    ///
    /// Progress reaches every item each frame. Positions and the time
    /// uniform only move when the rounded scroll offset does. The mouse
    /// uniform keeps its previous value unless the pointer ray hits an item.
    pub fn update(
        &mut self,
        frame: &FrameInput,
        scroll: &mut SmoothScroll,
        camera: &PageCamera,
        settings: &Settings,
    ) {
        self.time += TIME_STEP;

        scroll.scroll_by(frame.scroll_px);
        let moved = self.gate.advance(scroll.render());

        for item in &mut self.items {
            item.uniform.progress = settings.progress;
        }

        if moved {
            self.set_positions();
            for item in &mut self.items {
                item.uniform.time = self.time;
            }
        }

        if let Some(ndc) = frame.pointer_ndc {
            let ray = Ray::from_ndc(ndc, camera.inverse_view_proj());
            if let Some(point) = self.pick(&ray) {
                let mouse = point.normalize_or_zero().to_array();
                for item in &mut self.items {
                    item.uniform.mouse = mouse;
                }
            }
        }
    }

    /// Window resize: refresh rects and scales. The caller then refreshes
    /// the camera matrix, the scroll limit, and re-runs positioning.
    pub fn resize(&mut self, viewport: Viewport) {
        self.relayout(viewport);
    }

    /// Scene with every rect placed verbatim, bypassing the column layout.
    #[cfg(test)]
    fn with_rects(viewport: Viewport, rects: &[PageRect], camera: &PageCamera) -> Self {
        let items = rects
            .iter()
            .enumerate()
            .map(|(i, &rect)| ImageItem {
                label: format!("item-{i}"),
                source_size: (rect.width as u32, rect.height as u32),
                rect,
                position: Vec2::ZERO,
                uniform: ItemUniformStd140 {
                    scale: [rect.width, rect.height],
                    ..Default::default()
                },
            })
            .collect();

        let mut scene = Self {
            items,
            viewport,
            column: ColumnLayout::default(),
            page_height: rects.iter().map(|r| r.top + r.height).fold(0.0, f32::max),
            time: 0.0,
            gate: ScrollState::default(),
        };
        scene.set_view_proj(camera.view_proj());
        scene.set_positions();
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::images::synthesize_placeholders;

    fn test_scene() -> (GalleryScene, SmoothScroll, PageCamera) {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PageCamera::new(viewport);
        let rects = [
            PageRect::new(100.0, 50.0, 200.0, 150.0),
            PageRect::new(400.0, 300.0, 200.0, 150.0),
        ];
        let scene = GalleryScene::with_rects(viewport, &rects, &camera);
        let mut scroll = SmoothScroll::new(0.1);
        scroll.set_limit(2000.0);
        (scene, scroll, camera)
    }

    #[test]
    fn positions_match_the_page_mapping() {
        let (scene, _, _) = test_scene();
        assert_eq!(scene.items[0].position, Vec2::new(-250.0, 125.0));
        assert_eq!(scene.items[0].uniform.translate, [-250.0, 125.0]);
    }

    #[test]
    fn page_height_tracks_the_lowest_rect() {
        let (scene, _, _) = test_scene();
        // Deepest rect bottoms out at top 400 + height 150.
        assert_eq!(scene.page_height(), 550.0);
    }

    #[test]
    fn progress_reaches_items_even_when_scroll_is_static() {
        let (mut scene, mut scroll, camera) = test_scene();
        let settings = Settings { progress: 0.42 };
        let before = scene.items[0].uniform;

        scene.update(&FrameInput::default(), &mut scroll, &camera, &settings);

        for item in &scene.items {
            assert_eq!(item.uniform.progress, 0.42);
            // Gate closed: positions and the time uniform stay put.
            assert_eq!(item.uniform.time, before.time);
            assert_eq!(item.uniform.translate, before.translate);
        }
        // The clock itself still advanced.
        assert!((scene.time() - TIME_STEP).abs() < 1e-6);
    }

    #[test]
    fn scroll_movement_opens_the_gate_for_time_and_positions() {
        let (mut scene, mut scroll, camera) = test_scene();
        let frame = FrameInput {
            pointer_ndc: None,
            scroll_px: 100.0,
        };

        scene.update(&frame, &mut scroll, &camera, &Settings::default());

        // ease 0.1 -> the smoothed offset lands at 10 px on the first tick.
        assert!((scene.scroll_px() - 10.0).abs() < 1e-4);
        for item in &scene.items {
            assert_eq!(item.uniform.time, scene.time());
        }
        // Item 0: y = scroll - top + H/2 - h/2 = 10 - 100 + 300 - 75.
        assert!((scene.items[0].uniform.translate[1] - 135.0).abs() < 1e-3);
    }

    #[test]
    fn pointer_hit_broadcasts_a_normalized_mouse_to_every_item() {
        let (mut scene, mut scroll, camera) = test_scene();
        let target = scene.items[0].position;
        let ndc = camera.view_proj().project_point3(target.extend(0.0));
        let frame = FrameInput {
            pointer_ndc: Some(Vec2::new(ndc.x, ndc.y)),
            scroll_px: 0.0,
        };

        scene.update(&frame, &mut scroll, &camera, &Settings::default());

        let mouse = Vec3::from_array(scene.items[0].uniform.mouse);
        assert!((mouse.length() - 1.0).abs() < 1e-3);
        let expected = target.extend(0.0).normalize();
        assert!((mouse - expected).length() < 0.05);
        // Broadcast, not just the intersected item.
        assert_eq!(scene.items[1].uniform.mouse, scene.items[0].uniform.mouse);
    }

    #[test]
    fn pointer_miss_leaves_the_mouse_uniform_untouched() {
        let (mut scene, mut scroll, camera) = test_scene();

        // First land a hit so the uniform holds a non-default value.
        let target = scene.items[0].position;
        let ndc = camera.view_proj().project_point3(target.extend(0.0));
        let hit = FrameInput {
            pointer_ndc: Some(Vec2::new(ndc.x, ndc.y)),
            scroll_px: 0.0,
        };
        scene.update(&hit, &mut scroll, &camera, &Settings::default());
        let held = scene.items[0].uniform.mouse;
        assert_ne!(held, [0.0; 3]);

        // Then point into empty space near the top-right corner.
        let miss = FrameInput {
            pointer_ndc: Some(Vec2::new(0.95, 0.95)),
            scroll_px: 0.0,
        };
        scene.update(&miss, &mut scroll, &camera, &Settings::default());

        assert_eq!(scene.items[0].uniform.mouse, held);
        assert_eq!(scene.items[1].uniform.mouse, held);
    }

    #[test]
    fn pick_prefers_the_nearest_overlapping_item() {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PageCamera::new(viewport);
        // Two rects covering the same page area; both intersect at z = 0,
        // so the tie breaks on ray distance and the first hit wins.
        let rects = [
            PageRect::new(200.0, 300.0, 200.0, 200.0),
            PageRect::new(200.0, 300.0, 200.0, 200.0),
        ];
        let scene = GalleryScene::with_rects(viewport, &rects, &camera);
        let ray = Ray::from_ndc(Vec2::ZERO, camera.inverse_view_proj());
        assert!(scene.pick(&ray).is_some());
    }

    #[test]
    fn resize_recomputes_scale_and_keeps_item_order() {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PageCamera::new(viewport);
        let images = synthesize_placeholders(3);
        let mut scene = GalleryScene::new(viewport, ColumnLayout::default(), &images, &camera);
        let labels: Vec<String> = scene.items.iter().map(|i| i.label.clone()).collect();
        let old_width = scene.items[0].uniform.scale[0];

        scene.resize(Viewport::new(1200.0, 900.0));
        scene.set_positions();

        let new_labels: Vec<String> = scene.items.iter().map(|i| i.label.clone()).collect();
        assert_eq!(labels, new_labels);
        assert!(scene.items[0].uniform.scale[0] > old_width);
        for item in &scene.items {
            assert_eq!(item.uniform.scale, [item.rect.width, item.rect.height]);
            // A centered column keeps x at zero for any viewport.
            assert!(item.position.x.abs() < 1e-3);
        }
    }
}
