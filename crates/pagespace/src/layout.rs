use glam::Vec2;

/// Viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An on-page rectangle in page pixels, origin top-left, y down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PageRect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// Maps a page rectangle to its scene-space center for a given scroll
/// offset.
///
/// Page pixels run top-left/y-down; the scene is centered with y up. The
/// scroll offset shifts every rectangle vertically so the camera stays put
/// while the page moves past it.
pub fn world_position(rect: PageRect, viewport: Viewport, scroll: f32) -> Vec2 {
    Vec2::new(
        rect.left + rect.width / 2.0 - viewport.width / 2.0,
        scroll - rect.top + viewport.height / 2.0 - rect.height / 2.0,
    )
}

/// Single centered column of images, the native stand-in for the demo
/// page's CSS flow.
#[derive(Clone, Copy, Debug)]
pub struct ColumnLayout {
    /// Space above the first image, px.
    pub top_margin: f32,
    /// Space below the last image, px.
    pub bottom_margin: f32,
    /// Vertical gap between consecutive images, px.
    pub gap: f32,
    /// Image width as a fraction of the viewport width.
    pub width_frac: f32,
    /// Hard cap on image width, px.
    pub max_width: f32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            top_margin: 120.0,
            bottom_margin: 120.0,
            gap: 140.0,
            width_frac: 0.55,
            max_width: 900.0,
        }
    }
}

/// An arranged page: one rect per input image plus the total page height.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    pub rects: Vec<PageRect>,
    pub height: f32,
}

impl ColumnLayout {
    /// Lays out images of the given native pixel sizes top to bottom,
    /// horizontally centered, preserving each aspect ratio.
    pub fn arrange(&self, viewport: Viewport, sizes: &[(u32, u32)]) -> PageLayout {
        let mut rects = Vec::with_capacity(sizes.len());
        let mut cursor = self.top_margin;
        for &(w, h) in sizes {
            let width = (viewport.width * self.width_frac).min(self.max_width);
            let height = if w == 0 {
                0.0
            } else {
                width * h as f32 / w as f32
            };
            rects.push(PageRect::new(
                cursor,
                (viewport.width - width) / 2.0,
                width,
                height,
            ));
            cursor += height + self.gap;
        }
        let height = if rects.is_empty() {
            self.top_margin + self.bottom_margin
        } else {
            cursor - self.gap + self.bottom_margin
        };
        PageLayout { rects, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_page_rect_into_centered_y_up_space() {
        let rect = PageRect::new(100.0, 50.0, 200.0, 150.0);
        let p = world_position(rect, Viewport::new(800.0, 600.0), 0.0);
        assert_eq!(p.x, -250.0);
        assert_eq!(p.y, 125.0);
    }

    #[test]
    fn scroll_offset_shifts_positions_up() {
        let rect = PageRect::new(100.0, 50.0, 200.0, 150.0);
        let vp = Viewport::new(800.0, 600.0);
        let rest = world_position(rect, vp, 0.0);
        let scrolled = world_position(rect, vp, 40.0);
        assert_eq!(scrolled.x, rest.x);
        assert_eq!(scrolled.y, rest.y + 40.0);
    }

    #[test]
    fn positioning_is_idempotent() {
        let rect = PageRect::new(321.5, 17.25, 640.0, 427.5);
        let vp = Viewport::new(1440.0, 900.0);
        let a = world_position(rect, vp, 133.7);
        let b = world_position(rect, vp, 133.7);
        assert_eq!(a, b);
    }

    #[test]
    fn column_is_centered_and_sequential() {
        let layout = ColumnLayout::default();
        let vp = Viewport::new(1000.0, 800.0);
        let page = layout.arrange(vp, &[(400, 300), (400, 800)]);
        assert_eq!(page.rects.len(), 2);

        let w = (vp.width * layout.width_frac).min(layout.max_width);
        for r in &page.rects {
            assert_eq!(r.width, w);
            assert!((r.left - (vp.width - w) / 2.0).abs() < 1e-4);
        }
        // Aspect ratios survive the width fit.
        assert!((page.rects[0].height - w * 300.0 / 400.0).abs() < 1e-3);
        assert!((page.rects[1].height - w * 800.0 / 400.0).abs() < 1e-3);
        // Stacked with the configured gap.
        let second_top = layout.top_margin + page.rects[0].height + layout.gap;
        assert!((page.rects[1].top - second_top).abs() < 1e-3);
        // Page ends one bottom margin below the last image.
        let height = page.rects[1].top + page.rects[1].height + layout.bottom_margin;
        assert!((page.height - height).abs() < 1e-3);
    }

    #[test]
    fn wide_viewports_cap_the_image_width() {
        let layout = ColumnLayout::default();
        let page = layout.arrange(Viewport::new(4000.0, 1000.0), &[(100, 100)]);
        assert_eq!(page.rects[0].width, layout.max_width);
    }

    #[test]
    fn empty_page_is_just_the_margins() {
        let layout = ColumnLayout::default();
        let page = layout.arrange(Viewport::new(800.0, 600.0), &[]);
        assert!(page.rects.is_empty());
        assert_eq!(page.height, layout.top_margin + layout.bottom_margin);
    }
}
