//! Per-frame input collection.
//!
//! Pointer and wheel events arrive between frames. The collector
//! accumulates them, and the update loop drains a snapshot exactly once per
//! frame at one fixed point, so event timing cannot reorder scene mutations.

use glam::Vec2;
use pagespace::{ndc_from_pixels, Viewport};
use winit::event::{MouseScrollDelta, WindowEvent};

/// Page pixels per wheel "line".
const LINE_HEIGHT_PX: f32 = 40.0;

/// Snapshot of input consumed by one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Latest pointer position in NDC, once the cursor has entered the
    /// window.
    pub pointer_ndc: Option<Vec2>,
    /// Wheel travel in page pixels accumulated since the previous frame.
    pub scroll_px: f32,
}

/// Accumulates window events between frames.
#[derive(Debug, Default)]
pub struct InputCollector {
    pointer_px: Option<Vec2>,
    wheel_px: f32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks cursor movement. Runs for every event, even ones the UI layer
    /// consumed, so the picking ray follows the pointer across panels.
    pub fn handle_pointer(&mut self, event: &WindowEvent) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.pointer_moved(position.x as f32, position.y as f32);
        }
    }

    /// Accumulates wheel travel. Not called for events the UI layer used.
    pub fn handle_wheel(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseWheel { delta, .. } = event {
            match delta {
                MouseScrollDelta::LineDelta(_, y) => self.wheel_lines(*y),
                MouseScrollDelta::PixelDelta(pos) => self.wheel_pixels(pos.y as f32),
            }
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_px = Some(Vec2::new(x, y));
    }

    /// Wheel-down (negative line delta) grows the page offset.
    pub fn wheel_lines(&mut self, lines_y: f32) {
        self.wheel_px -= lines_y * LINE_HEIGHT_PX;
    }

    pub fn wheel_pixels(&mut self, px_y: f32) {
        self.wheel_px -= px_y;
    }

    /// Drains the wheel accumulator and snapshots the pointer.
    pub fn take_frame(&mut self, viewport: Viewport) -> FrameInput {
        FrameInput {
            pointer_ndc: self.pointer_px.map(|p| ndc_from_pixels(p, viewport)),
            scroll_px: std::mem::take(&mut self.wheel_px),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_travel_accumulates_until_drained() {
        let mut input = InputCollector::new();
        input.wheel_lines(-1.0);
        input.wheel_lines(-2.0);
        input.wheel_pixels(-15.0);

        let frame = input.take_frame(Viewport::new(800.0, 600.0));
        assert_eq!(frame.scroll_px, 3.0 * LINE_HEIGHT_PX + 15.0);

        // Drained: the next frame starts clean.
        let next = input.take_frame(Viewport::new(800.0, 600.0));
        assert_eq!(next.scroll_px, 0.0);
    }

    #[test]
    fn pointer_snapshot_is_in_ndc_and_persists_across_frames() {
        let mut input = InputCollector::new();
        assert!(input
            .take_frame(Viewport::new(800.0, 600.0))
            .pointer_ndc
            .is_none());

        input.pointer_moved(400.0, 300.0);
        let a = input.take_frame(Viewport::new(800.0, 600.0));
        assert_eq!(a.pointer_ndc, Some(Vec2::ZERO));

        // The pointer stays at its last known position.
        let b = input.take_frame(Viewport::new(800.0, 600.0));
        assert_eq!(b.pointer_ndc, Some(Vec2::ZERO));
    }

    #[test]
    fn scroll_up_shrinks_the_offset() {
        let mut input = InputCollector::new();
        input.wheel_lines(1.0);
        let frame = input.take_frame(Viewport::new(800.0, 600.0));
        assert!(frame.scroll_px < 0.0);
    }
}
