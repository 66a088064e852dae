/// Wheel-fed scroll tracker with exponential smoothing.
///
/// `scroll_by` moves the target offset, clamped to the scrollable page
/// range; `render` advances the smoothed reading one tick toward the target
/// and returns it. The smoothed value is what positions the page each frame,
/// so fast wheel input turns into gliding motion instead of jumps.
#[derive(Clone, Copy, Debug)]
pub struct SmoothScroll {
    target: f32,
    current: f32,
    ease: f32,
    limit: f32,
}

impl SmoothScroll {
    pub fn new(ease: f32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            ease: ease.clamp(0.01, 1.0),
            limit: 0.0,
        }
    }

    /// Sets the scrollable range, i.e. page height minus viewport height.
    /// The pending target is re-clamped so a shrinking page cannot leave the
    /// scroll position past its end.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
    }

    pub fn scroll_by(&mut self, delta_px: f32) {
        self.target = (self.target + delta_px).clamp(0.0, self.limit);
    }

    /// Advances the smoothed value one tick toward the target. Snaps once
    /// the remaining distance is under a twentieth of a pixel so the value
    /// settles exactly instead of decaying forever.
    pub fn render(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.ease;
        if (self.target - self.current).abs() < 0.05 {
            self.current = self.target;
        }
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Previous/current smoothed offsets plus the gate deciding whether a frame
/// needs a re-layout: offsets are compared after rounding, so sub-pixel
/// drift does not trigger position work.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollState {
    previous: f32,
    current: f32,
}

impl ScrollState {
    /// Rotates in the new smoothed offset and reports whether the rounded
    /// value moved since the previous frame.
    pub fn advance(&mut self, next: f32) -> bool {
        self.previous = self.current;
        self.current = next;
        self.previous.round() != self.current.round()
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn previous(&self) -> f32 {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_clamps_to_the_page_range() {
        let mut s = SmoothScroll::new(0.1);
        s.set_limit(500.0);
        s.scroll_by(-100.0);
        assert_eq!(s.target(), 0.0);
        s.scroll_by(10_000.0);
        assert_eq!(s.target(), 500.0);
    }

    #[test]
    fn smoothing_approaches_and_settles_on_the_target() {
        let mut s = SmoothScroll::new(0.1);
        s.set_limit(1000.0);
        s.scroll_by(300.0);
        let mut last = 0.0;
        for _ in 0..200 {
            let v = s.render();
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, 300.0);
    }

    #[test]
    fn shrinking_the_limit_pulls_the_target_back() {
        let mut s = SmoothScroll::new(0.2);
        s.set_limit(800.0);
        s.scroll_by(800.0);
        s.set_limit(300.0);
        assert_eq!(s.target(), 300.0);
    }

    #[test]
    fn gate_opens_only_when_the_rounded_offset_moves() {
        let mut gate = ScrollState::default();
        assert!(!gate.advance(0.2));
        assert!(!gate.advance(0.4));
        assert!(gate.advance(0.6));
        assert!(!gate.advance(0.9));
        assert!(gate.advance(1.8));
        assert_eq!(gate.current(), 1.8);
        assert_eq!(gate.previous(), 0.9);
    }
}
