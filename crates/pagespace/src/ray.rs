use glam::{Mat4, Vec2, Vec3};

use crate::layout::Viewport;

/// Converts a pixel-space cursor position to normalized device coordinates,
/// x right and y up, both in [-1, 1].
pub fn ndc_from_pixels(pos: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        pos.x / viewport.width * 2.0 - 1.0,
        -(pos.y / viewport.height * 2.0 - 1.0),
    )
}

/// A picking ray in scene space.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Unprojects an NDC position through the inverse view-projection
    /// matrix. The near-plane point anchors the ray and the far-plane point
    /// orients it, so the result works for any perspective camera.
    pub fn from_ndc(ndc: Vec2, inv_view_proj: Mat4) -> Self {
        let near = inv_view_proj.project_point3(ndc.extend(0.0));
        let far = inv_view_proj.project_point3(ndc.extend(1.0));
        Self {
            origin: near,
            dir: (far - near).normalize(),
        }
    }

    /// Intersects the ray with an axis-aligned rectangle lying in the z = 0
    /// plane, centered at `center` with full extents `size`. Intersections
    /// behind the ray origin are rejected.
    pub fn hit_rect_z0(&self, center: Vec2, size: Vec2) -> Option<Vec3> {
        if self.dir.z.abs() <= f32::EPSILON {
            return None;
        }
        let t = -self.origin.z / self.dir.z;
        if t <= 0.0 {
            return None;
        }
        let p = self.origin + self.dir * t;
        let half = size * 0.5;
        if (p.x - center.x).abs() <= half.x && (p.y - center.y).abs() <= half.y {
            Some(p)
        } else {
            None
        }
    }
}
