//! The static plane scene: one colored quad under an orbit camera.

use glam::{Mat4, Vec3};
use pagespace::Viewport;
use winit::event::WindowEvent;

use crate::camera::{OrbitCamera, OrbitController};

/// Fill color of the quad: 0x000066 converted to linear space.
pub const PLANE_COLOR: [f32; 4] = [0.0, 0.0, 0.133, 1.0];

pub struct PlaneScene {
    pub camera: OrbitCamera,
    controller: OrbitController,
}

impl PlaneScene {
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = OrbitCamera::new(viewport);
        // One controls refresh at setup, mirroring the per-frame one.
        camera.update();
        Self {
            camera,
            controller: OrbitController::new(),
        }
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.controller.handle_event(event, &mut self.camera);
    }

    /// Per-frame controls refresh.
    pub fn update(&mut self) {
        self.camera.update();
    }

    /// Clip transform of the quad. The mesh spans [-1, 1]; the model matrix
    /// halves it to a 1x1 plane centered at the origin.
    pub fn plane_mvp(&self) -> Mat4 {
        self.camera.view_proj() * Mat4::from_scale(Vec3::new(0.5, 0.5, 1.0))
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_two_units_back_and_orbiting_keeps_the_radius() {
        let mut scene = PlaneScene::new(Viewport::new(640.0, 480.0));
        assert!((scene.camera.eye() - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);

        scene.camera.orbit(120.0, -45.0);
        scene.update();
        assert!((scene.camera.eye().length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn plane_corners_project_inside_the_initial_view() {
        let scene = PlaneScene::new(Viewport::new(640.0, 480.0));
        let mvp = scene.plane_mvp();
        for corner in [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ] {
            let clip = mvp.project_point3(corner);
            assert!(clip.x.abs() < 1.0 && clip.y.abs() < 1.0);
            assert!(clip.z > 0.0 && clip.z < 1.0);
        }
    }
}
