//! Cameras for both scenes: the pixel-calibrated page camera of the
//! gallery, and the orbit camera of the static plane scene.

use glam::{Mat4, Vec3};
use pagespace::Viewport;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Distance from the page camera to the z = 0 page plane, world units.
pub const PAGE_CAMERA_Z: f32 = 600.0;
const PAGE_NEAR: f32 = 100.0;
const PAGE_FAR: f32 = 2000.0;

/// Perspective camera calibrated so one world unit equals one page pixel at
/// z = 0: the vertical FOV spans exactly the viewport height at the camera
/// distance.
#[derive(Debug, Clone)]
pub struct PageCamera {
    proj: Mat4,
    fov_y: f32,
}

impl PageCamera {
    pub fn new(viewport: Viewport) -> Self {
        let fov_y = pixel_perfect_fov(viewport.height.max(1.0), PAGE_CAMERA_Z);
        let proj = Mat4::perspective_rh(
            fov_y,
            viewport.width / viewport.height.max(1.0),
            PAGE_NEAR,
            PAGE_FAR,
        );
        Self { proj, fov_y }
    }

    /// Refreshes the aspect ratio only; the FOV keeps its construction-time
    /// value.
    pub fn resize(&mut self, viewport: Viewport) {
        self.proj = Mat4::perspective_rh(
            self.fov_y,
            viewport.width / viewport.height.max(1.0),
            PAGE_NEAR,
            PAGE_FAR,
        );
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, PAGE_CAMERA_Z), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view()
    }

    pub fn inverse_view_proj(&self) -> Mat4 {
        self.view_proj().inverse()
    }
}

/// FOV whose vertical extent covers `height_px` pixels at `distance`.
pub fn pixel_perfect_fov(height_px: f32, distance: f32) -> f32 {
    2.0 * ((height_px * 0.5) / distance).atan()
}

const ORBIT_FOV_DEG: f32 = 75.0;
const ORBIT_NEAR: f32 = 0.1;
const ORBIT_FAR: f32 = 1000.0;
const ORBIT_RADIUS_MIN: f32 = 0.5;
const ORBIT_RADIUS_MAX: f32 = 50.0;

/// Camera orbiting the scene origin.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub radius: f32,
    pub azimuth_rad: f32,
    pub elevation_rad: f32,
    proj: Mat4,
    eye: Vec3,
}

impl OrbitCamera {
    pub fn new(viewport: Viewport) -> Self {
        let proj = Mat4::perspective_rh(
            ORBIT_FOV_DEG.to_radians(),
            viewport.width / viewport.height.max(1.0),
            ORBIT_NEAR,
            ORBIT_FAR,
        );
        let mut camera = Self {
            radius: 2.0,
            azimuth_rad: 0.0,
            elevation_rad: 0.0,
            proj,
            eye: Vec3::ZERO,
        };
        camera.update();
        camera
    }

    /// Recomputes the eye position from the orbital parameters. Must run
    /// after any of them change.
    pub fn update(&mut self) {
        let (sin_az, cos_az) = self.azimuth_rad.sin_cos();
        let (sin_el, cos_el) = self.elevation_rad.sin_cos();
        self.eye = Vec3::new(
            self.radius * cos_el * sin_az,
            self.radius * sin_el,
            self.radius * cos_el * cos_az,
        );
    }

    /// Wheel zoom; positive delta moves the eye closer.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius * 1.1f32.powf(-delta)).clamp(ORBIT_RADIUS_MIN, ORBIT_RADIUS_MAX);
        self.update();
    }

    /// Drag rotation by pixel deltas. Elevation clamps short of the poles
    /// to keep the up vector valid.
    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.azimuth_rad -= dx_px * 0.005;
        self.elevation_rad = (self.elevation_rad + dy_px * 0.005)
            .clamp(-89f32.to_radians(), 89f32.to_radians());
        self.update();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.proj = Mat4::perspective_rh(
            ORBIT_FOV_DEG.to_radians(),
            viewport.width / viewport.height.max(1.0),
            ORBIT_NEAR,
            ORBIT_FAR,
        );
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj * Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }
}

/// Translates window events into orbit camera motion.
pub struct OrbitController {
    mouse_down: bool,
    last_mouse: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            mouse_down: false,
            last_mouse: None,
        }
    }

    pub fn handle_event(&mut self, event: &WindowEvent, camera: &mut OrbitCamera) {
        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                if *button == MouseButton::Left {
                    self.mouse_down = *state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.last_mouse {
                    if self.mouse_down {
                        let dx = (position.x - last.0) as f32;
                        // Screen y grows downward; dragging up raises the eye.
                        let dy = (last.1 - position.y) as f32;
                        camera.orbit(dx, dy);
                    }
                }
                self.last_mouse = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                camera.zoom(lines);
            }
            _ => {}
        }
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_camera_maps_pixels_one_to_one_at_the_page_plane() {
        let camera = PageCamera::new(Viewport::new(800.0, 600.0));
        let vp = camera.view_proj();

        let top = vp.project_point3(Vec3::new(0.0, 300.0, 0.0));
        assert!((top.y - 1.0).abs() < 1e-4);
        let left = vp.project_point3(Vec3::new(-400.0, 0.0, 0.0));
        assert!((left.x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn resize_changes_aspect_but_not_vertical_fov() {
        let mut camera = PageCamera::new(Viewport::new(800.0, 600.0));
        camera.resize(Viewport::new(1600.0, 600.0));
        let vp = camera.view_proj();

        // Vertical mapping unchanged.
        let top = vp.project_point3(Vec3::new(0.0, 300.0, 0.0));
        assert!((top.y - 1.0).abs() < 1e-4);
        // Twice the width now spans NDC x.
        let left = vp.project_point3(Vec3::new(-800.0, 0.0, 0.0));
        assert!((left.x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn orbit_camera_starts_on_the_positive_z_axis() {
        let camera = OrbitCamera::new(Viewport::new(640.0, 480.0));
        assert!((camera.eye() - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn zoom_clamps_the_orbit_radius() {
        let mut camera = OrbitCamera::new(Viewport::new(640.0, 480.0));
        for _ in 0..100 {
            camera.zoom(5.0);
        }
        assert!(camera.radius >= ORBIT_RADIUS_MIN);
        for _ in 0..100 {
            camera.zoom(-5.0);
        }
        assert!(camera.radius <= ORBIT_RADIUS_MAX);
    }

    #[test]
    fn orbit_clamps_elevation_and_keeps_the_radius() {
        let mut camera = OrbitCamera::new(Viewport::new(640.0, 480.0));
        camera.orbit(0.0, 10_000.0);
        assert!(camera.elevation_rad <= 89f32.to_radians() + 1e-6);
        assert!((camera.eye().length() - camera.radius).abs() < 1e-4);
    }
}
