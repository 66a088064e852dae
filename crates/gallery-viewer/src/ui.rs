//! egui overlay for the gallery scene.

use crate::scene::Settings;

/// Control panel with the live distortion slider.
pub fn draw_controls(ctx: &egui::Context, settings: &mut Settings) {
    egui::Window::new("controls")
        .resizable(false)
        .default_pos([16.0, 48.0])
        .show(ctx, |ui| {
            ui.add(
                egui::Slider::new(&mut settings.progress, 0.0..=1.0)
                    .step_by(0.01)
                    .text("progress"),
            );
        });
}

/// One-line status readout in the top-left corner.
pub fn draw_hud(ctx: &egui::Context, item_count: usize, scroll_px: f32, page_px: f32) {
    egui::Area::new(egui::Id::new("hud"))
        .fixed_pos([16.0, 16.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{item_count} images | scroll {scroll_px:.0}px | page {page_px:.0}px"
                ))
                .monospace()
                .color(egui::Color32::from_gray(60)),
            );
        });
}
