//! Gallery image discovery and decoding.

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use super::types::GalleryImage;

/// Extensions accepted by the discovery walk.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// Number of stand-in images generated when a directory yields nothing.
pub const PLACEHOLDER_COUNT: usize = 5;

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Walks `root` recursively and returns the supported image paths sorted by
/// path. Item indices derive from this order, so it must be stable across
/// runs and platforms.
pub fn discover_images(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_supported_image(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

/// Decodes one image file to tightly packed RGBA8, scaled down when either
/// side exceeds `max_dim`.
pub fn decode_image(path: &Path, max_dim: u32) -> Result<GalleryImage> {
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    let rgba = shrink_to_limit(img.to_rgba8(), max_dim, &label);
    let (width, height) = rgba.dimensions();
    Ok(GalleryImage {
        label,
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Scales an image down to fit within `max_dim` on both sides, keeping the
/// aspect ratio. Images already inside the limit pass through untouched.
pub fn shrink_to_limit(img: RgbaImage, max_dim: u32, label: &str) -> RgbaImage {
    let (width, height) = img.dimensions();
    if width <= max_dim && height <= max_dim {
        return img;
    }
    log::warn!(
        "{} is {}x{}, over the {} px texture limit, scaling down",
        label,
        width,
        height,
        max_dim
    );
    let scale = max_dim as f32 / width.max(height) as f32;
    let new_w = ((width as f32 * scale).round() as u32).clamp(1, max_dim);
    let new_h = ((height as f32 * scale).round() as u32).clamp(1, max_dim);
    imageops::resize(&img, new_w, new_h, FilterType::Triangle)
}

/// Loads every usable image under `root`, decoding in parallel. Files that
/// fail to decode are logged and skipped; survivors keep their discovery
/// order and are scaled to fit `max_dim`. When nothing usable is found the
/// gallery falls back to synthesized placeholders so the viewer still has
/// something to show.
pub fn load_gallery_images(root: &Path, max_dim: u32) -> Vec<GalleryImage> {
    let started = Instant::now();
    let paths = discover_images(root);
    if paths.is_empty() {
        log::warn!(
            "no images found under '{}', synthesizing {} placeholders",
            root.display(),
            PLACEHOLDER_COUNT
        );
        return synthesize_placeholders(PLACEHOLDER_COUNT);
    }

    let images: Vec<GalleryImage> = paths
        .par_iter()
        .filter_map(|path| match decode_image(path, max_dim) {
            Ok(img) => Some(img),
            Err(err) => {
                log::warn!("skipping {}: {:#}", path.display(), err);
                None
            }
        })
        .collect();

    if images.is_empty() {
        log::warn!(
            "none of the {} discovered images decoded, synthesizing {} placeholders",
            paths.len(),
            PLACEHOLDER_COUNT
        );
        return synthesize_placeholders(PLACEHOLDER_COUNT);
    }

    log::info!(
        "loaded {} gallery images in {} ms",
        images.len(),
        started.elapsed().as_millis()
    );
    images
}

/// Deterministic gradient cards in alternating portrait/landscape sizes, so
/// the column layout gets exercised even without real assets.
pub fn synthesize_placeholders(count: usize) -> Vec<GalleryImage> {
    (0..count)
        .map(|i| {
            let (width, height): (u32, u32) = if i % 2 == 0 { (640, 800) } else { (800, 520) };
            let base = (i as f32 * 0.618_034).fract();
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for y in 0..height {
                for x in 0..width {
                    let fx = x as f32 / width as f32;
                    let fy = y as f32 / height as f32;
                    let border = x < 8 || y < 8 || x + 8 >= width || y + 8 >= height;
                    let px = if border {
                        [235, 235, 235, 255]
                    } else {
                        let r = ((base + fx * 0.35).fract() * 255.0) as u8;
                        let g = ((base + fy * 0.5).fract() * 255.0) as u8;
                        let b = (((1.0 - base) * 0.8 + fx * fy * 0.2) * 255.0) as u8;
                        [r, g, b, 255]
                    };
                    rgba.extend_from_slice(&px);
                }
            }
            GalleryImage {
                label: format!("placeholder-{i}"),
                width,
                height,
                rgba,
            }
        })
        .collect()
}
