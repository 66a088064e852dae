//! GPU texture upload and the displacement map source.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use std::path::Path;

use super::images::shrink_to_limit;
use super::types::GalleryImage;

/// Side length of the generated displacement map.
pub const DISPLACEMENT_SIZE: u32 = 256;

/// Fixed seed so the generated pattern is identical between runs.
const DISPLACEMENT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Uploads tightly packed RGBA8 pixels and returns a view of the texture.
/// `srgb` picks the format: photographs want sRGB sampling, data textures
/// such as the displacement map stay linear.
pub fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
    srgb: bool,
) -> wgpu::TextureView {
    let format = if srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Returns the displacement source: the file the user asked for, or a
/// generated glitch pattern when no file was given. An explicitly requested
/// file that cannot be read is an error; the fallback only covers omission.
/// A readable file that exceeds `max_dim` is scaled down, not rejected.
pub fn load_displacement(path: Option<&Path>, max_dim: u32) -> Result<GalleryImage> {
    match path {
        Some(p) => {
            let img = image::open(p)
                .with_context(|| format!("loading displacement map {}", p.display()))?
                .to_rgba8();
            let img = shrink_to_limit(img, max_dim, "displacement map");
            let (width, height) = img.dimensions();
            log::info!("displacement map {} ({}x{})", p.display(), width, height);
            Ok(GalleryImage {
                label: "displacement".into(),
                width,
                height,
                rgba: img.into_raw(),
            })
        }
        None => Ok(synthesize_glitch(DISPLACEMENT_SIZE)),
    }
}

/// Horizontal glitch bands: rows grouped into random-height bands, each with
/// its own shift level in the red channel, plus per-pixel noise in green.
pub fn synthesize_glitch(size: u32) -> GalleryImage {
    let mut rng = rand::rngs::StdRng::seed_from_u64(DISPLACEMENT_SEED);

    let mut row_levels = Vec::with_capacity(size as usize);
    let mut band_left = 0u32;
    let mut band_level = 128u8;
    for _ in 0..size {
        if band_left == 0 {
            band_left = rng.gen_range(2..14);
            band_level = rng.gen_range(32..224);
        }
        band_left -= 1;
        row_levels.push(band_level);
    }

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        let level = row_levels[y as usize];
        for _ in 0..size {
            let jitter: u8 = rng.gen_range(0..48);
            let r = level.saturating_add(jitter / 2);
            let g: u8 = rng.gen();
            rgba.extend_from_slice(&[r, g, 0, 255]);
        }
    }
    GalleryImage {
        label: "displacement".into(),
        width: size,
        height: size,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glitch_pattern_is_deterministic() {
        let a = synthesize_glitch(64);
        let b = synthesize_glitch(64);
        assert_eq!(a.rgba, b.rgba);
        assert_eq!(a.rgba.len(), 64 * 64 * 4);
    }

    #[test]
    fn glitch_pattern_has_distinct_bands() {
        let img = synthesize_glitch(64);
        let levels: std::collections::HashSet<u8> =
            (0..64).map(|y| img.rgba[y * 64 * 4]).collect();
        assert!(levels.len() > 4);
    }

    #[test]
    fn omitted_displacement_synthesizes_a_full_size_map() {
        let img = load_displacement(None, 4096).unwrap();
        assert_eq!(img.size(), (DISPLACEMENT_SIZE, DISPLACEMENT_SIZE));
        assert_eq!(
            img.rgba.len(),
            (DISPLACEMENT_SIZE * DISPLACEMENT_SIZE * 4) as usize
        );
    }

    #[test]
    fn missing_displacement_file_is_an_error() {
        assert!(load_displacement(Some(Path::new("/no/such/map.png")), 4096).is_err());
    }

    #[test]
    fn oversized_displacement_file_scales_down() {
        let dir = std::env::temp_dir().join(format!("gallery_viewer_disp_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("map.png");
        image::RgbaImage::from_pixel(128, 32, image::Rgba([30, 40, 0, 255]))
            .save(&path)
            .unwrap();

        let img = load_displacement(Some(&path), 64).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(img.size(), (64, 16));
        assert_eq!(img.rgba.len(), 64 * 16 * 4);
    }
}
