use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Scroll-driven image gallery with a displacement distortion shader.
///
/// Renders a directory of images as a scrollable page inside a GPU scene.
/// A second mode shows a minimal orbit-camera plane scene.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Directory scanned recursively for gallery images.
    #[arg(long, env = "GALLERY_IMAGES_DIR", default_value = "images")]
    pub images_dir: PathBuf,

    /// Displacement texture driving the distortion effect. When omitted, a
    /// deterministic glitch pattern is generated instead.
    #[arg(long, env = "GALLERY_DISPLACEMENT")]
    pub displacement: Option<PathBuf>,

    /// Scene to run.
    #[arg(long, value_enum, default_value_t = SceneKind::Gallery)]
    pub scene: SceneKind,

    /// Scroll smoothing factor in (0, 1]; higher tracks the wheel tighter.
    #[arg(long, default_value_t = 0.1)]
    pub ease: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// The scroll-distortion image gallery.
    Gallery,
    /// A single colored plane under orbit controls.
    Plane,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Gallery => write!(f, "gallery"),
            SceneKind::Plane => write!(f, "plane"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn defaults_point_at_the_gallery() {
        let cfg = Config::parse_from(["gallery_viewer"]);
        assert_eq!(cfg.scene, SceneKind::Gallery);
        assert_eq!(cfg.images_dir, PathBuf::from("images"));
        assert!(cfg.displacement.is_none());
        assert!((cfg.ease - 0.1).abs() < 1e-6);
    }

    #[test]
    fn scene_flag_selects_the_plane_variant() {
        let cfg = Config::parse_from(["gallery_viewer", "--scene", "plane"]);
        assert_eq!(cfg.scene, SceneKind::Plane);
    }
}
