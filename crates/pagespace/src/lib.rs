//! Page-space math for scroll-driven scenes.
//!
//! Everything here is plain CPU math: a deterministic single-column page
//! layout standing in for DOM rectangles, a smoothed scroll tracker with the
//! rounded-offset gate that decides when a re-layout is worth doing, and
//! pointer-ray helpers for picking against page-aligned quads at z = 0.
//!
//! Conventions: page coordinates are f32 pixels with the origin at the top
//! left and y growing downward; scene coordinates are centered with y up,
//! one unit per page pixel at z = 0.

pub mod layout;
pub mod ray;
pub mod scroll;

pub use layout::{world_position, ColumnLayout, PageLayout, PageRect, Viewport};
pub use ray::{ndc_from_pixels, Ray};
pub use scroll::{ScrollState, SmoothScroll};
