// src/data/mod.rs
//! Asset handling for the gallery viewer.
//!
//! This module provides functionality for:
//! - Discovering and decoding gallery images (with placeholder fallback).
//! - Acquiring the displacement map (file or generated glitch pattern).
//! - Uploading pixel data to GPU textures and defining GPU buffer types.

pub mod images;
pub mod textures;
pub mod types;

// Re-export commonly used types for convenience.
pub use self::types::{GalleryImage, ItemGpu, ItemUniformStd140, PlaneVertex};
