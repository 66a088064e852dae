// src/lib.rs
//! Scroll-driven image gallery rendered as a GPU scene.
//!
//! Images laid out like a web page scroll past a fixed, pixel-calibrated
//! camera while a displacement shader distorts them. A second mode shows a
//! minimal orbit-camera plane scene.

pub mod app;
pub mod camera;
pub mod config;
pub mod data;
pub mod input;
pub mod plane;
pub mod renderer;
pub mod scene;
pub mod ui;
