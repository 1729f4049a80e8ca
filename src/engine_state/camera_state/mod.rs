//! # Camera State Management
//!
//! This module holds the camera pose consumed by locomotion and block selection.
//! Look controls, projection and GPU uniforms belong to the presentation layer
//! and are not part of this crate.

pub mod camera;

pub use camera::Camera;
