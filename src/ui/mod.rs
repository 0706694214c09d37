//! Drawing pipeline.
//!
//! This module contains everything between the buffer and the pixels:
//! - [`viewport`]: buffer/pixel coordinate mapping and scrolling
//! - [`render`]: full and quick draws over cached layers
//! - [`surface`]: the host drawing target and recorded layers
//! - [`metrics`]: glyph measurement
//! - [`style`]: colors and fonts

pub mod blink;
pub mod metrics;
pub mod render;
pub mod style;
pub mod surface;
pub mod viewport;

pub use render::{RenderStats, Renderer};
