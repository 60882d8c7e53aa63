//! 2D Mathematics for the particle field
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector in drawing-surface space (origin top-left, y down)
//! - [`Rgba`] - straight-alpha colour with 8-bit channels

mod vec2;
mod color;

pub use vec2::Vec2;
pub use color::Rgba;
