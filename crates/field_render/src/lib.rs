//! Particle field rendering
//!
//! This crate turns a [`ParticleField`](field_core::ParticleField) into pixels.
//!
//! ## Key Components
//!
//! - [`surface::DrawSurface`] - The 2D canvas contract the renderer draws through
//! - [`renderer::FieldRenderer`] - Draws links, particles and glow onto a surface
//! - [`raster::PixelSurface`] - Software RGBA raster implementing `DrawSurface`
//! - [`recording::RecordingSurface`] - Records draw calls instead of rasterizing
//! - [`background::ParticleBackground`] - Owns the field, surface and frame loop lifecycle
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::BlitPipeline`] - Presents a `PixelSurface` on the window

pub mod surface;
pub mod renderer;
pub mod raster;
pub mod recording;
pub mod background;
pub mod context;
pub mod pipeline;

pub use surface::DrawSurface;
pub use renderer::{FieldRenderer, RenderConfig, RenderLayers};
pub use raster::PixelSurface;
pub use recording::{DrawCommand, RecordingSurface, Shadow};
pub use background::{FrameHandle, FrameScheduler, ParticleBackground};

// Re-export core types for convenience
pub use field_core::{FieldConfig, ParticleField, Particle, ParticleColor, TickReport};
pub use field_math::{Rgba, Vec2};
