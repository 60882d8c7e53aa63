//! Core simulation for the particle field
//!
//! This crate owns everything that changes from frame to frame:
//!
//! - [`Particle`] - A drifting point with colour, radius and a finite lifespan
//! - [`ParticleColor`] - The fixed four-colour palette
//! - [`ParticleSpawner`] - Randomized particle creation
//! - [`ParticleField`] - The live pool: resize, pointer injection, per-frame tick
//! - [`Link`] - A faint connection between two nearby particles
//!
//! Rendering lives in `field_render`; this crate never touches a drawing surface.

mod particle;
mod spawn;
mod links;
mod field;

pub use particle::{Particle, ParticleColor};
pub use spawn::ParticleSpawner;
pub use links::{link_alpha, Link, LinkConfig, Links};
pub use field::{FieldConfig, ParticleField, PoolLimit, TickReport};

// Re-export commonly used types from field_math for convenience
pub use field_math::{Rgba, Vec2};
