//! Presentation pipeline
//!
//! The particle effect is painted on the CPU; this module gets the result
//! onto the window.

pub mod blit_pipeline;
pub mod types;

pub use blit_pipeline::BlitPipeline;
pub use types::BlitUniforms;
