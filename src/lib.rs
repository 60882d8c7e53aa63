//! Particle Field desktop host
//!
//! Configuration, window/render/simulation systems and input mapping for the
//! `particle_field` binary. The engine itself lives in the `field_*` crates.

pub mod config;
pub mod input;
pub mod systems;
