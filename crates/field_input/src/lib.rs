//! Particle Field Input Handling
//!
//! This crate turns window pointer events into surface coordinates the
//! particle field can inject at.

mod pointer;

pub use pointer::PointerTracker;
