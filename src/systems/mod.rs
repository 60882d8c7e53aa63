//! Application systems
//!
//! The window, the simulation and GPU presentation, each owned by the
//! application handler in `main.rs`.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{FrameCounter, SimulationSystem};
pub use window::{logical_size, WindowError, WindowFrameScheduler, WindowSystem};
