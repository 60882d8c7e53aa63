//! Particle simulation system
//!
//! Owns the [`ParticleBackground`] (field, renderer, canvas and frame loop)
//! and measures the frame rate. Pausing is a full stop of the loop; resuming
//! restarts it, which rebuilds the pool for the current canvas size.

use std::time::{Duration, Instant};
use field_core::{FieldConfig, ParticleField, TickReport};
use field_render::{
    DrawSurface, FieldRenderer, FrameScheduler, ParticleBackground, PixelSurface, RenderConfig,
};

use super::window::WindowFrameScheduler;

/// Frames-per-second over a rolling window
#[derive(Debug)]
pub struct FrameCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: Option<f32>,
    interval: Duration,
}

impl FrameCounter {
    pub fn new(interval: Duration) -> Self {
        Self {
            window_start: None,
            frames: 0,
            fps: None,
            interval,
        }
    }

    /// Count one frame at `now`; returns a fresh measurement once per interval
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.duration_since(start);
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.fps = Some(fps);
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps)
    }

    /// Forget the current window, e.g. after a pause
    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }

    /// Latest measurement
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

/// Drives the particle background
pub struct SimulationSystem<F: FrameScheduler = WindowFrameScheduler> {
    background: ParticleBackground<PixelSurface, F>,
    counter: FrameCounter,
    paused: bool,
    /// Canvas size reported while the loop was stopped
    deferred_size: Option<(u32, u32)>,
}

impl<F: FrameScheduler> SimulationSystem<F> {
    /// Build a stopped simulation drawing onto a `width` x `height` canvas
    pub fn new(
        field_config: FieldConfig,
        render_config: RenderConfig,
        seed: Option<u64>,
        (width, height): (u32, u32),
        scheduler: F,
    ) -> Self {
        let field = match seed {
            Some(seed) => ParticleField::seeded(field_config, seed),
            None => ParticleField::new(field_config),
        };
        let canvas = PixelSurface::new(width, height);
        let background = ParticleBackground::new(
            field,
            FieldRenderer::new(render_config),
            Some(canvas),
            scheduler,
        );

        Self {
            background,
            counter: FrameCounter::new(Duration::from_secs(1)),
            paused: false,
            deferred_size: None,
        }
    }

    /// Start the frame loop unless the user paused it
    pub fn start(&mut self) -> bool {
        if self.paused {
            return false;
        }
        if let Some((width, height)) = self.deferred_size.take() {
            if let Some(canvas) = self.background.surface_mut() {
                canvas.resize(width, height);
            }
        }
        self.counter.reset();
        self.background.start()
    }

    /// Stop the frame loop without changing the pause state
    pub fn stop(&mut self) {
        self.background.stop();
    }

    /// Toggle between running and paused; returns `true` when now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.stop();
            log::info!("Paused");
        } else {
            self.start();
            log::info!("Resumed");
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.background.is_running()
    }

    /// Run one frame if one is pending
    pub fn frame(&mut self) -> Option<TickReport> {
        let report = self.background.run_frame()?;
        if let Some(fps) = self.counter.record(Instant::now()) {
            log::debug!("{:.1} fps, {} particles", fps, report.live);
        }
        Some(report)
    }

    /// Canvas resized (logical units)
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.background.is_running() {
            self.background.on_resize(width, height);
        } else {
            self.deferred_size = Some((width, height));
        }
    }

    /// Pointer moved (logical units)
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.background.on_pointer_move(x, y)
    }

    /// Refill the pool for the current canvas size
    pub fn reseed(&mut self) {
        self.background.reseed();
        log::info!("Reseeded {} particles", self.particle_count());
    }

    /// The canvas painted by the last frame
    pub fn canvas(&self) -> Option<&PixelSurface> {
        self.background.surface()
    }

    pub fn particle_count(&self) -> usize {
        self.background.field().len()
    }

    pub fn fps(&self) -> Option<f32> {
        self.counter.fps()
    }
}
