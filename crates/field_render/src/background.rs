//! Particle background lifecycle
//!
//! [`ParticleBackground`] owns everything the animated effect needs: the
//! particle field, the renderer, the drawing surface and the frame
//! scheduler. Its listeners (resize, pointer, frame) are only active between
//! [`start`](ParticleBackground::start) and [`stop`](ParticleBackground::stop),
//! and dropping the background stops it, so a pending frame request can never
//! outlive the surface it would draw on.
//!
//! The host delivers three signals on one thread:
//! - viewport resize → [`on_resize`](ParticleBackground::on_resize)
//! - pointer movement → [`on_pointer_move`](ParticleBackground::on_pointer_move)
//! - frame callback → [`run_frame`](ParticleBackground::run_frame)

use field_core::{ParticleField, TickReport};
use rand::rngs::StdRng;
use rand::Rng;

use crate::renderer::FieldRenderer;
use crate::surface::DrawSurface;

/// Identifies one pending frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host primitive that runs a callback before the next repaint
pub trait FrameScheduler {
    /// Ask for one more frame callback
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request made with [`request_frame`](Self::request_frame)
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The animated particle effect with an explicit start/stop lifecycle
pub struct ParticleBackground<S, F, R = StdRng>
where
    S: DrawSurface,
    F: FrameScheduler,
    R: Rng,
{
    field: ParticleField<R>,
    renderer: FieldRenderer,
    surface: Option<S>,
    scheduler: F,
    pending_frame: Option<FrameHandle>,
    attached: bool,
}

impl<S, F, R> ParticleBackground<S, F, R>
where
    S: DrawSurface,
    F: FrameScheduler,
    R: Rng,
{
    /// Assemble a stopped background
    ///
    /// `surface` may be `None`; the background then stays inert.
    pub fn new(field: ParticleField<R>, renderer: FieldRenderer, surface: Option<S>, scheduler: F) -> Self {
        Self {
            field,
            renderer,
            surface,
            scheduler,
            pending_frame: None,
            attached: false,
        }
    }

    /// Attach listeners, size the pool to the surface and request the first frame
    ///
    /// Without a surface this does nothing and returns `false`.
    pub fn start(&mut self) -> bool {
        if self.attached {
            return true;
        }
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("No drawing surface, particle background stays inactive");
            return false;
        };

        let (width, height) = surface.size();
        self.attached = true;
        self.field.resize(width as f32, height as f32);
        self.pending_frame = Some(self.scheduler.request_frame());
        log::debug!("Particle background started with {} particles", self.field.len());
        true
    }

    /// Cancel the pending frame and detach all listeners
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.attached {
            self.attached = false;
            log::debug!("Particle background stopped");
        }
    }

    /// Whether listeners are attached
    pub fn is_running(&self) -> bool {
        self.attached
    }

    /// Pending frame request, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    /// Frame callback: tick, render, then schedule the next frame
    ///
    /// Returns `None` (and does nothing) when no frame is pending, which is
    /// the case for stale callbacks delivered after [`stop`](Self::stop).
    pub fn run_frame(&mut self) -> Option<TickReport> {
        let handle = self.pending_frame.take()?;
        let surface = self.surface.as_mut()?;

        let report = self.field.tick();
        self.renderer.render(&self.field, surface);

        self.pending_frame = Some(self.scheduler.request_frame());
        log::trace!(
            "Frame {:?}: {} live, {} expired",
            handle, report.live, report.expired
        );
        Some(report)
    }

    /// Viewport resize: resize the surface and rebuild the pool
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.attached {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
            self.field.resize(width as f32, height as f32);
            log::debug!("Surface resized to {}x{}, {} particles", width, height, self.field.len());
        }
    }

    /// Pointer movement in surface coordinates; may inject a particle
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.attached && self.field.on_pointer_move(x, y)
    }

    /// Refill the pool for the current size without touching the surface
    pub fn reseed(&mut self) {
        self.field.reinitialize();
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField<R> {
        &mut self.field
    }

    pub fn renderer_mut(&mut self) -> &mut FieldRenderer {
        &mut self.renderer
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Direct surface access; changes made while stopped are picked up by the next `start`
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}

impl<S, F, R> Drop for ParticleBackground<S, F, R>
where
    S: DrawSurface,
    F: FrameScheduler,
    R: Rng,
{
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use field_core::FieldConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scheduler that only records what it was asked to do
    #[derive(Clone, Default)]
    struct ManualScheduler {
        log: Rc<RefCell<SchedulerLog>>,
    }

    #[derive(Default)]
    struct SchedulerLog {
        next: u64,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let mut log = self.log.borrow_mut();
            log.next += 1;
            let handle = FrameHandle(log.next);
            log.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.log.borrow_mut().cancelled.push(handle);
        }
    }

    fn background(
        surface: Option<RecordingSurface>,
    ) -> (ParticleBackground<RecordingSurface, ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        let field = ParticleField::seeded(FieldConfig::default(), 1);
        let bg = ParticleBackground::new(field, FieldRenderer::default(), surface, scheduler.clone());
        (bg, scheduler)
    }

    #[test]
    fn test_start_without_surface_is_noop() {
        let (mut bg, scheduler) = background(None);
        assert!(!bg.start());
        assert!(!bg.is_running());
        assert!(bg.field().is_empty());
        assert!(bg.run_frame().is_none());
        assert!(!bg.on_pointer_move(1.0, 1.0));
        assert!(scheduler.log.borrow().requested.is_empty());
    }

    #[test]
    fn test_start_sizes_pool_and_requests_frame() {
        let (mut bg, scheduler) = background(Some(RecordingSurface::new(800, 600)));
        assert!(bg.start());
        assert_eq!(bg.field().len(), 48);
        assert_eq!(bg.pending_frame(), Some(FrameHandle(1)));
        assert_eq!(scheduler.log.borrow().requested.len(), 1);
    }

    #[test]
    fn test_frame_renders_and_reschedules() {
        let (mut bg, scheduler) = background(Some(RecordingSurface::new(800, 600)));
        bg.start();

        let report = bg.run_frame().expect("frame should run while started");
        assert_eq!(report.live, 48);
        assert_eq!(bg.pending_frame(), Some(FrameHandle(2)));
        assert!(bg.field().particles().iter().all(|p| p.age == 1));

        let commands = bg.surface().unwrap().commands();
        assert!(matches!(commands[0], DrawCommand::ClearRect { .. }));
        assert_eq!(scheduler.log.borrow().requested.len(), 2);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let (mut bg, scheduler) = background(Some(RecordingSurface::new(800, 600)));
        bg.start();
        bg.run_frame();
        bg.stop();

        assert!(!bg.is_running());
        assert_eq!(bg.pending_frame(), None);
        assert_eq!(scheduler.log.borrow().cancelled, vec![FrameHandle(2)]);

        // Stale callbacks and events after stop do nothing
        assert!(bg.run_frame().is_none());
        bg.on_resize(100, 100);
        assert_eq!(bg.surface().unwrap().size(), (800, 600));
        assert!(!bg.on_pointer_move(5.0, 5.0));
    }

    #[test]
    fn test_drop_stops_loop() {
        let (mut bg, scheduler) = background(Some(RecordingSurface::new(320, 240)));
        bg.start();
        drop(bg);
        assert_eq!(scheduler.log.borrow().cancelled, vec![FrameHandle(1)]);
    }

    #[test]
    fn test_resize_rebuilds_pool() {
        let (mut bg, _scheduler) = background(Some(RecordingSurface::new(800, 600)));
        bg.start();
        bg.on_resize(2000, 2000);
        assert_eq!(bg.surface().unwrap().size(), (2000, 2000));
        assert_eq!(bg.field().len(), 50);
        assert_eq!(bg.field().size().x, 2000.0);
    }

    #[test]
    fn test_recording_keeps_only_latest_frame() {
        let (mut bg, _scheduler) = background(Some(RecordingSurface::new(800, 600)));
        bg.start();
        bg.run_frame();
        let first = bg.surface().unwrap().commands().len();
        for _ in 0..20 {
            bg.run_frame();
        }
        let commands = bg.surface().unwrap().commands();
        assert!(matches!(commands[0], DrawCommand::ClearRect { .. }));
        assert_eq!(commands.iter().filter(|c| matches!(c, DrawCommand::ClearRect { .. })).count(), 1);
        assert!(commands.len() <= first * 2);
    }

    #[test]
    fn test_restart_after_stop() {
        let (mut bg, scheduler) = background(Some(RecordingSurface::new(800, 600)));
        bg.start();
        bg.stop();
        assert!(bg.start());
        assert!(bg.run_frame().is_some());
        assert_eq!(scheduler.log.borrow().cancelled.len(), 1);
    }
}
