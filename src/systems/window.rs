//! Window management system
//!
//! Handles window creation, fullscreen toggle, title updates and the
//! redraw-based frame scheduler.

use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use field_render::{FrameHandle, FrameScheduler};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Current client area in logical units, the size the canvas is drawn at
    pub fn logical_size(&self) -> (u32, u32) {
        logical_size(self.window.inner_size(), self.scale_factor())
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with live stats
    pub fn update_title(&self, particles: usize, fps: Option<f32>, paused: bool) {
        self.window
            .set_title(&format_title(&self.base_title, particles, fps, paused));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Convert a physical size to whole logical units
pub fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical: LogicalSize<f64> = size.to_logical(scale_factor);
    (logical.width.round() as u32, logical.height.round() as u32)
}

fn format_title(base: &str, particles: usize, fps: Option<f32>, paused: bool) -> String {
    let fps = fps.map_or_else(|| "--".to_string(), |fps| format!("{:.0}", fps));
    if paused {
        format!("{} - {} particles [Paused, Space to resume]", base, particles)
    } else {
        format!("{} - {} particles, {} fps", base, particles, fps)
    }
}

/// [`FrameScheduler`] backed by `Window::request_redraw`
///
/// winit offers no way to withdraw a redraw request, so cancellation only
/// invalidates the handle; the background ignores the redraw that follows.
pub struct WindowFrameScheduler {
    window: Arc<Window>,
    next: u64,
}

impl WindowFrameScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, next: 0 }
    }
}

impl FrameScheduler for WindowFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.window.request_redraw();
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        log::trace!("Frame {:?} cancelled", handle);
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_stats() {
        let title = format_title("Particle Field", 48, Some(59.7), false);
        assert_eq!(title, "Particle Field - 48 particles, 60 fps");
    }

    #[test]
    fn test_title_before_first_measurement() {
        let title = format_title("Test", 0, None, false);
        assert!(title.ends_with("-- fps"));
    }

    #[test]
    fn test_title_paused() {
        let title = format_title("Test", 12, Some(60.0), true);
        assert!(title.contains("Paused"));
        assert!(!title.contains("fps"));
    }

    #[test]
    fn test_logical_size_hidpi() {
        assert_eq!(logical_size(PhysicalSize::new(1600, 1200), 2.0), (800, 600));
        assert_eq!(logical_size(PhysicalSize::new(1000, 750), 1.25), (800, 600));
        assert_eq!(logical_size(PhysicalSize::new(0, 0), 1.0), (0, 0));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
