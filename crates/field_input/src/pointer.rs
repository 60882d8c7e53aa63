//! Pointer tracking
//!
//! Window systems report the cursor in physical pixels relative to the
//! window's client area, and keep reporting it outside that area while a
//! button is held. The particle field works in logical surface units and
//! only wants positions on the surface. [`PointerTracker`] converts between
//! the two and filters out positions beyond the surface bounds.

use field_math::Vec2;
use winit::dpi::PhysicalPosition;

/// Converts cursor events into logical surface coordinates
#[derive(Clone, Debug)]
pub struct PointerTracker {
    scale_factor: f64,
    /// Logical surface size; `None` until the first resize
    bounds: Option<Vec2>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            scale_factor: 1.0,
            bounds: None,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.set_scale_factor(scale_factor);
        self
    }

    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        self.set_surface_size(width, height);
        self
    }

    /// Update the physical-to-logical ratio (window moved to another monitor)
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Logical surface size the pointer is clipped to
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.bounds = Some(Vec2::new(width as f32, height as f32));
    }

    /// Process a cursor move
    ///
    /// Returns the logical position, or `None` when the pointer is outside
    /// the surface (a drag that left the window).
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<Vec2> {
        let logical = position.to_logical::<f64>(self.scale_factor);
        let point = Vec2::new(logical.x as f32, logical.y as f32);

        let inside = match self.bounds {
            Some(bounds) => {
                point.x >= 0.0 && point.y >= 0.0 && point.x < bounds.x && point.y < bounds.y
            }
            None => true,
        };
        inside.then_some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale_passes_through() {
        let mut tracker = PointerTracker::new().with_surface_size(800, 600);
        let p = tracker.process_cursor_moved(PhysicalPosition::new(120.0, 45.5));
        assert_eq!(p, Some(Vec2::new(120.0, 45.5)));
    }

    #[test]
    fn test_hidpi_converts_to_logical() {
        let mut tracker = PointerTracker::new()
            .with_scale_factor(2.0)
            .with_surface_size(400, 300);
        let p = tracker.process_cursor_moved(PhysicalPosition::new(200.0, 100.0));
        assert_eq!(p, Some(Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_positions_outside_surface_are_dropped() {
        let mut tracker = PointerTracker::new()
            .with_scale_factor(2.0)
            .with_surface_size(400, 300);
        assert_eq!(tracker.process_cursor_moved(PhysicalPosition::new(-4.0, 10.0)), None);
        assert_eq!(tracker.process_cursor_moved(PhysicalPosition::new(10.0, -0.5)), None);
        // 800 physical is exactly the logical width
        assert_eq!(tracker.process_cursor_moved(PhysicalPosition::new(800.0, 10.0)), None);
        assert_eq!(tracker.process_cursor_moved(PhysicalPosition::new(10.0, 900.0)), None);
        assert!(tracker.process_cursor_moved(PhysicalPosition::new(798.0, 598.0)).is_some());
    }

    #[test]
    fn test_resize_moves_the_bounds() {
        let mut tracker = PointerTracker::new().with_surface_size(100, 100);
        assert_eq!(tracker.process_cursor_moved(PhysicalPosition::new(150.0, 50.0)), None);
        tracker.set_surface_size(200, 100);
        assert!(tracker.process_cursor_moved(PhysicalPosition::new(150.0, 50.0)).is_some());
    }

    #[test]
    fn test_invalid_scale_factor_ignored() {
        let mut tracker = PointerTracker::new().with_scale_factor(1.5);
        tracker.set_scale_factor(0.0);
        tracker.set_scale_factor(f64::NAN);
        assert_eq!(tracker.scale_factor(), 1.5);
    }
}
