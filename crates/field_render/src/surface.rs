//! Drawing surface contract
//!
//! A minimal immediate-mode 2D canvas: settable fill/stroke/alpha/shadow
//! state plus three primitives (clear a rectangle, fill a disk, stroke a
//! segment). Coordinates are in surface units with the origin at the top-left.

use field_math::{Rgba, Vec2};

/// A 2D raster target the renderer paints onto every frame
pub trait DrawSurface {
    /// Current size in surface units
    fn size(&self) -> (u32, u32);

    /// Resize the surface; contents are discarded
    fn resize(&mut self, width: u32, height: u32);

    /// Reset a rectangle to fully transparent
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Multiplier applied to the alpha of every subsequent draw
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_fill_color(&mut self, color: Rgba);

    fn set_stroke_color(&mut self, color: Rgba);

    fn set_line_width(&mut self, width: f32);

    /// Blurred shadow drawn beneath subsequent fills; `blur == 0` disables it
    fn set_shadow(&mut self, blur: f32, color: Rgba);

    /// Fill a disk with the current fill colour
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Stroke a line segment with the current stroke colour and width
    fn stroke_line(&mut self, from: Vec2, to: Vec2);

    /// Clear the whole surface
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.clear_rect(0.0, 0.0, width as f32, height as f32);
    }
}
