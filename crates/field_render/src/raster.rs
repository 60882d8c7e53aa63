//! Software raster surface
//!
//! Pixels are stored as premultiplied RGBA8, row-major, top row first, which
//! is exactly what the blit pipeline uploads. Drawing composites with
//! source-over. Disks and lines are anti-aliased by distance-based coverage;
//! the shadow is approximated with a Gaussian falloff outside the shape edge
//! (sigma = blur / 2, as canvas shadows are specified).

use crate::surface::DrawSurface;
use field_math::{Rgba, Vec2};

const BYTES_PER_PIXEL: usize = 4;

/// CPU-side RGBA canvas
#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    global_alpha: f32,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
    shadow_blur: f32,
    shadow_color: Rgba,
}

impl PixelSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            global_alpha: 1.0,
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
            shadow_blur: 0.0,
            shadow_color: Rgba::TRANSPARENT,
        }
    }

    /// Premultiplied RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Premultiplied RGBA of one pixel, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(out)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Clamp a float-space box to pixel indices; `None` when fully outside
    fn pixel_bounds(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Source-over composite of `color` at `coverage * color.a` onto one pixel
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let a = (color.a * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let inv = 1.0 - a;
        let src = [color.r * a, color.g * a, color.b * a, a];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.pixels[idx + channel] as f32 / 255.0;
            let out = value + dst * inv;
            self.pixels[idx + channel] = (out * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
        }
    }

    /// Paint the shadow of a disk, beneath whatever fill follows
    fn shadow_circle(&mut self, center: Vec2, radius: f32) {
        let sigma = self.shadow_blur / 2.0;
        let reach = radius + self.shadow_blur * 1.5;
        let color = self.shadow_color.with_alpha(self.shadow_color.a * self.global_alpha);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(
            center - Vec2::new(reach, reach),
            center + Vec2::new(reach, reach),
        ) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let outside = (d - radius).max(0.0);
                let falloff = (-(outside * outside) / (2.0 * sigma * sigma)).exp();
                self.blend(x, y, color, falloff);
            }
        }
    }
}

/// Shortest distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize * BYTES_PER_PIXEL, 0);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some((x0, y0, x1, y1)) =
            self.pixel_bounds(Vec2::new(x, y), Vec2::new(x + width, y + height))
        else {
            return;
        };
        for row in y0..y1 {
            let start = self.index(x0, row);
            let end = self.index(x1 - 1, row) + BYTES_PER_PIXEL;
            self.pixels[start..end].fill(0);
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.shadow_blur = blur.max(0.0);
        self.shadow_color = color;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        if self.shadow_blur > 0.0 && self.shadow_color.a > 0.0 {
            self.shadow_circle(center, radius);
        }

        let color = self.fill.with_alpha(self.fill.a * self.global_alpha);
        let reach = radius + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(
            center - Vec2::new(reach, reach),
            center + Vec2::new(reach, reach),
        ) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        let half = self.line_width / 2.0;
        if half <= 0.0 {
            return;
        }
        let color = self.stroke.with_alpha(self.stroke.a * self.global_alpha);
        let pad = Vec2::new(half + 1.0, half + 1.0);
        let Some((x0, y0, x1, y1)) =
            self.pixel_bounds(from.min_components(to) - pad, from.max_components(to) + pad)
        else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(p, from, to)).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }
}
