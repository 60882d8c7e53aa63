//! Surface that records draw calls
//!
//! Each primitive is stored with the state it was drawn under (colour,
//! effective alpha, shadow), so callers can assert on what would have been
//! painted without rasterizing anything.

use crate::surface::DrawSurface;
use field_math::{Rgba, Vec2};

/// Shadow state captured with a fill
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Rgba,
}

/// A recorded primitive
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        /// Global alpha at the time of the call
        alpha: f32,
        shadow: Option<Shadow>,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
        alpha: f32,
    },
}

/// [`DrawSurface`] that appends every primitive to a command list
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    global_alpha: f32,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
    shadow_blur: f32,
    shadow_color: Rgba,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            global_alpha: 1.0,
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
            shadow_blur: 0.0,
            shadow_color: Rgba::TRANSPARENT,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last full-surface clear or
    /// [`take_commands`](Self::take_commands)
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current global alpha
    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Recorded line segments
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }

    /// Recorded disks
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        // A full clear wipes everything drawn so far, so only the current frame is kept
        let full = x <= 0.0
            && y <= 0.0
            && x + width >= self.width as f32
            && y + height >= self.height as f32;
        if full {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.shadow_blur = blur;
        self.shadow_color = color;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let shadow = (self.shadow_blur > 0.0).then_some(Shadow {
            blur: self.shadow_blur,
            color: self.shadow_color,
        });
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: self.fill,
            alpha: self.global_alpha,
            shadow,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color: self.stroke,
            width: self.line_width,
            alpha: self.global_alpha,
        });
    }
}
