//! GPU rendering system
//!
//! Manages GPU presentation including:
//! - Render context and surface
//! - Blit pipeline
//! - Uploading the software canvas and presenting it

use std::sync::Arc;
use winit::window::Window;
use field_render::{
    context::{ContextError, RenderContext},
    pipeline::{BlitPipeline, BlitUniforms},
    PixelSurface, Rgba,
};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU presentation of the canvas
pub struct RenderSystem {
    context: RenderContext,
    blit: BlitPipeline,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system for `window`
    pub fn new(window: Arc<Window>, background: [f32; 4], vsync: bool) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;
        let blit = BlitPipeline::new(&context.device, context.format());

        let background = Rgba::from(background).with_alpha(1.0);
        blit.update_uniforms(&context.queue, &BlitUniforms::new(background));

        log::info!(
            "Render system ready at {}x{}",
            context.size.width, context.size.height
        );

        Ok(Self {
            context,
            blit,
            clear_color: wgpu::Color {
                r: background.r as f64,
                g: background.g as f64,
                b: background.b as f64,
                a: 1.0,
            },
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure after [`RenderError::SurfaceLost`]
    pub fn recover(&mut self) {
        self.context.reconfigure();
    }

    /// Upload `canvas` and present it over the background
    pub fn present(&mut self, canvas: &PixelSurface) -> Result<(), RenderError> {
        self.blit
            .upload(&self.context.device, &self.context.queue, canvas);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blit Encoder"),
            });

        self.blit.render(&mut encoder, &view, self.clear_color);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Outdated),
            RenderError::SurfaceLost
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::OutOfMemory),
            RenderError::OutOfMemory
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Timeout),
            RenderError::Other(_)
        ));
    }
}
