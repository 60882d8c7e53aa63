//! Particle field renderer
//!
//! Paints one frame of a [`ParticleField`] onto any [`DrawSurface`]:
//! 1. Clear the surface
//! 2. Stroke a faint line for every linked pair
//! 3. Fill each particle's disk at its current opacity
//! 4. Fill a smaller disk with a blurred shadow in the particle colour (glow)

use bitflags::bitflags;
use field_core::ParticleField;
use field_math::Rgba;
use rand::Rng;

use crate::surface::DrawSurface;

bitflags! {
    /// Which layers of the effect are drawn
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderLayers: u8 {
        /// Connection lines between nearby particles
        const LINKS = 1 << 0;
        /// Particle disks
        const PARTICLES = 1 << 1;
        /// Blurred glow beneath each particle
        const GLOW = 1 << 2;
    }
}

impl Default for RenderLayers {
    fn default() -> Self {
        RenderLayers::all()
    }
}

/// Styling for links and glow
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Stroke colour of connection lines (alpha comes from the link)
    pub link_color: Rgba,
    pub link_width: f32,
    /// Shadow blur radius of the glow disk
    pub glow_blur: f32,
    /// Glow disk radius relative to the particle radius
    pub glow_scale: f32,
    pub layers: RenderLayers,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            link_color: Rgba::from_hex(0x00f0ff),
            link_width: 0.5,
            glow_blur: 10.0,
            glow_scale: 0.5,
            layers: RenderLayers::default(),
        }
    }
}

/// Draws particle fields onto a surface
#[derive(Clone, Debug, Default)]
pub struct FieldRenderer {
    pub config: RenderConfig,
}

impl FieldRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render one frame
    pub fn render<R, S>(&self, field: &ParticleField<R>, surface: &mut S)
    where
        R: Rng,
        S: DrawSurface + ?Sized,
    {
        let layers = self.config.layers;
        surface.clear();

        if layers.contains(RenderLayers::LINKS) {
            surface.set_stroke_color(self.config.link_color);
            surface.set_line_width(self.config.link_width);
            for link in field.links() {
                surface.set_global_alpha(link.alpha);
                surface.stroke_line(link.from, link.to);
            }
        }

        if layers.intersects(RenderLayers::PARTICLES | RenderLayers::GLOW) {
            for particle in field.particles() {
                let color = particle.color.rgba();
                surface.set_global_alpha(particle.opacity);
                surface.set_fill_color(color);

                if layers.contains(RenderLayers::PARTICLES) {
                    surface.fill_circle(particle.position, particle.radius);
                }

                if layers.contains(RenderLayers::GLOW) {
                    surface.set_shadow(self.config.glow_blur, color);
                    surface.fill_circle(particle.position, particle.radius * self.config.glow_scale);
                    surface.set_shadow(0.0, color);
                }
            }
        }

        surface.set_global_alpha(1.0);
    }
}
