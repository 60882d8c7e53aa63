//! Particle entity and palette

use field_math::{Rgba, Vec2};

/// Palette a particle's colour is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    Cyan,
    Magenta,
    Purple,
    Blue,
}

impl ParticleColor {
    /// Every palette entry, in selection order
    pub const ALL: [ParticleColor; 4] = [
        ParticleColor::Cyan,
        ParticleColor::Magenta,
        ParticleColor::Purple,
        ParticleColor::Blue,
    ];

    /// `0xRRGGBB` value of this palette entry
    pub const fn hex(self) -> u32 {
        match self {
            ParticleColor::Cyan => 0x00f0ff,
            ParticleColor::Magenta => 0xff00aa,
            ParticleColor::Purple => 0xa855f7,
            ParticleColor::Blue => 0x3b82f6,
        }
    }

    /// Opaque colour for drawing
    pub fn rgba(self) -> Rgba {
        Rgba::from_hex(self.hex())
    }

    /// Map a unit sample in `[0, 1)` onto the palette
    pub fn from_unit(sample: f32) -> Self {
        let index = (sample * Self::ALL.len() as f32) as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

/// A single particle in the field
///
/// Velocity, radius, colour and lifespan are fixed at creation. Position,
/// age and opacity are advanced once per frame by [`ParticleField::tick`].
///
/// [`ParticleField::tick`]: crate::ParticleField::tick
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface space
    pub position: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    /// Rendered disk radius
    pub radius: f32,
    /// Current opacity, derived from age
    pub opacity: f32,
    pub color: ParticleColor,
    /// Frames elapsed since creation
    pub age: u32,
    /// Frames until the particle is replaced
    pub lifespan: u32,
}

impl Particle {
    /// Create a fresh particle (age 0, full opacity)
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        color: ParticleColor,
        lifespan: u32,
        max_opacity: f32,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity: max_opacity,
            color,
            age: 0,
            lifespan: lifespan.max(1),
        }
    }

    /// Set the age (clamped to the lifespan)
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age.min(self.lifespan);
        self
    }

    /// Fraction of the lifespan already spent, in `[0, 1]`
    #[inline]
    pub fn life_ratio(&self) -> f32 {
        (self.age as f32 / self.lifespan as f32).min(1.0)
    }

    /// Whether the particle has reached the end of its lifespan
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Advance one frame: move, age, fade, and wrap around the surface edges
    pub(crate) fn advance(&mut self, bounds: Vec2, max_opacity: f32) {
        self.position += self.velocity;
        self.age = self.age.saturating_add(1).min(self.lifespan);
        self.opacity = (1.0 - self.life_ratio()) * max_opacity;
        self.position = Vec2::new(
            wrap_coordinate(self.position.x, bounds.x),
            wrap_coordinate(self.position.y, bounds.y),
        );
    }
}

/// Toroidal wrap: leaving one edge re-enters at the opposite edge
#[inline]
fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value >= extent {
        0.0
    } else {
        value
    }
}
