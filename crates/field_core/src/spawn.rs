//! Randomized particle creation
//!
//! Every attribute is drawn from a single unit sample (`rng.gen::<f32>()`)
//! scaled onto its range, so a scripted generator yields fully predictable
//! particles.

use crate::field::FieldConfig;
use crate::particle::{Particle, ParticleColor};
use field_math::Vec2;
use rand::Rng;

/// Creates particles with randomized velocity, radius, colour and lifespan
#[derive(Clone, Debug)]
pub struct ParticleSpawner {
    max_speed: f32,
    radius_min: f32,
    radius_max: f32,
    lifespan_min: u32,
    lifespan_max: u32,
    max_opacity: f32,
}

impl ParticleSpawner {
    /// Build a spawner from the field configuration
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            radius_min: config.radius_range[0],
            radius_max: config.radius_range[1],
            lifespan_min: config.lifespan_range[0],
            lifespan_max: config.lifespan_range[1],
            max_opacity: config.max_opacity,
        }
    }

    /// Spawn at a uniformly random position inside `bounds`
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, bounds: Vec2) -> Particle {
        let position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        self.spawn_at(rng, position)
    }

    /// Spawn at a specific position (pointer injection)
    pub fn spawn_at<R: Rng + ?Sized>(&self, rng: &mut R, position: Vec2) -> Particle {
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * self.max_speed,
            (rng.gen::<f32>() - 0.5) * 2.0 * self.max_speed,
        );
        let radius = self.radius_min + rng.gen::<f32>() * (self.radius_max - self.radius_min);
        let color = ParticleColor::from_unit(rng.gen::<f32>());
        let lifespan = self.sample_lifespan(rng.gen::<f32>());

        Particle::new(position, velocity, radius, color, lifespan, self.max_opacity)
    }

    /// Lifespan in `[lifespan_min, lifespan_max)`, or `lifespan_min` for an empty range
    fn sample_lifespan(&self, sample: f32) -> u32 {
        if self.lifespan_max <= self.lifespan_min {
            return self.lifespan_min;
        }
        let span = self.lifespan_max - self.lifespan_min;
        let offset = ((sample * span as f32) as u32).min(span - 1);
        self.lifespan_min + offset
    }
}
