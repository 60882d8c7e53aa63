//! The live particle pool

use crate::links::{LinkConfig, Links};
use crate::particle::Particle;
use crate::spawn::ParticleSpawner;
use field_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound on pool growth from pointer injection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolLimit {
    /// Pointer injection may grow the pool without bound
    Unbounded,
    /// Injection beyond this size evicts the oldest particle
    Capped(usize),
}

impl PoolLimit {
    /// Limit from a plain count; `0` means [`PoolLimit::Unbounded`]
    pub fn from_count(limit: usize) -> Self {
        match limit {
            0 => PoolLimit::Unbounded,
            n => PoolLimit::Capped(n),
        }
    }
}

/// Configuration for the particle field
#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Upper bound on the pool size after (re)initialization
    pub max_particles: usize,
    /// Surface area (square units) per particle when sizing the pool
    pub area_per_particle: f32,
    /// Per-axis speed bound; velocities fall in `[-max_speed, max_speed)`
    pub max_speed: f32,
    /// Radius range `[min, max)`
    pub radius_range: [f32; 2],
    /// Lifespan range in frames `[min, max)`
    pub lifespan_range: [u32; 2],
    /// Opacity of a newborn particle
    pub max_opacity: f32,
    /// Probability that a pointer-move event injects a particle
    pub pointer_spawn_chance: f32,
    pub pool_limit: PoolLimit,
    pub links: LinkConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 50,
            area_per_particle: 10_000.0,
            max_speed: 0.25,
            radius_range: [0.5, 2.5],
            lifespan_range: [100, 300],
            max_opacity: 0.5,
            pointer_spawn_chance: 0.1,
            pool_limit: PoolLimit::Capped(150),
            links: LinkConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Pool size for a surface of the given dimensions
    ///
    /// `min(max_particles, floor(width * height / area_per_particle))`
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        if self.area_per_particle <= 0.0 {
            return self.max_particles;
        }
        let area = width.max(0.0) * height.max(0.0);
        let by_area = (area / self.area_per_particle).floor() as usize;
        by_area.min(self.max_particles)
    }
}

/// Outcome of a single [`ParticleField::tick`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles that reached their lifespan and were replaced
    pub expired: usize,
    /// Pool size after the tick
    pub live: usize,
}

/// The particle pool and the rules that evolve it
///
/// The random source is a type parameter so tests can substitute a seeded or
/// scripted generator.
pub struct ParticleField<R = StdRng> {
    config: FieldConfig,
    spawner: ParticleSpawner,
    particles: Vec<Particle>,
    size: Vec2,
    rng: R,
}

impl ParticleField<StdRng> {
    /// Create an empty field seeded from OS entropy
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an empty field with a reproducible seed
    pub fn seeded(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create an empty field drawing randomness from `rng`
    pub fn with_rng(config: FieldConfig, rng: R) -> Self {
        let spawner = ParticleSpawner::from_config(&config);
        Self {
            config,
            spawner,
            particles: Vec::new(),
            size: Vec2::ZERO,
            rng,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Logical surface size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Live particles in pool order (oldest first)
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the pool, for seeding exact states
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Set the surface size and rebuild the pool
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.reinitialize();
    }

    /// Discard the pool and refill it for the current surface size
    ///
    /// The resulting size depends only on the surface dimensions.
    pub fn reinitialize(&mut self) {
        let count = self.config.particle_count(self.size.x, self.size.y);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.spawner.spawn(&mut self.rng, self.size);
            self.particles.push(particle);
        }
        log::debug!(
            "Reinitialized particle pool: {} particles for {}x{} surface",
            count, self.size.x, self.size.y
        );
    }

    /// Possibly inject a particle at the pointer position
    ///
    /// Returns `true` when a particle was added.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        if self.rng.gen::<f32>() >= self.config.pointer_spawn_chance {
            return false;
        }
        let particle = self.spawner.spawn_at(&mut self.rng, Vec2::new(x, y));
        self.push(particle);
        true
    }

    /// Append a particle, honouring the pool limit
    ///
    /// With [`PoolLimit::Capped`], the oldest particles are evicted to make room.
    pub fn push(&mut self, particle: Particle) {
        if let PoolLimit::Capped(limit) = self.config.pool_limit {
            if limit == 0 {
                return;
            }
            let overflow = (self.particles.len() + 1).saturating_sub(limit);
            if overflow > 0 {
                self.particles.drain(..overflow);
                log::trace!("Pool at capacity ({}), evicted {} oldest", limit, overflow);
            }
        }
        self.particles.push(particle);
    }

    /// Advance every particle by one frame
    ///
    /// Particles are moved, aged, faded and wrapped in pool order. Expired
    /// particles are then removed and the same number of fresh particles is
    /// appended; those newcomers are not advanced until the next tick.
    pub fn tick(&mut self) -> TickReport {
        let bounds = self.size;
        let max_opacity = self.config.max_opacity;

        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            particle.advance(bounds, max_opacity);
            !particle.is_expired()
        });
        let expired = before - self.particles.len();

        for _ in 0..expired {
            let particle = self.spawner.spawn(&mut self.rng, bounds);
            self.particles.push(particle);
        }

        TickReport {
            expired,
            live: self.particles.len(),
        }
    }

    /// Pairs of particles close enough to be connected
    pub fn links(&self) -> Links<'_> {
        Links::new(&self.particles, self.config.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleColor;
    use rand::rngs::mock::StepRng;

    /// Generator whose every unit sample is 0.0
    fn zeros() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Generator whose every unit sample is just below 1.0
    fn ones() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_particle_count_formula() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(800.0, 600.0), 48);
        assert_eq!(config.particle_count(2000.0, 2000.0), 50);
        assert_eq!(config.particle_count(99.0, 100.0), 0);
        assert_eq!(config.particle_count(-5.0, 100.0), 0);
    }

    #[test]
    fn test_resize_fills_pool() {
        let mut field = ParticleField::seeded(FieldConfig::default(), 3);
        field.resize(800.0, 600.0);
        assert_eq!(field.len(), 48);
        assert_eq!(field.size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_pointer_move_injects_when_sample_below_chance() {
        let mut field = ParticleField::with_rng(FieldConfig::default(), zeros());
        field.resize(100.0, 100.0);
        assert_eq!(field.len(), 1);

        assert!(field.on_pointer_move(12.0, 34.0));
        assert_eq!(field.len(), 2);
        assert_eq!(field.particles()[1].position, Vec2::new(12.0, 34.0));
        assert_eq!(field.particles()[1].age, 0);
    }

    #[test]
    fn test_pointer_move_skips_when_sample_above_chance() {
        let mut field = ParticleField::with_rng(FieldConfig::default(), ones());
        assert!(!field.on_pointer_move(12.0, 34.0));
        assert!(field.is_empty());
    }

    #[test]
    fn test_capped_pool_evicts_oldest() {
        let config = FieldConfig {
            pool_limit: PoolLimit::Capped(3),
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_rng(config, zeros());
        for i in 0..5 {
            field.on_pointer_move(i as f32, 0.0);
        }
        let xs: Vec<f32> = field.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_unbounded_pool_grows() {
        let config = FieldConfig {
            pool_limit: PoolLimit::Unbounded,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_rng(config, zeros());
        for _ in 0..500 {
            field.on_pointer_move(1.0, 1.0);
        }
        assert_eq!(field.len(), 500);
    }

    #[test]
    fn test_pool_limit_from_count() {
        assert_eq!(PoolLimit::from_count(0), PoolLimit::Unbounded);
        assert_eq!(PoolLimit::from_count(150), PoolLimit::Capped(150));
    }

    #[test]
    fn test_tick_replaces_expired_particle() {
        let mut field = ParticleField::with_rng(FieldConfig::default(), zeros());
        field.resize(800.0, 600.0);
        field.particles_mut()[0] = Particle::new(
            Vec2::new(400.0, 300.0),
            Vec2::new(0.1, 0.1),
            1.0,
            ParticleColor::Purple,
            150,
            0.5,
        )
        .with_age(149);

        let report = field.tick();

        assert_eq!(report.expired, 1);
        assert_eq!(report.live, 48);
        assert_eq!(field.len(), 48);
        // The replacement is appended last and has not been advanced
        let newest = field.particles().last().unwrap();
        assert_eq!(newest.age, 0);
        assert_eq!(newest.opacity, 0.5);
        // The expired purple particle is gone
        assert!(field.particles().iter().all(|p| p.color != ParticleColor::Purple));
    }

    #[test]
    fn test_tick_preserves_pool_order_of_survivors() {
        let mut field = ParticleField::with_rng(FieldConfig::default(), zeros());
        field.resize(1000.0, 100.0);
        for (i, p) in field.particles_mut().iter_mut().enumerate() {
            p.position = Vec2::new(10.0 * i as f32 + 5.0, 50.0);
        }
        let expected: Vec<f32> = field.particles().iter().map(|p| p.position.x - 0.25).collect();
        field.tick();
        let actual: Vec<f32> = field.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_reinitialize_ignores_previous_contents() {
        let mut field = ParticleField::with_rng(FieldConfig::default(), zeros());
        field.resize(800.0, 600.0);
        for _ in 0..20 {
            field.on_pointer_move(0.0, 0.0);
        }
        assert_eq!(field.len(), 68);
        field.reinitialize();
        assert_eq!(field.len(), 48);
    }
}
