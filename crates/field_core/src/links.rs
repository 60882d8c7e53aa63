//! Proximity links between particles
//!
//! Every unordered pair closer than [`LinkConfig::max_distance`] is connected.
//! Alpha falls off linearly with distance: `(1 - d / max_distance) * max_alpha`.
//! This is an O(n²) pass, which stays cheap at the steady-state pool size.

use crate::particle::Particle;
use field_math::Vec2;

/// Link distance and opacity parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkConfig {
    /// Pairs at or beyond this distance are not connected
    pub max_distance: f32,
    /// Alpha of a link between coincident particles
    pub max_alpha: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_alpha: 0.1,
        }
    }
}

/// Alpha for a pair at `distance`, or `None` when too far apart
pub fn link_alpha(distance: f32, config: &LinkConfig) -> Option<f32> {
    if distance < config.max_distance {
        Some((1.0 - distance / config.max_distance) * config.max_alpha)
    } else {
        None
    }
}

/// A connection to draw between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Pool index of the first particle
    pub a: usize,
    /// Pool index of the second particle (`b > a`)
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    pub alpha: f32,
}

/// Iterator over all linked pairs, in `(a, b)` lexicographic order
pub struct Links<'a> {
    particles: &'a [Particle],
    config: LinkConfig,
    a: usize,
    b: usize,
}

impl<'a> Links<'a> {
    pub fn new(particles: &'a [Particle], config: LinkConfig) -> Self {
        Self {
            particles,
            config,
            a: 0,
            b: 1,
        }
    }
}

impl Iterator for Links<'_> {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        let n = self.particles.len();
        // Cheap reject before the square root
        let max_sq = self.config.max_distance * self.config.max_distance;

        while self.a < n {
            while self.b < n {
                let (a, b) = (self.a, self.b);
                self.b += 1;

                let from = self.particles[a].position;
                let to = self.particles[b].position;
                if from.distance_squared(to) >= max_sq {
                    continue;
                }
                let distance = from.distance(to);
                if let Some(alpha) = link_alpha(distance, &self.config) {
                    return Some(Link { a, b, from, to, distance, alpha });
                }
            }
            self.a += 1;
            self.b = self.a + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleColor;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, ParticleColor::Blue, 200, 0.5)
    }

    #[test]
    fn test_alpha_at_half_distance() {
        let alpha = link_alpha(50.0, &LinkConfig::default()).unwrap();
        assert!((alpha - 0.05).abs() < 1e-7);
    }

    #[test]
    fn test_no_link_at_or_beyond_max_distance() {
        let config = LinkConfig::default();
        assert_eq!(link_alpha(100.0, &config), None);
        assert_eq!(link_alpha(150.0, &config), None);
    }

    #[test]
    fn test_pairs_are_unordered_and_unique() {
        let particles = vec![at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
        let pairs: Vec<(usize, usize)> = Links::new(&particles, LinkConfig::default())
            .map(|l| (l.a, l.b))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_far_pair_skipped() {
        let particles = vec![at(0.0, 0.0), at(30.0, 40.0), at(500.0, 500.0)];
        let links: Vec<Link> = Links::new(&particles, LinkConfig::default()).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].distance, 50.0);
        assert_eq!(links[0].from, Vec2::ZERO);
        assert_eq!(links[0].to, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(Links::new(&[], LinkConfig::default()).count(), 0);
        assert_eq!(Links::new(&[at(1.0, 1.0)], LinkConfig::default()).count(), 0);
    }
}
