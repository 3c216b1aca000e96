//! The particle field: a fixed set of particles drifting inside a surface.

use rand::Rng;

use super::config::{FieldConfig, NeighborSearch};
use super::grid::SpatialGrid;
use super::links::{self, Link};
use super::particle::Particle;
use crate::core::Viewport;

/// A fixed-size set of particles bouncing around `[0, width] x [0, height]`.
///
/// The particle count is set at construction and never changes.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    link_distance: f32,
    max_link_alpha: f32,
    search: NeighborSearch,
    grid: Option<SpatialGrid>,
    links: Vec<Link>,
}

impl ParticleField {
    /// Spawn `config.particle_count` random particles over the viewport.
    pub fn new<R: Rng + ?Sized>(config: &FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let (width, height) = (viewport.width_f32(), viewport.height_f32());
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut *rng, width, height, config.max_speed))
            .collect();
        Self::from_particles(config, viewport, particles)
    }

    /// Build a field from explicit particles.
    pub fn from_particles(config: &FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        let (width, height) = (viewport.width_f32(), viewport.height_f32());
        let search = config.neighbor_search.resolve(particles.len());
        let grid = match search {
            NeighborSearch::Grid => Some(SpatialGrid::new(config.link_distance, width, height)),
            _ => None,
        };

        Self {
            particles,
            width,
            height,
            link_distance: config.link_distance,
            max_link_alpha: config.max_link_alpha,
            search,
            grid,
            links: Vec::new(),
        }
    }

    /// The particles, in spawn order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current bounds as `(width, height)`.
    #[inline]
    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Resolved pair search strategy.
    #[inline]
    pub fn neighbor_search(&self) -> NeighborSearch {
        self.search
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }

    /// Change the bounds. Particles are not rescaled; any now outside are
    /// pulled back in by their next `step`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width_f32();
        self.height = viewport.height_f32();
        if let Some(grid) = &mut self.grid {
            grid.reshape(self.width, self.height);
        }
    }

    /// Recompute links for the current positions. Returns how many there are.
    pub fn update_links(&mut self) -> usize {
        match &mut self.grid {
            Some(grid) => links::via_grid(
                &self.particles,
                self.link_distance,
                self.max_link_alpha,
                grid,
                &mut self.links,
            ),
            None => links::all_pairs(
                &self.particles,
                self.link_distance,
                self.max_link_alpha,
                &mut self.links,
            ),
        }
        self.links.len()
    }

    /// Links from the last `update_links`, ordered by `(a, b)`.
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(config: &FieldConfig, w: u32, h: u32) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(11);
        ParticleField::new(config, Viewport::new(w, h), &mut rng)
    }

    #[test]
    fn test_spawns_configured_count() {
        let f = field(&FieldConfig::default(), 800, 600);
        assert_eq!(f.len(), 80);
        assert!(f.particles().iter().all(|p| p.is_within(800.0, 600.0)));
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_frames() {
        let config = FieldConfig {
            max_speed: 7.0,
            ..FieldConfig::default()
        };
        let mut f = field(&config, 320, 240);
        for _ in 0..5_000 {
            f.step();
            assert!(f.particles().iter().all(|p| p.is_within(320.0, 240.0)));
        }
        assert_eq!(f.len(), 80);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut f = field(&FieldConfig::default(), 800, 600);
        let before = f.particles().to_vec();

        f.resize(Viewport::new(400, 300));
        assert_eq!(f.bounds(), (400.0, 300.0));
        assert_eq!(f.particles(), &before[..]);

        f.step();
        assert_eq!(f.len(), before.len());
        assert!(f.particles().iter().all(|p| p.is_within(400.0, 300.0)));
    }

    #[test]
    fn test_auto_picks_grid_for_large_fields() {
        let config = FieldConfig {
            particle_count: 1_000,
            ..FieldConfig::default()
        };
        assert_eq!(field(&config, 1920, 1080).neighbor_search(), NeighborSearch::Grid);
        assert_eq!(field(&FieldConfig::default(), 1920, 1080).neighbor_search(), NeighborSearch::AllPairs);
    }

    #[test]
    fn test_grid_links_follow_resize() {
        let config = FieldConfig {
            neighbor_search: NeighborSearch::Grid,
            ..FieldConfig::default()
        };
        let particles = vec![
            Particle::new(Vector2::new(10.0, 10.0), Vector2::ZERO),
            Particle::new(Vector2::new(1500.0, 900.0), Vector2::ZERO),
            Particle::new(Vector2::new(1550.0, 900.0), Vector2::ZERO),
        ];
        let mut f = ParticleField::from_particles(&config, Viewport::new(200, 200), particles);
        f.resize(Viewport::new(1600, 1000));

        assert_eq!(f.update_links(), 1);
        let pairs: Vec<(usize, usize)> = f.links().iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(1, 2)]);
    }
}
