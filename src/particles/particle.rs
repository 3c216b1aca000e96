//! A single drifting point of the field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::Vector2;

/// Particle state: position in surface pixels and velocity in pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    /// Position in surface pixel space.
    pub position: Vector2,
    /// Velocity in pixels per frame.
    pub velocity: Vector2,
}

impl Particle {
    /// Create a particle at a position with a velocity.
    #[inline]
    pub const fn new(position: Vector2, velocity: Vector2) -> Self {
        Self { position, velocity }
    }

    /// Random particle: position uniform over `width` x `height`,
    /// each velocity component uniform over `[-max_speed, max_speed)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, max_speed: f32) -> Self {
        let position = Vector2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let velocity = Vector2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * max_speed,
            (rng.random::<f32>() - 0.5) * 2.0 * max_speed,
        );
        Self { position, velocity }
    }

    /// Advance one frame inside `[0, width] x [0, height]`.
    ///
    /// A coordinate that lands strictly outside its range flips the sign of
    /// that velocity component and is clamped back onto the edge. This is not
    /// a true reflection; the overshoot is discarded.
    pub fn step(&mut self, width: f32, height: f32) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }

        self.position = self
            .position
            .clamp(&Vector2::ZERO, &Vector2::new(width.max(0.0), height.max(0.0)));
    }

    /// Whether the particle lies inside `[0, width] x [0, height]`.
    #[inline]
    pub fn is_within(&self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.position.x) && (0.0..=height).contains(&self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_moves_by_velocity() {
        let mut p = Particle::new(Vector2::new(10.0, 20.0), Vector2::new(0.5, -0.25));
        p.step(100.0, 100.0);
        assert_eq!(p.position, Vector2::new(10.5, 19.75));
        assert_eq!(p.velocity, Vector2::new(0.5, -0.25));
    }

    #[test]
    fn test_right_edge_flips_vx() {
        let mut p = Particle::new(Vector2::new(100.0, 50.0), Vector2::new(0.5, 0.1));
        p.step(100.0, 100.0);
        assert_eq!(p.velocity.x, -0.5);
        assert_eq!(p.velocity.y, 0.1);
        assert_eq!(p.position.x, 100.0);
    }

    #[test]
    fn test_left_and_top_edges_flip() {
        let mut p = Particle::new(Vector2::new(0.0, 0.0), Vector2::new(-0.3, -0.4));
        p.step(100.0, 100.0);
        assert_eq!(p.velocity, Vector2::new(0.3, 0.4));
        assert_eq!(p.position, Vector2::ZERO);

        // Next frame moves back inward without another flip.
        p.step(100.0, 100.0);
        assert_eq!(p.velocity, Vector2::new(0.3, 0.4));
        assert!(p.position.x > 0.0 && p.position.y > 0.0);
    }

    #[test]
    fn test_resting_on_edge_does_not_flip() {
        let mut p = Particle::new(Vector2::new(100.0, 0.0), Vector2::ZERO);
        p.step(100.0, 100.0);
        assert_eq!(p.velocity, Vector2::ZERO);
        assert_eq!(p.position, Vector2::new(100.0, 0.0));
    }

    #[test]
    fn test_far_outside_is_clamped() {
        // After a shrink the particle can be well beyond the new bounds.
        let mut p = Particle::new(Vector2::new(500.0, 400.0), Vector2::new(0.2, 0.2));
        p.step(300.0, 200.0);
        assert_eq!(p.position, Vector2::new(300.0, 200.0));
        assert_eq!(p.velocity, Vector2::new(-0.2, -0.2));
    }

    #[test]
    fn test_random_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 640.0, 480.0, 0.6);
            assert!(p.is_within(640.0, 480.0));
            assert!(p.velocity.x >= -0.6 && p.velocity.x < 0.6);
            assert!(p.velocity.y >= -0.6 && p.velocity.y < 0.6);
        }
    }

    #[test]
    fn test_random_on_empty_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::random(&mut rng, 0.0, 0.0, 0.6);
        assert_eq!(p.position, Vector2::ZERO);
    }
}
