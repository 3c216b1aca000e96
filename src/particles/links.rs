//! Links between nearby particles.

use super::grid::SpatialGrid;
use super::particle::Particle;

/// An edge between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Lower particle index.
    pub a: usize,
    /// Higher particle index.
    pub b: usize,
    /// Euclidean distance in pixels.
    pub distance: f32,
    /// Stroke alpha for this link.
    pub alpha: f32,
}

/// Alpha for a pair at `distance`, or `None` when it is not linked.
///
/// Fades linearly from `max_alpha` at zero distance to zero at `threshold`.
#[inline]
pub fn link_alpha(distance: f32, threshold: f32, max_alpha: f32) -> Option<f32> {
    if distance < threshold {
        Some(((1.0 - distance / threshold) * max_alpha).clamp(0.0, max_alpha))
    } else {
        None
    }
}

/// Test every unordered pair. Links come out ordered by `(a, b)`.
pub fn all_pairs(particles: &[Particle], threshold: f32, max_alpha: f32, out: &mut Vec<Link>) {
    out.clear();
    for (a, pa) in particles.iter().enumerate() {
        for (offset, pb) in particles[a + 1..].iter().enumerate() {
            let distance = pa.position.distance_to(&pb.position);
            if let Some(alpha) = link_alpha(distance, threshold, max_alpha) {
                out.push(Link { a, b: a + 1 + offset, distance, alpha });
            }
        }
    }
}

/// Grid-accelerated search. Produces the same links, in the same order,
/// as `all_pairs`. The grid must have been built with `cell_size >= threshold`.
pub fn via_grid(
    particles: &[Particle],
    threshold: f32,
    max_alpha: f32,
    grid: &mut SpatialGrid,
    out: &mut Vec<Link>,
) {
    debug_assert!(grid.cell_size() >= threshold);

    out.clear();
    grid.clear();
    for (i, p) in particles.iter().enumerate() {
        grid.insert(i, p.position);
    }

    let mut candidates = Vec::new();
    for (a, pa) in particles.iter().enumerate() {
        candidates.clear();
        grid.for_each_near(pa.position, |b| {
            if b > a {
                candidates.push(b);
            }
        });
        candidates.sort_unstable();

        for &b in &candidates {
            let distance = pa.position.distance_to(&particles[b].position);
            if let Some(alpha) = link_alpha(distance, threshold, max_alpha) {
                out.push(Link { a, b, distance, alpha });
            }
        }
    }
}
