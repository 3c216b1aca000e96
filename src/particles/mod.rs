//! Particle field simulation.
//!
//! A fixed set of particles drifts around the surface, bouncing off its
//! edges, and every pair closer than the link distance is joined by a link
//! whose alpha fades with distance.

mod config;
mod field;
mod grid;
mod links;
mod particle;

pub use config::{FieldConfig, NeighborSearch, Palette, GRID_SEARCH_THRESHOLD};
pub use field::ParticleField;
pub use grid::{SpatialGrid, MAX_GRID_CELLS};
pub use links::{all_pairs, link_alpha, via_grid, Link};
pub use particle::Particle;
