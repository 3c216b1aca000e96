//! # Math Module
//!
//! 2D vectors and RGBA colors in surface pixel space.

mod vector2;
mod color;

pub use vector2::Vector2;
pub use color::Color;
