//! 2D vector in surface pixel space.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or displacement on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2 {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl Vector2 {
    /// The origin, top-left corner of the surface.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance_to(&self, other: &Vector2) -> f32 {
        (*self - *other).length()
    }

    /// Distance from this point to the segment `a..b`.
    pub fn distance_to_segment(&self, a: &Vector2, b: &Vector2) -> f32 {
        let ab = *b - *a;
        let len_sq = ab.length_squared();
        if len_sq == 0.0 {
            return self.distance_to(a);
        }
        let t = ((*self - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&(*a + ab * t))
    }

    /// Clamp each coordinate into `[min, max]`.
    #[inline]
    pub fn clamp(&self, min: &Vector2, max: &Vector2) -> Self {
        Self::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}
