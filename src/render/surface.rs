//! The drawing seam between the painter and a backend.

use crate::core::Viewport;
use crate::math::{Color, Vector2};

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 to 1.0.
    pub offset: f32,
    /// Color at this position.
    pub color: Color,
}

/// A gradient described by ordered color stops.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create an empty gradient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop, keeping stops sorted by offset.
    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
        self
    }

    /// The stops in offset order.
    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at position `t`, interpolating between neighboring stops.
    pub fn sample(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::TRANSPARENT,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(&hi.color, (t - lo.offset) / span);
            }
        }
        last.color
    }
}

/// A 2D surface the particle field can be painted onto.
///
/// Output is purely cosmetic, so drawing calls cannot fail; backends report
/// host errors through the log and carry on.
pub trait DrawSurface {
    /// Current size in pixels.
    fn size(&self) -> Viewport;

    /// Resize the backing store. Contents after a resize are unspecified.
    fn resize(&mut self, viewport: Viewport);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color, width: f32);

    /// Fill a solid circle.
    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color);

    /// Fill a circle with a radial gradient running from the center (offset 0)
    /// to `radius` (offset 1).
    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, gradient: &Gradient);
}
