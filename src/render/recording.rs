//! A surface that records draw calls instead of rasterizing them.

use std::cell::RefCell;
use std::rc::Rc;

use super::surface::{DrawSurface, Gradient};
use crate::core::Viewport;
use crate::math::{Color, Vector2};

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Backing store resized.
    Resize(Viewport),
    /// Surface cleared.
    Clear,
    /// Line stroked.
    Line {
        /// Start point.
        from: Vector2,
        /// End point.
        to: Vector2,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f32,
    },
    /// Solid circle filled.
    Circle {
        /// Center.
        center: Vector2,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Radial gradient filled.
    RadialGradient {
        /// Center.
        center: Vector2,
        /// Radius.
        radius: f32,
        /// Gradient stops.
        gradient: Gradient,
    },
}

/// Shared handle to the commands a `RecordingSurface` has seen.
///
/// Stays readable after the surface itself has been dropped.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<DrawCommand>>>);

impl CommandLog {
    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of every recorded command.
    pub fn snapshot(&self) -> Vec<DrawCommand> {
        self.0.borrow().clone()
    }

    /// Drain and return the recorded commands.
    pub fn take(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Count commands matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, command: DrawCommand) {
        self.0.borrow_mut().push(command);
    }
}

/// `DrawSurface` that appends every call to a `CommandLog`.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Viewport,
    log: CommandLog,
}

impl RecordingSurface {
    /// Create a recording surface with zero size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the command log.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.log.push(DrawCommand::Resize(viewport));
    }

    fn clear(&mut self) {
        self.log.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color, width: f32) {
        self.log.push(DrawCommand::Line { from, to, color, width });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.log.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, gradient: &Gradient) {
        self.log.push(DrawCommand::RadialGradient {
            center,
            radius,
            gradient: gradient.clone(),
        });
    }
}
