//! # Render Module
//!
//! The `DrawSurface` seam, the painter that draws a field onto it, and the
//! native backends: a software rasterizer and a command recorder.

mod painter;
mod raster;
mod recording;
mod surface;

pub use painter::{FieldPainter, FrameStats};
pub use raster::{Pixel, PixelSurface};
pub use recording::{CommandLog, DrawCommand, RecordingSurface};
pub use surface::{DrawSurface, Gradient, GradientStop};
