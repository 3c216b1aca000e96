//! # Core Module
//!
//! Frame timing and the host abstraction the animation loop runs on.

mod clock;
mod host;

pub use clock::Clock;
pub use host::{FrameHost, FrameId, Viewport};

/// Nominal refresh rate used when the host has no display loop.
pub const DEFAULT_FRAME_RATE: f64 = 60.0;
