//! The seam between the animation loop and whatever drives it.

use serde::{Deserialize, Serialize};

/// Handle of a scheduled frame callback, as issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(
    /// Raw handle value.
    pub i32,
);

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size of the visible area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for pixel-space math.
    #[inline]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for pixel-space math.
    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// Host environment that schedules frames and reports viewport changes.
///
/// A browser host maps this onto `requestAnimationFrame` and the window
/// `resize` event; a native host substitutes a fixed-rate timer.
pub trait FrameHost {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Ask for one frame callback. `None` if the host could not schedule it.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Cancel a previously requested frame callback.
    fn cancel_frame(&mut self, id: FrameId);

    /// Start delivering resize notifications.
    fn watch_resize(&mut self) {}

    /// Stop delivering resize notifications.
    fn unwatch_resize(&mut self) {}
}
