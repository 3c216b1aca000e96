//! # neural-field - animated particle mesh renderer
//!
//! A fixed set of particles drifts around a drawing surface, bouncing off its
//! edges. Every pair closer than a link distance is joined by a line that fades
//! with distance, and each particle is drawn as a soft glow with a bright core.
//!
//! ## Features
//!
//! - **Particles**: the simulation, link search (all pairs or spatial grid), configuration
//! - **Render**: the `DrawSurface` seam, painter, software rasterizer, command recorder
//! - **Animation**: mount / frame / resize / unmount lifecycle over any `FrameHost`
//! - **Web** (`web` feature, wasm32): canvas 2D surface and `requestAnimationFrame` host
//!
//! ## Example
//!
//! ```
//! use neural_field::prelude::*;
//!
//! let host = FixedRateHost::new(Viewport::new(640, 360));
//! let surface = PixelSurface::new(0, 0);
//! let config = FieldConfig::default().with_seed(7);
//!
//! let mut animation = AnimationLoop::mount(host, Some(surface), config);
//! run_frames(&mut animation, 10);
//! assert_eq!(animation.frame_count(), 11);
//! animation.unmount();
//! ```

#![warn(missing_docs)]

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

pub mod math;
pub mod core;
pub mod error;
pub mod particles;
pub mod render;
pub mod animation;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::{FieldError, Result};

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::animation::*;
    pub use crate::core::*;
    pub use crate::error::FieldError;
    pub use crate::math::*;
    pub use crate::particles::*;
    pub use crate::render::*;
}

/// Initialize the module for WASM environments.
/// Sets up the panic hook and routes `log` output to the browser console.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web::init_logging(log::LevelFilter::Warn);
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
