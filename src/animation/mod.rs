//! Frame-driven animation of the particle field.
//!
//! `AnimationLoop` owns the mount / frame / resize / unmount lifecycle on top
//! of any `FrameHost`; `FixedRateHost` drives it where there is no display loop.

mod animation_loop;
mod fixed_rate;

pub use animation_loop::{AnimationLoop, FieldRenderer, LoopState};
pub use fixed_rate::{run_frames, run_frames_with, FixedRateHost};
