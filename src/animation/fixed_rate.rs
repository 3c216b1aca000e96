//! Fixed-rate frame host for environments without a display loop.

use std::convert::Infallible;
use std::time::Duration;

use crate::core::{Clock, FrameHost, FrameId, Viewport, DEFAULT_FRAME_RATE};
use crate::render::DrawSurface;

use super::animation_loop::AnimationLoop;

/// Frame host that stands in for a display refresh callback with a timer.
///
/// Frame ids are sequential. At most one frame is outstanding at a time,
/// matching how a display loop hands out callbacks.
pub struct FixedRateHost {
    viewport: Viewport,
    interval: Duration,
    realtime: bool,
    next_id: i32,
    pending: Option<FrameId>,
    cancelled: u32,
}

impl FixedRateHost {
    /// Host for a viewport at the default 60 Hz, not paced.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            interval: Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE),
            realtime: false,
            next_id: 0,
            pending: None,
            cancelled: 0,
        }
    }

    /// Set the frame rate. Non-positive rates fall back to the default.
    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { DEFAULT_FRAME_RATE };
        self.interval = Duration::from_secs_f64(1.0 / fps);
        self
    }

    /// Sleep between frames so they land on the frame interval.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Change the viewport. The loop picks it up on `on_resize`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Time between frames.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The outstanding frame, if any.
    #[inline]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// How many frames were cancelled.
    #[inline]
    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl FrameHost for FixedRateHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        self.next_id = self.next_id.wrapping_add(1);
        let id = FrameId(self.next_id);
        self.pending = Some(id);
        Some(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

/// Fire up to `frames` frame callbacks on a loop hosted by a `FixedRateHost`.
///
/// Stops early once nothing is pending. Returns how many frames were painted.
pub fn run_frames<S: DrawSurface>(animation: &mut AnimationLoop<FixedRateHost, S>, frames: u64) -> u64 {
    run_frames_with(animation, frames, |_| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {})
}

/// Like `run_frames`, calling `after_frame` once each frame is painted.
///
/// Realtime pacing runs off one clock for the whole run, so time spent in
/// `after_frame` counts toward the next interval. The first error stops the
/// run and is returned.
pub fn run_frames_with<S, E, F>(
    animation: &mut AnimationLoop<FixedRateHost, S>,
    frames: u64,
    mut after_frame: F,
) -> Result<u64, E>
where
    S: DrawSurface,
    F: FnMut(&AnimationLoop<FixedRateHost, S>) -> Result<(), E>,
{
    let interval = animation.host().interval().as_secs_f64();
    let realtime = animation.host().realtime;
    let mut clock = Clock::start_new();
    let mut painted = 0;

    for _ in 0..frames {
        if animation.host_mut().pending.take().is_none() {
            break;
        }

        if realtime {
            let remaining = interval - clock.since_last_tick();
            if remaining > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(remaining));
            }
            clock.tick();
        }

        if animation.on_frame().is_none() {
            break;
        }
        painted += 1;
        after_frame(animation)?;
    }

    log::debug!("Ran {} of {} requested frames", painted, frames);
    Ok(painted)
}
