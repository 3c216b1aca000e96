//! Frame clock used to pace fixed-rate hosts.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use web_sys::window;

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
use std::time::Instant;

/// A clock measuring time between frame ticks.
pub struct Clock {
    /// Whether the clock is running.
    running: bool,
    /// Time of the last tick in seconds.
    last_tick: f64,
    /// Total elapsed time while running.
    elapsed_time: f64,
    /// Number of ticks since start.
    ticks: u64,

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    instant: Option<Instant>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a new clock (not started).
    pub fn new() -> Self {
        Self {
            running: false,
            last_tick: 0.0,
            elapsed_time: 0.0,
            ticks: 0,
            #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
            instant: None,
        }
    }

    /// Create and start a new clock.
    pub fn start_new() -> Self {
        let mut clock = Self::new();
        clock.start();
        clock
    }

    /// Current time in seconds.
    fn now(&self) -> f64 {
        #[cfg(all(feature = "web", target_arch = "wasm32"))]
        {
            window()
                .and_then(|w| w.performance())
                .map(|p| p.now() / 1000.0)
                .unwrap_or(0.0)
        }

        #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
        {
            self.instant
                .map(|i| i.elapsed().as_secs_f64())
                .unwrap_or(0.0)
        }
    }

    /// Start (or restart) the clock.
    pub fn start(&mut self) {
        #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
        {
            self.instant = Some(Instant::now());
        }

        self.last_tick = self.now();
        self.elapsed_time = 0.0;
        self.ticks = 0;
        self.running = true;
    }

    /// Seconds since the last tick, without consuming it.
    pub fn since_last_tick(&self) -> f64 {
        if !self.running {
            return 0.0;
        }
        self.now() - self.last_tick
    }

    /// Mark a frame boundary and return the seconds since the previous one.
    pub fn tick(&mut self) -> f64 {
        if !self.running {
            self.start();
            return 0.0;
        }

        let now = self.now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.elapsed_time += delta;
        self.ticks += 1;
        delta
    }

    /// Total seconds accumulated across ticks.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_time
    }

    /// Number of ticks since the clock started.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Check if the clock is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_stopped() {
        let clock = Clock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.since_last_tick(), 0.0);
    }

    #[test]
    fn test_first_tick_starts_clock() {
        let mut clock = Clock::new();
        assert_eq!(clock.tick(), 0.0);
        assert!(clock.is_running());
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut clock = Clock::start_new();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(clock.ticks(), 2);
        assert!(a >= 0.0 && b >= 0.0);
        assert!((clock.elapsed() - (a + b)).abs() < 1e-9);
    }
}
