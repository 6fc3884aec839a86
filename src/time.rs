//! Fixed-timestep game clock and wall-clock sources.
//!
//! Frames arrive at a variable rate. `GameTime` turns frame timestamps into a
//! whole number of fixed ticks, so production is deterministic and testable.

use std::cell::Cell;

pub struct GameTime {
    /// Milliseconds per tick (100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Largest frame delta accepted (ms)
    max_frame_ms: f64,
    /// Milliseconds not yet consumed as ticks
    accumulator: f64,
    pub total_ticks: u64,
    /// Timestamp of the previous frame (ms), None before the first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// `max_frame_seconds` bounds how much time one frame may contribute,
    /// so a backgrounded tab doesn't replay a long gap tick by tick.
    pub fn new(ticks_per_sec: u32, max_frame_seconds: f64) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            max_frame_ms: max_frame_seconds * 1000.0,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Seconds of game time covered by one tick.
    pub fn tick_seconds(&self) -> f64 {
        self.ms_per_tick / 1000.0
    }

    /// Feed a frame timestamp (ms). Returns the number of ticks to run.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_frame_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Forget the previous frame, e.g. after an offline catch-up.
    pub fn resync(&mut self) {
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }
}

/// Wall clock in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance_secs(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds * 1000.0);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}
