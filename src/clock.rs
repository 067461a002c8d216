//! Wall-clock pacing for hosts.
//!
//! The engine only sees elapsed milliseconds. `FrameClock` turns `Instant`s into
//! those deltas and lets the host drop time that should not count, such as the
//! moment a pause ends.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Milliseconds since the previous tick (or resync), saturating at `u32::MAX`.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
    }

    /// Restart measurement from now. Call when toggling pause.
    pub fn resync(&mut self) {
        self.last = Instant::now();
    }

    /// Time left until `frame` has passed since the last tick
    pub fn remaining(&self, frame: Duration) -> Duration {
        frame.saturating_sub(self.last.elapsed())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
