//! Host time adapter.
//!
//! Implements [`TimePort`] with `std::thread::sleep` and keeps a monotonic
//! start instant for uptime reporting.

use std::time::{Duration, Instant};

use crate::app::ports::TimePort;

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock was created (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl TimePort for SystemClock {
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
