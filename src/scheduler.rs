//! Report tick timer.
//!
//! Gates telemetry uploads on a monotonic millisecond counter.  The counter
//! is a `u32` that wraps roughly every 49.7 days, so elapsed time is always
//! computed with `wrapping_sub`; a tick is neither skipped nor fired twice
//! across the wrap.
//!
//! The first tick fires once `interval_ms` has elapsed since counter zero
//! (boot), matching a device that starts with "last sent at 0".

/// Fixed-interval tick gate.
#[derive(Debug, Clone, Copy)]
pub struct ReportTimer {
    interval_ms: u32,
    last_fire_ms: u32,
}

impl ReportTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: 0,
        }
    }

    /// Returns `true` (and re-arms from `now_ms`) when at least
    /// `interval_ms` has elapsed since the last fire.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_fire_ms) >= self.interval_ms {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }
}
