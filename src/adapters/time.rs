//! ESP32 time adapter.
//!
//! Provides monotonic and wall-clock time for the monitor.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Wall-clock time comes from `SystemTime` on both targets.  Without an
//! NTP sync the device clock starts at the epoch on boot, so timestamps
//! are then effectively seconds since power-on.

use std::time::{SystemTime, UNIX_EPOCH};

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;
use crate::sensors::MicrosClock;

/// Time adapter for the ESP32-S3 platform.  Cheap to clone; every sensor
/// driver that times pulses gets its own copy.
#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads a free-running hardware counter.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl MicrosClock for UptimeClock {
    fn now_us(&self) -> u32 {
        self.uptime_us() as u32
    }
}

impl ClockPort for UptimeClock {
    fn uptime_ms(&self) -> u32 {
        (self.uptime_us() / 1_000) as u32
    }

    fn unix_time_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// Millisecond-scale delay that yields to the scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
