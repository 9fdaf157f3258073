//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, HTTP, clock, event sinks) implement
//! these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use super::state::SensorSnapshot;
use crate::error::UploadError;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: climate, analog and digital inputs.
pub trait SensorPort {
    /// Sample every non-ultrasonic sensor.  Never fails: a failed climate
    /// read yields `None` fields and `distance_cm` is always `None`.
    fn read_snapshot(&mut self) -> SensorSnapshot;
}

/// Ultrasonic ranging.  Kept separate from [`SensorPort`] because each call
/// fires a physical pulse and callers decide how often to pay for that.
pub trait DistancePort {
    /// One trigger/echo measurement in centimetres.  Clamped to the
    /// configured ceiling; a missing echo yields the no-echo sentinel.
    fn measure_distance_cm(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive both LEDs and the buzzer.
    fn set_indicators(&mut self, led_red: bool, led_green: bool, buzzer: bool);

    /// Energise (`true`) or release the motor relay.
    fn set_relay(&mut self, energized: bool);
}

// ───────────────────────────────────────────────────────────────
// Network port (driven adapter: domain → HTTP endpoints)
// ───────────────────────────────────────────────────────────────

/// Blocking JSON-over-HTTP client.
///
/// Implementations MUST release the connection and response before
/// returning, on the error path too.  Returns the HTTP status code;
/// deciding whether that status is acceptable is the caller's job.
pub trait HttpPort {
    fn post_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError>;

    fn put_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Monotonic milliseconds since boot.  Wraps at `u32::MAX`; compare
    /// with `wrapping_sub`.
    fn uptime_ms(&self) -> u32;

    /// Wall-clock seconds since the Unix epoch (uptime-based before NTP).
    fn unix_time_secs(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
