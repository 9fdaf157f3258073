//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them; on the device they become log
//! lines on the serial console.

use super::decision::AlertState;
use super::state::{ActuatorState, SensorSnapshot, Signals};
use crate::error::UploadError;

/// Telemetry upload destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Dashboard,
    Firebase,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Start-up outputs applied.  `online` is the Wi-Fi bootstrap result.
    Started { online: bool },

    /// A decision rule fired this cycle.
    AlertDecided(AlertState),

    /// No decision rule matched; previous outputs retained.
    AlertRetained,

    /// The proximity interlock measured a distance.
    ProximityChecked { distance_cm: f32, motor_on: bool },

    UploadSucceeded(UploadTarget),

    UploadFailed { target: UploadTarget, error: UploadError },

    /// End-of-cycle debug summary.
    CycleSummary(CycleSummary),
}

/// Everything printed in the per-cycle debug block.
#[derive(Debug, Clone, Copy)]
pub struct CycleSummary {
    pub snapshot: SensorSnapshot,
    pub signals: Signals,
    pub actuators: ActuatorState,
}
