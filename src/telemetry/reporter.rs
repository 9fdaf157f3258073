//! Telemetry reporter.
//!
//! One report tick makes two independent uploads, dashboard first:
//!
//! 1. **Dashboard**: `POST` of [`DashboardPayload`]; any 2xx is accepted.
//! 2. **Firebase**: `PUT` of [`FirebasePayload`] to a per-timestamp
//!    resource; only `200` is accepted.
//!
//! Each upload fires its own ultrasonic pulse for the `distance` field
//! instead of reusing the interlock's reading.  A failure in one target
//! never prevents the other.  Nothing is retried; the next tick starts
//! fresh.

use super::payload::{firebase_url, DashboardPayload, FirebasePayload};
use crate::app::ports::{ClockPort, DistancePort, HttpPort};
use crate::app::state::{ActuatorState, SensorSnapshot, Signals};
use crate::config::NetworkConfig;
use crate::error::UploadError;

/// Outcome of one report tick, per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub dashboard: Result<(), UploadError>,
    pub firebase: Result<(), UploadError>,
}

/// Owns the endpoint configuration and builds/sends both documents.
pub struct TelemetryReporter {
    dashboard_url: &'static str,
    firebase_base: &'static str,
    firebase_secret: &'static str,
}

impl TelemetryReporter {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            dashboard_url: network.dashboard_url,
            firebase_base: network.firebase_url,
            firebase_secret: network.firebase_secret,
        }
    }

    /// Run both uploads for the given cycle state.
    pub fn report(
        &self,
        http: &mut impl HttpPort,
        ranger: &mut impl DistancePort,
        clock: &impl ClockPort,
        snap: &SensorSnapshot,
        signals: &Signals,
        actuators: &ActuatorState,
    ) -> ReportOutcome {
        let dashboard = self.send_dashboard(http, ranger, snap, signals, actuators);
        let firebase = self.send_firebase(http, ranger, clock, snap, signals, actuators);
        ReportOutcome { dashboard, firebase }
    }

    fn send_dashboard(
        &self,
        http: &mut impl HttpPort,
        ranger: &mut impl DistancePort,
        snap: &SensorSnapshot,
        signals: &Signals,
        actuators: &ActuatorState,
    ) -> Result<(), UploadError> {
        let distance = ranger.measure_distance_cm();
        let payload = DashboardPayload::new(snap, signals, actuators, distance);
        let body = serde_json::to_string(&payload).map_err(|_| UploadError::Serialize)?;

        let status = http.post_json(self.dashboard_url, &body)?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(UploadError::Status(status))
        }
    }

    fn send_firebase(
        &self,
        http: &mut impl HttpPort,
        ranger: &mut impl DistancePort,
        clock: &impl ClockPort,
        snap: &SensorSnapshot,
        signals: &Signals,
        actuators: &ActuatorState,
    ) -> Result<(), UploadError> {
        let distance = ranger.measure_distance_cm();
        let timestamp = clock.unix_time_secs();
        let payload = FirebasePayload::new(timestamp, snap, signals, actuators, distance);
        let body = serde_json::to_string(&payload).map_err(|_| UploadError::Serialize)?;

        let url = firebase_url(self.firebase_base, timestamp, self.firebase_secret);
        match http.put_json(&url, &body)? {
            200 => Ok(()),
            status => Err(UploadError::Status(status)),
        }
    }
}
