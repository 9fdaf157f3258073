//! JSON documents for the two telemetry endpoints.
//!
//! Missing climate values are sent as `0`, matching what the dashboard
//! has always received for a failed DHT read.

use serde::Serialize;

use crate::app::state::{ActuatorState, SensorSnapshot, Signals};

/// Flat document POSTed to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub temperature: f32,
    pub humidity: f32,
    pub gas: u16,
    pub sound: u16,
    pub vibration: bool,
    pub spark: bool,
    pub distance: f32,
    pub motor_state: bool,
    pub system_ok: bool,
}

impl DashboardPayload {
    pub fn new(
        snap: &SensorSnapshot,
        signals: &Signals,
        actuators: &ActuatorState,
        distance_cm: f32,
    ) -> Self {
        Self {
            temperature: snap.temperature_c.unwrap_or(0.0),
            humidity: snap.humidity_pct.unwrap_or(0.0),
            gas: snap.gas_level,
            sound: snap.sound_level,
            vibration: snap.tilt_triggered,
            spark: snap.spark_triggered,
            distance: distance_cm,
            motor_state: actuators.motor_on,
            system_ok: signals.system_ok(),
        }
    }
}

/// Nested document PUT to `sensor_data/{timestamp}` in Firebase.
#[derive(Debug, Clone, Serialize)]
pub struct FirebasePayload {
    pub timestamp: u64,
    pub sensors: SensorSection,
    pub actuators: ActuatorSection,
    pub alerts: AlertSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorSection {
    pub temperature: f32,
    pub humidity: f32,
    pub gas: u16,
    pub sound: u16,
    pub vibration: bool,
    pub spark: bool,
    pub distance: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActuatorSection {
    pub led_red: bool,
    /// Always the inverse of `led_red`.
    pub led_green: bool,
    pub buzzer: bool,
    pub motor: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertSection {
    pub sound_alert: bool,
    pub gas_alert: bool,
    pub vibration_alert: bool,
    pub spark_alert: bool,
    pub system_ok: bool,
}

impl FirebasePayload {
    pub fn new(
        timestamp: u64,
        snap: &SensorSnapshot,
        signals: &Signals,
        actuators: &ActuatorState,
        distance_cm: f32,
    ) -> Self {
        Self {
            timestamp,
            sensors: SensorSection {
                temperature: snap.temperature_c.unwrap_or(0.0),
                humidity: snap.humidity_pct.unwrap_or(0.0),
                gas: snap.gas_level,
                sound: snap.sound_level,
                vibration: snap.tilt_triggered,
                spark: snap.spark_triggered,
                distance: distance_cm,
            },
            actuators: ActuatorSection {
                led_red: actuators.led_red,
                led_green: !actuators.led_red,
                buzzer: actuators.buzzer,
                motor: actuators.motor_on,
            },
            alerts: AlertSection {
                sound_alert: signals.sound_detected,
                gas_alert: signals.gas_alert,
                vibration_alert: signals.tilt,
                spark_alert: signals.spark,
                system_ok: signals.system_ok(),
            },
        }
    }
}

/// Per-sample Firebase resource: `{base}/sensor_data/{timestamp}.json?auth={secret}`.
pub fn firebase_url(base: &str, timestamp: u64, secret: &str) -> String {
    format!(
        "{}/sensor_data/{}.json?auth={}",
        base.trim_end_matches('/'),
        timestamp,
        secret
    )
}
