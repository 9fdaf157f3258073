//! System configuration parameters
//!
//! Fixed thresholds and timing for the safety monitor.  Network endpoints
//! and credentials are baked in at compile time from `SAFEMON_*`
//! environment variables; nothing is reconfigurable at runtime.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Alert thresholds and ultrasonic limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Sound magnitude (16-bit scale) above which sound counts as detected.
    pub sound: u16,
    /// Gas magnitude (16-bit scale) above which the gas alert is raised.
    pub gas: u16,
    /// Objects strictly closer than this stop the motor during a physical alert.
    pub proximity_cm: f32,
    /// Echo wait budget, measured from the end of the trigger pulse.
    pub echo_timeout_us: u32,
    /// Distance readings are clamped to this ceiling.
    pub max_distance_cm: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sound: 30_000,
            gas: 30_000,
            proximity_cm: 50.0,
            echo_timeout_us: 30_000,
            max_distance_cm: 500.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub thresholds: Thresholds,

    // --- Timing ---
    /// Minimum spacing between two telemetry uploads (milliseconds)
    pub report_interval_ms: u32,
    /// Sleep at the end of every control cycle (milliseconds)
    pub loop_interval_ms: u32,

    // --- Network ---
    /// Number of one-second association polls before giving up
    pub wifi_max_attempts: u32,
    /// Per-request HTTP timeout (milliseconds)
    pub http_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),

            // Timing
            report_interval_ms: 5_000, // every 5 s
            loop_interval_ms: 1_000,   // 1 Hz

            // Network
            wifi_max_attempts: 20,
            http_timeout_ms: 10_000,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if t.proximity_cm.is_nan() || t.proximity_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed("proximity_cm must be > 0"));
        }
        if t.max_distance_cm.is_nan() || t.max_distance_cm <= t.proximity_cm {
            return Err(ConfigError::ValidationFailed(
                "max_distance_cm must exceed proximity_cm",
            ));
        }
        if t.echo_timeout_us == 0 {
            return Err(ConfigError::ValidationFailed("echo_timeout_us must be > 0"));
        }
        if self.report_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("report_interval_ms must be > 0"));
        }
        if self.loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be > 0"));
        }
        if self.wifi_max_attempts == 0 {
            return Err(ConfigError::ValidationFailed("wifi_max_attempts must be > 0"));
        }
        Ok(())
    }
}

/// Endpoints and credentials, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,
    /// Dashboard ingest endpoint (HTTP POST).
    pub dashboard_url: &'static str,
    /// Firebase realtime-database base URL (HTTP PUT per sample).
    pub firebase_url: &'static str,
    /// Database secret appended as the `auth` query parameter.
    pub firebase_secret: &'static str,
}

impl NetworkConfig {
    /// Read the `SAFEMON_*` variables captured when the firmware was compiled.
    pub const fn from_build_env() -> Self {
        Self {
            wifi_ssid: unwrap_or_empty(option_env!("SAFEMON_WIFI_SSID")),
            wifi_password: unwrap_or_empty(option_env!("SAFEMON_WIFI_PASS")),
            dashboard_url: unwrap_or_empty(option_env!("SAFEMON_DASHBOARD_URL")),
            firebase_url: unwrap_or_empty(option_env!("SAFEMON_FIREBASE_URL")),
            firebase_secret: unwrap_or_empty(option_env!("SAFEMON_FIREBASE_SECRET")),
        }
    }
}

const fn unwrap_or_empty(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "",
    }
}
