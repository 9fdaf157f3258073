//! Per-cycle sensor snapshot and the actuator state it drives.

use crate::config::Thresholds;

// ---------------------------------------------------------------------------
// Sensor snapshot (rebuilt from scratch every cycle)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor in the system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Ambient temperature (°C).  `None` when the climate read failed.
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).  `None` when the climate read failed.
    pub humidity_pct: Option<f32>,
    /// Gas sensor magnitude, 16-bit scale.
    pub gas_level: u16,
    /// Sound sensor magnitude, 16-bit scale.
    pub sound_level: u16,
    /// Tilt/vibration switch closed.
    pub tilt_triggered: bool,
    /// Spark detector triggered.
    pub spark_triggered: bool,
    /// Ultrasonic distance taken by the proximity interlock this cycle.
    /// `None` when the interlock did not run.
    pub distance_cm: Option<f32>,
}

impl SensorSnapshot {
    /// Both halves of the climate reading succeeded.
    pub fn climate_valid(&self) -> bool {
        self.temperature_c.is_some() && self.humidity_pct.is_some()
    }
}

// ---------------------------------------------------------------------------
// Derived signals
// ---------------------------------------------------------------------------

/// Boolean detections derived from a snapshot and the fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub sound_detected: bool,
    pub gas_alert: bool,
    pub tilt: bool,
    pub spark: bool,
    pub climate_valid: bool,
}

impl Signals {
    pub fn derive(snap: &SensorSnapshot, thresholds: &Thresholds) -> Self {
        Self {
            sound_detected: snap.sound_level > thresholds.sound,
            gas_alert: snap.gas_level > thresholds.gas,
            tilt: snap.tilt_triggered,
            spark: snap.spark_triggered,
            climate_valid: snap.climate_valid(),
        }
    }

    /// No hazard of any kind is present.
    pub fn system_ok(&self) -> bool {
        !(self.tilt || self.spark || self.gas_alert || self.sound_detected)
    }
}

// ---------------------------------------------------------------------------
// Actuator state (lives across cycles)
// ---------------------------------------------------------------------------

/// The last logical state applied to the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub led_red: bool,
    pub led_green: bool,
    pub buzzer: bool,
    /// Motor relay energised (motor allowed to run).
    pub motor_on: bool,
}

impl ActuatorState {
    /// Power-on state: green LED, silent, motor running.
    pub const STARTUP: Self = Self {
        led_red: false,
        led_green: true,
        buzzer: false,
        motor_on: true,
    };

    /// Red LED and buzzer are both on.
    pub fn audible_alarm(&self) -> bool {
        self.led_red && self.buzzer
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self::STARTUP
    }
}
