//! GPIO / peripheral pin assignments for the safety-monitor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Actuators (plain push-pull outputs, active HIGH)
// ---------------------------------------------------------------------------

/// Red alert LED.
pub const LED_RED_GPIO: i32 = 10;
/// Green "all clear" LED.
pub const LED_GREEN_GPIO: i32 = 11;
/// Motor relay coil.  HIGH = energised = motor running.
pub const RELAY_GPIO: i32 = 12;
/// Piezo buzzer.
pub const BUZZER_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1, 12-bit, 12 dB attenuation)
// ---------------------------------------------------------------------------

/// MQ-7 gas sensor analog output.  ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const GAS_ADC_CHANNEL: u32 = 3;

/// Sound sensor envelope output.  ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const SOUND_ADC_CHANNEL: u32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity single-wire data line (open-drain, pull-up).
pub const DHT11_GPIO: i32 = 15;

/// KY-017 tilt/vibration switch.  Active LOW with internal pull-up.
pub const TILT_GPIO: i32 = 16;
/// KY-018 spark/flame detector.  Active LOW with internal pull-up.
pub const SPARK_GPIO: i32 = 17;

/// HC-SR04 trigger output.
pub const ULTRASONIC_TRIG_GPIO: i32 = 18;
/// HC-SR04 echo input (level-shifted to 3.3 V).
pub const ULTRASONIC_ECHO_GPIO: i32 = 8;
