//! Alert decision engine.
//!
//! Maps a [`SensorSnapshot`] to one of three mutually exclusive alert
//! states.  Rules are evaluated strictly in order and the first match
//! wins:
//!
//! | # | Alert           | Guard                                              | Red | Green | Buzzer | Relay        |
//! |---|-----------------|----------------------------------------------------|-----|-------|--------|--------------|
//! | 1 | `Environmental` | climate read ok AND (gas > limit OR sound > limit) | on  | off   | off    | untouched    |
//! | 2 | `Physical`      | spark OR tilt OR sound > limit                     | on  | off   | on     | interlock    |
//! | 3 | `Normal`        | NOT tilt AND NOT spark                             | off | on    | off    | energised    |
//!
//! A simultaneous gas + spark event therefore reports as `Environmental`.
//! When no rule matches [`decide`] returns `None` and the caller keeps the
//! previous outputs.  Rule 2's guard covers rule 3's negation, so that arm
//! cannot currently be reached; it is kept so that edits to either guard
//! cannot silently introduce a default.

use super::state::{ActuatorState, SensorSnapshot, Signals};
use crate::config::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// Scenario 1: hazardous air or noise with valid climate data.  Silent.
    Environmental,
    /// Scenario 2: spark, tilt or noise.  Audible; subject to the proximity interlock.
    Physical,
    /// Nothing detected.
    Normal,
}

impl AlertState {
    /// Logical actuator state for this alert.  `motor_on` is the intent
    /// reported upstream; see [`relay_command`](Self::relay_command) for
    /// what is physically driven.
    pub fn actuator_state(self) -> ActuatorState {
        match self {
            Self::Environmental => ActuatorState {
                led_red: true,
                led_green: false,
                buzzer: false,
                motor_on: true,
            },
            Self::Physical => ActuatorState {
                led_red: true,
                led_green: false,
                buzzer: true,
                motor_on: true,
            },
            Self::Normal => ActuatorState {
                led_red: false,
                led_green: true,
                buzzer: false,
                motor_on: true,
            },
        }
    }

    /// Relay level this alert drives directly, or `None` to leave the
    /// relay where it is.  Under `Physical` the proximity interlock owns it.
    pub fn relay_command(self) -> Option<bool> {
        match self {
            Self::Environmental | Self::Physical => None,
            Self::Normal => Some(true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Environmental => "scenario 1 (climate + gas/sound)",
            Self::Physical => "scenario 2 (spark/vibration/sound)",
            Self::Normal => "normal (no vibration, no spark)",
        }
    }
}

/// Evaluate the priority rules.  Pure: identical inputs give identical output.
pub fn decide(snap: &SensorSnapshot, thresholds: &Thresholds) -> Option<AlertState> {
    let s = Signals::derive(snap, thresholds);

    if s.climate_valid && (s.gas_alert || s.sound_detected) {
        Some(AlertState::Environmental)
    } else if s.spark || s.tilt || s.sound_detected {
        Some(AlertState::Physical)
    } else if !s.tilt && !s.spark {
        Some(AlertState::Normal)
    } else {
        None
    }
}
