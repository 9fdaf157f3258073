//! Proximity interlock (motor safety).
//!
//! Runs **every cycle after the decision engine**.  It only engages while
//! the audible alarm is on (red LED and buzzer both set, i.e. a physical
//! hazard).  In that state it takes one ultrasonic reading and:
//!
//! - distance `< proximity_cm` → relay released, motor stopped;
//! - otherwise (including the no-echo sentinel) → relay energised.
//!
//! The boundary is exclusive: exactly `proximity_cm` keeps the motor running.
//! Under any other alert state no pulse is fired and the relay is left alone.

use crate::app::ports::{ActuatorPort, DistancePort};
use crate::app::state::ActuatorState;
use crate::config::Thresholds;

/// Result of one interlock evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterlockOutcome {
    pub distance_cm: f32,
    pub motor_on: bool,
}

/// Proximity interlock.
pub struct ProximityInterlock {
    threshold_cm: f32,
}

impl ProximityInterlock {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            threshold_cm: thresholds.proximity_cm,
        }
    }

    /// Whether the interlock is armed for the given state.
    pub fn engaged(&self, state: &ActuatorState) -> bool {
        state.audible_alarm()
    }

    /// Relay decision for a single reading.
    pub fn motor_allowed(&self, distance_cm: f32) -> bool {
        let too_close = distance_cm < self.threshold_cm;
        !too_close
    }

    /// Measure, drive the relay and update `state.motor_on`.
    /// Returns `None` without touching hardware when not engaged.
    pub fn evaluate(
        &self,
        state: &mut ActuatorState,
        hw: &mut (impl DistancePort + ActuatorPort),
    ) -> Option<InterlockOutcome> {
        if !self.engaged(state) {
            return None;
        }

        let distance_cm = hw.measure_distance_cm();
        let motor_on = self.motor_allowed(distance_cm);
        hw.set_relay(motor_on);
        state.motor_on = motor_on;

        Some(InterlockOutcome { distance_cm, motor_on })
    }
}
