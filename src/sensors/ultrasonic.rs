//! HC-SR04 ultrasonic range finder.
//!
//! A 10 µs trigger pulse makes the module emit a burst and raise ECHO for
//! as long as the round trip took.  The width is measured by busy-polling
//! the echo line against a microsecond clock; the thread never yields
//! while a measurement is in flight.
//!
//! One deadline, `echo_timeout_us` after the trigger, covers both the wait
//! for the rising edge and the wait for the falling edge.  Missing it
//! yields [`NO_ECHO_CM`] instead of an error so callers keep running.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::MicrosClock;
use crate::config::Thresholds;

/// Returned when the echo never starts or never ends in time.
pub const NO_ECHO_CM: f32 = 1000.0;

/// Speed of sound in cm/µs at ~20 °C.
const SOUND_CM_PER_US: f32 = 0.0343;

/// Convert an echo pulse width to a one-way distance, clamped to `max_cm`.
pub fn echo_width_to_cm(width_us: u32, max_cm: f32) -> f32 {
    let cm = width_us as f32 * SOUND_CM_PER_US / 2.0;
    cm.min(max_cm)
}

pub struct UltrasonicSensor<T, E, D, C> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
    max_cm: f32,
}

impl<T, E, D, C> UltrasonicSensor<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    pub fn new(trig: T, echo: E, delay: D, clock: C, thresholds: &Thresholds) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us: thresholds.echo_timeout_us,
            max_cm: thresholds.max_distance_cm,
        }
    }

    /// Fire one pulse and return the distance in centimetres.
    pub fn measure_cm(&mut self) -> f32 {
        self.trigger();

        let start = self.clock.now_us();

        // Rising edge: remember the last instant the line was still low.
        let mut rise = start;
        while !self.echo_high() {
            let now = self.clock.now_us();
            if now.wrapping_sub(start) > self.timeout_us {
                return NO_ECHO_CM;
            }
            rise = now;
        }

        // Falling edge: remember the last instant the line was still high.
        let mut fall = rise;
        while self.echo_high() {
            let now = self.clock.now_us();
            if now.wrapping_sub(start) > self.timeout_us {
                return NO_ECHO_CM;
            }
            fall = now;
        }

        echo_width_to_cm(fall.wrapping_sub(rise), self.max_cm)
    }

    fn trigger(&mut self) {
        self.trig.set_low().ok();
        self.delay.delay_us(2);
        self.trig.set_high().ok();
        self.delay.delay_us(10);
        self.trig.set_low().ok();
    }

    /// A pin read error counts as low.
    fn echo_high(&mut self) -> bool {
        self.echo.is_high().unwrap_or(false)
    }
}
