//! Active-low digital inputs (tilt switch, flame/spark detector).
//!
//! Both modules pull their output to ground when triggered and idle high
//! through the GPIO pull-up.

use embedded_hal::digital::InputPin;

pub struct ActiveLowInput<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// `true` when the line is pulled low.  A read error counts as idle.
    pub fn is_triggered(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
