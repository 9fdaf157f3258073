//! Analog front ends: MQ-series gas sensor and electret microphone module.
//!
//! Both read through ADC1 in oneshot mode at 12-bit resolution.  The raw
//! count is widened to the full 16-bit range so the alert thresholds are
//! expressed on the same 0-65535 scale the dashboard has always shown.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads the simulated channel bank in hw_init.

use crate::drivers::hw_init;

/// Scale a 12-bit count to 16 bits, replicating the top nibble into the
/// low bits so `0xFFF` maps to `0xFFFF`.
pub fn widen_12_to_16(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}

pub struct AnalogChannel {
    channel: u32,
}

impl AnalogChannel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// One conversion, widened to 16 bits.
    pub fn read(&mut self) -> u16 {
        widen_12_to_16(hw_init::adc1_read(self.channel))
    }
}
