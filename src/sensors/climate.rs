//! DHT11 temperature/humidity sensor.
//!
//! Single-wire, open-drain protocol:
//!
//! ```text
//!  host: ‾‾\____18ms____/‾‾ (release)
//!  dht :                   \_80µs_/‾80µs‾\  then 40 bits:
//!  bit :  \_50µs_/‾ 26-28µs ‾\ = 0     \_50µs_/‾‾ 70µs ‾‾\ = 1
//! ```
//!
//! Bits are MSB first: humidity integer, humidity decimal, temperature
//! integer, temperature decimal, checksum.  Reads are timing-sensitive and
//! fail regularly in practice; callers treat a failed read as "no data".

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::MicrosClock;
use crate::error::SensorError;

/// Host start pulse.  The datasheet minimum is 18 ms.
const START_LOW_MS: u32 = 20;
/// Generous per-phase budget; the longest legitimate phase is ~80 µs.
const PHASE_TIMEOUT_US: u32 = 120;
/// High phases longer than this encode a `1`.
const ONE_THRESHOLD_US: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate and decode a raw 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch { expected: sum, actual: frame[4] });
    }

    let tenths = f32::from(frame[3] & 0x0F) / 10.0;
    let magnitude = f32::from(frame[2]) + tenths;
    let temperature_c = if frame[3] & 0x80 != 0 { -magnitude } else { magnitude };

    Ok(ClimateReading {
        temperature_c,
        humidity_pct: f32::from(frame[0]),
    })
}

pub struct Dht11<P, D, C> {
    pin: P,
    delay: D,
    clock: C,
}

impl<P, D, C> Dht11<P, D, C>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    C: MicrosClock,
{
    pub fn new(pin: P, delay: D, clock: C) -> Self {
        Self { pin, delay, clock }
    }

    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(frame)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal, then release the line.
        self.pin.set_low().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::GpioFailed)?;

        // Response: the sensor pulls low, then high, then low again.
        self.wait_while(true).map_err(|_| SensorError::NoResponse)?;
        self.wait_while(false).map_err(|_| SensorError::NoResponse)?;
        self.wait_while(true).map_err(|_| SensorError::NoResponse)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait while the line stays at `level`; returns how long it did.
    fn wait_while(&mut self, level: bool) -> Result<u32, SensorError> {
        let start = self.clock.now_us();
        loop {
            let high = self.pin.is_high().map_err(|_| SensorError::GpioFailed)?;
            let elapsed = self.clock.now_us().wrapping_sub(start);
            if high != level {
                return Ok(elapsed);
            }
            if elapsed > PHASE_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
        }
    }
}
