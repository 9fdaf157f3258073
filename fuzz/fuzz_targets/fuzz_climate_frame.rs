//! Fuzz target: `decode_frame`
//!
//! Drives arbitrary 5-byte DHT11 frames through the decoder and asserts
//! that it never panics, that it accepts exactly the frames whose checksum
//! matches, and that accepted frames decode to bounded values.
//!
//! cargo fuzz run fuzz_climate_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use safemon::error::SensorError;
use safemon::sensors::climate::decode_frame;

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = <[u8; 5]>::try_from(data) else { return };

    let sum = frame[..4].iter().fold(0u8, |a, b| a.wrapping_add(*b));
    match decode_frame(frame) {
        Ok(r) => {
            assert_eq!(sum, frame[4], "accepted a frame with a bad checksum");
            assert!(r.humidity_pct >= 0.0 && r.humidity_pct <= 255.0);
            assert!(r.temperature_c.abs() <= 256.5);
        }
        Err(SensorError::ChecksumMismatch { expected, actual }) => {
            assert_eq!(expected, sum);
            assert_eq!(actual, frame[4]);
            assert_ne!(expected, actual);
        }
        Err(e) => panic!("unexpected error from pure decoder: {e}"),
    }
});
