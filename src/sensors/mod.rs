//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! cycle.  Ultrasonic ranging is kept out of the snapshot read and exposed
//! separately because every call fires a physical pulse.

pub mod analog;
pub mod climate;
pub mod digital;
pub mod ultrasonic;

use log::warn;

use crate::app::state::SensorSnapshot;
use crate::config::Thresholds;
use crate::drivers::hw_init::{BusyDelay, GpioPin};
use crate::pins;
use analog::AnalogChannel;
use climate::Dht11;
use digital::ActiveLowInput;
use ultrasonic::UltrasonicSensor;

/// Free-running microsecond counter for pulse timing.  Wraps at `u32::MAX`;
/// compare with `wrapping_sub`.
pub trait MicrosClock {
    fn now_us(&self) -> u32;
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<C> {
    climate: Dht11<GpioPin, BusyDelay, C>,
    gas: AnalogChannel,
    sound: AnalogChannel,
    tilt: ActiveLowInput<GpioPin>,
    spark: ActiveLowInput<GpioPin>,
    ranger: UltrasonicSensor<GpioPin, GpioPin, BusyDelay, C>,
}

impl<C: MicrosClock + Clone> SensorHub<C> {
    /// Build every driver on the board pin map.  GPIO directions must
    /// already be configured by `hw_init::init_peripherals`.
    pub fn new(clock: C, thresholds: &Thresholds) -> Self {
        Self {
            climate: Dht11::new(GpioPin(pins::DHT11_GPIO), BusyDelay, clock.clone()),
            gas: AnalogChannel::new(pins::GAS_ADC_CHANNEL),
            sound: AnalogChannel::new(pins::SOUND_ADC_CHANNEL),
            tilt: ActiveLowInput::new(GpioPin(pins::TILT_GPIO)),
            spark: ActiveLowInput::new(GpioPin(pins::SPARK_GPIO)),
            ranger: UltrasonicSensor::new(
                GpioPin(pins::ULTRASONIC_TRIG_GPIO),
                GpioPin(pins::ULTRASONIC_ECHO_GPIO),
                BusyDelay,
                clock,
                thresholds,
            ),
        }
    }

    /// Read every non-ultrasonic sensor.
    ///
    /// A failed climate read is logged and reported as missing values; the
    /// control loop must keep running.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let (temperature_c, humidity_pct) = match self.climate.read() {
            Ok(r) => (Some(r.temperature_c), Some(r.humidity_pct)),
            Err(e) => {
                warn!("DHT11 read failed: {}", e);
                (None, None)
            }
        };

        SensorSnapshot {
            temperature_c,
            humidity_pct,
            gas_level: self.gas.read(),
            sound_level: self.sound.read(),
            tilt_triggered: self.tilt.is_triggered(),
            spark_triggered: self.spark.is_triggered(),
            distance_cm: None,
        }
    }

    pub fn measure_distance_cm(&mut self) -> f32 {
        self.ranger.measure_cm()
    }
}
