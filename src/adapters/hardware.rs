//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`], [`DistancePort`] and [`ActuatorPort`].  This is
//! the only module in the system that touches actual hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{ActuatorPort, DistancePort, SensorPort};
use crate::app::state::SensorSnapshot;
use crate::drivers::indicators::Indicators;
use crate::drivers::relay::RelayDriver;
use crate::sensors::{MicrosClock, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<C> {
    sensor_hub: SensorHub<C>,
    indicators: Indicators,
    relay: RelayDriver,
}

impl<C: MicrosClock + Clone> HardwareAdapter<C> {
    pub fn new(sensor_hub: SensorHub<C>, indicators: Indicators, relay: RelayDriver) -> Self {
        Self {
            sensor_hub,
            indicators,
            relay,
        }
    }
}

// ── SensorPort / DistancePort ─────────────────────────────────

impl<C: MicrosClock + Clone> SensorPort for HardwareAdapter<C> {
    fn read_snapshot(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

impl<C: MicrosClock + Clone> DistancePort for HardwareAdapter<C> {
    fn measure_distance_cm(&mut self) -> f32 {
        self.sensor_hub.measure_distance_cm()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<C: MicrosClock + Clone> ActuatorPort for HardwareAdapter<C> {
    fn set_indicators(&mut self, led_red: bool, led_green: bool, buzzer: bool) {
        self.indicators.set(led_red, led_green, buzzer);
    }

    fn set_relay(&mut self, energized: bool) {
        self.relay.set(energized);
    }
}
