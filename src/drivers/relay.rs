//! Motor relay driver.
//!
//! Single GPIO to the relay module input, active-high: HIGH energises the
//! coil and the machine motor runs.  This driver is a dumb actuator; the
//! proximity interlock decides when to release it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init.
//! On host/test: the sim pin bank in hw_init records the level.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    energized: bool,
}

impl RelayDriver {
    pub fn new() -> Self {
        Self { energized: false }
    }

    pub fn set(&mut self, energized: bool) {
        hw_init::gpio_write(pins::RELAY_GPIO, energized);
        if energized != self.energized {
            debug!("relay: {}", if energized { "energised" } else { "released" });
        }
        self.energized = energized;
    }
}

impl Default for RelayDriver {
    fn default() -> Self {
        Self::new()
    }
}
