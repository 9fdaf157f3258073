//! Alarm indicators: red LED, green LED and the active buzzer.
//!
//! All three are plain push-pull GPIOs, active-high.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init.
//! On host/test: the sim pin bank in hw_init records the levels.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorLevels {
    pub led_red: bool,
    pub led_green: bool,
    pub buzzer: bool,
}

pub struct Indicators {
    current: IndicatorLevels,
}

impl Indicators {
    pub fn new() -> Self {
        Self {
            current: IndicatorLevels::default(),
        }
    }

    pub fn set(&mut self, led_red: bool, led_green: bool, buzzer: bool) {
        hw_init::gpio_write(pins::LED_RED_GPIO, led_red);
        hw_init::gpio_write(pins::LED_GREEN_GPIO, led_green);
        hw_init::gpio_write(pins::BUZZER_GPIO, buzzer);
        self.current = IndicatorLevels { led_red, led_green, buzzer };
    }

    pub fn current(&self) -> IndicatorLevels {
        self.current
    }
}

impl Default for Indicators {
    fn default() -> Self {
        Self::new()
    }
}
