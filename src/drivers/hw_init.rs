//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 oneshot unit and every GPIO direction using raw
//! ESP-IDF sys calls.  Called once from `main()` before the control loop
//! starts.  Also provides the thin register-level read/write helpers the
//! drivers sit on, plus [`GpioPin`] and [`BusyDelay`] so the generic
//! sensor drivers can be handed embedded-hal types.
//!
//! Off-target, pin levels and ADC counts live in process-wide atomics that
//! tests poke through [`sim_set_level`] and [`sim_set_adc`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::Error;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_dht_line()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<()> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("ADC1 unit"));
    }

    // 11/12 dB attenuation: full 0-3.3 V swing on both microphones and MQ sensors.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::GAS_ADC_CHANNEL, pins::SOUND_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("ADC1 channel"));
        }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=gas, CH{}=sound)",
        pins::GAS_ADC_CHANNEL,
        pins::SOUND_ADC_CHANNEL
    );
    Ok(())
}

/// Raw 12-bit conversion.  A failed read returns 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 0x0FFF) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    sim::adc(channel)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn input_config(pin: i32, pull_up: bool) -> gpio_config_t {
    gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    }
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    // Tilt and spark switches pull to ground when triggered.
    for pin in [pins::TILT_GPIO, pins::SPARK_GPIO] {
        let ret = unsafe { gpio_config(&input_config(pin, true)) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("GPIO input"));
        }
    }

    // HC-SR04 drives ECHO push-pull.
    let ret = unsafe { gpio_config(&input_config(pins::ULTRASONIC_ECHO_GPIO, false)) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("GPIO echo"));
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [
        pins::LED_RED_GPIO,
        pins::LED_GREEN_GPIO,
        pins::RELAY_GPIO,
        pins::BUZZER_GPIO,
        pins::ULTRASONIC_TRIG_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Init("GPIO output"));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

/// DHT11 single-wire bus: open-drain so the same pin can pull the line low
/// for the start pulse and then read the sensor's reply.
#[cfg(target_os = "espidf")]
unsafe fn init_dht_line() -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT11_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("GPIO dht11"));
    }
    // Released (idle high).
    unsafe { gpio_set_level(pins::DHT11_GPIO, 1) };
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

// ── embedded-hal glue ─────────────────────────────────────────

/// A configured GPIO, addressed by number, exposed through the
/// embedded-hal digital traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin(pub i32);

impl embedded_hal::digital::ErrorType for GpioPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for GpioPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.0, true);
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for GpioPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(gpio_read(self.0))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!gpio_read(self.0))
    }
}

/// Microsecond busy-wait.  Used for the sub-millisecond DHT11 and HC-SR04
/// timing where a FreeRTOS tick would be far too coarse.
#[derive(Debug, Default, Clone, Copy)]
pub struct BusyDelay;

impl embedded_hal::delay::DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    #[cfg(target_os = "espidf")]
    fn delay_us(&mut self, us: u32) {
        // SAFETY: ROM busy-loop, no shared state.
        unsafe { esp_rom_delay_us(us) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_us(&mut self, us: u32) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_micros(u64::from(us));
        while std::time::Instant::now() < deadline {
            core::hint::spin_loop();
        }
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};

    /// One bit per GPIO; idle-high like a pulled-up input.
    static LEVELS: AtomicU64 = AtomicU64::new(u64::MAX);

    const ADC_CHANNELS: usize = 10;
    static ADC: [AtomicU16; ADC_CHANNELS] = [const { AtomicU16::new(0) }; ADC_CHANNELS];

    pub fn level(pin: i32) -> bool {
        match u32::try_from(pin) {
            Ok(bit) if bit < 64 => LEVELS.load(Ordering::Relaxed) & (1 << bit) != 0,
            _ => false,
        }
    }

    pub fn set_level(pin: i32, high: bool) {
        let Ok(bit) = u32::try_from(pin) else { return };
        if bit >= 64 {
            return;
        }
        if high {
            LEVELS.fetch_or(1 << bit, Ordering::Relaxed);
        } else {
            LEVELS.fetch_and(!(1 << bit), Ordering::Relaxed);
        }
    }

    pub fn adc(channel: u32) -> u16 {
        ADC.get(channel as usize).map_or(0, |a| a.load(Ordering::Relaxed))
    }

    pub fn set_adc(channel: u32, raw: u16) {
        if let Some(a) = ADC.get(channel as usize) {
            a.store(raw & 0x0FFF, Ordering::Relaxed);
        }
    }
}

/// Force a simulated pin level (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

/// Set the simulated 12-bit count returned for an ADC1 channel.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    sim::set_adc(channel, raw);
}
