//! SafeMon Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink   UptimeClock             │
//! │  (Sensor+Distance+      (EventSink)    (ClockPort)             │
//! │   Actuator)             EspHttpAdapter WifiAdapter             │
//! │                         (HttpPort)     (Connectivity)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  Decision · Proximity interlock · Telemetry            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{error, info, warn};

use safemon::adapters::hardware::HardwareAdapter;
use safemon::adapters::http::EspHttpAdapter;
use safemon::adapters::log_sink::LogEventSink;
use safemon::adapters::time::{ThreadDelay, UptimeClock};
use safemon::adapters::wifi::{self, ConnectivityPort, WifiAdapter};
use safemon::app::service::MonitorService;
use safemon::config::{NetworkConfig, SystemConfig};
use safemon::drivers::indicators::Indicators;
use safemon::drivers::relay::RelayDriver;
use safemon::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SafeMon v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(|e| anyhow::anyhow!("config: {}", e))?;
    let network = NetworkConfig::from_build_env();

    // ── 3. Hardware peripherals ───────────────────────────────
    if let Err(e) = safemon::drivers::hw_init::init_peripherals() {
        // Keep running: readings degrade but the loop must not stop.
        error!("HAL init failed: {}; continuing", e);
    }

    // ── 4. Network bootstrap ──────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi_adapter = WifiAdapter::new(peripherals.modem, sysloop, nvs)?;
    let online = match wifi_adapter.set_credentials(network.wifi_ssid, network.wifi_password) {
        Ok(()) => wifi::bootstrap(&mut wifi_adapter, &mut ThreadDelay, config.wifi_max_attempts),
        Err(e) => {
            warn!("WiFi credentials rejected: {}", e);
            false
        }
    };

    // ── 5. Adapters + service ─────────────────────────────────
    let clock = UptimeClock::new();
    let mut hw = HardwareAdapter::new(
        SensorHub::new(clock, &config.thresholds),
        Indicators::new(),
        RelayDriver::new(),
    );
    let mut http = EspHttpAdapter::new(config.http_timeout_ms);
    let mut sink = LogEventSink::new();

    let mut service = MonitorService::new(&config, &network);
    service.start(&mut hw, &mut sink, online);

    // ── 6. Control loop ───────────────────────────────────────
    let loop_interval = std::time::Duration::from_millis(u64::from(config.loop_interval_ms));
    loop {
        service.tick(&mut hw, &mut http, &clock, &mut sink);
        std::thread::sleep(loop_interval);
    }
}
