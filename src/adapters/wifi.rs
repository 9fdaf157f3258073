//! WiFi station-mode adapter and the start-up network bootstrap.
//!
//! Implements [`ConnectivityPort`], the hexagonal boundary for network
//! connectivity, and [`bootstrap`], the one-shot association routine run
//! once from `main()` before the control loop starts.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Bootstrap policy
//!
//! Association is polled once per second for a bounded number of
//! attempts.  The result only selects the start-up log line; it does not
//! gate uploads, and nothing reconnects after start-up.

use core::fmt;
use core::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    Timeout,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::Timeout => write!(f, "WiFi association timed out"),
        }
    }
}

/// Station interface configuration once associated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub ip: Ipv4Addr,
    pub prefix_len: u8,
    pub gateway: Ipv4Addr,
    pub dns: Option<Ipv4Addr>,
}

impl fmt::Display for InterfaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ip={}/{} gw={}", self.ip, self.prefix_len, self.gateway)?;
        match self.dns {
            Some(dns) => write!(f, " dns={}", dns),
            None => write!(f, " dns=-"),
        }
    }
}

pub trait ConnectivityPort {
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
    /// Bring the radio up and start associating.  Does not wait.
    fn begin_connect(&mut self) -> Result<(), ConnectivityError>;
    /// Associated and holding an IP address.
    fn is_connected(&self) -> bool;
    fn interface_info(&self) -> Option<InterfaceInfo>;
}

// ───────────────────────────────────────────────────────────────
// Bootstrap
// ───────────────────────────────────────────────────────────────

const POLL_INTERVAL_MS: u32 = 1_000;

/// One-shot association: start connecting, then poll once per second up to
/// `max_attempts` times.  Returns whether the station came up.
pub fn bootstrap(
    port: &mut impl ConnectivityPort,
    delay: &mut impl DelayNs,
    max_attempts: u32,
) -> bool {
    if !port.is_connected() {
        info!("WiFi: connecting...");
        if let Err(e) = port.begin_connect() {
            warn!("WiFi: {}", e);
            return false;
        }

        let mut attempt = 0;
        while !port.is_connected() {
            if attempt >= max_attempts {
                warn!("WiFi: {} after {} attempts", ConnectivityError::Timeout, attempt);
                return false;
            }
            delay.delay_ms(POLL_INTERVAL_MS);
            attempt += 1;
        }
    }

    match port.interface_info() {
        Some(iface) => info!("WiFi: connected, {}", iface),
        None => info!("WiFi: connected"),
    }
    true
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(ConnectivityError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
    /// Simulation: polls of `is_connected` remaining before the link comes up.
    #[cfg(not(target_os = "espidf"))]
    sim_polls_left: core::cell::Cell<Option<u32>>,
    #[cfg(not(target_os = "espidf"))]
    sim_started: bool,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    pub fn new(
        modem: esp_idf_hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    ) -> Result<Self, esp_idf_svc::sys::EspError> {
        let wifi = esp_idf_svc::wifi::EspWifi::new(modem, sysloop, Some(nvs))?;
        Ok(Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            wifi,
        })
    }

    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let conf = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        self.wifi
            .set_configuration(&conf)
            .map_err(|_| ConnectivityError::ConnectionFailed)?;
        self.wifi.start().map_err(|_| ConnectivityError::ConnectionFailed)?;
        self.wifi.connect().map_err(|_| ConnectivityError::ConnectionFailed)?;
        Ok(())
    }

    fn platform_is_connected(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    fn platform_interface_info(&self) -> Option<InterfaceInfo> {
        let ip = self.wifi.sta_netif().get_ip_info().ok()?;
        Some(InterfaceInfo {
            ip: ip.ip,
            prefix_len: ip.subnet.mask.0,
            gateway: ip.subnet.gateway,
            dns: ip.dns,
        })
    }
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_polls_left: core::cell::Cell::new(Some(2)),
            sim_started: false,
        }
    }

    /// Simulation: link comes up after `polls` connection checks, or never.
    pub fn sim_connect_after(&mut self, polls: Option<u32>) {
        self.sim_polls_left.set(polls);
    }

    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        self.sim_started = true;
        info!("WiFi(sim): associating with '{}'", self.ssid);
        Ok(())
    }

    fn platform_is_connected(&self) -> bool {
        if !self.sim_started {
            return false;
        }
        match self.sim_polls_left.get() {
            Some(0) => true,
            Some(n) => {
                self.sim_polls_left.set(Some(n - 1));
                false
            }
            None => false,
        }
    }

    fn platform_interface_info(&self) -> Option<InterfaceInfo> {
        if self.sim_polls_left.get() != Some(0) {
            return None;
        }
        Some(InterfaceInfo {
            ip: Ipv4Addr::new(192, 168, 1, 50),
            prefix_len: 24,
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            dns: Some(Ipv4Addr::new(192, 168, 1, 1)),
        })
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password.push_str(password).map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    fn begin_connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        self.platform_connect()
    }

    fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }

    fn interface_info(&self) -> Option<InterfaceInfo> {
        self.platform_interface_info()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
