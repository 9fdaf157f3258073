//! Unified error types for the safety-monitor firmware.
//!
//! None of these are fatal.  Sensor errors degrade a single reading,
//! upload errors drop a single telemetry sample; the control loop keeps
//! running either way.  All variants are `Copy` so they can be carried in
//! [`AppEvent`](crate::app::events::AppEvent)s without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned corrupt data.
    Sensor(SensorError),
    /// A telemetry upload failed.
    Upload(UploadError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Upload(e) => write!(f, "upload: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The single-wire climate sensor did not answer the start signal.
    NoResponse,
    /// A level transition did not arrive within its time budget.
    Timeout,
    /// The climate frame checksum did not match its payload.
    ChecksumMismatch { expected: u8, actual: u8 },
    /// GPIO read or write returned an error.
    GpioFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response from sensor"),
            Self::Timeout => write!(f, "bit timing timeout"),
            Self::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch (expected 0x{expected:02x}, got 0x{actual:02x})")
            }
            Self::GpioFailed => write!(f, "GPIO access failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Upload errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    /// The payload could not be serialised.
    Serialize,
    /// Connection, TLS, write or read failure; carries the platform error code.
    Transport(i32),
    /// The server answered with an unexpected HTTP status.
    Status(u16),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize => write!(f, "payload serialisation failed"),
            Self::Transport(code) => write!(f, "transport error (code {code})"),
            Self::Status(status) => write!(f, "HTTP status {status}"),
        }
    }
}

impl From<UploadError> for Error {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
