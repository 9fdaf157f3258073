//! Telemetry: payload documents and the two-endpoint reporter.

pub mod payload;
pub mod reporter;
