//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the safety monitor:
//! alert decision, cycle orchestration and the events it emits.  All
//! interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod decision;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
