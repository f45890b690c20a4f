//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the decision-and-coordination loop of the
//! irrigator: sensing, automatic and manual watering, command polling and
//! telemetry.  All interaction with hardware, the network and time happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod context;
pub mod events;
pub mod ports;
pub mod service;
