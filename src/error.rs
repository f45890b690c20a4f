//! Unified error types for the irrigator firmware.
//!
//! A single `Error` enum for everything that can stop the boot sequence,
//! keeping error handling in `main` uniform.  All variants are `Copy`.
//!
//! The control loop itself has no fatal error path: remote and sensor
//! errors are turned into [`AppEvent`](crate::app::events::AppEvent)s or
//! absorbed by the drivers, and the cycle carries on.

use core::fmt;

use crate::adapters::access_point::AccessPointError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Boot-time failures funnel into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The provisioning access point could not be configured.
    AccessPoint(AccessPointError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessPoint(e) => write!(f, "access point: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<AccessPointError> for Error {
    fn from(e: AccessPointError) -> Self {
        Self::AccessPoint(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Sensor faults.  These never reach the decision engine: drivers log them
/// and fall back to their last good value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// I²C transaction with the light sensor failed.
    BusFailed,
    /// The light sensor has not been powered up yet.
    NotInitialised,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFailed => write!(f, "I2C transaction failed"),
            Self::NotInitialised => write!(f, "sensor not initialised"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
