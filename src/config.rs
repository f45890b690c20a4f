//! System configuration parameters
//!
//! All tunable parameters for the irrigator.  Network endpoints and the
//! provisioning access point credentials can be overridden at build time
//! through `IRRIGATOR_*` environment variables; nothing is persisted.

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_AP_SSID: &str = match option_env!("IRRIGATOR_AP_SSID") {
    Some(v) => v,
    None => "Irrigator-AP",
};
const DEFAULT_AP_PASSWORD: &str = match option_env!("IRRIGATOR_AP_PASSWORD") {
    Some(v) => v,
    None => "irrigator123",
};
const DEFAULT_SENSOR_URL: &str = match option_env!("IRRIGATOR_SENSOR_URL") {
    Some(v) => v,
    None => "http://192.168.4.2:3000/sensor",
};
const DEFAULT_COMMAND_URL: &str = match option_env!("IRRIGATOR_COMMAND_URL") {
    Some(v) => v,
    None => "http://192.168.4.2:3000/api/command",
};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Raw soil reading strictly below which auto-watering triggers.
    pub soil_threshold: i32,
    /// Illuminance (lux) below which telemetry is flagged as low light.
    /// Informational only; never gates watering.
    pub light_threshold: i32,

    // --- Pump ---
    /// Length of one watering pulse (milliseconds)
    pub pulse_ms: u64,

    // --- Cooldowns ---
    /// Minimum interval between automatic waterings (milliseconds)
    pub water_cooldown_ms: u64,
    /// Minimum interval between routine telemetry reports (milliseconds)
    pub report_cooldown_ms: u64,
    /// Minimum interval between command polls (milliseconds)
    pub poll_cooldown_ms: u64,

    // --- Timing ---
    /// Fixed sleep at the end of every control cycle (milliseconds)
    pub loop_slice_ms: u64,
    /// How long the startup configuration gate waits for operator input
    pub config_gate_timeout_ms: u64,
    /// Settle delay after power-on before the configuration gate
    pub boot_settle_ms: u64,
    /// Settle delay after the access point comes up
    pub post_ap_settle_ms: u64,
    /// Request-level timeout for coordinator HTTP exchanges
    pub http_timeout_ms: u64,

    // --- Network ---
    /// Telemetry endpoint (POST)
    pub sensor_url: String,
    /// Command endpoint (GET)
    pub command_url: String,
    /// Provisioning access point SSID
    pub ap_ssid: String,
    /// Provisioning access point passphrase (empty = open network)
    pub ap_password: String,

    // --- Simulation ---
    /// Half-open band of synthetic soil readings when the probe is disabled
    pub sim_soil_band: (i32, i32),
    /// Half-open band of synthetic light readings when the sensor is disabled
    pub sim_light_band: (i32, i32),
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            soil_threshold: 1000,
            light_threshold: 1500,

            // Pump
            pulse_ms: 5_000,

            // Cooldowns
            water_cooldown_ms: 60_000,
            report_cooldown_ms: 5_000,
            poll_cooldown_ms: 500,

            // Timing
            loop_slice_ms: 1_000,
            config_gate_timeout_ms: 20_000,
            boot_settle_ms: 5_000,
            post_ap_settle_ms: 2_000,
            http_timeout_ms: 5_000,

            // Network
            sensor_url: DEFAULT_SENSOR_URL.into(),
            command_url: DEFAULT_COMMAND_URL.into(),
            ap_ssid: DEFAULT_AP_SSID.into(),
            ap_password: DEFAULT_AP_PASSWORD.into(),

            // Simulation
            sim_soil_band: (990, 1010),
            sim_light_band: (1490, 1510),
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop cannot run with.
    ///
    /// Access point credentials are checked separately by the access point
    /// adapter, which owns the SSID/passphrase rules.
    pub fn validate(&self) -> Result<()> {
        if self.pulse_ms == 0 {
            return Err(Error::Config("pulse_ms must be non-zero"));
        }
        if self.loop_slice_ms == 0 {
            return Err(Error::Config("loop_slice_ms must be non-zero"));
        }
        if self.sensor_url.is_empty() {
            return Err(Error::Config("sensor_url is empty"));
        }
        if self.command_url.is_empty() {
            return Err(Error::Config("command_url is empty"));
        }
        if self.sim_soil_band.0 >= self.sim_soil_band.1 {
            return Err(Error::Config("sim_soil_band is empty"));
        }
        if self.sim_light_band.0 >= self.sim_light_band.1 {
            return Err(Error::Config("sim_light_band is empty"));
        }
        Ok(())
    }

    pub fn soil_band(&self) -> Range<i32> {
        self.sim_soil_band.0..self.sim_soil_band.1
    }

    pub fn light_band(&self) -> Range<i32> {
        self.sim_light_band.0..self.sim_light_band.1
    }
}
