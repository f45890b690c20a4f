//! WiFi soft access point adapter.
//!
//! The irrigator hosts its own network; the coordinator joins it and is
//! reached at a fixed address.  Bring-up retries every second until the
//! radio accepts the configuration, because nothing else on the device is
//! useful without it.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi`, attached from `main`.
//! - **all other targets**: simulation stubs for host-side tests, with an
//!   injectable number of failed start attempts.

use core::fmt;
use log::{info, warn};

use crate::app::ports::ClockPort;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi,
};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPointError {
    InvalidSsid,
    InvalidPassword,
    /// No WiFi driver handed over yet.
    NotAttached,
    StartFailed,
}

impl fmt::Display for AccessPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "passphrase invalid (must be 8-63 bytes for WPA2, or empty for open)"),
            Self::NotAttached => write!(f, "no WiFi driver attached"),
            Self::StartFailed => write!(f, "access point failed to start"),
        }
    }
}

impl std::error::Error for AccessPointError {}

/// Delay between bring-up attempts.
pub const RETRY_DELAY_MS: u64 = 1_000;

const DEFAULT_CHANNEL: u8 = 1;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

/// Every byte in 0x20..=0x7E (space through tilde).
fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), AccessPointError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(AccessPointError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(AccessPointError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AccessPointError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 63 || !is_printable_ascii(password) {
        return Err(AccessPointError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Access point adapter
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApState {
    Down,
    Up,
}

pub struct AccessPoint {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    channel: u8,
    state: ApState,
    attempts: u32,
    #[cfg(target_os = "espidf")]
    wifi: Option<BlockingWifi<EspWifi<'static>>>,
    /// Simulation: start attempts that fail before one succeeds.
    #[cfg(not(target_os = "espidf"))]
    sim_failures_remaining: u32,
}

impl AccessPoint {
    pub fn new(ssid: &str, password: &str) -> Result<Self, AccessPointError> {
        validate_ssid(ssid)?;
        validate_password(password)?;

        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|_| AccessPointError::InvalidSsid)?;
        let mut p = heapless::String::new();
        p.push_str(password).map_err(|_| AccessPointError::InvalidPassword)?;

        Ok(Self {
            ssid: s,
            password: p,
            channel: DEFAULT_CHANNEL,
            state: ApState::Down,
            attempts: 0,
            #[cfg(target_os = "espidf")]
            wifi: None,
            #[cfg(not(target_os = "espidf"))]
            sim_failures_remaining: 0,
        })
    }

    /// Hand over the WiFi driver built in `main`.
    #[cfg(target_os = "espidf")]
    pub fn attach(&mut self, wifi: BlockingWifi<EspWifi<'static>>) {
        self.wifi = Some(wifi);
    }

    /// Make the next `n` start attempts fail.
    #[cfg(not(target_os = "espidf"))]
    #[must_use]
    pub fn with_simulated_failures(mut self, n: u32) -> Self {
        self.sim_failures_remaining = n;
        self
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    pub fn state(&self) -> ApState {
        self.state
    }

    /// Start attempts made so far, successful or not.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// One bring-up attempt.
    pub fn start(&mut self) -> Result<(), AccessPointError> {
        self.attempts = self.attempts.saturating_add(1);
        self.platform_start()?;
        self.state = ApState::Up;
        info!(
            "ap: '{}' up on channel {} ({})",
            self.ssid,
            self.channel,
            if self.is_open() { "open" } else { "WPA2" }
        );
        Ok(())
    }

    /// Retry [`start`](Self::start) every [`RETRY_DELAY_MS`] until it
    /// succeeds.  Configuration errors are returned immediately since no
    /// retry can fix them.
    pub fn start_with_retry(&mut self, clock: &mut impl ClockPort) -> Result<(), AccessPointError> {
        loop {
            match self.start() {
                Ok(()) => return Ok(()),
                Err(e @ (AccessPointError::InvalidSsid | AccessPointError::InvalidPassword | AccessPointError::NotAttached)) => {
                    return Err(e);
                }
                Err(e) => {
                    warn!("ap: attempt {} failed ({}), retrying", self.attempts, e);
                    clock.sleep_ms(RETRY_DELAY_MS);
                }
            }
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<(), AccessPointError> {
        let wifi = self.wifi.as_mut().ok_or(AccessPointError::NotAttached)?;

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let config = Configuration::AccessPoint(AccessPointConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| AccessPointError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| AccessPointError::InvalidPassword)?,
            auth_method,
            channel: self.channel,
            ..Default::default()
        });

        wifi.set_configuration(&config).map_err(|e| {
            warn!("ap: set_configuration failed: {:?}", e);
            AccessPointError::StartFailed
        })?;
        wifi.start().map_err(|e| {
            warn!("ap: start failed: {:?}", e);
            AccessPointError::StartFailed
        })?;
        wifi.wait_netif_up().map_err(|e| {
            warn!("ap: netif did not come up: {:?}", e);
            AccessPointError::StartFailed
        })?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<(), AccessPointError> {
        if self.sim_failures_remaining > 0 {
            self.sim_failures_remaining -= 1;
            warn!("ap(sim): simulated start failure (attempt {})", self.attempts);
            return Err(AccessPointError::StartFailed);
        }
        info!("ap(sim): '{}' started", self.ssid);
        Ok(())
    }
}
