//! Mutable state threaded through every control cycle.
//!
//! `ControlContext` is the single struct the engine reads from and writes
//! to: the fixed capability set, the remotely-owned auto-mode flag, and the
//! cooldown timestamps.  It is owned by the caller and passed into
//! [`ControlEngine::run_cycle`](super::service::ControlEngine::run_cycle),
//! so one cycle can be exercised in isolation.

use crate::capabilities::CapabilitySet;
use crate::config::SystemConfig;
use crate::cooldown::CooldownState;

/// One sample of both sensors.  Not retained past the cycle that read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    /// Raw soil moisture (lower = wetter).
    pub soil: i32,
    /// Illuminance in lux.
    pub light: i32,
}

/// The engine's working state.
#[derive(Debug, Clone)]
pub struct ControlContext {
    capabilities: CapabilitySet,
    auto_mode: bool,
    cooldowns: CooldownState,
    cycle_count: u64,
}

impl ControlContext {
    /// Fresh context: auto mode off, no action ever performed.
    pub fn new(capabilities: CapabilitySet, config: &SystemConfig) -> Self {
        Self {
            capabilities,
            auto_mode: false,
            cooldowns: CooldownState::new(config),
            cycle_count: 0,
        }
    }

    /// Start with auto mode already set (e.g. a bench rig).
    #[must_use]
    pub fn with_auto_mode(mut self, enabled: bool) -> Self {
        self.auto_mode = enabled;
        self
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn cooldowns(&self) -> &CooldownState {
        &self.cooldowns
    }

    /// Control cycles started since boot.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Engine-only mutation ─────────────────────────────────

    pub(crate) fn set_auto_mode(&mut self, enabled: bool) {
        self.auto_mode = enabled;
    }

    pub(crate) fn cooldowns_mut(&mut self) -> &mut CooldownState {
        &mut self.cooldowns
    }

    pub(crate) fn next_cycle(&mut self) -> u64 {
        self.cycle_count += 1;
        self.cycle_count
    }
}
