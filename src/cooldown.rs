//! Minimum-interval gates for repeated actions.
//!
//! Each [`Cooldown`] remembers when its action last happened and answers
//! "has at least `interval_ms` passed?".  A cooldown that has never been
//! recorded is always ready.  Timestamps come from the
//! [`ClockPort`](crate::app::ports::ClockPort) and are milliseconds since
//! boot.

use crate::config::SystemConfig;

/// One tracked action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Cooldown {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Milliseconds since the last recorded action, saturating at
    /// `u64::MAX` when the action has never happened.
    pub fn elapsed_since(&self, now_ms: u64) -> u64 {
        match self.last_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => u64::MAX,
        }
    }

    /// `true` once the interval has fully elapsed.  Exactly equal counts.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.elapsed_since(now_ms) >= self.interval_ms
    }

    /// Mark the action as performed at `now_ms`.
    ///
    /// Timestamps never move backwards; an older `now_ms` is ignored.
    pub fn record(&mut self, now_ms: u64) {
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
    }

    pub fn last_ms(&self) -> Option<u64> {
        self.last_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// The three cooldowns consulted by every control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownState {
    pub water: Cooldown,
    pub report: Cooldown,
    pub poll: Cooldown,
}

impl CooldownState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            water: Cooldown::new(config.water_cooldown_ms),
            report: Cooldown::new(config.report_cooldown_ms),
            poll: Cooldown::new(config.poll_cooldown_ms),
        }
    }
}

impl Default for CooldownState {
    fn default() -> Self {
        Self::new(&SystemConfig::default())
    }
}
