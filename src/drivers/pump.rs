//! Pump relay driver.
//!
//! A single digital output through a relay module.  The relay on the
//! reference board is active LOW; the polarity lives in
//! [`pins::RELAY_ACTIVE_LEVEL`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver {
    state: PumpState,
    gpio: i32,
    active_level: bool,
    /// Number of times the relay has been energised since boot.
    starts: u32,
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PumpDriver {
    pub fn new() -> Self {
        Self::with_pin(pins::RELAY_GPIO, pins::RELAY_ACTIVE_LEVEL)
    }

    /// Driver for a relay on another pin or with the other polarity.
    pub fn with_pin(gpio: i32, active_level: bool) -> Self {
        Self {
            state: PumpState::Stopped,
            gpio,
            active_level,
            starts: 0,
        }
    }

    pub fn start(&mut self) {
        self.write_hw(true);
        if self.state == PumpState::Stopped {
            self.starts = self.starts.saturating_add(1);
        }
        self.state = PumpState::Running;
        debug!("pump: relay energised (GPIO{})", self.gpio);
    }

    pub fn stop(&mut self) {
        self.write_hw(false);
        self.state = PumpState::Stopped;
        debug!("pump: relay released (GPIO{})", self.gpio);
    }

    /// GPIO level for a logical on/off.
    pub fn level_for(&self, on: bool) -> bool {
        if on { self.active_level } else { !self.active_level }
    }

    fn write_hw(&self, on: bool) {
        hw_init::gpio_write(self.gpio, self.level_for(on));
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }
}
