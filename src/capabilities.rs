//! Startup configuration gate.
//!
//! Before the control loop starts, the operator gets one chance (20 s by
//! default) to type which subsystems are fitted:
//!
//! | Token | Subsystem  |
//! |-------|------------|
//! | `S`   | soil probe |
//! | `P`   | pump relay |
//! | `L`   | light sensor |
//!
//! Tokens are case-insensitive and may be separated by anything.  No input
//! at all means everything is enabled; any input resets the set so that
//! only the named subsystems are on.  Unknown characters are ignored.

use core::fmt;

use log::info;

use crate::app::ports::OperatorConsole;

/// Which subsystems are backed by real hardware.
///
/// Fixed for the rest of the process once the gate has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    pub soil_enabled: bool,
    pub light_enabled: bool,
    pub pump_enabled: bool,
}

impl CapabilitySet {
    pub const fn all() -> Self {
        Self {
            soil_enabled: true,
            light_enabled: true,
            pump_enabled: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            soil_enabled: false,
            light_enabled: false,
            pump_enabled: false,
        }
    }

    /// Parse an operator selection line.  Only subsystems whose token
    /// appears are enabled.
    pub fn parse_selection(line: &str) -> Self {
        let mut set = Self::none();
        for c in line.chars() {
            match c.to_ascii_uppercase() {
                'S' => set.soil_enabled = true,
                'P' => set.pump_enabled = true,
                'L' => set.light_enabled = true,
                _ => {}
            }
        }
        set
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Enabled:")?;
        writeln!(f, "- Soil  : {}", on_off(self.soil_enabled))?;
        writeln!(f, "- Pump  : {}", on_off(self.pump_enabled))?;
        write!(f, "- Light : {}", on_off(self.light_enabled))
    }
}

/// Run the gate: prompt, wait up to `timeout_ms` for one line, and log the
/// resulting set.
pub fn negotiate(console: &mut impl OperatorConsole, timeout_ms: u64) -> CapabilitySet {
    info!("--- CONFIG SETUP ---");
    info!("Type the features to enable, separated by commas (s,p,l,no)");

    let caps = match console.read_line(timeout_ms) {
        Some(line) => {
            info!("console: received '{}'", line.trim());
            CapabilitySet::parse_selection(&line)
        }
        None => {
            info!("No input. Using defaults.");
            CapabilitySet::all()
        }
    };

    for line in caps.to_string().lines() {
        info!("{}", line);
    }
    info!("--- END CONFIG ---");
    caps
}
