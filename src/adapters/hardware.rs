//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the pump relay driver, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::pump::PumpDriver;
use crate::sensors::{Probe, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, L> {
    sensor_hub: SensorHub<S, L>,
    pump: PumpDriver,
}

impl<S: Probe, L: Probe> HardwareAdapter<S, L> {
    pub fn new(sensor_hub: SensorHub<S, L>, pump: PumpDriver) -> Self {
        Self { sensor_hub, pump }
    }

    pub fn pump(&self) -> &PumpDriver {
        &self.pump
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: Probe, L: Probe> SensorPort for HardwareAdapter<S, L> {
    fn read_soil(&mut self) -> i32 {
        self.sensor_hub.read_soil()
    }

    fn read_light(&mut self) -> i32 {
        self.sensor_hub.read_light()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S: Probe, L: Probe> ActuatorPort for HardwareAdapter<S, L> {
    fn set_pump(&mut self, on: bool) {
        if on {
            self.pump.start();
        } else {
            self.pump.stop();
        }
    }

    fn is_pump_on(&self) -> bool {
        self.pump.is_running()
    }
}
