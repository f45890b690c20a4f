//! Capacitive soil moisture probe.
//!
//! Reads the probe's analog output through ADC1 and reports the raw 12-bit
//! count.  Lower readings mean wetter soil; no calibration is applied, the
//! threshold is expressed in the same raw units.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::pins;

use super::Probe;

#[cfg(not(target_os = "espidf"))]
static SIM_SOIL_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_soil_adc(raw: u16) {
    SIM_SOIL_ADC.store(raw, Ordering::Relaxed);
}

pub struct SoilProbe {
    channel: u32,
    last_raw: u16,
}

impl Default for SoilProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SoilProbe {
    pub fn new() -> Self {
        Self::on_channel(pins::SOIL_ADC_CHANNEL)
    }

    pub fn on_channel(channel: u32) -> Self {
        Self { channel, last_raw: 0 }
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        let _ = self.channel;
        SIM_SOIL_ADC.load(Ordering::Relaxed)
    }
}

impl Probe for SoilProbe {
    fn sample(&mut self) -> i32 {
        self.last_raw = self.read_adc();
        i32::from(self.last_raw)
    }
}
