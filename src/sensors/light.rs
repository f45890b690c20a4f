//! BH1750 ambient light sensor driver.
//!
//! Generic over any `embedded_hal::i2c::I2c` bus so the same driver runs
//! on the ESP-IDF `I2cDriver` and against a fake bus in tests.
//!
//! The sensor is put into continuous high-resolution mode once at
//! [`begin`](Bh1750::begin); every [`sample`](Probe::sample) then reads
//! the latest 16-bit conversion.  A failed read logs a warning and returns
//! the last good value so one bus glitch never stalls the control loop.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::error::SensorError;

use super::Probe;

/// Bus address with the ADDR pin tied low, as on the irrigator board.
pub const BH1750_ADDR: u8 = 0x23;

const CMD_POWER_ON: u8 = 0x01;
const CMD_CONTINUOUS_HIGH_RES: u8 = 0x10;

pub struct Bh1750<I2C> {
    bus: I2C,
    address: u8,
    ready: bool,
    last_lux: i32,
    read_errors: u32,
}

impl<I2C: I2c> Bh1750<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self {
            bus,
            address: BH1750_ADDR,
            ready: false,
            last_lux: 0,
            read_errors: 0,
        }
    }

    /// Power the sensor on and start continuous high-resolution sampling.
    pub fn begin(&mut self) -> Result<(), SensorError> {
        self.bus
            .write(self.address, &[CMD_POWER_ON])
            .map_err(|_| SensorError::BusFailed)?;
        self.bus
            .write(self.address, &[CMD_CONTINUOUS_HIGH_RES])
            .map_err(|_| SensorError::BusFailed)?;
        self.ready = true;
        info!("light: BH1750 ready at 0x{:02X}", self.address);
        Ok(())
    }

    /// Read the latest conversion in lux.
    pub fn read_lux(&mut self) -> Result<i32, SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialised);
        }
        let mut buf = [0u8; 2];
        self.bus
            .read(self.address, &mut buf)
            .map_err(|_| SensorError::BusFailed)?;
        Ok(raw_to_lux(u16::from_be_bytes(buf)))
    }

    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn release(self) -> I2C {
        self.bus
    }
}

/// High-resolution mode: 1 count = 1/1.2 lux.
pub fn raw_to_lux(raw: u16) -> i32 {
    (f32::from(raw) / 1.2) as i32
}

impl<I2C: I2c> Probe for Bh1750<I2C> {
    fn sample(&mut self) -> i32 {
        match self.read_lux() {
            Ok(lux) => {
                self.last_lux = lux;
                lux
            }
            Err(e) => {
                self.read_errors = self.read_errors.saturating_add(1);
                warn!("light: read failed ({}), reusing {} lx", e, self.last_lux);
                self.last_lux
            }
        }
    }
}
