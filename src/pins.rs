//! GPIO / peripheral pin assignments for the irrigator board (ESP32 DevKit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Soil moisture probe (capacitive, analog)
// ---------------------------------------------------------------------------

/// Capacitive soil probe analog output.  Lower reading = wetter soil.
pub const SOIL_ADC_GPIO: i32 = 34;
/// ADC1 channel wired to [`SOIL_ADC_GPIO`] (GPIO 34 = ADC1_CH6 on ESP32).
pub const SOIL_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay module.
/// Active LOW: LOW = pump energised, HIGH = pump off.
pub const RELAY_GPIO: i32 = 26;
/// Logic level that energises the relay.
pub const RELAY_ACTIVE_LEVEL: bool = false;

// ---------------------------------------------------------------------------
// I²C bus (BH1750 ambient light sensor)
// ---------------------------------------------------------------------------

/// `main` takes the typed `gpio21` / `gpio22` peripherals for the I²C
/// driver; keep these numbers in sync with it.
pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// I²C bus clock.  BH1750 supports up to 400 kHz; standard mode is plenty.
pub const I2C_BAUDRATE_HZ: u32 = 100_000;
