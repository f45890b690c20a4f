//! Irrigator Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   RemoteChannel   Esp32Time    │
//! │  (Sensor+Actuator) (EventSink)    (RemotePort)    (ClockPort)  │
//! │  SerialConsole     AccessPoint    EspHttpTransport             │
//! │  (OperatorConsole) (soft AP)      (HttpTransport)              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlEngine (pure logic)                  │    │
//! │  │  sense · auto-water · poll · report · cooldowns        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use irrigator::adapters::access_point::AccessPoint;
use irrigator::adapters::console::SerialConsole;
use irrigator::adapters::hardware::HardwareAdapter;
use irrigator::adapters::http_client::EspHttpTransport;
use irrigator::adapters::log_sink::LogEventSink;
use irrigator::adapters::time::Esp32TimeAdapter;
use irrigator::app::context::ControlContext;
use irrigator::app::ports::ClockPort;
use irrigator::app::service::ControlEngine;
use irrigator::capabilities::{self, CapabilitySet};
use irrigator::config::SystemConfig;
use irrigator::drivers::hw_init::{self, HwInitError};
use irrigator::drivers::pump::PumpDriver;
use irrigator::error::Error;
use irrigator::pins;
use irrigator::remote::RemoteChannel;
use irrigator::sensors::light::Bh1750;
use irrigator::sensors::soil::SoilProbe;
use irrigator::sensors::{SensorHub, SimulatedProbe, Source};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Irrigator v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (compile-time, no persistence) ──────────────
    let config = SystemConfig::default();
    config.validate()?;
    let mut clock = Esp32TimeAdapter::new();

    // ── 3. Settle, then the configuration gate ────────────────
    clock.sleep_ms(config.boot_settle_ms);

    let caps = match SerialConsole::stdin() {
        Ok(mut console) => capabilities::negotiate(&mut console, config.config_gate_timeout_ms),
        Err(e) => {
            warn!("console: reader thread failed to start ({}), enabling everything", e);
            CapabilitySet::all()
        }
    };

    // ── 4. Peripherals for the enabled subsystems ─────────────
    hw_init::init_peripherals(&caps).map_err(Error::from)?;
    let peripherals = Peripherals::take()?;

    let soil = if caps.soil_enabled {
        Source::Live(SoilProbe::new())
    } else {
        Source::Simulated(SimulatedProbe::new(config.soil_band()))
    };

    let light = if caps.light_enabled {
        let i2c = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio21,
            peripherals.pins.gpio22,
            &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
        )
        .map_err(|e| {
            warn!("light: I2C driver init failed: {:?}", e);
            Error::Init(HwInitError::I2cInitFailed)
        })?;
        let mut bh1750 = Bh1750::new(i2c);
        if let Err(e) = bh1750.begin() {
            warn!("light: BH1750 not responding ({}), readings will hold at 0", e);
        }
        Source::Live(bh1750)
    } else {
        Source::Simulated(SimulatedProbe::new(config.light_band()))
    };

    let mut hw = HardwareAdapter::new(SensorHub::new(soil, light), PumpDriver::new());

    // ── 5. Soft access point ──────────────────────────────────
    let sysloop = EspSystemEventLoop::take()?;
    let esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), None)?;
    let wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

    let mut ap = AccessPoint::new(&config.ap_ssid, &config.ap_password).map_err(Error::from)?;
    ap.attach(wifi);
    ap.start_with_retry(&mut clock).map_err(Error::from)?;
    clock.sleep_ms(config.post_ap_settle_ms);

    // ── 6. Control loop ───────────────────────────────────────
    let mut remote = RemoteChannel::new(
        EspHttpTransport::new(config.http_timeout_ms),
        config.sensor_url.as_str(),
        config.command_url.as_str(),
    );
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(caps, &config);
    let mut sink = LogEventSink::new(config.light_threshold);

    engine.start(&ctx, &mut sink);
    loop {
        engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);
    }
}
