//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART in production).  Each line
//! starts with a short tag so the serial trace can be grepped.

use log::{info, warn};

use crate::app::events::{AppEvent, WateringTrigger};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    /// Readings below this are tagged `low-light`.  Display only.
    light_threshold: i32,
}

impl LogEventSink {
    pub fn new(light_threshold: i32) -> Self {
        Self { light_threshold }
    }

    fn light_hint(&self, light: i32) -> &'static str {
        if light < self.light_threshold { " (low-light)" } else { "" }
    }
}

fn trigger_name(trigger: WateringTrigger) -> &'static str {
    match trigger {
        WateringTrigger::Auto => "AUTO",
        WateringTrigger::Manual => "MANUAL",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { capabilities, auto_mode } => {
                info!(
                    "START | soil={} pump={} light={} | auto={}",
                    capabilities.soil_enabled,
                    capabilities.pump_enabled,
                    capabilities.light_enabled,
                    auto_mode
                );
            }
            AppEvent::CycleStarted { cycle, reading } => {
                info!("---");
                info!(
                    "CYCLE | #{} | soil={} | light={}lx{}",
                    cycle,
                    reading.soil,
                    reading.light,
                    self.light_hint(reading.light)
                );
            }
            AppEvent::WateringStarted { trigger, simulated } => {
                if *simulated {
                    info!("WATER | {} | pump disabled, simulating pulse", trigger_name(*trigger));
                } else {
                    info!("WATER | {} | pump ON", trigger_name(*trigger));
                }
            }
            AppEvent::WateringFinished { trigger, at_ms } => {
                info!("WATER | {} | pump OFF at t={}ms", trigger_name(*trigger), at_ms);
            }
            AppEvent::TelemetrySent(r) => {
                info!(
                    "TELEM | sent | soil={} light={} watering={}",
                    r.soil, r.light, r.is_watering
                );
            }
            AppEvent::TelemetryFailed { report, error } => {
                warn!(
                    "TELEM | dropped ({}) | soil={} light={} watering={}",
                    error, report.soil, report.light, report.is_watering
                );
            }
            AppEvent::CommandReceived(cmd) => {
                info!("POLL  | water_now={} auto_enabled={:?}", cmd.water_now, cmd.auto_enabled);
            }
            AppEvent::PollFailed(error) => {
                warn!("POLL  | failed ({}), treating as no command", error);
            }
            AppEvent::AutoModeChanged { enabled } => {
                info!("AUTO  | {}", if *enabled { "enabled" } else { "disabled" });
            }
        }
    }
}
