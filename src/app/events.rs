//! Outbound application events and the telemetry wire format.
//!
//! The [`ControlEngine`](super::service::ControlEngine) emits [`AppEvent`]s
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them (serial log, test recorder).

use serde::{Deserialize, Serialize};

use crate::capabilities::CapabilitySet;

use super::commands::RemoteCommand;
use super::context::SensorReading;
use super::ports::RemoteError;

/// What started a watering pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringTrigger {
    /// Soil below threshold with auto mode on.
    Auto,
    /// `water_now` from the coordinator.
    Manual,
}

/// Structured events emitted by the control engine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The engine is about to enter its loop.
    Started {
        capabilities: CapabilitySet,
        auto_mode: bool,
    },

    /// A new control cycle began and sampled the sensors.
    CycleStarted { cycle: u64, reading: SensorReading },

    /// A pulse started.  `simulated` when the pump capability is off.
    WateringStarted {
        trigger: WateringTrigger,
        simulated: bool,
    },

    /// A pulse finished and the watering cooldown was recorded.
    WateringFinished {
        trigger: WateringTrigger,
        at_ms: u64,
    },

    /// The coordinator accepted a telemetry report.
    TelemetrySent(TelemetryReport),

    /// A telemetry report was dropped.
    TelemetryFailed {
        report: TelemetryReport,
        error: RemoteError,
    },

    /// A command poll succeeded.
    CommandReceived(RemoteCommand),

    /// A command poll failed; treated as "no command".
    PollFailed(RemoteError),

    /// The coordinator flipped auto mode.
    AutoModeChanged { enabled: bool },
}

/// Telemetry report, serialised as a flat JSON object:
/// `{"soil": i32, "light": i32, "is_watering": bool}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryReport {
    pub soil: i32,
    pub light: i32,
    pub is_watering: bool,
}

impl TelemetryReport {
    pub fn new(reading: SensorReading, is_watering: bool) -> Self {
        Self {
            soil: reading.soil,
            light: reading.light,
            is_watering,
        }
    }

    /// Encode to the wire JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, RemoteError> {
        serde_json::to_vec(self).map_err(|_| RemoteError::Serialize)
    }
}
