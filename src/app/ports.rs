//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlEngine (domain)
//! ```
//!
//! Driven adapters (sensors, pump, coordinator link, clock, event sinks)
//! implement these traits.  The [`ControlEngine`](super::service::ControlEngine)
//! consumes them via generics, so the domain core never touches hardware
//! or the network directly and a whole cycle can run against mocks.

use core::fmt;

use super::commands::RemoteCommand;
use super::context::SensorReading;
use super::events::TelemetryReport;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the engine calls this once per cycle.
///
/// Implementations never fail.  A disabled or flaky sensor yields a
/// plausible value instead.
pub trait SensorPort {
    /// Raw soil moisture.  Lower values mean wetter soil.
    fn read_soil(&mut self) -> i32;

    /// Ambient illuminance in lux.
    fn read_light(&mut self) -> i32;

    /// Read both sensors, soil first.
    fn read_all(&mut self) -> SensorReading {
        let soil = self.read_soil();
        let light = self.read_light();
        SensorReading { soil, light }
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the engine calls this to drive the pump output.
pub trait ActuatorPort {
    /// Energise (`true`) or de-energise (`false`) the pump.
    fn set_pump(&mut self, on: bool);

    /// Whether the pump output is currently energised.
    fn is_pump_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Remote port (driven adapter: domain ↔ coordinator)
// ───────────────────────────────────────────────────────────────

/// Request/response exchanges with the coordinator.
///
/// Each call is one blocking exchange with its own transport timeout and
/// no retry.
pub trait RemotePort {
    /// Push a telemetry report.  Non-success statuses are errors.
    fn report_telemetry(&mut self, report: &TelemetryReport) -> Result<(), RemoteError>;

    /// Fetch the pending command.  Only a 200 with a JSON object body
    /// decodes to `Ok`.
    fn poll_command(&mut self) -> Result<RemoteCommand, RemoteError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time and blocking delays.
///
/// Injected so tests can advance time without real waits.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block the calling thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u64);
}

// ───────────────────────────────────────────────────────────────
// Operator console (startup configuration gate)
// ───────────────────────────────────────────────────────────────

/// Line-oriented operator input, consulted once at boot.
pub trait OperatorConsole {
    /// Wait up to `timeout_ms` for one line.  `None` on timeout.
    fn read_line(&mut self, timeout_ms: u64) -> Option<String>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The engine emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`RemotePort`] operations.  None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteError {
    /// Host unreachable, connection refused, timeout, or I/O failure.
    Transport,
    /// The coordinator answered with an unexpected status code.
    Status(u16),
    /// The body was not the expected JSON shape.
    Malformed,
    /// The outgoing report could not be serialised.
    Serialize,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport failure"),
            Self::Status(code) => write!(f, "unexpected HTTP status {}", code),
            Self::Malformed => write!(f, "malformed response body"),
            Self::Serialize => write!(f, "report serialisation failed"),
        }
    }
}

impl std::error::Error for RemoteError {}
