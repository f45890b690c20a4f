//! Inbound commands from the coordinator.
//!
//! The coordinator answers a command poll with
//! `{"water_now": bool, "auto_enabled": bool}`, where `auto_enabled` is
//! optional.  [`RemoteCommand::decode`] is lenient about field types:
//!
//! - a missing or non-boolean `water_now` reads as `false`;
//! - a missing `auto_enabled` leaves auto mode alone;
//! - a present `auto_enabled` is always an instruction.  Booleans are taken
//!   as-is, numbers are on when non-zero, and `null` or any other type
//!   means off.

use serde_json::Value;

use super::ports::RemoteError;

/// A decoded command poll response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoteCommand {
    /// Run one manual watering pulse now.
    pub water_now: bool,
    /// New auto-mode state, if the coordinator sent one.
    pub auto_enabled: Option<bool>,
}

impl RemoteCommand {
    /// The "nothing to do" command used whenever a poll fails.
    pub const fn none() -> Self {
        Self {
            water_now: false,
            auto_enabled: None,
        }
    }

    /// Decode a command body.  Anything that is not a JSON object is
    /// [`RemoteError::Malformed`].
    pub fn decode(body: &[u8]) -> Result<Self, RemoteError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RemoteError::Malformed)?;
        let obj = value.as_object().ok_or(RemoteError::Malformed)?;

        Ok(Self {
            water_now: obj.get("water_now").and_then(Value::as_bool).unwrap_or(false),
            auto_enabled: obj.get("auto_enabled").map(as_flag),
        })
    }
}

/// Coerce a present value to a flag.  `true` or a non-zero number is on;
/// everything else, `null` included, is off.
fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        _ => false,
    }
}
