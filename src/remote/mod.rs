//! Coordinator link.
//!
//! [`RemoteChannel`] implements [`RemotePort`] over any [`HttpTransport`]:
//!
//! | Exchange  | Method | Endpoint        | Success                         |
//! |-----------|--------|-----------------|---------------------------------|
//! | telemetry | POST   | `sensor_url`    | any 2xx                         |
//! | command   | GET    | `command_url`   | 200 with a JSON object body     |
//!
//! Every exchange logs its outcome, including the response body, so a
//! serial trace shows what the coordinator said.

pub mod transport;

use log::{debug, info, warn};

use crate::app::commands::RemoteCommand;
use crate::app::events::TelemetryReport;
use crate::app::ports::{RemoteError, RemotePort};

pub use transport::{HttpResponse, HttpTransport};

pub struct RemoteChannel<T> {
    transport: T,
    sensor_url: String,
    command_url: String,
}

impl<T: HttpTransport> RemoteChannel<T> {
    pub fn new(transport: T, sensor_url: impl Into<String>, command_url: impl Into<String>) -> Self {
        Self {
            transport,
            sensor_url: sensor_url.into(),
            command_url: command_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: HttpTransport> RemotePort for RemoteChannel<T> {
    fn report_telemetry(&mut self, report: &TelemetryReport) -> Result<(), RemoteError> {
        let body = report.to_json()?;
        debug!("remote: POST {} {}", self.sensor_url, String::from_utf8_lossy(&body));

        let resp = self.transport.post_json(&self.sensor_url, &body).map_err(|e| {
            warn!("remote: telemetry POST failed ({})", e);
            e
        })?;

        if !resp.is_success() {
            warn!("remote: telemetry rejected, HTTP {} {}", resp.status, resp.body_text());
            return Err(RemoteError::Status(resp.status));
        }
        info!("remote: telemetry HTTP {} {}", resp.status, resp.body_text());
        Ok(())
    }

    fn poll_command(&mut self) -> Result<RemoteCommand, RemoteError> {
        let resp = self.transport.get(&self.command_url).map_err(|e| {
            warn!("remote: command GET failed ({})", e);
            e
        })?;

        if resp.status != 200 {
            warn!("remote: command poll HTTP {} {}", resp.status, resp.body_text());
            return Err(RemoteError::Status(resp.status));
        }
        debug!("remote: command body {}", resp.body_text());

        RemoteCommand::decode(&resp.body).map_err(|e| {
            warn!("remote: command body rejected ({}): {}", e, resp.body_text());
            e
        })
    }
}
