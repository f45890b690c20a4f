//! ESP-IDF HTTP client adapter.
//!
//! Implements [`HttpTransport`] with `esp_idf_svc::http::client` behind the
//! `embedded_svc` blocking client.  A fresh connection is opened per
//! exchange; the coordinator is on the local soft-AP subnet so the setup
//! cost is small next to the loop slice.
//!
//! On non-espidf targets every exchange fails with
//! [`RemoteError::Transport`], which the engine treats as the coordinator
//! being offline.

use crate::app::ports::RemoteError;
use crate::remote::transport::{HttpResponse, HttpTransport};

#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
use embedded_svc::{
    http::{client::Client as HttpClient, Method, Status},
    io::{Read, Write},
};
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};

pub struct EspHttpTransport {
    timeout_ms: u64,
}

impl EspHttpTransport {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    #[cfg(target_os = "espidf")]
    fn exchange(&mut self, method: Method, url: &str, body: Option<&[u8]>) -> Result<HttpResponse, RemoteError> {
        use crate::remote::transport::MAX_BODY_LEN;

        let conf = HttpClientConfiguration {
            timeout: Some(core::time::Duration::from_millis(self.timeout_ms)),
            ..Default::default()
        };
        let conn = EspHttpConnection::new(&conf).map_err(|e| {
            warn!("remote: connection setup failed: {:?}", e);
            RemoteError::Transport
        })?;
        let mut client = HttpClient::wrap(conn);

        let content_length = body.map_or(0, <[u8]>::len).to_string();
        let json_headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", content_length.as_str()),
        ];
        let headers: &[(&str, &str)] = if body.is_some() { &json_headers } else { &[] };

        let mut request = client.request(method, url, headers).map_err(|e| {
            warn!("remote: request to {} failed: {:?}", url, e);
            RemoteError::Transport
        })?;
        if let Some(bytes) = body {
            request.write_all(bytes).map_err(|e| {
                warn!("remote: request body write failed: {:?}", e);
                RemoteError::Transport
            })?;
            request.flush().map_err(|_| RemoteError::Transport)?;
        }

        let mut response = request.submit().map_err(|e| {
            warn!("remote: {} unreachable: {:?}", url, e);
            RemoteError::Transport
        })?;
        let status = response.status();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 128];
        while buf.len() < MAX_BODY_LEN {
            let n = response.read(&mut chunk).map_err(|e| {
                warn!("remote: response read failed: {:?}", e);
                RemoteError::Transport
            })?;
            if n == 0 {
                break;
            }
            let take = n.min(MAX_BODY_LEN - buf.len());
            buf.extend_from_slice(&chunk[..take]);
        }

        Ok(HttpResponse { status, body: buf })
    }
}

#[cfg(target_os = "espidf")]
impl HttpTransport for EspHttpTransport {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, RemoteError> {
        self.exchange(Method::Post, url, Some(body))
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError> {
        self.exchange(Method::Get, url, None)
    }
}

#[cfg(not(target_os = "espidf"))]
impl HttpTransport for EspHttpTransport {
    fn post_json(&mut self, url: &str, _body: &[u8]) -> Result<HttpResponse, RemoteError> {
        log::debug!("remote(sim): POST {} skipped, no network", url);
        Err(RemoteError::Transport)
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError> {
        log::debug!("remote(sim): GET {} skipped, no network", url);
        Err(RemoteError::Transport)
    }
}
