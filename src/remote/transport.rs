//! Blocking HTTP exchange seam.
//!
//! [`RemoteChannel`](super::RemoteChannel) speaks to the coordinator only
//! through [`HttpTransport`].  The ESP-IDF client lives in
//! `adapters::http_client`; tests substitute scripted transports.

use crate::app::ports::RemoteError;

/// Largest response body kept.  Command bodies are a few dozen bytes.
pub const MAX_BODY_LEN: usize = 512;

/// Status line and (possibly truncated) body of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for logging; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// One request, one response, no retries.  Implementations apply their
/// own request timeout and map every I/O failure to
/// [`RemoteError::Transport`].
pub trait HttpTransport {
    /// POST `body` with `Content-Type: application/json`.
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, RemoteError>;

    fn get(&mut self, url: &str) -> Result<HttpResponse, RemoteError>;
}
