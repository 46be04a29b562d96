//! Outbound HTTP transport for the reporting client.

use async_trait::async_trait;

use crate::error::TransportError;

/// Content type used for all report posts. The receiving platform only
/// accepts cross-origin posts when the body is not declared as JSON.
pub const REPORT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Response from a single outbound send.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single-shot POST transport. Object-safe so tests can substitute stubs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `body` to `url` and return the response status and body text.
    ///
    /// A [`TransportError::FetchFailed`] means the request never produced
    /// an HTTP response at all.
    async fn post(&self, url: &str, body: String) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport used in production.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, REPORT_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

/// Split send errors into the no-response class and everything else.
fn classify_send_error(error: reqwest::Error) -> TransportError {
    if error.is_connect() || error.is_timeout() {
        TransportError::FetchFailed(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}
