//! Transport port

use async_trait::async_trait;
use silk_domain::{HttpRequest, HttpResponse};
use thiserror::Error;

/// Errors raised while sending a request or reading its response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The URL could not be used by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport gave up waiting.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending requests.
///
/// Calls are made one at a time, in file order. Any timeout or
/// cancellation policy belongs to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the response
    /// cannot be read.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
