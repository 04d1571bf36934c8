//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port. Redirects are followed
//! (up to 10) and the full response body is read before returning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use silk_application::ports::{Transport, TransportError};
use silk_domain::{HttpRequest, HttpResponse};

const MAX_REDIRECTS: usize = 10;

/// Transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    insecure: bool,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport with certificate verification enabled and no
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::build(false, None)
    }

    /// Creates a transport that accepts invalid TLS certificates.
    ///
    /// Only meant for test servers with self-signed certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn insecure() -> Result<Self, TransportError> {
        Self::build(true, None)
    }

    /// Rebuilds the transport with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, TransportError> {
        Self::build(self.insecure, Some(timeout))
    }

    /// Creates a transport from a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            insecure: false,
            timeout: None,
        }
    }

    fn build(insecure: bool, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(concat!("silk/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(insecure);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self {
            client,
            insecure,
            timeout,
        })
    }

    /// Returns true if invalid certificates are accepted.
    #[must_use]
    pub const fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Builds the target URL with query parameters appended.
    fn target_url(request: &HttpRequest) -> Result<Url, TransportError> {
        let mut url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: self
                    .timeout
                    .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_redirect() {
            return TransportError::Other(format!("more than {MAX_REDIRECTS} redirects"));
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::Other(format!("invalid method: {e}")))?;
        let url = Self::target_url(request)?;

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
