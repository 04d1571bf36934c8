//! Outbound requests and inbound responses exchanged with a transport.

use std::fmt;

/// A fully resolved request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: String,
    /// Absolute URL (target root + resolved path).
    pub url: String,
    /// Headers in the order they were declared.
    pub headers: Vec<(String, String)>,
    /// Query parameters to append to the URL.
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request without headers or query parameters.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body,
            ..Self::default()
        }
    }

    /// Appends a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Appends a query parameter.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Returns the explicit payload length, if there is a payload.
    #[must_use]
    pub fn content_length(&self) -> Option<usize> {
        self.body.as_ref().map(String::len)
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Headers in the order received; names may repeat.
    pub headers: Vec<(String, String)>,
    /// Full body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
