//! Request construction port

use silk_domain::HttpRequest;
use thiserror::Error;
use url::Url;

/// Errors raised while constructing a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The method is not a valid HTTP token.
    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    /// The URL is malformed or not http(s).
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Port for constructing requests from a method, absolute URL and body.
pub trait RequestBuilder: Send + Sync {
    /// Builds a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the method or URL is unusable.
    fn build(&self, method: &str, url: &str, body: Option<String>)
    -> Result<HttpRequest, RequestError>;
}

/// Validates the method token and URL, then builds a plain [`HttpRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRequestBuilder;

impl StandardRequestBuilder {
    /// RFC 9110 token characters.
    const fn is_token_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|'
                    | '~'
            )
    }
}

impl RequestBuilder for StandardRequestBuilder {
    fn build(
        &self,
        method: &str,
        url: &str,
        body: Option<String>,
    ) -> Result<HttpRequest, RequestError> {
        if method.is_empty() || !method.chars().all(Self::is_token_char) {
            return Err(RequestError::InvalidMethod(method.to_string()));
        }

        let parsed = Url::parse(url).map_err(|e| RequestError::InvalidUrl(format!("{e}: {url}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RequestError::InvalidUrl(format!(
                "URL must start with http:// or https://: {url}"
            )));
        }

        Ok(HttpRequest::new(method, url, body))
    }
}
