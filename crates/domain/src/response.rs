//! Flattened response details used by assertions.

use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::http::HttpResponse;

/// Key holding the numeric status code.
pub const STATUS_KEY: &str = "Status";
/// Key holding the body text.
pub const BODY_KEY: &str = "Body";
/// Key holding all cookies set by the response.
pub const SET_COOKIE_KEY: &str = "Set-Cookie";
/// Separator between cookies in the `Set-Cookie` entry.
pub const COOKIE_DELIMITER: &str = "|";

/// Response details keyed by canonical header name, plus `Status` and `Body`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseDetails {
    values: BTreeMap<String, Json>,
}

impl ResponseDetails {
    /// Flattens a response.
    ///
    /// For repeated header names the last value wins. All `Set-Cookie`
    /// values are joined with `|` into a single entry.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let mut values = BTreeMap::new();
        let mut cookies = Vec::new();
        for (name, value) in &response.headers {
            let name = canonical_header_key(name);
            if name == SET_COOKIE_KEY {
                cookies.push(value.as_str());
            }
            values.insert(name, Json::String(value.clone()));
        }
        if !cookies.is_empty() {
            values.insert(
                SET_COOKIE_KEY.to_string(),
                Json::String(cookies.join(COOKIE_DELIMITER)),
            );
        }
        values.insert(STATUS_KEY.to_string(), Json::from(response.status));
        values.insert(BODY_KEY.to_string(), Json::String(response.body_text()));
        Self { values }
    }

    /// Looks up a detail by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.values.get(key)
    }

    /// Iterates all details in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Json)> {
        self.values.iter()
    }
}

/// Canonicalises a header name: first letter and every letter after a
/// hyphen upper case, the rest lower case (`content-type` → `Content-Type`).
#[must_use]
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
