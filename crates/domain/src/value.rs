//! Typed, comparison-capable values.
//!
//! A [`Value`] is produced from the raw text of a detail line (or an
//! environment variable, or a captured response value). Text is decoded as
//! JSON when possible and kept as a raw string otherwise. A string written
//! as `/pattern/` acts as a regular expression when compared.

use std::fmt;

use regex::Regex;
use serde_json::Value as Json;

/// Kind reported by [`Value::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool,
    /// JSON number
    Number,
    /// Quoted JSON string or raw text
    String,
    /// JSON array
    Array,
    /// JSON object
    Map,
    /// String of the form `/pattern/`
    Regex,
}

impl ValueKind {
    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Map => "map",
            Self::Regex => "regex",
        }
    }

    /// Returns the kind of a decoded JSON value.
    #[must_use]
    pub const fn of_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(_) => Self::Bool,
            Json::Number(_) => Self::Number,
            Json::String(_) => Self::String,
            Json::Array(_) => Self::Array,
            Json::Object(_) => Self::Map,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text that decoded as JSON.
    Json(Json),
    /// Trimmed text that did not decode as JSON.
    Raw(String),
}

impl Value {
    /// Parses raw text into a value.
    ///
    /// The text is trimmed, then decoded as JSON. Anything that is not
    /// valid JSON is kept as a raw string.
    #[must_use]
    pub fn parse(src: &str) -> Self {
        let src = src.trim();
        serde_json::from_str::<Json>(src).map_or_else(|_| Self::Raw(src.to_string()), Self::Json)
    }

    /// Returns the string data, whether quoted JSON or raw text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(Json::String(s)) | Self::Raw(s) => Some(s),
            Self::Json(_) => None,
        }
    }

    /// Returns true for `/pattern/` strings.
    #[must_use]
    pub fn is_regex(&self) -> bool {
        self.as_str().is_some_and(looks_like_regex)
    }

    /// Returns true for JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Json(Json::Null))
    }

    /// Returns the kind of this value. Regex strings report [`ValueKind::Regex`].
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        if self.is_regex() {
            return ValueKind::Regex;
        }
        match self {
            Self::Json(json) => ValueKind::of_json(json),
            Self::Raw(_) => ValueKind::String,
        }
    }

    /// Returns the kind name, e.g. `"regex"` or `"number"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Converts this value into JSON. Raw text becomes a JSON string.
    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Json(json) => json.clone(),
            Self::Raw(s) => Json::String(s.clone()),
        }
    }

    /// Renders the value the way it is substituted into `{name}` placeholders.
    ///
    /// Strings are written without quotes; everything else as compact JSON.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Json(json) => plain_string(json),
            Self::Raw(s) => s.clone(),
        }
    }

    /// Compares this (expected) value against an actual value.
    ///
    /// - `/pattern/` strings match if the pattern is found anywhere in the
    ///   string form of `candidate`. An invalid pattern never matches.
    /// - Values of different kinds are compared by their string forms.
    /// - Values of the same kind are compared structurally.
    #[must_use]
    pub fn equal(&self, candidate: &Json) -> bool {
        if let Some(pattern) = self.as_str().filter(|s| looks_like_regex(s)) {
            let interior = &pattern[1..pattern.len() - 1];
            return Regex::new(interior).is_ok_and(|re| re.is_match(&plain_string(candidate)));
        }
        let expected = self.to_json();
        if ValueKind::of_json(&expected) == ValueKind::of_json(candidate) {
            json_equal(&expected, candidate)
        } else {
            plain_string(&expected) == plain_string(candidate)
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Self::Json(json)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(s) if looks_like_regex(s) => f.write_str(s),
            Self::Json(Json::String(s)) if looks_like_regex(s) => f.write_str(s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

fn looks_like_regex(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('/') && s.ends_with('/')
}

/// Renders JSON the way it is substituted: strings unquoted, the rest as JSON text.
#[must_use]
pub fn plain_string(json: &Json) -> String {
    match json {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deep equality for decoded JSON where numbers compare by numeric value.
///
/// Integers compare exactly; floats are used only when either side is one.
#[must_use]
pub fn json_equal(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Number(x), Json::Number(y)) => number_equal(x, y),
        (Json::Array(xs), Json::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Json::Object(xs), Json::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

#[allow(clippy::float_cmp)]
fn number_equal(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if x.is_f64() || y.is_f64() {
        return x.as_f64() == y.as_f64();
    }
    match (x.as_i64(), y.as_i64()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => x.as_u64() == y.as_u64(),
        _ => false,
    }
}
