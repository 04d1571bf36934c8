//! Key/value details attached to groups and requests.

use std::fmt;

use crate::value::Value;

/// A key/value pair used for headers, query parameters, defaults and
/// assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    /// Cleaned key, e.g. `Content-Type` or `Data.user.id`.
    pub key: String,
    /// Parsed value.
    pub value: Value,
}

impl Detail {
    /// Creates a new detail.
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Parses the text after the bullet of a detail or param line.
    ///
    /// The key ends at the first `:` or `=` that is not inside decorative
    /// backticks. Returns `None` when there is no such separator.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let sep = find_separator(body)?;
        let key = clean(&body[..sep]);
        let value = clean(&body[sep + 1..]);
        Some(Self::new(key, Value::parse(value)))
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

fn find_separator(body: &str) -> Option<usize> {
    let mut in_ticks = false;
    for (i, ch) in body.char_indices() {
        match ch {
            '`' => in_ticks = !in_ticks,
            ':' | '=' if !in_ticks => return Some(i),
            _ => {}
        }
    }
    None
}

/// Trims whitespace and decorative backticks.
#[must_use]
pub fn clean(s: &str) -> &str {
    s.trim().trim_matches('`').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_colon() {
        let detail = Detail::parse(r#"Key-Here: "Value""#);
        assert_eq!(
            detail,
            Some(Detail::new("Key-Here", Value::Json(json!("Value"))))
        );
    }

    #[test]
    fn test_parse_first_separator_wins() {
        let detail = Detail::parse("Cookie: name=value");
        assert_eq!(
            detail,
            Some(Detail::new("Cookie", Value::Raw("name=value".into())))
        );
    }

    #[test]
    fn test_parse_backticks() {
        assert_eq!(
            Detail::parse("`Detail`: `123`"),
            Some(Detail::new("Detail", Value::Json(json!(123))))
        );
        assert_eq!(
            Detail::parse("`a:b`=`c`"),
            Some(Detail::new("a:b", Value::Raw("c".into())))
        );
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(Detail::parse("no separator here"), None);
        assert_eq!(Detail::parse("`only: inside`"), None);
    }

    #[test]
    fn test_display() {
        let detail = Detail::new("Status", Value::parse("200"));
        assert_eq!(detail.to_string(), "Status: 200");
    }
}
