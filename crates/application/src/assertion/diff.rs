//! Expected/actual rendering for failed detail assertions.

use serde_json::Value as Json;
use silk_domain::{Value, ValueKind};

/// Renders a mismatch between an expected value and an actual one.
///
/// Kind names are included only when the kinds differ:
/// `Status expected: 400  actual: 200` versus
/// `Status expected string: "400"  actual number: 200`.
#[must_use]
pub fn render_mismatch(key: &str, expected: &Value, actual: &Json) -> String {
    let actual_kind = ValueKind::of_json(actual);
    if expected.kind() == actual_kind {
        format!("{key} expected: {expected}  actual: {actual}")
    } else {
        format!(
            "{key} expected {}: {expected}  actual {actual_kind}: {actual}",
            expected.type_name()
        )
    }
}

/// Renders an expected value whose key was absent from the response.
#[must_use]
pub fn render_missing(key: &str, expected: &Value) -> String {
    format!(
        "{key} expected {}: {expected}  actual: (missing)",
        expected.type_name()
    )
}

/// Renders an expected value that could not be checked against the body.
#[must_use]
pub fn render_unavailable(key: &str, expected: &Value, reason: &str) -> String {
    format!(
        "{key} expected {}: {expected}  actual: {reason}",
        expected.type_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_same_kind() {
        let message = render_mismatch("Status", &Value::parse("400"), &json!(200));
        assert_eq!(message, "Status expected: 400  actual: 200");

        let message = render_mismatch(
            "Content-Type",
            &Value::parse("wrong/type"),
            &json!("text/plain; charset=utf-8"),
        );
        assert_eq!(
            message,
            r#"Content-Type expected: "wrong/type"  actual: "text/plain; charset=utf-8""#
        );
    }

    #[test]
    fn test_different_kinds() {
        let message = render_mismatch("Status", &Value::parse(r#""400""#), &json!(200));
        assert_eq!(message, r#"Status expected string: "400"  actual number: 200"#);
    }

    #[test]
    fn test_whitespace_is_visible() {
        let message = render_mismatch(
            "Data.body.status",
            &Value::parse(r#""awesome""#),
            &json!(" awesome"),
        );
        assert_eq!(
            message,
            r#"Data.body.status expected: "awesome"  actual: " awesome""#
        );
    }

    #[test]
    fn test_missing() {
        assert_eq!(
            render_missing("X-Request-Id", &Value::parse("/.+/")),
            "X-Request-Id expected regex: /.+/  actual: (missing)"
        );
    }
}
