//! JSON body comparison.

use serde_json::Value as Json;
use silk_domain::value::{ValueKind, json_equal};

/// Checks that `expected` is equal to, or a recursive subset of, `actual`.
///
/// Every key of an expected object must be present in the actual object
/// with an equal (or, for nested objects, subset) value. Extra actual keys
/// are ignored. Arrays and scalars must be deeply equal; there is no
/// partial array matching.
///
/// # Errors
///
/// Returns a description of the first difference found.
pub fn check_subset(expected: &Json, actual: &Json) -> Result<(), String> {
    if ValueKind::of_json(expected) != ValueKind::of_json(actual) {
        return Err("types do not match".to_string());
    }

    match (expected, actual) {
        (Json::Object(expected), Json::Object(actual)) => {
            for (key, expected_value) in expected {
                let Some(actual_value) = actual.get(key) else {
                    return Err(format!("missing key '{key}'"));
                };
                check_subset(expected_value, actual_value)
                    .map_err(|e| format!("mismatch for key '{key}': {e}"))?;
            }
            Ok(())
        }
        _ => check_exact(expected, actual),
    }
}

/// Checks that two JSON documents are structurally equal.
///
/// # Errors
///
/// Returns a description of the difference.
pub fn check_exact(expected: &Json, actual: &Json) -> Result<(), String> {
    if json_equal(expected, actual) {
        Ok(())
    } else {
        Err(format!("values do not match - {expected} != {actual}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_subset_passes() {
        assert_eq!(check_subset(&json!({"a": 1}), &json!({"a": 1, "b": 2})), Ok(()));
    }

    #[test]
    fn test_subset_value_mismatch() {
        let err = check_subset(&json!({"a": 2}), &json!({"a": 1, "b": 2})).unwrap_err();
        assert_eq!(err, "mismatch for key 'a': values do not match - 2 != 1");
    }

    #[test]
    fn test_exact_rejects_extra_keys() {
        assert!(check_exact(&json!({"a": 1}), &json!({"a": 1, "b": 2})).is_err());
        assert_eq!(check_exact(&json!({"b": 2, "a": 1}), &json!({"a": 1, "b": 2})), Ok(()));
    }

    #[test]
    fn test_nested_subset() {
        let actual = json!({"user": {"id": 1, "name": "Mat", "tags": ["a", "b"]}, "ok": true});
        assert_eq!(check_subset(&json!({"user": {"name": "Mat"}}), &actual), Ok(()));
        assert_eq!(
            check_subset(&json!({"user": {"email": "x"}}), &actual).unwrap_err(),
            "mismatch for key 'user': missing key 'email'"
        );
    }

    #[test]
    fn test_arrays_require_exact_equality() {
        let actual = json!({"tags": ["a", "b"]});
        assert!(check_subset(&json!({"tags": ["a"]}), &actual).is_err());
        assert!(check_subset(&json!({"tags": ["a", "b"]}), &actual).is_ok());
        assert!(check_subset(&json!([{"id": 1}]), &json!([{"id": 1, "x": 2}])).is_err());
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            check_subset(&json!({"a": "1"}), &json!({"a": 1})).unwrap_err(),
            "mismatch for key 'a': types do not match"
        );
        assert_eq!(check_subset(&json!(null), &json!(null)), Ok(()));
    }
}
