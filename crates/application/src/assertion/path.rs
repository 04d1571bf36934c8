//! Dotted paths into decoded response data.

use serde_json::Value as Json;

/// Prefix marking a detail key as a path into the decoded body.
pub const DATA_PREFIX: &str = "Data";

/// Returns true if the key addresses decoded body data: `Data`,
/// `Data.field...` or `Data[0]...`.
#[must_use]
pub fn is_data_key(key: &str) -> bool {
    key.strip_prefix(DATA_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
}

/// Walks a `Data...` key into decoded data.
///
/// Supports `Data.field.nested`, numeric segments for arrays
/// (`Data.items.0`) and bracket indexes (`Data.items[0].id`).
/// `Data` alone returns the whole document.
#[must_use]
pub fn lookup<'a>(data: &'a Json, key: &str) -> Option<&'a Json> {
    let path = key.strip_prefix(DATA_PREFIX)?;
    split_path_segments(path)
        .iter()
        .try_fold(data, |current, segment| match current {
            Json::Object(map) => map.get(segment.as_str()),
            Json::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Splits a path into segments; `a[0].b` becomes `a`, `0`, `b`.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in path.chars() {
        match ch {
            '.' | '[' | ']' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
