//! Placeholder parser for `{name}` syntax
//!
//! Finds placeholder references with their byte positions.

use std::ops::Range;

/// A `{name}` reference found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The variable name (without braces).
    pub name: String,

    /// Byte range in the original string, braces included.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Extracts all `{name}` placeholders from the input.
///
/// A name is any non-empty run of characters without braces or whitespace,
/// so JSON objects such as `{"a": 1}` are not mistaken for placeholders.
/// Nested braces restart the search at the inner `{`.
///
/// # Examples
///
/// ```
/// use silk_application::variable_resolver::parser::parse_placeholders;
///
/// let refs = parse_placeholders(r#"{"id": "{id}", "env": "{$EnvStatus}"}"#);
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "id");
/// assert_eq!(refs[1].name, "$EnvStatus");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find('{') {
        let start = cursor + offset;
        let inner = start + 1;
        let Some(close) = input[inner..].find(['{', '}']) else {
            break;
        };
        let end = inner + close;
        if input[end..].starts_with('{') {
            // restart at the nested brace
            cursor = end;
            continue;
        }

        let name = &input[inner..end];
        if !name.is_empty() && !name.chars().any(char::is_whitespace) {
            placeholders.push(Placeholder::new(name, start..end + 1));
        }
        cursor = end + 1;
    }

    placeholders
}
