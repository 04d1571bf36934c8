//! Variable table and substitution engine
//!
//! Replaces `{name}` references with values from a run-scoped table.

use std::collections::HashMap;

use silk_domain::Value;

use super::parser::parse_placeholders;

/// Result of resolving one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The string with every known placeholder substituted.
    pub resolved: String,

    /// Placeholder names that had no value and were left untouched.
    pub unresolved: Vec<String>,
}

/// Variables available to a run.
///
/// Owned by one runner for the duration of one run. Seeded from the
/// process environment, then mutated only by captures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    values: HashMap<String, Value>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding every process environment variable, each
    /// passed through the value parser.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Creates a table from name/raw-text pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::parse(v.as_ref())))
                .collect(),
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitutes every known `{name}` in the input.
    #[must_use]
    pub fn resolve(&self, input: &str) -> String {
        self.resolve_detailed(input).resolved
    }

    /// Substitutes every known `{name}` and reports the unknown ones.
    #[must_use]
    pub fn resolve_detailed(&self, input: &str) -> Resolution {
        let placeholders = parse_placeholders(input);
        if placeholders.is_empty() {
            return Resolution {
                resolved: input.to_string(),
                unresolved: Vec::new(),
            };
        }

        let mut resolved = String::with_capacity(input.len());
        let mut unresolved = Vec::new();
        let mut last_end = 0;

        for placeholder in &placeholders {
            resolved.push_str(&input[last_end..placeholder.span.start]);
            match self.values.get(&placeholder.name) {
                Some(value) => resolved.push_str(&value.to_plain_string()),
                None => {
                    resolved.push_str(&input[placeholder.span.clone()]);
                    unresolved.push(placeholder.name.clone());
                }
            }
            last_end = placeholder.span.end;
        }
        resolved.push_str(&input[last_end..]);

        Resolution {
            resolved,
            unresolved,
        }
    }
}
