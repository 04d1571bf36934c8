//! Variable resolution module
//!
//! Provides parsing and substitution of `{name}` placeholders.
//!
//! # Usage
//!
//! ```
//! use silk_application::variable_resolver::VariableTable;
//!
//! let vars = VariableTable::from_pairs([("id", "123")]);
//! assert_eq!(vars.resolve("/comments/{id}"), "/comments/123");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{Resolution, VariableTable};
pub use parser::{Placeholder, parse_placeholders};
