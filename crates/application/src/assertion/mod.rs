//! Assertion helpers: JSON body comparison, data paths and diff rendering.

pub mod diff;
pub mod json;
pub mod path;

pub use json::{check_exact, check_subset};
pub use path::{is_data_key, lookup};
