//! Silk Application - Execution engine and use cases
//!
//! This crate runs parsed documents: it resolves `{name}` variables,
//! sends requests through the injected ports and checks the responses.
//! It depends only on `silk-domain`; concrete transports and file
//! access live in `silk-infrastructure`.

pub mod assertion;
pub mod error;
pub mod ports;
pub mod runner;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use runner::Runner;
pub use use_cases::{RunSuite, RunSuiteInput};
pub use variable_resolver::VariableTable;
