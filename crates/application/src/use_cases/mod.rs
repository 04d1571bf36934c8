//! Application use cases (business logic orchestration).

mod run_suite;

pub use run_suite::*;
