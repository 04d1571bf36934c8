//! Application error types

use silk_domain::ParseError;
use thiserror::Error;

use crate::ports::SourceError;

/// Errors that stop a document from running at all.
///
/// Failures while running a request are never errors; they are recorded
/// in the run report instead.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A document could not be loaded.
    #[error("{0}")]
    Source(#[from] SourceError),
}

impl ApplicationError {
    /// Returns the document line the error refers to, or 0 when the
    /// document could not be read at all.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Source(_) => 0,
        }
    }

    /// Returns the description used in file failures.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Parse(e) => e.reason().to_string(),
            Self::Source(e) => e.to_string(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
