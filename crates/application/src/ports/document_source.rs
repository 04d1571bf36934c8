//! Document source port

use std::future::Future;

use thiserror::Error;

/// A test document could not be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The document could not be read.
    #[error("cannot read file: {0}")]
    Io(String),
}

/// Port for loading test documents by path.
pub trait DocumentSource: Send + Sync {
    /// Loads the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is missing or unreadable.
    fn load(&self, path: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}
