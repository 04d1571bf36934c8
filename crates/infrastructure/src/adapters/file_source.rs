//! Document source backed by the real file system.

use std::io::ErrorKind;

use silk_application::ports::{DocumentSource, SourceError};
use tokio::fs;

/// Reads documents with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDocumentSource;

impl TokioDocumentSource {
    /// Creates a new `TokioDocumentSource`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentSource for TokioDocumentSource {
    async fn load(&self, path: &str) -> Result<String, SourceError> {
        fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::NotFound(path.to_string())
            } else {
                SourceError::Io(format!("{path}: {e}"))
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.silk.md");
        std::fs::write(&path, "# Group\n").unwrap();

        let text = TokioDocumentSource::new()
            .load(&path.display().to_string())
            .await
            .unwrap();
        assert_eq!(text, "# Group\n");
    }

    #[tokio::test]
    async fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.silk.md").display().to_string();
        let err = TokioDocumentSource::new().load(&path).await.unwrap_err();
        assert_eq!(err, SourceError::NotFound(path));
    }
}
