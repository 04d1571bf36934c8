//! Test file discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name pattern used when a directory is given.
pub const DEFAULT_PATTERN: &str = "*.silk.md";

/// Errors raised while looking for test files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The glob pattern is malformed.
    #[error("invalid pattern {pattern}: {source}")]
    Pattern {
        /// Pattern as given.
        pattern: String,
        /// Underlying error.
        source: glob::PatternError,
    },

    /// A matched entry could not be read.
    #[error("cannot read {0}")]
    Glob(#[from] glob::GlobError),

    /// Nothing matched.
    #[error("no files match {0}")]
    NoFiles(String),
}

/// Expands a path argument into the sorted list of files to run.
///
/// A directory expands to the `*.silk.md` files directly inside it.
/// Anything else is used as a glob pattern, so a plain file path matches
/// itself.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or matches nothing.
pub fn discover(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, DiscoveryError> {
    let path = path.as_ref();
    let pattern = if path.is_dir() {
        path.join(DEFAULT_PATTERN)
    } else {
        path.to_path_buf()
    };
    let pattern = pattern.to_string_lossy().into_owned();

    let entries = glob::glob(&pattern).map_err(|source| DiscoveryError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = entries
        .filter(|entry| entry.as_ref().map_or(true, |p| p.is_file()))
        .collect::<Result<Vec<_>, _>>()?;
    files.sort();

    if files.is_empty() {
        return Err(DiscoveryError::NoFiles(pattern));
    }
    tracing::debug!(pattern = %pattern, count = files.len(), "discovered files");
    Ok(files)
}
