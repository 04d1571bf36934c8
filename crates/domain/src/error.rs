//! Domain error types

use thiserror::Error;

/// Structural errors found while parsing a test document.
///
/// Every variant carries the 1-based number of the line that triggered it.
/// A parse error aborts parsing of that document only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A request line appeared before any group heading, or the document
    /// has no group at all.
    #[error("{line}: missing group header")]
    MissingGroupHeader {
        /// Offending line.
        line: usize,
    },

    /// A code fence appeared outside of a request.
    #[error("{line}: unexpected codeblock")]
    UnexpectedCodeblock {
        /// Offending line.
        line: usize,
    },

    /// The input ended inside a code block.
    #[error("{line}: missing end codeblock")]
    MissingEndCodeblock {
        /// Last line read.
        line: usize,
    },

    /// A detail line appeared before any group heading.
    #[error("{line}: unexpected details")]
    UnexpectedDetails {
        /// Offending line.
        line: usize,
    },

    /// A query parameter line appeared outside the given phase of a request.
    #[error("{line}: unexpected params")]
    UnexpectedParams {
        /// Offending line.
        line: usize,
    },

    /// A detail line has no `:` or `=` separator.
    #[error("{line}: malformed detail")]
    MalformedDetail {
        /// Offending line.
        line: usize,
    },
}

impl ParseError {
    /// Returns the line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingGroupHeader { line }
            | Self::UnexpectedCodeblock { line }
            | Self::MissingEndCodeblock { line }
            | Self::UnexpectedDetails { line }
            | Self::UnexpectedParams { line }
            | Self::MalformedDetail { line } => *line,
        }
    }

    /// Returns the error description without the line number.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingGroupHeader { .. } => "missing group header",
            Self::UnexpectedCodeblock { .. } => "unexpected codeblock",
            Self::MissingEndCodeblock { .. } => "missing end codeblock",
            Self::UnexpectedDetails { .. } => "unexpected details",
            Self::UnexpectedParams { .. } => "unexpected params",
            Self::MalformedDetail { .. } => "malformed detail",
        }
    }
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
