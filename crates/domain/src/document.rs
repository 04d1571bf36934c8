//! Parsed test documents: groups of requests.

use crate::detail::Detail;
use crate::line::{Line, join};

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    /// Content-type tag from the opening fence, e.g. `json` or `json(exact)`.
    pub tag: String,
    /// Lines between the fences, verbatim.
    pub lines: Vec<Line>,
}

impl CodeBlock {
    /// Returns the block content joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        join(&self.lines)
    }

    /// Returns true if the block has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of the first content line, or 0 if empty.
    #[must_use]
    pub fn number(&self) -> usize {
        self.lines.first().map_or(0, Line::number)
    }

    /// Returns true if the tag declares JSON content.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.tag.starts_with("json")
    }

    /// Returns true if the tag requests exact JSON comparison.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.tag.contains("exact")
    }
}

/// One HTTP call and its expectations.
///
/// Never mutated after parsing completes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    /// Line of the `## METHOD /path` header.
    pub line: usize,
    /// HTTP method as written.
    pub method: String,
    /// Path as written.
    pub path: String,
    /// Header lines of the given phase.
    pub details: Vec<Line>,
    /// Query parameter lines of the given phase.
    pub params: Vec<Line>,
    /// Request body, if any.
    pub body: Option<CodeBlock>,
    /// Expected response body, if any.
    pub expected_body: Option<CodeBlock>,
    /// Assertion lines of the expect phase.
    pub expected_details: Vec<Line>,
}

impl Request {
    /// Creates an empty request.
    #[must_use]
    pub fn new(line: usize, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            line,
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Iterates the parsed header details of the given phase.
    pub fn headers(&self) -> impl Iterator<Item = &Detail> {
        self.details.iter().filter_map(Line::detail)
    }

    /// Iterates the parsed query parameters.
    pub fn query(&self) -> impl Iterator<Item = &Detail> {
        self.params.iter().filter_map(Line::detail)
    }
}

/// A titled section of a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Name of the file the group came from.
    pub filename: String,
    /// Heading text.
    pub title: String,
    /// Requests in file order.
    pub requests: Vec<Request>,
    /// Details shared by all requests of the group.
    pub details: Vec<Line>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new(filename: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Iterates the parsed group-level details.
    pub fn defaults(&self) -> impl Iterator<Item = &Detail> {
        self.details.iter().filter_map(Line::detail)
    }
}
