//! Line classification.
//!
//! Each raw line of a test document is tagged with a structural type by
//! trying a fixed table of patterns in priority order. The first matching
//! rule wins, so `## GET /path` is a request and never a heading.

use std::sync::LazyLock;

use regex::Regex;

use crate::detail::{Detail, clean};
use crate::error::{ParseError, ParseResult};

const COMMENT_MARKER: &str = " //";

/// Structural type of a line, with the data extracted by its rule.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Anything no rule matched.
    Plain,
    /// `# Title`
    Heading {
        /// Group title.
        title: String,
    },
    /// `## METHOD /path`
    Request {
        /// HTTP method as written.
        method: String,
        /// Request path as written (may contain `{name}` placeholders).
        path: String,
    },
    /// A code fence, optionally tagged: ```` ```json ````
    CodeBlock {
        /// Content-type tag following the fence; empty if none.
        tag: String,
    },
    /// `===` or `---` (three or more).
    Separator,
    /// `* Key: value`
    Detail(Detail),
    /// `* ?key=value`
    Param(Detail),
}

impl LineKind {
    /// Returns the name of the line type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Heading { .. } => "heading",
            Self::Request { .. } => "request",
            Self::CodeBlock { .. } => "codeblock",
            Self::Separator => "separator",
            Self::Detail(_) => "detail",
            Self::Param(_) => "param",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Request,
    Heading,
    CodeBlock,
    Separator,
    TickedParam,
    Param,
    Detail,
}

/// Ordered rule table. Precedence is significant.
static RULES: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    [
        (Rule::Request, r"^## (\S+) (.+)$"),
        (Rule::Heading, r"^# (.+)$"),
        (Rule::CodeBlock, r"^```(.*)$"),
        (Rule::Separator, r"^(?:={3,}|-{3,})"),
        (Rule::TickedParam, r"^\s*\* `\?(.+)`\s*$"),
        (Rule::Param, r"^\s*\* \?(.+)$"),
        (Rule::Detail, r"^\s*\* (.+)$"),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, compile(pattern)))
    .collect()
});

static CAPTURE: LazyLock<Regex> = LazyLock::new(|| compile(r"\{([^{}\s]+)\}"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line rule patterns are valid")
}

/// A single classified line. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: usize,
    kind: LineKind,
    text: String,
    comment: Option<String>,
}

impl Line {
    /// Classifies one raw line.
    ///
    /// A trailing ` // comment` is removed from the line's text before
    /// classification and kept separately.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedDetail`] if a detail or param line has
    /// no `:`/`=` separator.
    pub fn classify(number: usize, raw: &str) -> ParseResult<Self> {
        let (text, comment) = match raw.find(COMMENT_MARKER) {
            Some(at) => (
                &raw[..at],
                Some(raw[at + COMMENT_MARKER.len()..].trim().to_string()),
            ),
            None => (raw, None),
        };

        let kind = Self::match_kind(number, text)?;

        Ok(Self {
            number,
            kind,
            text: text.to_string(),
            comment,
        })
    }

    /// Creates a plain line without classification. Used for code block contents.
    #[must_use]
    pub fn plain(number: usize, raw: &str) -> Self {
        Self {
            number,
            kind: LineKind::Plain,
            text: raw.to_string(),
            comment: None,
        }
    }

    fn match_kind(number: usize, text: &str) -> ParseResult<LineKind> {
        for (rule, regex) in RULES.iter() {
            let Some(caps) = regex.captures(text) else {
                continue;
            };
            let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            let detail = |body: &str| {
                Detail::parse(body).ok_or(ParseError::MalformedDetail { line: number })
            };
            return Ok(match rule {
                Rule::Request => LineKind::Request {
                    method: clean(group(1)).to_string(),
                    path: clean(group(2)).to_string(),
                },
                Rule::Heading => LineKind::Heading {
                    title: clean(group(1)).to_string(),
                },
                Rule::CodeBlock => LineKind::CodeBlock {
                    tag: group(1).trim().to_string(),
                },
                Rule::Separator => LineKind::Separator,
                Rule::TickedParam | Rule::Param => LineKind::Param(detail(group(1))?),
                Rule::Detail => LineKind::Detail(detail(group(1))?),
            });
        }
        Ok(LineKind::Plain)
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Returns the structural type.
    #[must_use]
    pub const fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Returns the name of the structural type, e.g. `"detail"`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns the line text with any trailing comment removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the trailing comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the parsed detail of a detail or param line.
    #[must_use]
    pub const fn detail(&self) -> Option<&Detail> {
        match &self.kind {
            LineKind::Detail(detail) | LineKind::Param(detail) => Some(detail),
            _ => None,
        }
    }

    /// Returns the variable name to capture into, from a `{name}` token in
    /// the trailing comment.
    #[must_use]
    pub fn capture(&self) -> Option<&str> {
        let comment = self.comment.as_deref()?;
        CAPTURE
            .captures(comment)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ({}) {}", self.number, self.type_name(), self.text)
    }
}

/// Joins the text of lines with `\n`.
#[must_use]
pub fn join(lines: &[Line]) -> String {
    lines.iter().map(Line::text).collect::<Vec<_>>().join("\n")
}
