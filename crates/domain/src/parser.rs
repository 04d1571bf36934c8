//! Document parser.
//!
//! A single pass over classified lines drives a small state machine:
//! no group yet, or inside a group in either the given or the expect phase
//! of the current request.

use crate::document::{CodeBlock, Group, Request};
use crate::error::{ParseError, ParseResult};
use crate::line::{Line, LineKind};

const FENCE: &str = "```";

/// Which half of a request subsequent lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    /// Request headers, params and body.
    #[default]
    Given,
    /// Expected response details and body.
    Expect,
}

#[derive(Debug, Default)]
struct DocumentParser {
    filename: String,
    groups: Vec<Group>,
    group: Option<Group>,
    request: Option<Request>,
    phase: Phase,
}

/// Parses a test document into its groups.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the offending line number on any
/// structural violation, or if the document contains no group.
pub fn parse(filename: &str, source: &str) -> ParseResult<Vec<Group>> {
    let mut parser = DocumentParser {
        filename: filename.to_string(),
        ..DocumentParser::default()
    };
    let mut raw_lines = source.lines().enumerate().map(|(i, raw)| (i + 1, raw));
    let mut last = 0;

    while let Some((n, raw)) = raw_lines.next() {
        last = n;
        let line = Line::classify(n, raw)?;
        match line.kind() {
            LineKind::Heading { title } => parser.start_group(title),
            LineKind::Request { method, path } => parser.start_request(n, method, path)?,
            LineKind::CodeBlock { tag } => {
                if parser.request.is_none() {
                    return Err(ParseError::UnexpectedCodeblock { line: n });
                }
                let block = scan_code_block(tag, &mut raw_lines, &mut last)?;
                parser.set_body(block);
            }
            LineKind::Detail(_) => parser.add_detail(line)?,
            LineKind::Param(_) => parser.add_param(line)?,
            LineKind::Separator => parser.phase = Phase::Expect,
            LineKind::Plain => {}
        }
    }

    parser.finish(last)
}

fn scan_code_block<'a>(
    tag: &str,
    raw_lines: &mut impl Iterator<Item = (usize, &'a str)>,
    last: &mut usize,
) -> ParseResult<CodeBlock> {
    let mut block = CodeBlock {
        tag: tag.to_string(),
        lines: Vec::new(),
    };
    for (n, raw) in raw_lines.by_ref() {
        *last = n;
        if raw.starts_with(FENCE) {
            return Ok(block);
        }
        block.lines.push(Line::plain(n, raw));
    }
    Err(ParseError::MissingEndCodeblock { line: *last })
}

impl DocumentParser {
    fn flush_request(&mut self) {
        if let (Some(group), Some(request)) = (self.group.as_mut(), self.request.take()) {
            group.requests.push(request);
        }
    }

    fn flush_group(&mut self) {
        self.flush_request();
        if let Some(group) = self.group.take() {
            self.groups.push(group);
        }
    }

    fn start_group(&mut self, title: &str) {
        self.flush_group();
        self.group = Some(Group::new(self.filename.clone(), title));
        self.phase = Phase::Given;
    }

    fn start_request(&mut self, n: usize, method: &str, path: &str) -> ParseResult<()> {
        if self.group.is_none() {
            return Err(ParseError::MissingGroupHeader { line: n });
        }
        self.flush_request();
        self.request = Some(Request::new(n, method, path));
        self.phase = Phase::Given;
        Ok(())
    }

    fn set_body(&mut self, block: CodeBlock) {
        let Some(request) = self.request.as_mut() else {
            return;
        };
        match self.phase {
            Phase::Given => request.body = Some(block),
            Phase::Expect => request.expected_body = Some(block),
        }
    }

    fn add_detail(&mut self, line: Line) -> ParseResult<()> {
        match (self.request.as_mut(), self.group.as_mut()) {
            (Some(request), _) => match self.phase {
                Phase::Given => request.details.push(line),
                Phase::Expect => request.expected_details.push(line),
            },
            (None, Some(group)) => group.details.push(line),
            (None, None) => {
                return Err(ParseError::UnexpectedDetails {
                    line: line.number(),
                });
            }
        }
        Ok(())
    }

    fn add_param(&mut self, line: Line) -> ParseResult<()> {
        match self.request.as_mut() {
            Some(request) if self.phase == Phase::Given => {
                request.params.push(line);
                Ok(())
            }
            _ => Err(ParseError::UnexpectedParams {
                line: line.number(),
            }),
        }
    }

    fn finish(mut self, last: usize) -> ParseResult<Vec<Group>> {
        if self.group.is_none() {
            return Err(ParseError::MissingGroupHeader { line: last });
        }
        self.flush_group();
        Ok(self.groups)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const COMMENTS: &str = r#"# Comments and things

Comments are ignored.

* Root: http://localhost:8080/

## POST /comments

Create a comment.

* Content-Type: application/json // comment after detail

```json
{
  "name":    "Mat",
  "comment": "Good work"
}
```

===

* Status: 201

```json
{
  "id":      "123",
  "name":    "Mat",
  "comment": "Good work"
}
```

## GET /comments/{id}

===

* Status: 200
* Content-Type: application/json

```
{"id": "123"}
```

# Another group

## GET /again

---
"#;

    #[test]
    fn test_parse_groups_and_requests() {
        let groups = parse("comments.silk.md", COMMENTS).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].filename, "comments.silk.md");
        assert_eq!(groups[0].title, "Comments and things");
        assert_eq!(groups[1].title, "Another group");

        let group = &groups[0];
        assert_eq!(group.requests.len(), 2);
        let defaults: Vec<_> = group.defaults().collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].key, "Root");
        assert_eq!(defaults[0].value, Value::Raw("http://localhost:8080/".into()));

        let req1 = &group.requests[0];
        assert_eq!(req1.method, "POST");
        assert_eq!(req1.path, "/comments");
        assert_eq!(req1.line, 7);
        let headers: Vec<_> = req1.headers().collect();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].key, "Content-Type");
        assert_eq!(headers[0].value, Value::Raw("application/json".into()));
        let body = req1.body.as_ref().unwrap();
        assert_eq!(body.tag, "json");
        assert_eq!(
            body.text(),
            "{\n  \"name\":    \"Mat\",\n  \"comment\": \"Good work\"\n}"
        );
        let status = req1.expected_details[0].detail().unwrap();
        assert_eq!(status.key, "Status");
        assert_eq!(status.value, Value::Json(json!(201)));
        assert_eq!(req1.expected_body.as_ref().unwrap().number(), 25);

        let req2 = &group.requests[1];
        assert_eq!(req2.method, "GET");
        assert_eq!(req2.path, "/comments/{id}");
        assert!(req2.body.is_none());
        assert_eq!(req2.expected_details.len(), 2);
        let expected = req2.expected_body.as_ref().unwrap();
        assert_eq!(expected.tag, "");
        assert_eq!(expected.text(), r#"{"id": "123"}"#);

        assert_eq!(groups[1].requests.len(), 1);
        assert_eq!(groups[1].requests[0].path, "/again");
    }

    #[test]
    fn test_request_before_group() {
        let err = parse("x.md", "intro\n## GET /nope\n").unwrap_err();
        assert_eq!(err, ParseError::MissingGroupHeader { line: 2 });
    }

    #[test]
    fn test_missing_group() {
        let err = parse("x.md", "just text\nmore text\n").unwrap_err();
        assert_eq!(err, ParseError::MissingGroupHeader { line: 2 });
    }

    #[test]
    fn test_params_in_expect_phase() {
        let src = "# G\n## GET /a\n* ?q=1\n===\n* ?q=2\n";
        let err = parse("x.md", src).unwrap_err();
        assert_eq!(err, ParseError::UnexpectedParams { line: 5 });
    }

    #[test]
    fn test_params_without_request() {
        let err = parse("x.md", "# G\n* ?q=1\n").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedParams { line: 2 });
    }

    #[test]
    fn test_codeblock_without_request() {
        let err = parse("x.md", "# G\n```\nbody\n```\n").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedCodeblock { line: 2 });
    }

    #[test]
    fn test_unterminated_codeblock() {
        let err = parse("x.md", "# G\n## GET /a\n```\nbody\nmore\n").unwrap_err();
        assert_eq!(err, ParseError::MissingEndCodeblock { line: 5 });
    }

    #[test]
    fn test_detail_before_group() {
        let err = parse("x.md", "* Key: value\n# G\n").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedDetails { line: 1 });
    }

    #[test]
    fn test_codeblock_content_is_verbatim() {
        let src = "# G\n## POST /a\n```\n* Not: a detail // nor a comment\n## GET /no\n```\n";
        let groups = parse("x.md", src).unwrap();
        let request = &groups[0].requests[0];
        assert_eq!(
            request.body.as_ref().unwrap().text(),
            "* Not: a detail // nor a comment\n## GET /no"
        );
        assert!(request.details.is_empty());
        assert_eq!(groups[0].requests.len(), 1);
    }

    #[test]
    fn test_second_separator_is_idempotent() {
        let src = "# G\n## GET /a\n* X-Given: 1\n---\n* Status: 200\n===\n* X-Expect: 2\n";
        let groups = parse("x.md", src).unwrap();
        let request = &groups[0].requests[0];
        assert_eq!(request.details.len(), 1);
        assert_eq!(request.expected_details.len(), 2);
    }

    #[test]
    fn test_new_request_resets_phase() {
        let src = "# G\n## GET /a\n===\n* Status: 200\n## GET /b\n* ?q=1\n";
        let groups = parse("x.md", src).unwrap();
        let second = &groups[0].requests[1];
        assert_eq!(second.params.len(), 1);
        assert!(second.expected_details.is_empty());
    }
}
