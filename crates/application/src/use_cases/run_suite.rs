//! Run suite use case.

use silk_domain::{Failure, Group, RunReport, parse};
use tracing::{info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::DocumentSource;
use crate::runner::Runner;

/// Input for running a batch of documents.
#[derive(Debug, Clone, Default)]
pub struct RunSuiteInput {
    /// Document paths, run in order.
    pub paths: Vec<String>,
}

impl RunSuiteInput {
    /// Creates an input for the given paths.
    #[must_use]
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Use case for loading, parsing and running a batch of documents.
///
/// Every document is loaded and parsed independently. A document that
/// fails to load or parse is recorded as a file failure and the rest of
/// the batch still runs. All documents share the runner, so values
/// captured in one file are visible to the files after it.
pub struct RunSuite<S: DocumentSource> {
    source: S,
}

impl<S: DocumentSource> RunSuite<S> {
    /// Creates a new `RunSuite` use case.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Runs every document in order and aggregates the results.
    pub async fn execute(&self, runner: &mut Runner, input: RunSuiteInput) -> RunReport {
        let mut report = RunReport::new();

        for path in &input.paths {
            info!(file = %path, "running file");
            match self.load(path).await {
                Ok(groups) => report.merge(runner.run_groups(&groups).await),
                Err(e) => {
                    warn!(file = %path, error = %e, "skipping file");
                    let failure = file_failure(path, &e);
                    runner.log(&format!("--- FAIL: {path}"));
                    runner.log(&failure.to_string());
                    report.files.push(failure);
                }
            }
        }

        report
    }

    /// Loads and parses one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is malformed.
    pub async fn load(&self, path: &str) -> ApplicationResult<Vec<Group>> {
        let source = self.source.load(path).await?;
        Ok(parse(path, &source)?)
    }
}

fn file_failure(path: &str, error: &ApplicationError) -> Failure {
    Failure::new(path, error.line(), error.reason())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::{SourceError, Transport, TransportError};
    use crate::variable_resolver::VariableTable;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use silk_domain::{HttpRequest, HttpResponse};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct MemorySource(HashMap<String, String>);

    impl DocumentSource for MemorySource {
        async fn load(&self, path: &str) -> Result<String, SourceError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| SourceError::NotFound(path.to_string()))
        }
    }

    /// Echoes the request path back as the body with status 200.
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let path = request.url.trim_start_matches("http://localhost");
            Ok(HttpResponse::new(200, Vec::new(), path.as_bytes().to_vec()))
        }
    }

    fn suite(files: &[(&str, &str)]) -> RunSuite<MemorySource> {
        RunSuite::new(MemorySource(
            files
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ))
    }

    fn runner() -> Runner {
        Runner::new("http://localhost", Arc::new(EchoTransport)).with_variables(VariableTable::new())
    }

    #[tokio::test]
    async fn test_batch_reports_failing_file_and_line() {
        let suite = suite(&[
            ("pass.silk.md", "# Pass\n## GET /ok\n===\n* Status: 200\n"),
            ("fail.silk.md", "# Fail\n## GET /bad\n===\n* Status: 200\n* Body: /good/\n"),
        ]);
        let report = suite
            .execute(&mut runner(), RunSuiteInput::new(["pass.silk.md", "fail.silk.md"]))
            .await;

        assert!(!report.passed());
        assert_eq!(report.requests.len(), 2);
        assert!(report.requests[0].passed());
        assert_eq!(report.requests[0].file, "pass.silk.md");
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].to_string(), "fail.silk.md:5 - Body doesn't match");
    }

    #[tokio::test]
    async fn test_parse_error_does_not_stop_batch() {
        let suite = suite(&[
            ("broken.silk.md", "intro\n* Key: value\n"),
            ("ok.silk.md", "# Ok\n## GET /ok\n"),
        ]);
        let report = suite
            .execute(
                &mut runner(),
                RunSuiteInput::new(["broken.silk.md", "missing.silk.md", "ok.silk.md"]),
            )
            .await;

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].to_string(), "broken.silk.md:2 - unexpected details");
        assert_eq!(
            report.files[1].to_string(),
            "missing.silk.md:0 - not found: missing.silk.md"
        );
        assert_eq!(report.requests.len(), 1);
        assert!(report.requests[0].passed());
    }

    #[tokio::test]
    async fn test_captures_cross_files() {
        let suite = suite(&[
            ("one.silk.md", "# One\n## GET /first\n===\n* Body: /.+/ // {path}\n"),
            ("two.silk.md", "# Two\n## GET {path}/again\n===\n* Body: /first/again/\n"),
        ]);
        let report = suite
            .execute(&mut runner(), RunSuiteInput::new(["one.silk.md", "two.silk.md"]))
            .await;
        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());
    }
}
