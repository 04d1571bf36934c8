//! Run results.

use std::fmt;

use serde::Serialize;

/// Why a request or file failed, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// File the failing line belongs to.
    pub file: String,
    /// Line of the failing assertion (or of the request header for runtime errors).
    pub line: usize,
    /// Short description, e.g. `Status doesn't match`.
    pub message: String,
}

impl Failure {
    /// Creates a failure.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - {}", self.file, self.line, self.message)
    }
}

/// The result of executing one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOutcome {
    /// File the request came from.
    pub file: String,
    /// Title of the owning group.
    pub group: String,
    /// Method as written.
    pub method: String,
    /// Path as written.
    pub path: String,
    /// Line of the request header.
    pub line: usize,
    /// Set if the request failed.
    pub failure: Option<Failure>,
}

impl RequestOutcome {
    /// Returns true if the request passed every assertion.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "--- PASS: {} {}", self.method, self.path),
            Some(failure) => write!(f, "--- FAIL: {} {}\n {failure}", self.method, self.path),
        }
    }
}

/// Aggregated results of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    /// One entry per executed request, in execution order.
    pub requests: Vec<RequestOutcome>,
    /// Files that could not be loaded or parsed.
    pub files: Vec<Failure>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files.is_empty() && self.requests.iter().all(RequestOutcome::passed)
    }

    /// Iterates every failure: file-level first, then per request.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.files
            .iter()
            .chain(self.requests.iter().filter_map(|r| r.failure.as_ref()))
    }

    /// Returns the number of requests that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.requests.iter().filter(|r| r.passed()).count()
    }

    /// Appends the results of another report.
    pub fn merge(&mut self, other: Self) {
        self.requests.extend(other.requests);
        self.files.extend(other.files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(failure: Option<Failure>) -> RequestOutcome {
        RequestOutcome {
            file: "a.silk.md".into(),
            group: "G".into(),
            method: "GET".into(),
            path: "/echo".into(),
            line: 3,
            failure,
        }
    }

    #[test]
    fn test_report_is_or_of_failures() {
        let mut report = RunReport::new();
        report.requests.push(outcome(None));
        assert!(report.passed());

        report
            .requests
            .push(outcome(Some(Failure::new("a.silk.md", 9, "Status doesn't match"))));
        assert!(!report.passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_file_failures_fail_the_run() {
        let mut report = RunReport::new();
        report.files.push(Failure::new("b.silk.md", 2, "missing group header"));
        assert!(!report.passed());
    }

    #[test]
    fn test_display() {
        assert_eq!(outcome(None).to_string(), "--- PASS: GET /echo");
        let failed = outcome(Some(Failure::new("a.silk.md", 9, "Status doesn't match")));
        assert_eq!(
            failed.to_string(),
            "--- FAIL: GET /echo\n a.silk.md:9 - Status doesn't match"
        );
    }
}
