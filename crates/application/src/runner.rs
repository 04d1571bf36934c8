//! Execution engine.
//!
//! Walks parsed groups and requests strictly in order, substitutes
//! variables, sends each request through the injected [`Transport`] and
//! checks the response against the expected body and details.

use std::cell::OnceCell;
use std::sync::Arc;

use serde_json::Value as Json;
use silk_domain::response::canonical_header_key;
use silk_domain::{
    CodeBlock, Failure, Group, HttpRequest, HttpResponse, Request, RequestOutcome,
    ResponseDetails, RunReport, Value,
};
use tracing::{debug, info};

use crate::assertion::diff::{render_mismatch, render_missing, render_unavailable};
use crate::assertion::{check_exact, check_subset, is_data_key, lookup};
use crate::ports::{
    BodyDecoder, JsonBodyDecoder, LogSink, RequestBuilder, StandardRequestBuilder, Transport,
    TracingLogSink,
};
use crate::variable_resolver::VariableTable;

/// A request failure before it is attached to a file.
#[derive(Debug)]
struct Rejection {
    line: usize,
    message: String,
    notes: Vec<String>,
}

impl Rejection {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn mismatch(line: usize, key: &str) -> Self {
        Self::new(line, format!("{key} doesn't match"))
    }
}

/// Runs requests against a target root URL.
///
/// A runner owns the variable table for one run. Captured values stay
/// available to every later request it executes, across groups and files.
/// Runs are sequential; one runner must not be shared between runs.
pub struct Runner {
    root_url: String,
    variables: VariableTable,
    transport: Arc<dyn Transport>,
    request_builder: Arc<dyn RequestBuilder>,
    body_decoder: Arc<dyn BodyDecoder>,
    log: Arc<dyn LogSink>,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("root_url", &self.root_url)
            .field("variables", &self.variables.len())
            .finish_non_exhaustive()
    }
}

impl Runner {
    /// Creates a runner with the variable table seeded from the process
    /// environment, the standard request builder, the JSON body decoder
    /// and the tracing log sink.
    #[must_use]
    pub fn new(root_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            root_url: root_url.into(),
            variables: VariableTable::from_env(),
            transport,
            request_builder: Arc::new(StandardRequestBuilder),
            body_decoder: Arc::new(JsonBodyDecoder),
            log: Arc::new(TracingLogSink),
        }
    }

    /// Replaces the variable table.
    #[must_use]
    pub fn with_variables(mut self, variables: VariableTable) -> Self {
        self.variables = variables;
        self
    }

    /// Replaces the request builder.
    #[must_use]
    pub fn with_request_builder(mut self, builder: Arc<dyn RequestBuilder>) -> Self {
        self.request_builder = builder;
        self
    }

    /// Replaces the body decoder used for `Data` assertions.
    #[must_use]
    pub fn with_body_decoder(mut self, decoder: Arc<dyn BodyDecoder>) -> Self {
        self.body_decoder = decoder;
        self
    }

    /// Replaces the log sink.
    #[must_use]
    pub fn with_log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    /// Returns the target root URL.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Returns the current variable table.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Writes one diagnostic line to the log sink.
    pub fn log(&self, message: &str) {
        self.log.log(message);
    }

    /// Runs every request of every group, in order.
    pub async fn run_groups(&mut self, groups: &[Group]) -> RunReport {
        let mut report = RunReport::new();
        for group in groups {
            info!(file = %group.filename, group = %group.title, requests = group.requests.len(), "running group");
            for request in &group.requests {
                let outcome = self.run_request(group, request).await;
                report.requests.push(outcome);
            }
        }
        report
    }

    /// Runs one request and reports its outcome.
    ///
    /// Failures are logged and recorded; they never abort the run.
    pub async fn run_request(&mut self, group: &Group, request: &Request) -> RequestOutcome {
        let failure = match self.execute(group, request).await {
            Ok(()) => {
                debug!(method = %request.method, path = %request.path, "request passed");
                None
            }
            Err(rejection) => {
                let failure = Failure::new(&group.filename, rejection.line, rejection.message);
                self.log(&format!("--- FAIL: {} {}", request.method, request.path));
                self.log(&failure.to_string());
                for note in &rejection.notes {
                    self.log(note);
                }
                Some(failure)
            }
        };

        RequestOutcome {
            file: group.filename.clone(),
            group: group.title.clone(),
            method: request.method.clone(),
            path: request.path.clone(),
            line: request.line,
            failure,
        }
    }

    async fn execute(&mut self, group: &Group, request: &Request) -> Result<(), Rejection> {
        let outbound = self.build_request(group, request)?;
        debug!(
            method = %outbound.method,
            url = %outbound.url,
            headers = ?outbound.headers,
            query = ?outbound.query,
            body = outbound.body.as_deref().unwrap_or_default(),
            "sending request"
        );

        let response = self
            .transport
            .send(&outbound)
            .await
            .map_err(|e| Rejection::new(request.line, format!("request failed: {e}")))?;
        debug!(status = response.status, body = %response.body_text(), "received response");

        if let Some(expected) = request.expected_body.as_ref().filter(|b| !b.is_empty()) {
            self.assert_body(expected, &response)?;
        }

        self.assert_details(request, &response)
    }

    fn build_request(&self, group: &Group, request: &Request) -> Result<HttpRequest, Rejection> {
        let method = self.variables.resolve(&request.method);
        let path = self.variables.resolve(&request.path);
        let url = join_url(&self.root_url, &path);
        let body = request.body.as_ref().map(|b| self.variables.resolve(&b.text()));

        let mut outbound = self
            .request_builder
            .build(&method, &url, body)
            .map_err(|e| Rejection::new(request.line, format!("invalid request: {e}")))?;

        let overridden = |key: &str| request.headers().any(|d| d.key.eq_ignore_ascii_case(key));
        for detail in group.defaults().filter(|d| !overridden(&d.key)).chain(request.headers()) {
            let resolved = self.variables.resolve(&detail.value.to_plain_string());
            debug!(key = %detail.key, value = %silk_domain::Value::parse(&resolved), "header");
            outbound.add_header(&detail.key, resolved);
        }
        for param in request.query() {
            outbound.add_query(
                self.variables.resolve(&param.key),
                self.variables.resolve(&param.value.to_plain_string()),
            );
        }

        Ok(outbound)
    }

    fn assert_body(&self, expected: &CodeBlock, response: &HttpResponse) -> Result<(), Rejection> {
        let expected_text = self.variables.resolve(&expected.text());
        let actual_text = response.body_text();

        let result = if expected.is_json() {
            compare_json(&expected_text, &response.body, expected.is_exact())
        } else if expected_text.as_bytes() == response.body.as_slice() {
            Ok(())
        } else {
            Err(String::new())
        };

        result.map_err(|reason| {
            let rejection = Rejection::new(expected.number(), "body doesn't match");
            let rejection = if reason.is_empty() {
                rejection
            } else {
                rejection.note(reason)
            };
            rejection
                .note(format!("body expected:\n```\n{expected_text}\n```"))
                .note(format!("actual:\n```\n{actual_text}\n```"))
        })
    }

    fn assert_details(&mut self, request: &Request, response: &HttpResponse) -> Result<(), Rejection> {
        let details = ResponseDetails::from_response(response);
        let data: OnceCell<Result<Json, String>> = OnceCell::new();

        for line in &request.expected_details {
            let Some(detail) = line.detail() else {
                continue;
            };
            let key = detail.key.as_str();
            let expected = self.expected_value(&detail.value);

            let actual = if is_data_key(key) {
                match data.get_or_init(|| self.decode_data(&response.body)) {
                    Ok(decoded) => lookup(decoded, key).cloned(),
                    Err(reason) => {
                        return Err(Rejection::mismatch(line.number(), key)
                            .note(render_unavailable(key, &expected, reason)));
                    }
                }
            } else {
                details.get(&canonical_header_key(key)).cloned()
            };

            match actual {
                None if expected.is_null() => {}
                None => {
                    return Err(Rejection::mismatch(line.number(), key)
                        .note(render_missing(key, &expected)));
                }
                Some(actual) => {
                    if !expected.equal(&actual) {
                        return Err(Rejection::mismatch(line.number(), key)
                            .note(render_mismatch(key, &expected, &actual)));
                    }
                    if let Some(name) = line.capture() {
                        debug!(name, value = %actual, "captured");
                        self.variables.set(name, Value::from(actual));
                    }
                }
            }
        }

        Ok(())
    }

    /// Substitutes variables into plain expected strings. Regexes and
    /// non-string values are used as written.
    fn expected_value(&self, value: &Value) -> Value {
        if value.is_regex() {
            return value.clone();
        }
        match value {
            Value::Raw(s) => Value::Raw(self.variables.resolve(s)),
            Value::Json(Json::String(s)) => Value::Json(Json::String(self.variables.resolve(s))),
            Value::Json(_) => value.clone(),
        }
    }

    fn decode_data(&self, body: &[u8]) -> Result<Json, String> {
        match self.body_decoder.decode(body) {
            Ok(Json::Null) => Err("no data".to_string()),
            Ok(decoded) => Ok(decoded),
            Err(e) => Err(format!("failed to parse body: {e}")),
        }
    }
}

fn compare_json(expected: &str, actual: &[u8], exact: bool) -> Result<(), String> {
    let expected: Json =
        serde_json::from_str(expected).map_err(|e| format!("expected body is not JSON: {e}"))?;
    let actual: Json =
        serde_json::from_slice(actual).map_err(|e| format!("failed to parse body: {e}"))?;
    if exact {
        check_exact(&expected, &actual)
    } else {
        check_subset(&expected, &actual)
    }
}

/// Joins the root URL and a resolved path without doubling the slash.
fn join_url(root: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{path}", root.trim_end_matches('/'))
    } else {
        format!("{root}{path}")
    }
}
