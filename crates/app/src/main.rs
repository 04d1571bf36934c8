//! Silk - Main Entry Point
//!
//! Parses the command line, discovers test files and runs them in order
//! against the target URL.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use silk_application::ports::{LogSink, TracingLogSink};
use silk_application::{RunSuite, RunSuiteInput, Runner};
use silk_domain::RunReport;
use silk_infrastructure::{ConsoleLogSink, ReqwestTransport, TokioDocumentSource, discover};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::{Cli, Format, Settings};

const EXIT_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match Settings::try_from(cli) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match run(&settings).await {
        Ok(report) => {
            render(&report, settings.format);
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILED)
            }
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "silk=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn run(settings: &Settings) -> Result<RunReport, Box<dyn std::error::Error>> {
    let files = discover(&settings.path)?;
    info!("running {} file(s)", files.len());

    let mut transport = if settings.insecure {
        ReqwestTransport::insecure()?
    } else {
        ReqwestTransport::new()?
    };
    if let Some(timeout) = settings.timeout {
        transport = transport.with_timeout(timeout)?;
    }

    let log: Arc<dyn LogSink> = match settings.format {
        Format::Text => Arc::new(ConsoleLogSink),
        Format::Json => Arc::new(TracingLogSink),
    };
    let mut runner = Runner::new(settings.url.as_str(), Arc::new(transport)).with_log_sink(log);

    let input = RunSuiteInput::new(files.iter().map(|p| p.display().to_string()));
    let suite = RunSuite::new(TokioDocumentSource::new());
    Ok(suite.execute(&mut runner, input).await)
}

#[allow(clippy::print_stdout)]
fn render(report: &RunReport, format: Format) {
    match format {
        Format::Text => println!("{}", render_text(report)),
        Format::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("cannot render report: {e}"),
        },
    }
}

/// Lists passing requests and ends with a summary line. Failing requests
/// were already written to the log sink as they ran.
fn render_text(report: &RunReport) -> String {
    let mut lines: Vec<String> = report
        .requests
        .iter()
        .filter(|outcome| outcome.passed())
        .map(ToString::to_string)
        .collect();

    let total = report.requests.len();
    if report.passed() {
        lines.push(format!("PASS  {total} request(s)"));
    } else {
        lines.push(format!(
            "FAIL  {}/{total} request(s) passed, {} file(s) failed to load",
            report.passed_count(),
            report.files.len()
        ));
    }
    lines.join("\n")
}
