//! Log sink port

/// Port receiving the runner's human-readable diagnostics.
pub trait LogSink: Send + Sync {
    /// Writes one message.
    fn log(&self, message: &str);
}

/// Forwards every message to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "silk", "{message}");
    }
}
