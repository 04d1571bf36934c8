//! Log sinks for runner diagnostics.

use std::sync::{Mutex, PoisonError};

use silk_application::ports::LogSink;

/// Prints every message on its own line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogSink;

impl LogSink for ConsoleLogSink {
    #[allow(clippy::print_stdout)]
    fn log(&self, message: &str) {
        println!("{message}");
    }
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message logged so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns all messages joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemoryLogSink::new();
        sink.log("--- FAIL: GET /a");
        sink.log("a.silk.md:4 - Status doesn't match");
        assert_eq!(sink.text(), "--- FAIL: GET /a\na.silk.md:4 - Status doesn't match");
    }
}
