//! Adapters implementing the application ports.

mod file_source;
mod log_sink;
mod reqwest_transport;

pub use file_source::TokioDocumentSource;
pub use log_sink::{ConsoleLogSink, MemoryLogSink};
pub use reqwest_transport::ReqwestTransport;
