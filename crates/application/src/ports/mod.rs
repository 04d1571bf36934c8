//! Port definitions (interfaces)
//!
//! Ports are the capabilities the runner is constructed with. Each one
//! can be replaced by the caller, e.g. an insecure-TLS transport or an
//! in-memory double in tests.

mod body_decoder;
mod document_source;
mod log_sink;
mod request_builder;
mod transport;

pub use body_decoder::{BodyDecoder, DecodeError, JsonBodyDecoder};
pub use document_source::{DocumentSource, SourceError};
pub use log_sink::{LogSink, TracingLogSink};
pub use request_builder::{RequestBuilder, RequestError, StandardRequestBuilder};
pub use transport::{Transport, TransportError};
