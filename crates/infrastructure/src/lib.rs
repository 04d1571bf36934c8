//! Silk Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus test file discovery.

pub mod adapters;
pub mod discovery;

pub use adapters::{ConsoleLogSink, MemoryLogSink, ReqwestTransport, TokioDocumentSource};
pub use discovery::{DiscoveryError, discover};
