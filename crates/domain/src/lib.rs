//! Silk Domain - Core types for markdown HTTP tests
//!
//! This crate defines the document model (groups, requests, lines,
//! details, values) and the pure algorithms that build it: the line
//! classifier, the value parser and the document parser.
//! Nothing here performs I/O.

pub mod detail;
pub mod document;
pub mod error;
pub mod http;
pub mod line;
pub mod parser;
pub mod report;
pub mod response;
pub mod value;

pub use detail::Detail;
pub use document::{CodeBlock, Group, Request};
pub use error::{ParseError, ParseResult};
pub use http::{HttpRequest, HttpResponse};
pub use line::{Line, LineKind};
pub use parser::parse;
pub use report::{Failure, RequestOutcome, RunReport};
pub use response::ResponseDetails;
pub use value::{Value, ValueKind};
