//! Error and diagnostic system for Structurizr documents.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled JSON paths pointing at the offending values
//! - Severity levels
//! - Diagnostic collector for accumulating every problem of a document
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, one or more
//! document locations, and help text. All diagnostics of a document are
//! wrapped in [`DocumentError`] and returned together.
//!
//! # Example
//!
//! ```
//! # use structurizr_json::error::{Diagnostic, ErrorCode};
//! # use structurizr_json::JsonPath;
//!
//! let people = JsonPath::root().key("model").key("people");
//!
//! let diag = Diagnostic::error("the ID `1` is used more than once")
//!     .with_code(ErrorCode::E202)
//!     .with_label(people.index(3).key("id"), "duplicate ID")
//!     .with_secondary_label(people.index(0).key("id"), "first used here")
//!     .with_help("give every element and relationship its own ID");
//! ```

mod collector;
mod diagnostic;
mod document_error;
mod error_code;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use document_error::DocumentError;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
