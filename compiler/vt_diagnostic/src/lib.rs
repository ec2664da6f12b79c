//! Diagnostic system for the value-type rewriter.
//!
//! Diagnostics are advisory: they describe what the rewriter did to a class
//! (class begin/end, updated fields, deleted setters, scalar field counts)
//! and why it refused to rewrite one. Nothing downstream parses them.
//!
//! - Error codes for searchability
//! - The class (and member) the message is about
//! - Severity: errors abort the class, warnings and notes never do

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
