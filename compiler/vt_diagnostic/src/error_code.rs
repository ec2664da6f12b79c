//! Error codes for all rewriter diagnostics.
//!
//! The first letter gives the kind (`E` error, `I` informational) and the
//! first digit the component that raised it.

use std::fmt;

/// Error codes for rewriter diagnostics.
///
/// Format: letter + four digits:
/// - E0xxx: Descriptor translation errors
/// - E1xxx: Cast oracle rejections
/// - E2xxx: Member rewriting errors
/// - E9xxx: Internal invariant breaches
/// - I3xxx: Orchestration progress (informational)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Descriptor Errors (E0xxx)
    /// Descriptor could not be parsed or rendered
    E0001,

    // Cast Errors (E1xxx)
    /// Incompatible conversion between two types
    E1001,
    /// Oracle called with a sentinel or wildcard where it is not allowed
    E1002,

    // Member Errors (E2xxx)
    /// Method rejected by the per-instruction rewriter
    E2001,

    // Internal Errors (E9xxx)
    /// Rewriter invariant breached
    E9001,

    // Informational (I3xxx)
    /// Began processing a class
    I3001,
    /// Finished processing a class
    I3002,
    /// Field descriptor rewritten
    I3003,
    /// Duplicate setter deleted after flattening
    I3004,
    /// Summary of registered scalar value-type fields
    I3005,
}

impl ErrorCode {
    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::I3001 => "I3001",
            ErrorCode::I3002 => "I3002",
            ErrorCode::I3003 => "I3003",
            ErrorCode::I3004 => "I3004",
            ErrorCode::I3005 => "I3005",
        }
    }

    /// Check if this is a cast oracle rejection (E1xxx range).
    pub fn is_cast_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }

    /// Check if this code always denotes a broken rewriter invariant.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E1002 | ErrorCode::E9001)
    }

    /// Check if this is an informational progress code (I3xxx range).
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            ErrorCode::I3001
                | ErrorCode::I3002
                | ErrorCode::I3003
                | ErrorCode::I3004
                | ErrorCode::I3005
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
