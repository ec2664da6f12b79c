//! Errors that abort the rewriting of a class.

use thiserror::Error;
use vt_diagnostic::ErrorCode;
use vt_types::{CastError, DescriptorError, RegistryError};

/// Why a class could not be rewritten.
///
/// Any of these aborts the whole class: no partially rewritten output is
/// produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The method rewriter refused a member.
    #[error("cannot rewrite `{class}.{method}`: {reason}")]
    MethodRejected {
        class: String,
        method: String,
        reason: String,
    },

    /// The rewriter's own bookkeeping is inconsistent.
    #[error("internal error: {0}")]
    Invariant(String),
}

impl TransformError {
    /// Diagnostic code reported for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TransformError::Descriptor(_) => ErrorCode::E0001,
            TransformError::Cast(err) if err.is_contract_violation() => ErrorCode::E1002,
            TransformError::Cast(_) => ErrorCode::E1001,
            TransformError::MethodRejected { .. } => ErrorCode::E2001,
            TransformError::Registry(_) | TransformError::Invariant(_) => ErrorCode::E9001,
        }
    }
}
