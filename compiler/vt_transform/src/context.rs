//! Per-class visitation state.
//!
//! A [`ClassContext`] lives exactly as long as the visitation of one class:
//! it owns the diagnostics reported for the class, the set of setter
//! shapes already emitted, and the scalar value-type fields found so far.
//! Nothing in it outlives the class.

use rustc_hash::FxHashSet;
use vt_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode, Severity};
use vt_types::{MemberSig, ValueTypeId};

use crate::TransformError;

/// A field whose type is a scalar value type.
///
/// Such fields need a null-sentinel default value, which is inserted by the
/// static-initializer and constructor rewriting downstream.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScalarField {
    pub value_type: ValueTypeId,
    pub name: String,
    pub is_static: bool,
}

/// A setter dropped because an earlier setter has the same flattened
/// shape.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DeletedSetter {
    pub name: String,
    pub descriptor: String,
}

pub(crate) struct ClassContext {
    class: String,
    diagnostics: DiagnosticQueue,
    /// Erased signatures of setters kept so far.
    setters: FxHashSet<String>,
    pub(crate) scalar_fields: Vec<ScalarField>,
    pub(crate) deleted_setters: Vec<DeletedSetter>,
    /// Members of a definition class, committed to the registry at the end
    /// of the class.
    pub(crate) members: Vec<MemberSig>,
    pub(crate) was_transformed: bool,
    pub(crate) methods_seen: usize,
    error: Option<TransformError>,
}

impl ClassContext {
    pub(crate) fn new(class: impl Into<String>, config: DiagnosticConfig) -> Self {
        ClassContext {
            class: class.into(),
            diagnostics: DiagnosticQueue::with_config(config),
            setters: FxHashSet::default(),
            scalar_fields: Vec::new(),
            deleted_setters: Vec::new(),
            members: Vec::new(),
            was_transformed: false,
            methods_seen: 0,
            error: None,
        }
    }

    pub(crate) fn class(&self) -> &str {
        &self.class
    }

    /// Queue a diagnostic about this class and mirror it to the log.
    pub(crate) fn report(&mut self, diag: Diagnostic) {
        let diag = diag.with_class(self.class.clone());
        let member = diag.member.as_deref().unwrap_or("");
        match diag.severity {
            Severity::Note => {
                tracing::info!(class = %self.class, member, code = %diag.code, "{}", diag.message);
            }
            Severity::Warning => {
                tracing::warn!(class = %self.class, member, code = %diag.code, "{}", diag.message);
            }
            Severity::Error => {
                tracing::error!(class = %self.class, member, code = %diag.code, "{}", diag.message);
            }
        }
        self.diagnostics.push(diag);
    }

    /// Queue a note with the given code and message.
    pub(crate) fn note(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.report(Diagnostic::note(code).with_message(message));
    }

    /// Record that a setter with this erased signature is emitted. Returns
    /// `false` if one with the same signature already was.
    pub(crate) fn claim_setter(&mut self, erased: String) -> bool {
        self.setters.insert(erased)
    }

    /// Record the error that aborts this class. Only the first one is kept;
    /// everything after it is a consequence.
    pub(crate) fn fail(&mut self, member: Option<&str>, error: TransformError) {
        if self.error.is_some() {
            return;
        }
        let mut diag = Diagnostic::error(error.code()).with_message(error.to_string());
        if let Some(member) = member {
            diag = diag.with_member(member);
        }
        self.report(diag);
        self.error = Some(error);
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Tear down the context: the error that aborted the class, if any,
    /// and the report of what was found.
    pub(crate) fn into_parts(mut self) -> (Option<TransformError>, ClassReport) {
        let report = ClassReport {
            was_transformed: self.was_transformed,
            scalar_fields: self.scalar_fields,
            deleted_setters: self.deleted_setters,
            diagnostics: self.diagnostics.flush(),
        };
        (self.error, report)
    }
}

/// What the visitation of one class found, besides the rewritten class.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassReport {
    /// A field descriptor was rewritten; constructors and the static
    /// initializer need null-sentinel defaults.
    pub was_transformed: bool,
    pub scalar_fields: Vec<ScalarField>,
    pub deleted_setters: Vec<DeletedSetter>,
    /// Diagnostics in report order.
    pub diagnostics: Vec<Diagnostic>,
}
