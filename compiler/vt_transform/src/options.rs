//! Rewriting options.

use vt_diagnostic::DiagnosticConfig;

/// Logging toggles and diagnostic limits for one rewriting pass.
///
/// The defaults keep only the diagnostics that are always reported (deleted
/// setters, scalar-field counts, errors).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TransformOptions {
    /// Report the start of every class that has methods.
    pub log_all_methods: bool,
    /// Report every rewritten field descriptor.
    pub log_successes: bool,
    /// Report the end of every class.
    pub log_every_class: bool,
    pub diagnostics: DiagnosticConfig,
}

impl TransformOptions {
    /// Options with every progress report enabled (for debugging).
    pub fn verbose() -> Self {
        TransformOptions {
            log_all_methods: true,
            log_successes: true,
            log_every_class: true,
            diagnostics: DiagnosticConfig::unlimited(),
        }
    }
}
