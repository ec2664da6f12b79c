//! Whole-class entry points.

use vt_ir::{walk_class, ClassFile, ClassFileBuilder};
use vt_types::MappingRegistry;

use crate::context::ClassReport;
use crate::rewriter::{MethodRewriter, SignatureRewriter};
use crate::setter::{NamingSetterDetector, SetterDetector};
use crate::transformer::ClassTransformer;
use crate::{TransformError, TransformOptions};

/// A rewritten class and what was found while rewriting it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransformOutcome {
    pub class: ClassFile,
    pub report: ClassReport,
}

/// Rewrite one class with the naming setter heuristic and signature-only
/// method rewriting.
pub fn transform_class(
    class: &ClassFile,
    registry: &mut MappingRegistry,
    options: &TransformOptions,
) -> Result<TransformOutcome, TransformError> {
    transform_class_with(
        class,
        registry,
        options,
        &NamingSetterDetector,
        &mut SignatureRewriter,
    )
}

/// Rewrite one class with the given collaborators.
///
/// The registry is only written at the end of a definition class. On error
/// no output is produced and the registry is left as it was.
#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name()))]
pub fn transform_class_with(
    class: &ClassFile,
    registry: &mut MappingRegistry,
    options: &TransformOptions,
    detector: &dyn SetterDetector,
    rewriter: &mut dyn MethodRewriter,
) -> Result<TransformOutcome, TransformError> {
    let mut transformer =
        ClassTransformer::new(ClassFileBuilder::new(), registry, options, detector, rewriter);
    walk_class(&mut transformer, class);
    let (builder, report) = transformer.finish()?;

    let incomplete =
        || TransformError::Invariant(format!("visitation of `{}` did not complete", class.name()));
    if !builder.is_complete() {
        return Err(incomplete());
    }
    let class = builder.finish().ok_or_else(incomplete)?;
    tracing::debug!(
        was_transformed = report.was_transformed,
        deleted_setters = report.deleted_setters.len(),
        "class rewritten"
    );
    Ok(TransformOutcome { class, report })
}
