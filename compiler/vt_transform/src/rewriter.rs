//! Per-method rewriting seam.
//!
//! The transformer decides *which* methods are emitted and with what
//! signature; a [`MethodRewriter`] produces the emitted method. Rewriting of
//! method bodies plugs in here, validating each conversion with the cast
//! oracle.

use vt_ir::{AccessFlags, MethodDecl};

use crate::TransformError;

/// Everything the transformer decided about one method.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MethodPlan {
    /// Internal name of the declaring class.
    pub class: String,
    pub access: AccessFlags,
    pub name: String,
    /// Descriptor as declared.
    pub original_descriptor: String,
    /// Descriptor with every value-type component flattened. Equal to
    /// `original_descriptor` when nothing references a value type.
    pub flattened_descriptor: String,
    /// Whether any parameter or the return type is a value type.
    pub references_value_type: bool,
}

/// Produces the method to emit for a plan.
pub trait MethodRewriter {
    fn rewrite(&mut self, plan: &MethodPlan, method: MethodDecl) -> Result<MethodDecl, TransformError>;
}

/// Rewrites the declaration only: the method is emitted with its flattened
/// descriptor and everything else unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct SignatureRewriter;

impl MethodRewriter for SignatureRewriter {
    fn rewrite(&mut self, plan: &MethodPlan, method: MethodDecl) -> Result<MethodDecl, TransformError> {
        if method.descriptor != plan.original_descriptor {
            return Err(TransformError::Invariant(format!(
                "plan for `{}{}` applied to `{}{}`",
                plan.name, plan.original_descriptor, method.name, method.descriptor
            )));
        }
        if !plan.references_value_type {
            return Ok(method);
        }
        Ok(MethodDecl {
            descriptor: plan.flattened_descriptor.clone(),
            ..method
        })
    }
}

impl<R: MethodRewriter + ?Sized> MethodRewriter for &mut R {
    fn rewrite(&mut self, plan: &MethodPlan, method: MethodDecl) -> Result<MethodDecl, TransformError> {
        (**self).rewrite(plan, method)
    }
}

#[cfg(test)]
mod tests;
