//! The class transformer.
//!
//! [`ClassTransformer`] sits between the class reader and the next visitor
//! in the chain. It classifies the class from its header, lets class
//! markers adjust whether members are rewritten, then handles each member:
//!
//! - **Ordinary classes**: field descriptors that resolve to a value type
//!   are flattened, scalar value-type fields are collected for null-sentinel
//!   defaulting, and methods are planned and handed to the
//!   [`MethodRewriter`]. Setters that collapse onto an already emitted
//!   flattened shape are dropped.
//! - **Definition classes** (either side of a registered value type):
//!   members pass through unchanged and are recorded. At the end of the
//!   class the record is committed to the registry and that side is marked
//!   complete.
//!
//! The first error aborts the class: later events are not forwarded and
//! the registry is not written.

use vt_diagnostic::{Diagnostic, ErrorCode};
use vt_ir::{Annotation, ClassHeader, ClassVisitor, FieldDecl, MethodDecl};
use vt_types::{
    parse_descriptor, parse_method_descriptor, to_flattened_descriptor, transform_method_descriptor,
    DescScope, MappingRegistry, MemberSig,
};

use crate::context::{ClassContext, ClassReport, DeletedSetter, ScalarField};
use crate::markers::Marker;
use crate::mode::{ClassMode, MemberPolicy};
use crate::rewriter::{MethodPlan, MethodRewriter};
use crate::setter::{erased_signature, SetterDetector};
use crate::{TransformError, TransformOptions};

/// Rewrites one class and forwards the result to `next`.
pub struct ClassTransformer<'a, V> {
    next: V,
    registry: &'a mut MappingRegistry,
    options: &'a TransformOptions,
    detector: &'a dyn SetterDetector,
    rewriter: &'a mut dyn MethodRewriter,
    policy: MemberPolicy,
    ctx: ClassContext,
    header_seen: bool,
}

impl<'a, V: ClassVisitor> ClassTransformer<'a, V> {
    pub fn new(
        next: V,
        registry: &'a mut MappingRegistry,
        options: &'a TransformOptions,
        detector: &'a dyn SetterDetector,
        rewriter: &'a mut dyn MethodRewriter,
    ) -> Self {
        let ctx = ClassContext::new(String::new(), options.diagnostics.clone());
        ClassTransformer {
            next,
            registry,
            options,
            detector,
            rewriter,
            policy: MemberPolicy::new(ClassMode::Ordinary),
            ctx,
            header_seen: false,
        }
    }

    /// Finish the class: the next visitor and the report, or the error that
    /// aborted the class.
    pub fn finish(self) -> Result<(V, ClassReport), TransformError> {
        let (error, report) = self.ctx.into_parts();
        if let Some(error) = error {
            return Err(error);
        }
        if !self.header_seen {
            return Err(TransformError::Invariant(
                "class visitation without a header".to_owned(),
            ));
        }
        Ok((self.next, report))
    }

    /// Check the event order; members and the end need a header first.
    fn ready(&mut self, member: Option<&str>) -> bool {
        if self.ctx.has_failed() {
            return false;
        }
        if !self.header_seen {
            self.ctx.fail(
                member,
                TransformError::Invariant("class event before the header".to_owned()),
            );
            return false;
        }
        true
    }

    fn record_member(&mut self, name: &str, descriptor: &str, is_static: bool, is_method: bool) {
        if self.policy.mode().definition().is_some() {
            self.ctx.members.push(MemberSig {
                name: name.to_owned(),
                descriptor: descriptor.to_owned(),
                is_static,
                is_method,
            });
        }
    }

    fn rewrite_field(&mut self, mut field: FieldDecl) -> Result<FieldDecl, TransformError> {
        let ty = parse_descriptor(&field.descriptor, self.registry)?;
        let Some(flattened) = to_flattened_descriptor(ty) else {
            return Ok(field);
        };

        self.ctx.was_transformed = true;
        if !ty.is_array() {
            if let Some(value_type) = ty.value_type_id() {
                self.ctx.scalar_fields.push(ScalarField {
                    value_type,
                    name: field.name.clone(),
                    is_static: field.access.is_static(),
                });
            }
        }
        if self.options.log_successes {
            self.ctx.report(
                Diagnostic::note(ErrorCode::I3003)
                    .with_message(format!(
                        "UPDATED field descriptor {} -> {flattened}",
                        field.descriptor
                    ))
                    .with_member(field.name.clone()),
            );
        }
        field.descriptor = flattened;
        Ok(field)
    }

    /// Plan a method, or `None` if it is a setter that collapses onto one
    /// already emitted.
    fn plan_method(&mut self, method: &MethodDecl) -> Result<Option<MethodPlan>, TransformError> {
        let registry = &*self.registry;
        let parsed = parse_method_descriptor(&method.descriptor, registry)?;
        let flattened = transform_method_descriptor(&method.descriptor, DescScope::Full, registry)?;

        let is_setter = self
            .detector
            .is_value_type_setter(method.access, &method.name, &method.descriptor, registry)
            || self
                .detector
                .is_flattened_setter(method.access, &method.name, &method.descriptor, registry);

        if is_setter && !self.ctx.claim_setter(erased_signature(&method.name, &flattened)) {
            self.ctx.deleted_setters.push(DeletedSetter {
                name: method.name.clone(),
                descriptor: method.descriptor.clone(),
            });
            self.ctx.report(
                Diagnostic::note(ErrorCode::I3004)
                    .with_message(format!(
                        "DELETED setter {}{}: same flattened signature as an earlier setter",
                        method.name, method.descriptor
                    ))
                    .with_member(method.name.clone()),
            );
            return Ok(None);
        }

        Ok(Some(MethodPlan {
            class: self.ctx.class().to_owned(),
            access: method.access,
            name: method.name.clone(),
            original_descriptor: method.descriptor.clone(),
            flattened_descriptor: flattened,
            references_value_type: parsed.has_value_type(),
        }))
    }

    fn commit_definition(&mut self) -> Result<(), TransformError> {
        if let Some((id, side)) = self.policy.mode().definition() {
            let members = std::mem::take(&mut self.ctx.members);
            tracing::debug!(?id, ?side, members = members.len(), "definition class scanned");
            self.registry.complete_scan(id, side, members)?;
        }
        Ok(())
    }

    fn report_scalar_fields(&mut self) {
        let fields = &self.ctx.scalar_fields;
        if fields.is_empty() {
            return;
        }
        let statics = fields.iter().filter(|f| f.is_static).count();
        let instances = fields.len() - statics;
        let message = format!(
            "registered {} scalar value-type fields ({statics} static, {instances} instance)",
            fields.len()
        );
        self.ctx.note(ErrorCode::I3005, message);
    }
}

impl<V: ClassVisitor> ClassVisitor for ClassTransformer<'_, V> {
    fn visit_header(&mut self, header: &ClassHeader) {
        if self.ctx.has_failed() {
            return;
        }
        if self.header_seen {
            self.ctx.fail(
                None,
                TransformError::Invariant(format!("second header `{}`", header.name)),
            );
            return;
        }
        self.header_seen = true;

        let mode = ClassMode::classify(&header.name, self.registry);
        tracing::debug!(class = %header.name, ?mode, "classified");
        self.policy = MemberPolicy::new(mode);
        self.ctx = ClassContext::new(header.name.clone(), self.options.diagnostics.clone());
        self.next.visit_header(header);
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        if !self.ready(None) {
            return;
        }
        if let Some(marker) = Marker::from_descriptor(&annotation.descriptor) {
            let applied = self.policy.apply(marker);
            tracing::debug!(class = %self.ctx.class(), ?marker, applied, "class marker");
        }
        self.next.visit_annotation(annotation);
    }

    fn visit_field(&mut self, field: FieldDecl) {
        if !self.ready(Some(&field.name)) {
            return;
        }
        self.record_member(&field.name, &field.descriptor, field.access.is_static(), false);

        if !self.policy.rewrite_members() {
            self.next.visit_field(field);
            return;
        }
        let name = field.name.clone();
        match self.rewrite_field(field) {
            Ok(field) => self.next.visit_field(field),
            Err(error) => self.ctx.fail(Some(&name), error),
        }
    }

    fn visit_method(&mut self, method: MethodDecl) {
        if !self.ready(Some(&method.name)) {
            return;
        }
        self.ctx.methods_seen += 1;
        if self.ctx.methods_seen == 1 && self.options.log_all_methods {
            self.ctx.note(ErrorCode::I3001, "BEGIN processing methods");
        }
        self.record_member(&method.name, &method.descriptor, method.access.is_static(), true);

        if !self.policy.rewrite_members() {
            self.next.visit_method(method);
            return;
        }

        let name = method.name.clone();
        let result = match self.plan_method(&method) {
            Ok(Some(plan)) => self.rewriter.rewrite(&plan, method).map(Some),
            Ok(None) => Ok(None),
            Err(error) => Err(error),
        };
        match result {
            Ok(Some(method)) => self.next.visit_method(method),
            Ok(None) => {}
            Err(error) => self.ctx.fail(Some(&name), error),
        }
    }

    fn visit_end(&mut self) {
        if !self.ready(None) {
            return;
        }
        if let Err(error) = self.commit_definition() {
            self.ctx.fail(None, error);
            return;
        }
        self.report_scalar_fields();
        // Closes the I3001 opened by the first method.
        let opened = self.options.log_all_methods && self.ctx.methods_seen > 0;
        if self.options.log_every_class || opened {
            self.ctx.note(ErrorCode::I3002, "END processing class");
        }
        self.next.visit_end();
    }
}
