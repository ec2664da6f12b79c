//! Class visitor interface.
//!
//! A class is presented to the rewriter as a depth-first, single-pass event
//! stream: header, class annotations, fields, methods, end. Visitors are
//! chained; each one observes an event, optionally changes or drops it, and
//! forwards the result to the next visitor.
//!
//! # Example
//!
//! ```text
//! struct CountFields {
//!     count: usize,
//! }
//!
//! impl ClassVisitor for CountFields {
//!     fn visit_field(&mut self, _field: FieldDecl) {
//!         self.count += 1;
//!     }
//! }
//!
//! let mut counter = CountFields { count: 0 };
//! walk_class(&mut counter, &class);
//! ```

use crate::{Annotation, ClassFile, ClassHeader, FieldDecl, MethodDecl};

/// Class visitor trait.
///
/// Every method defaults to ignoring the event. Fields and methods are
/// passed by value so a rewriting visitor can change them before forwarding.
pub trait ClassVisitor {
    /// Visit the class header. Always the first event.
    fn visit_header(&mut self, header: &ClassHeader) {
        let _ = header;
    }

    /// Visit a class-level annotation. Annotations precede all members.
    fn visit_annotation(&mut self, annotation: &Annotation) {
        let _ = annotation;
    }

    /// Visit a field declaration.
    fn visit_field(&mut self, field: FieldDecl) {
        let _ = field;
    }

    /// Visit a method declaration.
    fn visit_method(&mut self, method: MethodDecl) {
        let _ = method;
    }

    /// All members have been visited. Always the last event.
    fn visit_end(&mut self) {}
}

impl<V: ClassVisitor + ?Sized> ClassVisitor for &mut V {
    fn visit_header(&mut self, header: &ClassHeader) {
        (**self).visit_header(header);
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        (**self).visit_annotation(annotation);
    }

    fn visit_field(&mut self, field: FieldDecl) {
        (**self).visit_field(field);
    }

    fn visit_method(&mut self, method: MethodDecl) {
        (**self).visit_method(method);
    }

    fn visit_end(&mut self) {
        (**self).visit_end();
    }
}

/// Drive a visitor over an assembled class, in class-file order.
pub fn walk_class<V: ClassVisitor + ?Sized>(visitor: &mut V, class: &ClassFile) {
    visitor.visit_header(&class.header);
    for annotation in &class.annotations {
        visitor.visit_annotation(annotation);
    }
    for field in &class.fields {
        visitor.visit_field(field.clone());
    }
    for method in &class.methods {
        visitor.visit_method(method.clone());
    }
    visitor.visit_end();
}

/// Terminal visitor that reassembles the events it receives into a
/// [`ClassFile`].
///
/// This is the emission end of a visitor chain: whatever reaches it is what
/// the rewritten class contains.
#[derive(Clone, Debug)]
pub struct ClassFileBuilder {
    class: Option<ClassFile>,
    annotations: Vec<Annotation>,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    ended: bool,
}

impl Default for ClassFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassFileBuilder {
    pub fn new() -> Self {
        ClassFileBuilder {
            class: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            ended: false,
        }
    }

    /// Whether `visit_end` has been received.
    pub fn is_complete(&self) -> bool {
        self.ended
    }

    /// Consume the builder, returning the class if a header was seen.
    pub fn finish(self) -> Option<ClassFile> {
        let mut class = self.class?;
        class.annotations = self.annotations;
        class.fields = self.fields;
        class.methods = self.methods;
        Some(class)
    }
}

impl ClassVisitor for ClassFileBuilder {
    fn visit_header(&mut self, header: &ClassHeader) {
        self.class = Some(ClassFile::new(header.clone()));
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        self.annotations.push(annotation.clone());
    }

    fn visit_field(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }

    fn visit_method(&mut self, method: MethodDecl) {
        self.methods.push(method);
    }

    fn visit_end(&mut self) {
        self.ended = true;
    }
}
