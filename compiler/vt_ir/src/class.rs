//! Class declarations.
//!
//! Names are JVM internal names (`com/example/Price`), descriptors are the
//! textual type descriptors of the class-file format (`Lcom/example/Price;`,
//! `(JI)V`). Nothing here interprets them; that is `vt_types`' job.

use crate::AccessFlags;

/// Class-level header, visited first.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassHeader {
    /// Class-file version (major in the low 16 bits, minor in the high 16).
    pub version: u32,
    pub access: AccessFlags,
    /// Internal name of the class.
    pub name: String,
    /// Generic signature, if any.
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
}

impl ClassHeader {
    /// Create a header for a plain public class extending `java/lang/Object`.
    pub fn new(name: impl Into<String>) -> Self {
        ClassHeader {
            version: 52,
            access: AccessFlags::PUBLIC,
            name: name.into(),
            signature: None,
            super_name: Some("java/lang/Object".to_owned()),
            interfaces: Vec::new(),
        }
    }
}

/// A class-level annotation, identified by its descriptor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Annotation {
    /// Annotation type descriptor, e.g. `Lcom/example/Marker;`.
    pub descriptor: String,
    /// Whether the annotation is retained at runtime.
    pub visible: bool,
}

impl Annotation {
    pub fn new(descriptor: impl Into<String>, visible: bool) -> Self {
        Annotation {
            descriptor: descriptor.into(),
            visible,
        }
    }
}

/// Constant initial value of a static field.
///
/// Floats are stored as raw bits so the type stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstValue {
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    Str(String),
}

/// A field declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub value: Option<ConstValue>,
}

impl FieldDecl {
    pub fn new(access: AccessFlags, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        FieldDecl {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            value: None,
        }
    }
}

/// A method declaration.
///
/// Instruction bodies are owned by the per-instruction rewriter and are not
/// modelled here.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDecl {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub exceptions: Vec<String>,
}

impl MethodDecl {
    pub fn new(access: AccessFlags, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        MethodDecl {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            exceptions: Vec::new(),
        }
    }

    /// Copy of this declaration with a different descriptor.
    #[must_use]
    pub fn with_descriptor(&self, descriptor: impl Into<String>) -> Self {
        MethodDecl {
            descriptor: descriptor.into(),
            ..self.clone()
        }
    }
}

/// An already-assembled class: header plus members in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassFile {
    pub header: ClassHeader,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassFile {
    pub fn new(header: ClassHeader) -> Self {
        ClassFile {
            header,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Internal name of the class.
    #[inline]
    pub fn name(&self) -> &str {
        &self.header.name
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}
