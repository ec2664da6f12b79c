//! Descriptor translation.
//!
//! Converts between the textual type descriptors of the class-file format
//! and [`ExtendedType`], and derives the flattened descriptor of a value
//! type.
//!
//! # Forms
//!
//! | Form | Example | Produced by |
//! |------|---------|-------------|
//! | original | `[[Lcom/example/Price;` | [`to_original_descriptor`] |
//! | flattened | `[[J` | [`to_flattened_descriptor`] |
//! | readable | `&VT[][]` | `Display` on [`ExtendedType`] |
//!
//! A class name that is neither side of a registered value type parses as a
//! plain object reference; its exact name is not kept. Rewriting a method
//! descriptor therefore copies every non-value-type component verbatim
//! instead of re-rendering it.

use std::borrow::Cow;
use std::ops::Range;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{BaseKind, Element, ExtendedType, MappingRegistry, ValueTypeId};

/// Descriptor parse and render errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("empty type descriptor")]
    Empty,
    #[error("unknown type `{ch}` at offset {offset} in `{desc}`")]
    UnknownKind {
        desc: String,
        offset: usize,
        ch: char,
    },
    #[error("unterminated class name at offset {offset} in `{desc}`")]
    UnterminatedClass { desc: String, offset: usize },
    #[error("unexpected input at offset {offset} in `{desc}`")]
    TrailingInput { desc: String, offset: usize },
    #[error("malformed method descriptor `{0}`")]
    MalformedMethod(String),
    #[error("more than {} array dimensions in `{0}`", ExtendedType::MAX_ARRAY_DEPTH)]
    TooManyDimensions(String),
    #[error("value type {0:?} is not registered")]
    UnknownValueType(ValueTypeId),
    #[error("`{0}` has no descriptor")]
    Unrepresentable(ExtendedType),
}

/// Which parts of a method descriptor [`transform_method_descriptor`]
/// rewrites.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DescScope {
    /// Parameters and return type.
    Full,
    /// Return type only; parameters are copied verbatim.
    ReturnOnly,
}

/// A parsed method descriptor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDescriptor {
    pub params: SmallVec<[ExtendedType; 4]>,
    pub ret: ExtendedType,
}

impl MethodDescriptor {
    /// Check if any parameter or the return type is a value type.
    pub fn has_value_type(&self) -> bool {
        self.ret.is_value_type() || self.params.iter().any(|p| p.is_value_type())
    }
}

/// Cursor over one descriptor string.
struct Cursor<'a> {
    desc: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(desc: &'a str) -> Self {
        Cursor { desc, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.desc.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.desc.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unknown_kind(&self) -> DescriptorError {
        let ch = self.desc[self.pos..].chars().next().unwrap_or('\0');
        DescriptorError::UnknownKind {
            desc: self.desc.to_owned(),
            offset: self.pos,
            ch,
        }
    }

    /// Parse one field type; returns it with the byte range it spans.
    fn parse_type(
        &mut self,
        registry: &MappingRegistry,
        allow_void: bool,
    ) -> Result<(ExtendedType, Range<usize>), DescriptorError> {
        let start = self.pos;
        let mut depth: usize = 0;
        while self.eat(b'[') {
            depth += 1;
        }
        let depth = u8::try_from(depth)
            .map_err(|_| DescriptorError::TooManyDimensions(self.desc.to_owned()))?;

        let element = match self.peek() {
            Some(b'Z' | b'B' | b'C' | b'S' | b'I') => Element::Basic(BaseKind::Int),
            Some(b'J') => Element::Basic(BaseKind::Long),
            Some(b'F') => Element::Basic(BaseKind::Float),
            Some(b'D') => Element::Basic(BaseKind::Double),
            Some(b'V') if depth == 0 && allow_void => {
                self.pos += 1;
                return Ok((ExtendedType::Void, start..self.pos));
            }
            Some(b'L') => {
                let name_start = self.pos + 1;
                let Some(len) = self.desc[name_start..].find(';') else {
                    return Err(DescriptorError::UnterminatedClass {
                        desc: self.desc.to_owned(),
                        offset: self.pos,
                    });
                };
                if len == 0 {
                    return Err(DescriptorError::UnterminatedClass {
                        desc: self.desc.to_owned(),
                        offset: self.pos,
                    });
                }
                let name = &self.desc[name_start..name_start + len];
                self.pos = name_start + len + 1;
                let element = match registry.lookup(name) {
                    Some((id, repr)) => Element::Value(id, repr),
                    None => Element::Basic(BaseKind::ObjectRef),
                };
                return Ok((ExtendedType::array(element, depth), start..self.pos));
            }
            _ => return Err(self.unknown_kind()),
        };
        self.pos += 1;
        Ok((ExtendedType::array(element, depth), start..self.pos))
    }

    fn expect_end(&self) -> Result<(), DescriptorError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(DescriptorError::TrailingInput {
                desc: self.desc.to_owned(),
                offset: self.pos,
            })
        }
    }
}

/// Parse a single type descriptor (field type or `V`).
///
/// Class names registered as either side of a value type yield that value
/// type in the matching representation; other class names yield a plain
/// object reference.
pub fn parse_descriptor(
    desc: &str,
    registry: &MappingRegistry,
) -> Result<ExtendedType, DescriptorError> {
    if desc.is_empty() {
        return Err(DescriptorError::Empty);
    }
    let mut cursor = Cursor::new(desc);
    let (ty, _) = cursor.parse_type(registry, true)?;
    cursor.expect_end()?;
    Ok(ty)
}

/// Parse a method descriptor `(params)ret`.
pub fn parse_method_descriptor(
    desc: &str,
    registry: &MappingRegistry,
) -> Result<MethodDescriptor, DescriptorError> {
    let mut cursor = Cursor::new(desc);
    if !cursor.eat(b'(') {
        return Err(DescriptorError::MalformedMethod(desc.to_owned()));
    }
    let mut params = SmallVec::new();
    while !cursor.eat(b')') {
        if cursor.at_end() {
            return Err(DescriptorError::MalformedMethod(desc.to_owned()));
        }
        let (param, _) = cursor.parse_type(registry, false)?;
        params.push(param);
    }
    if cursor.at_end() {
        return Err(DescriptorError::MalformedMethod(desc.to_owned()));
    }
    let (ret, _) = cursor.parse_type(registry, true)?;
    cursor.expect_end()?;
    Ok(MethodDescriptor { params, ret })
}

/// Descriptor of a built-in kind. Both reference kinds render as
/// `java/lang/Object`, the only class the encoding remembers.
fn basic_descriptor(kind: BaseKind) -> &'static str {
    match kind {
        BaseKind::Int => "I",
        BaseKind::Long => "J",
        BaseKind::Float => "F",
        BaseKind::Double => "D",
        BaseKind::ObjectRef | BaseKind::NullRef => "Ljava/lang/Object;",
    }
}

/// Render the original (unflattened) descriptor of a type.
///
/// Value types render as the class registered for their representation, so
/// a boxed value type names its source class and a flattened one its
/// destination class. Fails for the wildcard, which has no class.
pub fn to_original_descriptor(
    ty: ExtendedType,
    registry: &MappingRegistry,
) -> Result<String, DescriptorError> {
    let base = match ty.base_element() {
        ExtendedType::Primitive(kind) => Cow::Borrowed(basic_descriptor(kind)),
        // Always wrapped: a one-letter class name would read as a primitive.
        ExtendedType::ValueType(id, repr) => {
            let name = registry
                .class_name(id, repr)
                .ok_or(DescriptorError::UnknownValueType(id))?;
            Cow::Owned(format!("L{name};"))
        }
        ExtendedType::Void | ExtendedType::Uninitialized => Cow::Borrowed("V"),
        ExtendedType::Wildcard | ExtendedType::Array(..) => {
            return Err(DescriptorError::Unrepresentable(ty))
        }
    };
    Ok(prepend_array_depth(&base, ty.array_depth()))
}

/// Render the flattened descriptor of a value type: `J` with one `[` per
/// array dimension. `None` means the type is not a value type and needs no
/// rewriting.
pub fn to_flattened_descriptor(ty: ExtendedType) -> Option<String> {
    if ty.is_value_type() {
        Some(prepend_array_depth("J", ty.array_depth()))
    } else {
        None
    }
}

/// Flattened descriptor of a field, or `None` if its type is not a value
/// type.
pub fn transform_field_descriptor(
    desc: &str,
    registry: &MappingRegistry,
) -> Result<Option<String>, DescriptorError> {
    parse_descriptor(desc, registry).map(to_flattened_descriptor)
}

/// Rewrite a method descriptor so every value-type component in `scope`
/// uses its flattened form.
///
/// Other components are copied from `desc` unchanged.
pub fn transform_method_descriptor(
    desc: &str,
    scope: DescScope,
    registry: &MappingRegistry,
) -> Result<String, DescriptorError> {
    let mut cursor = Cursor::new(desc);
    if !cursor.eat(b'(') {
        return Err(DescriptorError::MalformedMethod(desc.to_owned()));
    }

    let mut out = String::with_capacity(desc.len());
    out.push('(');
    while !cursor.eat(b')') {
        if cursor.at_end() {
            return Err(DescriptorError::MalformedMethod(desc.to_owned()));
        }
        let (param, range) = cursor.parse_type(registry, false)?;
        push_component(&mut out, param, &desc[range], scope == DescScope::Full);
    }
    out.push(')');

    if cursor.at_end() {
        return Err(DescriptorError::MalformedMethod(desc.to_owned()));
    }
    let (ret, range) = cursor.parse_type(registry, true)?;
    push_component(&mut out, ret, &desc[range], true);
    cursor.expect_end()?;
    Ok(out)
}

fn push_component(out: &mut String, ty: ExtendedType, text: &str, rewrite: bool) {
    match to_flattened_descriptor(ty) {
        Some(flat) if rewrite => out.push_str(&flat),
        _ => out.push_str(text),
    }
}

/// Prefix a type name with one `[` per array dimension.
///
/// Single-character descriptors and names already in `L...;` form are used
/// as is; a bare internal class name is wrapped in `L...;`.
pub fn prepend_array_depth(type_name: &str, depth: u8) -> String {
    let depth = usize::from(depth);
    let mut out = String::with_capacity(depth + type_name.len() + 2);
    out.push_str(&"[".repeat(depth));

    let wrapped = type_name.len() > 1 && type_name.starts_with('L') && type_name.ends_with(';');
    if type_name.len() == 1 || wrapped {
        out.push_str(type_name);
    } else {
        out.push('L');
        out.push_str(type_name);
        out.push(';');
    }
    out
}

/// Append the readable array suffix: the depth is doubled and brackets
/// alternate, so depth 2 appends `[][]`.
pub fn append_readable_array_depth(out: &mut String, depth: u8) {
    for i in 0..usize::from(depth) * 2 {
        out.push(if i & 1 == 0 { '[' } else { ']' });
    }
}
