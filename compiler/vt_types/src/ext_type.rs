//! Extended type encoding.
//!
//! `ExtendedType` layers value-type identity, representation, array depth
//! and the wildcard marker on top of the built-in JVM verification kinds.
//! It is a closed `Copy` value compared by equality only; every query below
//! is a constant-time match.
//!
//! # Layout
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Primitive(kind)` | built-in scalar or plain reference |
//! | `ValueType(id, repr)` | scalar value type, boxed or flattened |
//! | `Array(element, depth)` | `depth >= 1` dimensional array |
//! | `Wildcard` | flattened value type of not-yet-known identity |
//! | `Void` / `Uninitialized` | stack-frame sentinels, never operands |

use std::fmt;

use crate::descriptor::append_readable_array_depth;
use crate::{Repr, ValueTypeId};

/// Built-in kind of a non-value-type scalar.
///
/// Narrow integer kinds (`boolean`, `byte`, `char`, `short`) verify as
/// [`Int`](BaseKind::Int), as they do on the JVM operand stack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseKind {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Reference to any object that is not a registered value type.
    ObjectRef,
    /// The `null` constant.
    NullRef,
}

impl BaseKind {
    /// Check if this kind is a reference.
    #[inline]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::ObjectRef | Self::NullRef)
    }
}

/// Element of an array type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Basic(BaseKind),
    Value(ValueTypeId, Repr),
    /// Flattened value type of not-yet-known identity.
    Wildcard,
}

impl Element {
    /// The scalar type of this element.
    #[inline]
    pub const fn scalar(self) -> ExtendedType {
        match self {
            Self::Basic(kind) => ExtendedType::Primitive(kind),
            Self::Value(id, repr) => ExtendedType::ValueType(id, repr),
            Self::Wildcard => ExtendedType::Wildcard,
        }
    }
}

/// A type as seen by the rewriter.
///
/// Constructed through [`ExtendedType::array`] so an `Array` never has
/// depth 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendedType {
    Primitive(BaseKind),
    ValueType(ValueTypeId, Repr),
    /// Depth must be at least 1. A hand-built `Array(_, 0)` is treated as
    /// its element by [`ExtendedType::element`].
    Array(Element, u8),
    Wildcard,
    Void,
    Uninitialized,
}

impl ExtendedType {
    pub const INT: Self = Self::Primitive(BaseKind::Int);
    pub const LONG: Self = Self::Primitive(BaseKind::Long);
    pub const FLOAT: Self = Self::Primitive(BaseKind::Float);
    pub const DOUBLE: Self = Self::Primitive(BaseKind::Double);
    pub const OBJECT: Self = Self::Primitive(BaseKind::ObjectRef);
    pub const NULL: Self = Self::Primitive(BaseKind::NullRef);

    /// Largest array depth the class-file format allows.
    pub const MAX_ARRAY_DEPTH: u8 = u8::MAX;

    /// Boxed scalar value type.
    #[inline]
    pub const fn boxed(id: ValueTypeId) -> Self {
        Self::ValueType(id, Repr::Boxed)
    }

    /// Flattened scalar value type.
    #[inline]
    pub const fn flattened(id: ValueTypeId) -> Self {
        Self::ValueType(id, Repr::Flattened)
    }

    /// Array of `element` with `depth` dimensions; depth 0 is the element
    /// itself.
    #[inline]
    pub const fn array(element: Element, depth: u8) -> Self {
        if depth == 0 {
            element.scalar()
        } else {
            Self::Array(element, depth)
        }
    }

    // Predicates

    /// Check if this denotes a value type (any representation, any depth,
    /// including the wildcard).
    #[inline]
    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            Self::ValueType(..)
                | Self::Wildcard
                | Self::Array(Element::Value(..) | Element::Wildcard, _)
        )
    }

    /// Representation of a value type, `None` for everything else.
    ///
    /// The wildcard only ever stands for the flattened form.
    #[inline]
    pub const fn repr(self) -> Option<Repr> {
        match self {
            Self::ValueType(_, repr) | Self::Array(Element::Value(_, repr), _) => Some(repr),
            Self::Wildcard | Self::Array(Element::Wildcard, _) => Some(Repr::Flattened),
            _ => None,
        }
    }

    /// Check if this is a value type in its boxed (source) form.
    #[inline]
    pub const fn is_boxed_value_type(self) -> bool {
        matches!(self.repr(), Some(Repr::Boxed))
    }

    /// Check if this is a value type in its flattened (destination) form.
    #[inline]
    pub const fn is_flattened_value_type(self) -> bool {
        matches!(self.repr(), Some(Repr::Flattened))
    }

    /// Check if this is a flattened value type that is not an array, i.e. a
    /// value carried as a single 64-bit scalar.
    #[inline]
    pub const fn is_flattened_scalar(self) -> bool {
        matches!(self, Self::ValueType(_, Repr::Flattened) | Self::Wildcard)
    }

    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Number of array dimensions, 0 for scalars.
    #[inline]
    pub const fn array_depth(self) -> u8 {
        match self {
            Self::Array(_, depth) => depth,
            _ => 0,
        }
    }

    /// Check if this is the wildcard or an array of it.
    #[inline]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::Wildcard | Self::Array(Element::Wildcard, _))
    }

    /// Check if this is one of the stack-frame sentinels.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Void | Self::Uninitialized)
    }

    /// Check if this is a plain scalar reference: an object that is not a
    /// value type, or `null`.
    #[inline]
    pub const fn is_plain_scalar_ref(self) -> bool {
        matches!(self, Self::Primitive(kind) if kind.is_reference())
    }

    /// Check if a value of this type is carried as a reference.
    ///
    /// Every array is a reference, including flattened value-type arrays
    /// (they are arrays of 64-bit scalars). A flattened scalar value type is
    /// not.
    #[inline]
    pub const fn is_reference(self) -> bool {
        match self {
            Self::Primitive(kind) => kind.is_reference(),
            Self::ValueType(_, Repr::Boxed) | Self::Array(..) => true,
            Self::ValueType(_, Repr::Flattened) | Self::Wildcard | Self::Void | Self::Uninitialized => {
                false
            }
        }
    }

    // Projections

    /// Identity of the value type, if this is one with a known identity.
    #[inline]
    pub const fn value_type_id(self) -> Option<ValueTypeId> {
        match self {
            Self::ValueType(id, _) | Self::Array(Element::Value(id, _), _) => Some(id),
            _ => None,
        }
    }

    /// Strip all array levels.
    #[inline]
    pub const fn base_element(self) -> Self {
        match self {
            Self::Array(element, _) => element.scalar(),
            other => other,
        }
    }

    /// Strip exactly one array level. `None` for non-arrays.
    #[inline]
    pub const fn element(self) -> Option<Self> {
        match self {
            Self::Array(element, depth) => Some(Self::array(element, depth.saturating_sub(1))),
            _ => None,
        }
    }

    /// Same type in flattened representation. Non-value types are returned
    /// unchanged.
    #[inline]
    #[must_use]
    pub const fn to_flattened(self) -> Self {
        self.with_repr(Repr::Flattened)
    }

    /// Same type in boxed representation. Non-value types and the wildcard
    /// are returned unchanged.
    #[inline]
    #[must_use]
    pub const fn to_boxed(self) -> Self {
        self.with_repr(Repr::Boxed)
    }

    const fn with_repr(self, repr: Repr) -> Self {
        match self {
            Self::ValueType(id, _) => Self::ValueType(id, repr),
            Self::Array(Element::Value(id, _), depth) => Self::Array(Element::Value(id, repr), depth),
            other => other,
        }
    }

    /// Check if both are value types of the same declared class.
    #[inline]
    pub fn same_value_type_identity(a: Self, b: Self) -> bool {
        match (a.value_type_id(), b.value_type_id()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Check if both have the same number of array dimensions.
    #[inline]
    pub const fn same_array_depth(a: Self, b: Self) -> bool {
        a.array_depth() == b.array_depth()
    }
}

impl fmt::Display for ExtendedType {
    /// Short printable form: `I32`, `Ref`, `&VT` (boxed), `VT` (flattened),
    /// `?VT` (wildcard), `*` (sentinel), with `[]` per array dimension.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from(match self.base_element() {
            Self::Primitive(BaseKind::Int) => "I32",
            Self::Primitive(BaseKind::Long) => "I64",
            Self::Primitive(BaseKind::Float) => "F32",
            Self::Primitive(BaseKind::Double) => "F64",
            Self::Primitive(BaseKind::ObjectRef) => "Ref",
            Self::Primitive(BaseKind::NullRef) => "Null",
            Self::ValueType(_, Repr::Boxed) => "&VT",
            Self::ValueType(_, Repr::Flattened) => "VT",
            Self::Wildcard => "?VT",
            Self::Void | Self::Uninitialized | Self::Array(..) => "*",
        });
        append_readable_array_depth(&mut out, self.array_depth());
        f.write_str(&out)
    }
}

// Compile-time size assertion: ExtendedType must stay register-sized
const _: () = assert!(std::mem::size_of::<ExtendedType>() <= 8);

#[cfg(test)]
mod tests;
