//! Value-type identity and representation.

use std::fmt;

/// Identity of a declared value type.
///
/// Indexes the [`MappingRegistry`](crate::MappingRegistry) entry the type
/// was registered under. Two value types are the same class only if their
/// ids are equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ValueTypeId(u16);

impl ValueTypeId {
    /// Largest number of value types one registry can hold.
    pub const MAX_COUNT: usize = u16::MAX as usize;

    /// Create an id from a raw index.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The id as a registry slot.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ValueTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueTypeId({})", self.0)
    }
}

/// How a value type is carried at a program point.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Repr {
    /// The declared reference form (the "source" class).
    Boxed,
    /// The rewritten form, carried as a 64-bit scalar (the "destination"
    /// class holds its operations).
    Flattened,
}

const _: () = assert!(std::mem::size_of::<ValueTypeId>() == 2);
