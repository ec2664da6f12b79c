//! Mapping registry of declared value types.
//!
//! Each entry pairs the boxed (source) class of a value type with its
//! flattened (destination) class, and tracks whether every member of each
//! side has been observed. Entries are created by [`register`] and never
//! removed during a rewriting pass.
//!
//! # Concurrency
//!
//! The registry is read by every class visitation and written only when a
//! definition class finishes. It is not synchronised: parallel class
//! rewriting has to serialise those writes or partition the registry by
//! value-type identity.
//!
//! [`register`]: MappingRegistry::register

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{Repr, ValueTypeId};

/// Scan progress of one side of a definition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanState {
    #[default]
    Pending,
    Complete,
}

/// A member observed on a definition class.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberSig {
    pub name: String,
    pub descriptor: String,
    pub is_static: bool,
    pub is_method: bool,
}

/// One declared value type.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTypeDef {
    pub id: ValueTypeId,
    /// Internal name of the boxed (source) class.
    pub src_class: String,
    /// Internal name of the flattened (destination) class.
    pub dst_class: String,
    pub src_state: ScanState,
    pub dst_state: ScanState,
    /// Members of the source class, filled in when its scan completes.
    pub src_members: Vec<MemberSig>,
    /// Members of the destination class, filled in when its scan completes.
    pub dst_members: Vec<MemberSig>,
}

impl ValueTypeDef {
    /// Both classes of the pair have been fully observed.
    pub fn is_fully_scanned(&self) -> bool {
        self.src_state == ScanState::Complete && self.dst_state == ScanState::Complete
    }

    /// Class name carrying the given representation.
    pub fn class_name(&self, repr: Repr) -> &str {
        match repr {
            Repr::Boxed => &self.src_class,
            Repr::Flattened => &self.dst_class,
        }
    }
}

/// Registry errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("value type `{0}` cannot be its own flattened form")]
    SelfPaired(String),
    #[error("class `{0}` is already part of a registered value type")]
    AlreadyRegistered(String),
    #[error("too many value types (limit {})", ValueTypeId::MAX_COUNT)]
    TooManyValueTypes,
    #[error("unknown value type id {0:?}")]
    UnknownId(ValueTypeId),
}

/// The set of declared value types.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MappingRegistry {
    defs: Vec<ValueTypeDef>,
    by_class: FxHashMap<String, (ValueTypeId, Repr)>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a value type: `src_class` is its boxed form, `dst_class` the
    /// class that operates on its flattened form.
    pub fn register(
        &mut self,
        src_class: impl Into<String>,
        dst_class: impl Into<String>,
    ) -> Result<ValueTypeId, RegistryError> {
        let src_class = src_class.into();
        let dst_class = dst_class.into();

        if src_class == dst_class {
            return Err(RegistryError::SelfPaired(src_class));
        }
        for class in [&src_class, &dst_class] {
            if self.by_class.contains_key(class) {
                return Err(RegistryError::AlreadyRegistered(class.clone()));
            }
        }
        let raw = u16::try_from(self.defs.len()).map_err(|_| RegistryError::TooManyValueTypes)?;
        let id = ValueTypeId::from_raw(raw);

        self.by_class.insert(src_class.clone(), (id, Repr::Boxed));
        self.by_class.insert(dst_class.clone(), (id, Repr::Flattened));
        self.defs.push(ValueTypeDef {
            id,
            src_class,
            dst_class,
            src_state: ScanState::Pending,
            dst_state: ScanState::Pending,
            src_members: Vec::new(),
            dst_members: Vec::new(),
        });
        Ok(id)
    }

    /// Look up a class by internal name: which value type it belongs to and
    /// which representation it carries.
    #[inline]
    pub fn lookup(&self, class: &str) -> Option<(ValueTypeId, Repr)> {
        self.by_class.get(class).copied()
    }

    /// Id of the value type whose boxed (source) class is `class`.
    pub fn src_id(&self, class: &str) -> Option<ValueTypeId> {
        match self.lookup(class) {
            Some((id, Repr::Boxed)) => Some(id),
            _ => None,
        }
    }

    /// Id of the value type whose flattened (destination) class is `class`.
    pub fn dst_id(&self, class: &str) -> Option<ValueTypeId> {
        match self.lookup(class) {
            Some((id, Repr::Flattened)) => Some(id),
            _ => None,
        }
    }

    pub fn is_src_class(&self, class: &str) -> bool {
        self.src_id(class).is_some()
    }

    pub fn is_dst_class(&self, class: &str) -> bool {
        self.dst_id(class).is_some()
    }

    pub fn get(&self, id: ValueTypeId) -> Option<&ValueTypeDef> {
        self.defs.get(id.index())
    }

    /// Class name of a value type in the given representation.
    pub fn class_name(&self, id: ValueTypeId, repr: Repr) -> Option<&str> {
        self.get(id).map(|def| def.class_name(repr))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueTypeDef> {
        self.defs.iter()
    }

    /// Record that every member of one side of a definition has been seen.
    ///
    /// Called once per definition class, at the end of its visitation.
    pub fn complete_scan(
        &mut self,
        id: ValueTypeId,
        side: Repr,
        members: Vec<MemberSig>,
    ) -> Result<(), RegistryError> {
        let def = self
            .defs
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownId(id))?;
        match side {
            Repr::Boxed => {
                def.src_state = ScanState::Complete;
                def.src_members = members;
            }
            Repr::Flattened => {
                def.dst_state = ScanState::Complete;
                def.dst_members = members;
            }
        }
        Ok(())
    }

    /// Both classes of a value type have been fully observed.
    pub fn is_fully_scanned(&self, id: ValueTypeId) -> bool {
        self.get(id).is_some_and(ValueTypeDef::is_fully_scanned)
    }
}

#[cfg(test)]
mod tests;
