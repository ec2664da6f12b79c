//! Per-class classification.

use vt_types::{MappingRegistry, Repr, ValueTypeId};

use crate::markers::Marker;

/// Role of the class being visited, decided once from its name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassMode {
    /// Neither side of a registered value type.
    Ordinary,
    /// The boxed (source) class of a value type.
    Source(ValueTypeId),
    /// The flattened (destination) class of a value type.
    Destination(ValueTypeId),
}

impl ClassMode {
    pub fn classify(class: &str, registry: &MappingRegistry) -> ClassMode {
        match registry.lookup(class) {
            Some((id, Repr::Boxed)) => ClassMode::Source(id),
            Some((id, Repr::Flattened)) => ClassMode::Destination(id),
            None => ClassMode::Ordinary,
        }
    }

    /// The value type and side this class defines, if it is a definition
    /// class.
    pub fn definition(self) -> Option<(ValueTypeId, Repr)> {
        match self {
            ClassMode::Ordinary => None,
            ClassMode::Source(id) => Some((id, Repr::Boxed)),
            ClassMode::Destination(id) => Some((id, Repr::Flattened)),
        }
    }

    /// Whether members are rewritten before any marker is seen.
    pub fn rewrites_members(self) -> bool {
        matches!(self, ClassMode::Ordinary)
    }
}

/// Decides whether the members of the current class are rewritten.
///
/// Starts from the class mode and is adjusted by markers found among the
/// class annotations. Once the first member has been visited the decision
/// is frozen.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberPolicy {
    mode: ClassMode,
    rewrite: bool,
    frozen: bool,
}

impl MemberPolicy {
    pub fn new(mode: ClassMode) -> Self {
        MemberPolicy {
            mode,
            rewrite: mode.rewrites_members(),
            frozen: false,
        }
    }

    pub fn mode(&self) -> ClassMode {
        self.mode
    }

    /// Apply a class marker. Returns `false` if the marker had no effect.
    pub fn apply(&mut self, marker: Marker) -> bool {
        if self.frozen {
            return false;
        }
        match marker {
            Marker::OptOut => {
                self.rewrite = false;
                true
            }
            // A source class keeps its boxed members.
            Marker::OptIn if matches!(self.mode, ClassMode::Source(_)) => false,
            Marker::OptIn => {
                self.rewrite = true;
                true
            }
        }
    }

    /// Freeze the decision and report it.
    pub fn rewrite_members(&mut self) -> bool {
        self.frozen = true;
        self.rewrite
    }
}
