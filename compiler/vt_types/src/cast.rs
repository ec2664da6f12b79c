//! Cast-compatibility oracle.
//!
//! Decides whether a value can move from a `from`-typed location to a
//! `to`-typed location, and which conversions the instruction rewriter has
//! to insert for it. Each call gives a single deterministic answer.
//!
//! # Entry Points
//!
//! - [`check`]: assignments, returns, field and array stores
//! - [`check_arg`]: argument positions, where the destination may be the
//!   wildcard value type
//! - [`check_frame`]: stack-frame merges, where either side may be a
//!   sentinel (`Void`/`Uninitialized`)
//!
//! # Results
//!
//! `Ok(flags)` means the conversion is legal; an empty flag set means no
//! operation is needed. `Err(CastError::Incompatible)` rejects the rewrite
//! of the enclosing member. `Err(CastError::ContractViolation)` means the
//! caller passed a sentinel or wildcard where the entry point does not
//! accept one.

use bitflags::bitflags;
use thiserror::Error;

use crate::ExtendedType;

bitflags! {
    /// Operations a legal conversion requires.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CastFlags: u32 {
        /// The destination is a value type; flattened-representation
        /// instructions apply.
        const HAS_VALUE_TYPE = 1 << 0;
        /// Box a flattened value before storing it.
        const BOX = 1 << 1;
        /// Unbox a boxed value before storing it.
        const UNBOX = 1 << 2;
        /// The destination slot was uninitialized; its value type is fixed
        /// by the first write.
        const UNINITIALIZED_VALUE_TYPE = 1 << 3;
        /// A flattened value is dropped (expression statement, void return).
        const DISCARD = 1 << 4;
        /// The wildcard destination adopts the source's value-type identity.
        const SUBSTITUTE = 1 << 5;
        /// The destination was the wildcard but the source is not a value
        /// type; nothing to unify.
        const NO_SUBSTITUTION = 1 << 6;
    }
}

impl CastFlags {
    /// A conversion that needs no operation.
    pub const SUCCESS: Self = Self::empty();
}

/// Why a conversion was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CastError {
    /// The types are incompatible under the rewriter's rules.
    #[error("cannot convert `{from}` to `{to}`")]
    Incompatible { from: ExtendedType, to: ExtendedType },
    /// The caller broke the entry point's contract.
    #[error("invalid cast query `{from}` -> `{to}`: {reason}")]
    ContractViolation {
        from: ExtendedType,
        to: ExtendedType,
        reason: &'static str,
    },
}

impl CastError {
    /// Check if this error means the rewriter's own invariants are broken.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CastError::ContractViolation { .. })
    }
}

/// Result of a cast query.
pub type CastResult = Result<CastFlags, CastError>;

#[inline]
fn identity(ty: ExtendedType) -> CastFlags {
    if ty.is_value_type() {
        CastFlags::HAS_VALUE_TYPE
    } else {
        CastFlags::SUCCESS
    }
}

#[inline]
fn incompatible(from: ExtendedType, to: ExtendedType) -> CastResult {
    Err(CastError::Incompatible { from, to })
}

#[inline]
fn violation(from: ExtendedType, to: ExtendedType, reason: &'static str) -> CastResult {
    Err(CastError::ContractViolation { from, to, reason })
}

/// Box or unbox, by direction, between two representations of the same
/// value type with the same depth.
fn representation_change(from: ExtendedType, to: ExtendedType) -> CastFlags {
    if from.repr() == to.repr() {
        CastFlags::HAS_VALUE_TYPE
    } else if to.is_flattened_value_type() {
        CastFlags::UNBOX | CastFlags::HAS_VALUE_TYPE
    } else {
        CastFlags::BOX | CastFlags::HAS_VALUE_TYPE
    }
}

/// Shared decision for `from != to`, neither side a sentinel, `to` not the
/// wildcard.
fn check_base(from: ExtendedType, to: ExtendedType) -> CastResult {
    debug_assert!(from != to);

    if to.is_value_type() {
        if from.is_value_type() {
            // Array dimensions of value types are tracked; a mismatch is
            // always an error.
            if !ExtendedType::same_array_depth(from, to) {
                return incompatible(from, to);
            }
            if ExtendedType::same_value_type_identity(from, to) {
                return Ok(representation_change(from, to));
            }
            return incompatible(from, to);
        }

        // `from` is not a value type, `to` is one.
        if to.is_flattened_scalar() {
            return if from.is_plain_scalar_ref() {
                Ok(CastFlags::UNBOX | CastFlags::HAS_VALUE_TYPE)
            } else {
                incompatible(from, to)
            };
        }

        if to.is_array() {
            // Assume a widening from a generic object reference; array
            // covariance is not checked.
            return if from.is_plain_scalar_ref() {
                Ok(CastFlags::HAS_VALUE_TYPE)
            } else {
                incompatible(from, to)
            };
        }

        // Boxed scalar destination: reference compatibility between
        // arbitrary classes and a boxed value type is not verified.
        return Ok(CastFlags::SUCCESS);
    }

    if to.is_plain_scalar_ref() {
        if from.is_flattened_scalar() {
            return Ok(CastFlags::BOX);
        }
        // Any reference is assumed assignable to any other reference; no
        // inheritance checks are attempted.
        if from.is_reference() {
            return Ok(CastFlags::SUCCESS);
        }
        return incompatible(from, to);
    }

    if to.is_array() {
        if from.is_value_type() {
            return if ExtendedType::same_array_depth(from, to) {
                Ok(CastFlags::BOX)
            } else {
                incompatible(from, to)
            };
        }
        // Built-in arrays are not depth-tracked, and plain references are
        // not tracked per class, so the source is accepted as is.
        return Ok(CastFlags::SUCCESS);
    }

    incompatible(from, to)
}

/// Check an ordinary conversion (assignment, store, return, call result).
///
/// Neither side may be a sentinel or the wildcard.
///
/// # Permissive rules
///
/// Class hierarchies are not analysed, so
/// - any reference converts to a plain object reference,
/// - a plain object reference converts to a value-type array,
/// - any non-value-type converts to a boxed value type,
/// - any non-value-type converts to a built-in array.
pub fn check(from: ExtendedType, to: ExtendedType) -> CastResult {
    if from == to {
        return Ok(identity(to));
    }
    if from.is_wildcard() || to.is_wildcard() {
        return violation(from, to, "wildcard outside an argument position");
    }
    if from.is_sentinel() || to.is_sentinel() {
        return violation(from, to, "stack-frame sentinel used as an operand");
    }
    check_base(from, to)
}

/// Check an argument-position conversion.
///
/// The destination may be the wildcard value type, meaning "adopt the
/// identity of whatever value type the argument carries":
/// - value-type source of the same depth: `SUBSTITUTE`, plus `UNBOX` when
///   the source is boxed (the wildcard is always flattened)
/// - value-type source of another depth: incompatible
/// - non-value-type source: `NO_SUBSTITUTION`
pub fn check_arg(from: ExtendedType, to: ExtendedType) -> CastResult {
    if from == to {
        return Ok(identity(to));
    }
    if from.is_wildcard() {
        return violation(from, to, "argument source is the wildcard");
    }
    if from.is_sentinel() || to.is_sentinel() {
        return violation(from, to, "stack-frame sentinel used as an argument");
    }

    if to.is_wildcard() {
        if !from.is_value_type() {
            return Ok(CastFlags::NO_SUBSTITUTION);
        }
        if !ExtendedType::same_array_depth(from, to) {
            return incompatible(from, to);
        }
        let mut flags = CastFlags::SUBSTITUTE | CastFlags::HAS_VALUE_TYPE;
        if from.is_boxed_value_type() {
            flags |= CastFlags::UNBOX;
        }
        return Ok(flags);
    }

    check_base(from, to)
}

/// Check a stack-frame merge.
///
/// `Void` and `Uninitialized` are both accepted here as the empty-slot
/// sentinel:
/// - sentinel to value type: `HAS_VALUE_TYPE | UNINITIALIZED_VALUE_TYPE`
///   (the real type is fixed by the first write)
/// - flattened scalar to sentinel: `HAS_VALUE_TYPE | DISCARD`
/// - any other merge with a sentinel: no operation
pub fn check_frame(from: ExtendedType, to: ExtendedType) -> CastResult {
    if from == to {
        return Ok(identity(to));
    }
    if from.is_wildcard() || to.is_wildcard() {
        return violation(from, to, "wildcard in a stack-frame merge");
    }

    if from.is_sentinel() {
        return Ok(if to.is_value_type() {
            CastFlags::HAS_VALUE_TYPE | CastFlags::UNINITIALIZED_VALUE_TYPE
        } else {
            CastFlags::SUCCESS
        });
    }

    if to.is_sentinel() {
        return Ok(if from.is_flattened_scalar() {
            CastFlags::HAS_VALUE_TYPE | CastFlags::DISCARD
        } else {
            CastFlags::SUCCESS
        });
    }

    check_base(from, to)
}

#[cfg(test)]
mod tests;
