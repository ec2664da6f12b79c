#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{BaseKind, Element, Repr, ValueTypeId};

const P: ValueTypeId = ValueTypeId::from_raw(0);
const Q: ValueTypeId = ValueTypeId::from_raw(1);

const HAS: CastFlags = CastFlags::HAS_VALUE_TYPE;

fn vt_array(id: ValueTypeId, repr: Repr, depth: u8) -> ExtendedType {
    ExtendedType::array(Element::Value(id, repr), depth)
}

fn basic_array(kind: BaseKind, depth: u8) -> ExtendedType {
    ExtendedType::array(Element::Basic(kind), depth)
}

fn assert_incompatible(result: CastResult) {
    assert!(
        matches!(result, Err(CastError::Incompatible { .. })),
        "expected incompatible, got {result:?}"
    );
}

fn assert_violation(result: CastResult) {
    assert!(
        matches!(result, Err(CastError::ContractViolation { .. })),
        "expected contract violation, got {result:?}"
    );
}

// ── Identity ────────────────────────────────────────────────────

#[test]
fn identity_is_legal_for_every_entry_point() {
    for ty in [
        ExtendedType::INT,
        ExtendedType::OBJECT,
        ExtendedType::boxed(P),
        ExtendedType::flattened(P),
        vt_array(P, Repr::Boxed, 2),
    ] {
        let expected = if ty.is_value_type() { HAS } else { CastFlags::SUCCESS };
        assert_eq!(check(ty, ty), Ok(expected));
        assert_eq!(check_arg(ty, ty), Ok(expected));
        assert_eq!(check_frame(ty, ty), Ok(expected));
    }
}

#[test]
fn identity_of_sentinels_and_wildcard_is_accepted() {
    assert_eq!(check(ExtendedType::Void, ExtendedType::Void), Ok(CastFlags::SUCCESS));
    assert_eq!(check_frame(ExtendedType::Uninitialized, ExtendedType::Uninitialized), Ok(CastFlags::SUCCESS));
    assert_eq!(check_arg(ExtendedType::Wildcard, ExtendedType::Wildcard), Ok(HAS));
}

// ── Value type to value type ────────────────────────────────────

#[test]
fn boxed_to_flattened_unboxes() {
    assert_eq!(
        check(ExtendedType::boxed(P), ExtendedType::flattened(P)),
        Ok(CastFlags::UNBOX | HAS)
    );
}

#[test]
fn flattened_to_boxed_boxes() {
    assert_eq!(
        check(ExtendedType::flattened(P), ExtendedType::boxed(P)),
        Ok(CastFlags::BOX | HAS)
    );
}

#[test]
fn representation_change_applies_to_arrays() {
    assert_eq!(
        check(vt_array(P, Repr::Boxed, 2), vt_array(P, Repr::Flattened, 2)),
        Ok(CastFlags::UNBOX | HAS)
    );
    assert_eq!(
        check(vt_array(P, Repr::Flattened, 1), vt_array(P, Repr::Boxed, 1)),
        Ok(CastFlags::BOX | HAS)
    );
}

#[test]
fn value_type_depth_mismatch_is_rejected() {
    assert_incompatible(check(ExtendedType::flattened(P), vt_array(P, Repr::Flattened, 1)));
    assert_incompatible(check(vt_array(P, Repr::Flattened, 1), ExtendedType::flattened(P)));
    assert_incompatible(check(vt_array(P, Repr::Boxed, 2), vt_array(P, Repr::Flattened, 3)));
}

#[test]
fn different_value_types_are_rejected() {
    assert_incompatible(check(ExtendedType::flattened(P), ExtendedType::flattened(Q)));
    assert_incompatible(check(ExtendedType::boxed(P), ExtendedType::boxed(Q)));
    assert_incompatible(check(ExtendedType::boxed(P), ExtendedType::flattened(Q)));
}

// ── Non-value type to value type ────────────────────────────────

#[test]
fn plain_reference_unboxes_into_flattened_scalar() {
    assert_eq!(check(ExtendedType::OBJECT, ExtendedType::flattened(P)), Ok(CastFlags::UNBOX | HAS));
    assert_eq!(check(ExtendedType::NULL, ExtendedType::flattened(P)), Ok(CastFlags::UNBOX | HAS));
}

#[test]
fn non_reference_into_flattened_scalar_is_rejected() {
    assert_incompatible(check(ExtendedType::INT, ExtendedType::flattened(P)));
    assert_incompatible(check(ExtendedType::LONG, ExtendedType::flattened(P)));
    assert_incompatible(check(basic_array(BaseKind::Long, 1), ExtendedType::flattened(P)));
}

#[test]
fn plain_reference_widens_to_value_type_array() {
    assert_eq!(check(ExtendedType::OBJECT, vt_array(P, Repr::Flattened, 1)), Ok(HAS));
    assert_eq!(check(ExtendedType::OBJECT, vt_array(P, Repr::Boxed, 2)), Ok(HAS));
    assert_incompatible(check(ExtendedType::INT, vt_array(P, Repr::Flattened, 1)));
    assert_incompatible(check(basic_array(BaseKind::ObjectRef, 1), vt_array(P, Repr::Boxed, 1)));
}

#[test]
fn anything_stores_into_boxed_scalar() {
    assert_eq!(check(ExtendedType::OBJECT, ExtendedType::boxed(P)), Ok(CastFlags::SUCCESS));
    assert_eq!(check(ExtendedType::INT, ExtendedType::boxed(P)), Ok(CastFlags::SUCCESS));
    assert_eq!(check(basic_array(BaseKind::Int, 1), ExtendedType::boxed(P)), Ok(CastFlags::SUCCESS));
}

// ── Into non-value types ────────────────────────────────────────

#[test]
fn flattened_scalar_boxes_into_plain_reference() {
    assert_eq!(check(ExtendedType::flattened(P), ExtendedType::OBJECT), Ok(CastFlags::BOX));
}

#[test]
fn references_convert_to_plain_reference() {
    for from in [
        ExtendedType::boxed(P),
        ExtendedType::NULL,
        vt_array(P, Repr::Flattened, 1),
        basic_array(BaseKind::Int, 2),
    ] {
        assert_eq!(check(from, ExtendedType::OBJECT), Ok(CastFlags::SUCCESS), "from {from}");
    }
    assert_incompatible(check(ExtendedType::INT, ExtendedType::OBJECT));
    assert_incompatible(check(ExtendedType::DOUBLE, ExtendedType::NULL));
}

#[test]
fn value_type_array_boxes_into_builtin_array_of_same_depth() {
    let to = basic_array(BaseKind::ObjectRef, 1);
    assert_eq!(check(vt_array(P, Repr::Flattened, 1), to), Ok(CastFlags::BOX));
    assert_incompatible(check(ExtendedType::flattened(P), to));
    assert_incompatible(check(vt_array(P, Repr::Boxed, 2), to));
}

#[test]
fn non_value_types_convert_to_builtin_arrays() {
    let to = basic_array(BaseKind::Long, 1);
    assert_eq!(check(ExtendedType::OBJECT, to), Ok(CastFlags::SUCCESS));
    assert_eq!(check(basic_array(BaseKind::Int, 3), to), Ok(CastFlags::SUCCESS));
}

#[test]
fn distinct_builtin_scalars_are_rejected() {
    assert_incompatible(check(ExtendedType::LONG, ExtendedType::INT));
    assert_incompatible(check(ExtendedType::FLOAT, ExtendedType::DOUBLE));
    assert_incompatible(check(ExtendedType::OBJECT, ExtendedType::INT));
}

// ── Contract ────────────────────────────────────────────────────

#[test]
fn check_rejects_wildcard_and_sentinels() {
    assert_violation(check(ExtendedType::Wildcard, ExtendedType::flattened(P)));
    assert_violation(check(ExtendedType::flattened(P), ExtendedType::Wildcard));
    assert_violation(check(ExtendedType::Void, ExtendedType::INT));
    assert_violation(check(ExtendedType::INT, ExtendedType::Uninitialized));
}

#[test]
fn contract_violation_is_distinguishable() {
    let err = check(ExtendedType::Void, ExtendedType::INT).unwrap_err();
    assert!(err.is_contract_violation());
    let err = check(ExtendedType::LONG, ExtendedType::INT).unwrap_err();
    assert!(!err.is_contract_violation());
}

// ── Argument positions ──────────────────────────────────────────

#[test]
fn wildcard_argument_substitutes_identity() {
    assert_eq!(
        check_arg(ExtendedType::flattened(P), ExtendedType::Wildcard),
        Ok(CastFlags::SUBSTITUTE | HAS)
    );
    assert_eq!(
        check_arg(ExtendedType::boxed(P), ExtendedType::Wildcard),
        Ok(CastFlags::SUBSTITUTE | CastFlags::UNBOX | HAS)
    );
    assert_eq!(
        check_arg(vt_array(P, Repr::Flattened, 1), ExtendedType::array(Element::Wildcard, 1)),
        Ok(CastFlags::SUBSTITUTE | HAS)
    );
}

#[test]
fn wildcard_argument_with_depth_mismatch_is_rejected() {
    assert_incompatible(check_arg(ExtendedType::flattened(P), ExtendedType::array(Element::Wildcard, 1)));
}

#[test]
fn wildcard_argument_from_non_value_type_does_not_substitute() {
    assert_eq!(check_arg(ExtendedType::INT, ExtendedType::Wildcard), Ok(CastFlags::NO_SUBSTITUTION));
    assert_eq!(check_arg(ExtendedType::OBJECT, ExtendedType::Wildcard), Ok(CastFlags::NO_SUBSTITUTION));
}

#[test]
fn argument_without_wildcard_follows_ordinary_rules() {
    assert_eq!(
        check_arg(ExtendedType::boxed(P), ExtendedType::flattened(P)),
        check(ExtendedType::boxed(P), ExtendedType::flattened(P))
    );
    assert_incompatible(check_arg(ExtendedType::LONG, ExtendedType::INT));
}

#[test]
fn argument_contract() {
    assert_violation(check_arg(ExtendedType::Wildcard, ExtendedType::flattened(P)));
    assert_violation(check_arg(ExtendedType::Void, ExtendedType::INT));
    assert_violation(check_arg(ExtendedType::INT, ExtendedType::Uninitialized));
}

// ── Frame merges ────────────────────────────────────────────────

#[test]
fn uninitialized_slot_adopts_value_type() {
    assert_eq!(
        check_frame(ExtendedType::Uninitialized, ExtendedType::flattened(P)),
        Ok(HAS | CastFlags::UNINITIALIZED_VALUE_TYPE)
    );
    assert_eq!(
        check_frame(ExtendedType::Void, vt_array(P, Repr::Boxed, 1)),
        Ok(HAS | CastFlags::UNINITIALIZED_VALUE_TYPE)
    );
    assert_eq!(check_frame(ExtendedType::Uninitialized, ExtendedType::INT), Ok(CastFlags::SUCCESS));
}

#[test]
fn flattened_value_into_void_is_discarded() {
    assert_eq!(
        check_frame(ExtendedType::flattened(P), ExtendedType::Void),
        Ok(HAS | CastFlags::DISCARD)
    );
    assert_eq!(check_frame(ExtendedType::boxed(P), ExtendedType::Void), Ok(CastFlags::SUCCESS));
    assert_eq!(check_frame(ExtendedType::LONG, ExtendedType::Void), Ok(CastFlags::SUCCESS));
}

#[test]
fn frame_without_sentinels_follows_ordinary_rules() {
    assert_eq!(
        check_frame(ExtendedType::flattened(P), ExtendedType::boxed(P)),
        Ok(CastFlags::BOX | HAS)
    );
    assert_violation(check_frame(ExtendedType::Wildcard, ExtendedType::flattened(P)));
}
