use pretty_assertions::assert_eq;

use super::*;

const P: ValueTypeId = ValueTypeId::from_raw(0);
const Q: ValueTypeId = ValueTypeId::from_raw(1);

fn vt_array(repr: Repr, depth: u8) -> ExtendedType {
    ExtendedType::array(Element::Value(P, repr), depth)
}

// ── Construction ────────────────────────────────────────────────

#[test]
fn array_of_depth_zero_is_the_element() {
    assert_eq!(ExtendedType::array(Element::Basic(BaseKind::Int), 0), ExtendedType::INT);
    assert_eq!(ExtendedType::array(Element::Value(P, Repr::Boxed), 0), ExtendedType::boxed(P));
    assert_eq!(ExtendedType::array(Element::Wildcard, 0), ExtendedType::Wildcard);
}

#[test]
fn hand_built_zero_depth_array_does_not_underflow() {
    let bogus = ExtendedType::Array(Element::Value(P, Repr::Boxed), 0);
    assert_eq!(bogus.element(), Some(ExtendedType::boxed(P)));
}

// ── Predicates ──────────────────────────────────────────────────

#[test]
fn value_type_predicates() {
    let boxed = ExtendedType::boxed(P);
    let flat = ExtendedType::flattened(P);

    assert!(boxed.is_value_type());
    assert!(boxed.is_boxed_value_type());
    assert!(!boxed.is_array());
    assert!(!boxed.is_flattened_value_type());
    assert!(!boxed.is_flattened_scalar());

    assert!(flat.is_value_type());
    assert!(flat.is_flattened_value_type());
    assert!(flat.is_flattened_scalar());
    assert!(!flat.is_boxed_value_type());

    let flat_array = vt_array(Repr::Flattened, 2);
    assert!(flat_array.is_value_type());
    assert!(flat_array.is_flattened_value_type());
    assert!(!flat_array.is_flattened_scalar());
    assert!(flat_array.is_array());
    assert_eq!(flat_array.array_depth(), 2);
}

#[test]
fn wildcard_is_a_flattened_value_type_without_identity() {
    let wild = ExtendedType::Wildcard;
    assert!(wild.is_value_type());
    assert!(wild.is_wildcard());
    assert!(wild.is_flattened_scalar());
    assert_eq!(wild.repr(), Some(Repr::Flattened));
    assert_eq!(wild.value_type_id(), None);

    let wild_array = ExtendedType::array(Element::Wildcard, 1);
    assert!(wild_array.is_wildcard());
    assert!(!wild_array.is_flattened_scalar());
}

#[test]
fn builtin_types_are_not_value_types() {
    for ty in [
        ExtendedType::INT,
        ExtendedType::LONG,
        ExtendedType::FLOAT,
        ExtendedType::DOUBLE,
        ExtendedType::OBJECT,
        ExtendedType::NULL,
        ExtendedType::array(Element::Basic(BaseKind::Long), 1),
        ExtendedType::Void,
        ExtendedType::Uninitialized,
    ] {
        assert!(!ty.is_value_type(), "{ty:?} must not be a value type");
        assert_eq!(ty.repr(), None);
        assert_eq!(ty.value_type_id(), None);
    }
}

#[test]
fn reference_classification() {
    assert!(ExtendedType::OBJECT.is_reference());
    assert!(ExtendedType::NULL.is_reference());
    assert!(ExtendedType::boxed(P).is_reference());
    assert!(vt_array(Repr::Flattened, 1).is_reference());
    assert!(ExtendedType::array(Element::Basic(BaseKind::Int), 1).is_reference());

    assert!(!ExtendedType::flattened(P).is_reference());
    assert!(!ExtendedType::INT.is_reference());
    assert!(!ExtendedType::Wildcard.is_reference());
    assert!(!ExtendedType::Void.is_reference());

    assert!(ExtendedType::OBJECT.is_plain_scalar_ref());
    assert!(!ExtendedType::boxed(P).is_plain_scalar_ref());
    assert!(!ExtendedType::array(Element::Basic(BaseKind::ObjectRef), 1).is_plain_scalar_ref());
}

#[test]
fn identity_and_depth_comparison() {
    let a = ExtendedType::boxed(P);
    let b = vt_array(Repr::Flattened, 3);
    let c = ExtendedType::flattened(Q);

    assert!(ExtendedType::same_value_type_identity(a, b));
    assert!(!ExtendedType::same_value_type_identity(a, c));
    assert!(!ExtendedType::same_value_type_identity(ExtendedType::Wildcard, ExtendedType::Wildcard));
    assert!(!ExtendedType::same_value_type_identity(ExtendedType::OBJECT, ExtendedType::OBJECT));

    assert!(ExtendedType::same_array_depth(a, c));
    assert!(!ExtendedType::same_array_depth(a, b));
}

// ── Projections ─────────────────────────────────────────────────

#[test]
fn element_strips_exactly_one_level() {
    let ty = vt_array(Repr::Boxed, 3);
    let elem = ty.element();
    assert_eq!(elem, Some(vt_array(Repr::Boxed, 2)));
    assert_eq!(vt_array(Repr::Boxed, 1).element(), Some(ExtendedType::boxed(P)));
    assert_eq!(ExtendedType::boxed(P).element(), None);
}

#[test]
fn base_element_strips_all_levels() {
    assert_eq!(vt_array(Repr::Flattened, 4).base_element(), ExtendedType::flattened(P));
    assert_eq!(ExtendedType::INT.base_element(), ExtendedType::INT);
}

#[test]
fn representation_switch() {
    assert_eq!(ExtendedType::boxed(P).to_flattened(), ExtendedType::flattened(P));
    assert_eq!(ExtendedType::flattened(P).to_boxed(), ExtendedType::boxed(P));
    assert_eq!(vt_array(Repr::Boxed, 2).to_flattened(), vt_array(Repr::Flattened, 2));
    assert_eq!(ExtendedType::INT.to_flattened(), ExtendedType::INT);
    assert_eq!(ExtendedType::Wildcard.to_boxed(), ExtendedType::Wildcard);
}

// ── Display ─────────────────────────────────────────────────────

#[test]
fn short_printable_names() {
    let cases = [
        (ExtendedType::INT, "I32"),
        (ExtendedType::LONG, "I64"),
        (ExtendedType::FLOAT, "F32"),
        (ExtendedType::DOUBLE, "F64"),
        (ExtendedType::OBJECT, "Ref"),
        (ExtendedType::NULL, "Null"),
        (ExtendedType::boxed(P), "&VT"),
        (ExtendedType::flattened(P), "VT"),
        (ExtendedType::Wildcard, "?VT"),
        (ExtendedType::Void, "*"),
        (ExtendedType::Uninitialized, "*"),
        (vt_array(Repr::Boxed, 2), "&VT[][]"),
        (ExtendedType::array(Element::Basic(BaseKind::Long), 1), "I64[]"),
    ];
    for (ty, expected) in cases {
        assert_eq!(ty.to_string(), expected);
    }
}
