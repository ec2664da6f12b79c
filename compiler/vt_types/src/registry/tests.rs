#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;

use super::*;

fn price_registry() -> (MappingRegistry, ValueTypeId) {
    let mut registry = MappingRegistry::new();
    let id = registry
        .register("com/example/Price", "com/example/PriceUtils")
        .unwrap();
    (registry, id)
}

fn sig(name: &str, descriptor: &str) -> MemberSig {
    MemberSig {
        name: name.to_owned(),
        descriptor: descriptor.to_owned(),
        is_static: false,
        is_method: true,
    }
}

#[test]
fn register_assigns_sequential_ids() {
    let mut registry = MappingRegistry::new();
    assert!(registry.is_empty());
    let a = registry.register("a/A", "a/AUtils").unwrap();
    let b = registry.register("b/B", "b/BUtils").unwrap();
    assert_eq!(a, ValueTypeId::from_raw(0));
    assert_eq!(b, ValueTypeId::from_raw(1));
    assert_eq!(registry.len(), 2);
}

#[test]
fn lookup_reports_representation() {
    let (registry, id) = price_registry();
    assert_eq!(registry.lookup("com/example/Price"), Some((id, Repr::Boxed)));
    assert_eq!(registry.lookup("com/example/PriceUtils"), Some((id, Repr::Flattened)));
    assert_eq!(registry.lookup("java/lang/String"), None);

    assert_eq!(registry.src_id("com/example/Price"), Some(id));
    assert_eq!(registry.src_id("com/example/PriceUtils"), None);
    assert_eq!(registry.dst_id("com/example/PriceUtils"), Some(id));
    assert!(registry.is_src_class("com/example/Price"));
    assert!(!registry.is_dst_class("com/example/Price"));
}

#[test]
fn class_name_by_representation() {
    let (registry, id) = price_registry();
    assert_eq!(registry.class_name(id, Repr::Boxed), Some("com/example/Price"));
    assert_eq!(registry.class_name(id, Repr::Flattened), Some("com/example/PriceUtils"));
    assert_eq!(registry.class_name(ValueTypeId::from_raw(7), Repr::Boxed), None);
}

#[test]
fn register_rejects_self_pairing() {
    let mut registry = MappingRegistry::new();
    assert_eq!(
        registry.register("a/A", "a/A"),
        Err(RegistryError::SelfPaired("a/A".to_owned()))
    );
    assert!(registry.is_empty());
}

#[test]
fn register_rejects_reused_classes() {
    let (mut registry, _) = price_registry();
    assert_eq!(
        registry.register("com/example/PriceUtils", "x/Other"),
        Err(RegistryError::AlreadyRegistered("com/example/PriceUtils".to_owned()))
    );
    assert_eq!(
        registry.register("x/Other", "com/example/Price"),
        Err(RegistryError::AlreadyRegistered("com/example/Price".to_owned()))
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("x/Other"), None);
}

#[test]
fn new_definitions_are_pending() {
    let (registry, id) = price_registry();
    let def = registry.get(id).unwrap();
    assert_eq!(def.src_state, ScanState::Pending);
    assert_eq!(def.dst_state, ScanState::Pending);
    assert!(!registry.is_fully_scanned(id));
}

#[test]
fn scan_completes_per_side() {
    let (mut registry, id) = price_registry();

    registry
        .complete_scan(id, Repr::Boxed, vec![sig("getAmount", "()J")])
        .unwrap();
    assert!(!registry.is_fully_scanned(id));
    assert_eq!(registry.get(id).unwrap().src_members, vec![sig("getAmount", "()J")]);

    registry
        .complete_scan(id, Repr::Flattened, vec![sig("getAmount", "(J)J")])
        .unwrap();
    assert!(registry.is_fully_scanned(id));
    assert_eq!(registry.get(id).unwrap().dst_members.len(), 1);
}

#[test]
fn complete_scan_of_unknown_id_fails() {
    let mut registry = MappingRegistry::new();
    let id = ValueTypeId::from_raw(3);
    assert_eq!(
        registry.complete_scan(id, Repr::Boxed, Vec::new()),
        Err(RegistryError::UnknownId(id))
    );
    assert!(!registry.is_fully_scanned(id));
}

#[test]
fn iter_in_registration_order() {
    let mut registry = MappingRegistry::new();
    registry.register("a/A", "a/AUtils").unwrap();
    registry.register("b/B", "b/BUtils").unwrap();
    let names: Vec<&str> = registry.iter().map(|def| def.src_class.as_str()).collect();
    assert_eq!(names, vec!["a/A", "b/B"]);
}
