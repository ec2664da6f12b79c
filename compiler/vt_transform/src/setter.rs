//! Setter capability detection.
//!
//! Two overloaded setters, one taking the boxed value type and one taking
//! its flattened `long`, become indistinguishable once parameters are
//! flattened. The transformer asks a [`SetterDetector`] which methods are
//! setter candidates and keeps only the first of each flattened shape.

use vt_ir::AccessFlags;
use vt_types::{parse_method_descriptor, ExtendedType, MappingRegistry};

/// Shape predicates over a method declaration.
pub trait SetterDetector {
    /// The method looks like a setter taking a value type.
    fn is_value_type_setter(
        &self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        registry: &MappingRegistry,
    ) -> bool;

    /// The method looks like a setter that already takes the flattened form
    /// of some value type.
    fn is_flattened_setter(
        &self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        registry: &MappingRegistry,
    ) -> bool;
}

/// Naming heuristic: an instance method `setX` returning `void`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NamingSetterDetector;

impl NamingSetterDetector {
    /// Parameters of a method shaped like a setter, or `None`.
    fn setter_params(
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        registry: &MappingRegistry,
    ) -> Option<Vec<ExtendedType>> {
        if access.is_static() || !has_setter_name(name) {
            return None;
        }
        let method = parse_method_descriptor(descriptor, registry).ok()?;
        if method.ret != ExtendedType::Void {
            return None;
        }
        Some(method.params.into_vec())
    }
}

impl SetterDetector for NamingSetterDetector {
    fn is_value_type_setter(
        &self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        registry: &MappingRegistry,
    ) -> bool {
        Self::setter_params(access, name, descriptor, registry)
            .is_some_and(|params| params.iter().any(|p| p.is_value_type()))
    }

    fn is_flattened_setter(
        &self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        registry: &MappingRegistry,
    ) -> bool {
        if registry.is_empty() {
            return false;
        }
        Self::setter_params(access, name, descriptor, registry)
            .is_some_and(|params| params.contains(&ExtendedType::LONG))
    }
}

/// `set` followed by an uppercase letter.
fn has_setter_name(name: &str) -> bool {
    name.strip_prefix("set")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

/// Erased signature of a method: its name and parameter list, without the
/// return type.
pub fn erased_signature(name: &str, descriptor: &str) -> String {
    let params = match descriptor.find(')') {
        Some(end) => &descriptor[..=end],
        None => descriptor,
    };
    format!("{name}{params}")
}
