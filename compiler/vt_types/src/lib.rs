//! Type layer of the value-type rewriter.
//!
//! This crate provides:
//!
//! - **Extended types** ([`ExtendedType`]): a small `Copy` value describing
//!   a type for rewriting purposes: a built-in kind, a value type in its
//!   boxed or flattened representation, an array of either, the wildcard
//!   placeholder, or one of the stack-frame sentinels.
//!
//! - **Cast oracle** ([`check`], [`check_arg`], [`check_frame`]): decides
//!   whether a value can move from one extended type to another and which
//!   conversions ([`CastFlags`]) that requires.
//!
//! - **Descriptor translation** ([`parse_descriptor`],
//!   [`to_original_descriptor`], [`to_flattened_descriptor`],
//!   [`transform_method_descriptor`]): between textual JVM descriptors and
//!   extended types.
//!
//! - **Mapping registry** ([`MappingRegistry`]): the declared value types,
//!   each pairing a boxed (source) class with its flattened (destination)
//!   class.
//!
//! # Reference compatibility
//!
//! The oracle does not walk class hierarchies. Any reference is assumed
//! assignable to any other reference, a plain object reference may widen to
//! a value-type array, and anything may be stored into a boxed value type.
//! The full list is on [`check`].

pub mod cast;
pub mod descriptor;
mod ext_type;
pub mod registry;
mod value_type;

pub use cast::{check, check_arg, check_frame, CastError, CastFlags};
pub use descriptor::{
    parse_descriptor, parse_method_descriptor, to_flattened_descriptor, to_original_descriptor,
    transform_field_descriptor, transform_method_descriptor, DescScope, DescriptorError,
    MethodDescriptor,
};
pub use ext_type::{BaseKind, Element, ExtendedType};
pub use registry::{MappingRegistry, MemberSig, RegistryError, ScanState, ValueTypeDef};
pub use value_type::{Repr, ValueTypeId};
