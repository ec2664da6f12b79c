//! Value-type rewriter IR.
//!
//! This crate holds the structured form a class is presented in before and
//! after rewriting:
//! - [`ClassHeader`], [`Annotation`], [`FieldDecl`], [`MethodDecl`]: the
//!   declarations of one class, with textual JVM descriptors
//! - [`ClassFile`]: an already-assembled class (header + members)
//! - [`ClassVisitor`]: the depth-first, single-pass event interface the
//!   rewriter is driven by and forwards to
//! - [`ClassFileBuilder`]: a terminal visitor that rebuilds a [`ClassFile`]
//!   from the events it receives
//!
//! # Design Philosophy
//!
//! - **Plain data**: declarations are owned values with `Clone + Eq + Hash`
//! - **One pass**: a class is walked once, annotations before fields before
//!   methods, and never revisited
//! - **Pass-through**: a visitor that does not care about an event forwards
//!   it unchanged

mod access;
mod class;
pub mod visitor;

pub use access::AccessFlags;
pub use class::{Annotation, ClassFile, ClassHeader, ConstValue, FieldDecl, MethodDecl};
pub use visitor::{walk_class, ClassFileBuilder, ClassVisitor};
