//! Class rewriting for value types.
//!
//! Drives the visitation of one class at a time: classifies it against the
//! [`MappingRegistry`](vt_types::MappingRegistry), rewrites the descriptors
//! of members that reference value types, collapses setters whose
//! flattened signatures coincide, and records the members of value-type
//! definition classes.
//!
//! # Entry Points
//!
//! - [`transform_class`]: rewrite a [`ClassFile`](vt_ir::ClassFile) with
//!   the default collaborators
//! - [`transform_class_with`]: same, with a custom [`SetterDetector`] and
//!   [`MethodRewriter`]
//! - [`ClassTransformer`]: the visitor itself, for chaining in front of
//!   another [`ClassVisitor`](vt_ir::ClassVisitor)
//!
//! # Processing
//!
//! Classes are processed one at a time. The registry is read during the
//! whole visitation and written only when a definition class ends.

mod context;
mod driver;
mod error;
pub mod markers;
mod mode;
mod options;
mod rewriter;
mod setter;
mod transformer;

pub use context::{ClassReport, DeletedSetter, ScalarField};
pub use driver::{transform_class, transform_class_with, TransformOutcome};
pub use error::TransformError;
pub use mode::{ClassMode, MemberPolicy};
pub use options::TransformOptions;
pub use rewriter::{MethodPlan, MethodRewriter, SignatureRewriter};
pub use setter::{erased_signature, NamingSetterDetector, SetterDetector};
pub use transformer::ClassTransformer;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Call this early in `main()` or test setup. Set `RUST_LOG` to control
/// output:
/// - `RUST_LOG=vt_transform=debug`: classification and per-class summaries
/// - `RUST_LOG=vt_transform=info`: the diagnostics of every class
///
/// Does nothing when `RUST_LOG` is unset, and only the first call has an
/// effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
