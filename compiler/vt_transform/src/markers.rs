//! Class-level annotation markers.
//!
//! Markers are matched by descriptor suffix, so they work regardless of the
//! package the annotation types are declared in.

/// Descriptor suffix of the annotation that excludes a class from rewriting.
pub const OPT_OUT_SUFFIX: &str = "/ValueTypeIgnore;";

/// Descriptor suffix of the annotation that forces a class to be rewritten.
pub const OPT_IN_SUFFIX: &str = "/ValueTypeTest;";

/// A recognized class marker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Marker {
    OptOut,
    OptIn,
}

impl Marker {
    /// Recognize an annotation descriptor.
    pub fn from_descriptor(descriptor: &str) -> Option<Marker> {
        if descriptor.ends_with(OPT_OUT_SUFFIX) {
            Some(Marker::OptOut)
        } else if descriptor.ends_with(OPT_IN_SUFFIX) {
            Some(Marker::OptIn)
        } else {
            None
        }
    }
}
