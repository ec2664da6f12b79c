//! JVM access flags for classes, fields and methods.
//!
//! The bit values are the ones used by the class-file format, so flags read
//! from a parsed class can be wrapped with [`AccessFlags::from_bits_retain`]
//! without translation.

use bitflags::bitflags;

bitflags! {
    /// Access and property flags of a class, field or method.
    ///
    /// Some bits are shared between declaration kinds (`SYNCHRONIZED` on a
    /// method is `SUPER` on a class, `VOLATILE` on a field is `BRIDGE` on a
    /// method); only the method/field meanings are named here.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        /// Field: volatile. Method: compiler-generated bridge.
        const BRIDGE = 0x0040;
        /// Field: transient. Method: variable arity.
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

impl AccessFlags {
    /// Check if the declaration is static.
    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }
}
