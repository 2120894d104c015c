//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash that identifies a declaring type. It is
//! computed from the type's qualified name, so the same name always yields the
//! same hash and metadata can refer to a type before it has been cataloged.
//!
//! # Examples
//!
//! ```
//! use propcache_core::TypeHash;
//!
//! let a = TypeHash::from_name("zoo::Animal");
//! let b = TypeHash::from_name("zoo::Animal");
//! assert_eq!(a, b);
//! assert_ne!(a, TypeHash::from_name("zoo::Dog"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;
}

/// A deterministic 64-bit hash identifying a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Reserved hash of the implicit root type every class ultimately derives from.
    ///
    /// Not computed from a name, so no user type can collide with it.
    pub const OBJECT: TypeHash = TypeHash(0xffff_ffff_ffff_fffd);

    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if this is the root type hash.
    #[inline]
    pub const fn is_object(self) -> bool {
        self.0 == Self::OBJECT.0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
