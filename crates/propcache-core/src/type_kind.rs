//! Memory semantics of declaring types and property value types.

/// Whether a type has value or reference semantics.
///
/// Value types are boxed into a fresh [`Value`](crate::Value) on every read and
/// unwrapped on every write. Reference types travel as shared handles and
/// pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// Copied on read, unwrapped on write.
    Value,
    /// Shared handle semantics.
    #[default]
    Reference,
}

impl TypeKind {
    /// Check if this is a value type.
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(self, TypeKind::Value)
    }

    /// Check if this is a reference type.
    #[inline]
    pub fn is_reference(self) -> bool {
        matches!(self, TypeKind::Reference)
    }
}

/// Whether a type describes a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeCategory {
    /// Concrete type with at most one base class.
    #[default]
    Class,
    /// Trait object type with any number of base interfaces.
    Interface,
}
