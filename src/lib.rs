//! Cached, type-erased property accessors.
//!
//! A type describes itself through [`Reflect`], usually with
//! `#[derive(Reflect)]`. The first request for a property compiles an
//! [`Accessor`] that reads and writes it on an opaque instance. Every later
//! request for the same property returns the same accessor.
//!
//! Per-type tables merge inherited properties: a class extends its base
//! class's table, and an interface unions its base interfaces' tables with
//! the first one declared winning a name collision. Each type has an ALL and
//! a PUBLIC_ONLY table.
//!
//! # Example
//!
//! ```ignore
//! use propcache::{Properties, Reflect, Value};
//!
//! #[derive(Reflect)]
//! struct Animal {
//!     #[reflect(get, set, name = "Name")]
//!     name: String,
//! }
//!
//! let mut rex = Animal { name: "rex".into() };
//! let name = Properties::<Animal>::get("Name")?.expect("declared");
//! name.set(&mut rex, Value::String("max".into()))?;
//! assert_eq!(name.get(&rex)?, Value::String("max".into()));
//! ```

mod provider;
mod typed;

pub use provider::{accessor_of, accessors_of, get_accessor, get_accessors, internal};
pub use typed::{Properties, TypedAccessors};

pub use propcache_core::{
    AccessError, AccessResult, Accessor, AccessorRef, BaseClass, BoundMembers, ConversionError, InterfaceRef,
    PropertyBinding, PropertyBuilder, PropertyId, PropertyInfo, PropertyValue, Reflect, Registration, TypeBuilder,
    TypeCatalog, TypeCategory, TypeHash, TypeInfo, TypeKind, TypeRef, TypedBinding, Value, ValueType, Visibility,
    VisibilityPolicy, cast, catalog, compiler, delegates, hash_constants,
};
pub use propcache_registry::{
    AccessorRegistry, CacheOptions, TableCache, TableCaches, TypeAccessorTable, accessors,
};

#[doc(hidden)]
pub use propcache_core::inventory;

/// Derive macro for [`Reflect`].
#[cfg(feature = "derive")]
pub use propcache_macros::Reflect;
