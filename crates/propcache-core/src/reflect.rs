//! The `Reflect` trait for describable types.
//!
//! Every type whose properties are accessed through the cache implements
//! [`Reflect`]. It supplies the type's identity and metadata and the checked
//! casts from an opaque instance.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use propcache_core::{PropertyInfo, Reflect, TypeInfo, Visibility};
//!
//! struct Counter {
//!     count: u32,
//! }
//!
//! impl Reflect for Counter {
//!     fn type_name() -> &'static str {
//!         "Counter"
//!     }
//!
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::class::<Counter>()
//!             .property(
//!                 PropertyInfo::build::<Counter, u32>("Count")
//!                     .get(Visibility::Public, |c| c.count)
//!                     .set(Visibility::Public, |c, v| c.count = v)
//!                     .build(),
//!             )
//!             .build()
//!     }
//!
//!     fn cast_ref(instance: &dyn Any) -> Option<&Self> {
//!         propcache_core::cast::class_ref::<Self>(instance)
//!     }
//!
//!     fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
//!         propcache_core::cast::class_mut::<Self>(instance)
//!     }
//! }
//!
//! assert_eq!(Counter::type_info().properties.len(), 1);
//! ```
//!
//! Interfaces implement `Reflect` for the trait object type:
//!
//! ```
//! use std::any::Any;
//! use propcache_core::{Reflect, TypeInfo};
//!
//! trait Named {
//!     fn name(&self) -> String;
//! }
//!
//! impl Reflect for dyn Named {
//!     fn type_name() -> &'static str {
//!         "Named"
//!     }
//!
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::interface::<dyn Named>().build()
//!     }
//!
//!     fn cast_ref(instance: &dyn Any) -> Option<&Self> {
//!         propcache_core::cast::interface_ref::<dyn Named>(instance)
//!     }
//!
//!     fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
//!         propcache_core::cast::interface_mut::<dyn Named>(instance)
//!     }
//! }
//! ```

use std::any::Any;

use crate::{TypeHash, TypeInfo};

/// Trait for types whose properties can be accessed through the cache.
///
/// `Self` may be unsized, which is how interfaces are described: implement
/// `Reflect` for `dyn Trait`.
///
/// # Derive Macro
///
/// Structs usually implement this trait with `#[derive(Reflect)]` from the
/// `propcache` crate.
pub trait Reflect: 'static {
    /// Qualified name of the type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Type hash computed from [`type_name`](Reflect::type_name).
    fn type_hash() -> TypeHash {
        TypeHash::from_name(Self::type_name())
    }

    /// Full type metadata: category, bases and directly declared properties.
    fn type_info() -> TypeInfo;

    /// Checked cast from an opaque instance to `&Self`.
    fn cast_ref(instance: &dyn Any) -> Option<&Self>;

    /// Checked cast from an opaque instance to `&mut Self`.
    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self>;
}
