//! Core types for cached property access.
//!
//! This crate holds everything a single property accessor needs:
//!
//! - [`TypeHash`], [`TypeInfo`] and [`PropertyInfo`]: type and property metadata
//! - [`Reflect`]: the trait that describes a Rust type and casts opaque instances
//! - [`TypeCatalog`]: the process-wide metadata catalog
//! - [`Value`] and [`PropertyValue`]: the opaque value and its conversions
//! - [`compiler`]: builds an [`Accessor`] for one property
//!
//! Caching of accessors and per-type tables lives in `propcache-registry`.

mod accessor;
mod catalog;
mod convert;
mod error;
mod property_info;
mod reflect;
mod type_hash;
mod type_info;
mod type_kind;
mod value;
mod visibility;

pub mod cast;
pub mod compiler;
pub mod delegates;

pub use accessor::{Accessor, AccessorRef};
pub use catalog::{Registration, TypeCatalog, catalog};

#[doc(hidden)]
pub use inventory;
pub use convert::{PropertyValue, ValueType};
pub use delegates::{BoxedGetter, BoxedSetter, Getter, Setter};
pub use error::{AccessError, AccessResult, ConversionError};
pub use property_info::{BoundMembers, PropertyBinding, PropertyBuilder, PropertyId, PropertyInfo, TypedBinding};
pub use reflect::Reflect;
pub use type_hash::{TypeHash, hash_constants};
pub use type_info::{BaseClass, ErasedCast, InterfaceRef, TypeBuilder, TypeInfo, TypeRef};
pub use type_kind::{TypeCategory, TypeKind};
pub use value::Value;
pub use visibility::{Visibility, VisibilityPolicy};
