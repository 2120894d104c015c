//! Process-wide caches for property accessors.
//!
//! - [`AccessorRegistry`]: one compiled [`Accessor`](propcache_core::Accessor) per property
//! - [`TypeAccessorTable`]: every accessible property of one type, by name
//! - [`TableCache`] / [`TableCaches`]: lazily built tables for the ALL and
//!   PUBLIC_ONLY visibility views
//!
//! All caches are append-only. Entries are published once and never replaced
//! or removed.

mod accessors;
mod builder;
mod options;
mod table;
mod tables;

#[cfg(test)]
mod fixtures;

pub use accessors::{AccessorRegistry, accessors};
pub use options::CacheOptions;
pub use table::TypeAccessorTable;
pub use tables::{TableCache, TableCaches};
