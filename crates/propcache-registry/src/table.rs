//! Per-type accessor tables.

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use propcache_core::Accessor;
use rustc_hash::FxBuildHasher;

/// Name-to-accessor map in insertion order.
pub(crate) type Entries = IndexMap<Arc<str>, Arc<Accessor>, FxBuildHasher>;

static EMPTY: LazyLock<Arc<TypeAccessorTable>> = LazyLock::new(|| {
    Arc::new(TypeAccessorTable {
        entries: Entries::default(),
    })
});

/// Every accessible property of a type, keyed by name.
///
/// Inherited entries come first, then the type's own declarations. A table
/// never contains indexed properties and is never modified once published.
#[derive(Debug)]
pub struct TypeAccessorTable {
    entries: Entries,
}

impl TypeAccessorTable {
    /// The shared empty table.
    pub fn empty() -> Arc<Self> {
        Arc::clone(&EMPTY)
    }

    /// Wrap built entries, collapsing an empty result to the shared empty table.
    pub(crate) fn from_entries(entries: Entries) -> Arc<Self> {
        if entries.is_empty() {
            Self::empty()
        } else {
            Arc::new(Self { entries })
        }
    }

    /// Check if `table` is the shared empty table.
    pub fn is_shared_empty(table: &Arc<Self>) -> bool {
        Arc::ptr_eq(table, &EMPTY)
    }

    /// Look up an accessor by property name.
    pub fn get(&self, name: &str) -> Option<&Arc<Accessor>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, accessor)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Arc<Accessor>)> {
        self.entries.iter()
    }

    /// Property names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| &**name)
    }

    /// Accessors in table order.
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<Accessor>> {
        self.entries.values()
    }

    /// Clone the accessors into a vector.
    pub fn to_vec(&self) -> Vec<Arc<Accessor>> {
        self.entries.values().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a TypeAccessorTable {
    type Item = (&'a Arc<str>, &'a Arc<Accessor>);
    type IntoIter = indexmap::map::Iter<'a, Arc<str>, Arc<Accessor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
