//! Accessor registry: one compiled accessor per property identity.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use propcache_core::{AccessError, AccessResult, Accessor, PropertyId, PropertyInfo, TypeHash, catalog, compiler};
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::CacheOptions;

static ACCESSORS: LazyLock<Arc<AccessorRegistry>> = LazyLock::new(|| Arc::new(AccessorRegistry::new()));

/// The global accessor registry.
pub fn accessors() -> &'static Arc<AccessorRegistry> {
    &ACCESSORS
}

/// Thread-safe multiton of compiled accessors keyed by [`PropertyId`].
///
/// Lookups of published accessors take only a shard read lock. A first
/// request compiles under the shard's entry lock, so concurrent first
/// requests for the same property observe a single instance.
pub struct AccessorRegistry {
    accessors: DashMap<PropertyId, Arc<Accessor>, FxBuildHasher>,
}

impl AccessorRegistry {
    /// Create an empty registry with default capacity.
    pub fn new() -> Self {
        Self::with_options(&CacheOptions::default())
    }

    /// Create an empty registry sized by `options`.
    pub fn with_options(options: &CacheOptions) -> Self {
        Self {
            accessors: DashMap::with_capacity_and_hasher(options.registry_capacity, FxBuildHasher),
        }
    }

    /// Get the accessor for a property, compiling it on first request.
    ///
    /// A failed compile publishes nothing, so a later request retries.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get(&self, property: &PropertyInfo) -> AccessResult<Arc<Accessor>> {
        let id = property.id();
        if let Some(existing) = self.accessors.get(&id) {
            return Ok(Arc::clone(existing.value()));
        }

        match self.accessors.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let accessor = Arc::new(compiler::compile(property)?);
                entry.insert(Arc::clone(&accessor));
                Ok(accessor)
            }
        }
    }

    /// Get the accessor for a property named on a cataloged type.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the name is blank, the type is not cataloged or
    /// does not declare the property.
    pub fn get_by_name(&self, declaring: TypeHash, name: &str) -> AccessResult<Arc<Accessor>> {
        if name.trim().is_empty() {
            return Err(AccessError::invalid_argument("property name must not be blank"));
        }
        let info = catalog()
            .get(declaring)
            .ok_or_else(|| AccessError::invalid_argument(format!("unknown type {declaring}")))?;
        let property = info.find_property(name).ok_or_else(|| {
            AccessError::invalid_argument(format!("type '{}' declares no property '{name}'", info.name))
        })?;
        self.get(property)
    }

    /// Publish a pre-built accessor without validation.
    ///
    /// Returns the registry's accessor for that identity, which is `accessor`
    /// only if none was published before.
    pub fn insert(&self, accessor: Accessor) -> Arc<Accessor> {
        let id = accessor.id().clone();
        trace!(property = %id, "publishing accessor");
        Arc::clone(
            self.accessors
                .entry(id)
                .or_insert_with(|| Arc::new(accessor))
                .value(),
        )
    }

    /// Check if an accessor is published for `id`.
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.accessors.contains_key(id)
    }

    /// Number of published accessors.
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Check if no accessors are published.
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl Default for AccessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
