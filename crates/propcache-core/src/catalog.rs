//! Process-wide type metadata catalog.
//!
//! The catalog maps type hashes to [`TypeInfo`] and indexes the base
//! projections and interface casts that checked reference casts walk.
//! Registration is insert-if-absent: the first description of a type wins and
//! is never replaced.
//!
//! Types submitted as [`Registration`]s (every `#[derive(Reflect)]` struct
//! submits one) are registered when the global catalog is first used, so a
//! base-class or interface accessor reaches a derived instance even if
//! nothing has looked the derived type up yet.

use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::cast::{BaseProjection, InterfaceCast};
use crate::type_info::ErasedCast;
use crate::{AccessError, AccessResult, PropertyInfo, Reflect, TypeHash, TypeInfo, TypeRef};

static CATALOG: LazyLock<TypeCatalog> = LazyLock::new(|| {
    let catalog = TypeCatalog::new();
    for registration in inventory::iter::<Registration> {
        catalog.register((registration.type_info)());
    }
    trace!(types = catalog.len(), "collected type registrations");
    catalog
});

/// A type described at compile time, registered when the global catalog is
/// first initialised.
///
/// Hand-written [`Reflect`] impls opt in the same way the derive does:
///
/// ```ignore
/// propcache::inventory::submit! {
///     propcache::Registration::new(<Dog as propcache::Reflect>::type_info)
/// }
/// ```
pub struct Registration {
    type_info: fn() -> TypeInfo,
}

impl Registration {
    pub const fn new(type_info: fn() -> TypeInfo) -> Self {
        Self { type_info }
    }
}

inventory::collect!(Registration);

/// The global type catalog.
pub fn catalog() -> &'static TypeCatalog {
    &CATALOG
}

/// Thread-safe catalog of type metadata.
pub struct TypeCatalog {
    types: DashMap<TypeHash, Arc<TypeInfo>, FxBuildHasher>,
    /// Concrete type -> projection to its embedded base.
    upcasts: DashMap<TypeId, BaseProjection, FxBuildHasher>,
    /// (concrete type, interface type) -> erased `InterfaceCast`.
    interface_casts: DashMap<(TypeId, TypeId), ErasedCast, FxBuildHasher>,
    names: DashMap<TypeId, Arc<str>, FxBuildHasher>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            types: DashMap::with_hasher(FxBuildHasher),
            upcasts: DashMap::with_hasher(FxBuildHasher),
            interface_casts: DashMap::with_hasher(FxBuildHasher),
            names: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Register a type. Returns the cataloged instance, which is `info` only
    /// if the type was not registered before.
    ///
    /// Bases that can resolve themselves are registered too, so casts through
    /// a derived instance work before the base is looked up directly.
    pub fn register(&self, info: TypeInfo) -> Arc<TypeInfo> {
        let info = match self.types.entry(info.type_hash) {
            Entry::Occupied(entry) => return Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                self.index(&info);
                let info = Arc::new(info);
                entry.insert(Arc::clone(&info));
                info
            }
        };
        trace!(name = %info.name, hash = %info.type_hash, "registered type");

        let bases = info
            .base_class
            .iter()
            .map(|base| &base.type_ref)
            .chain(info.interfaces.iter().map(|interface| &interface.type_ref));
        for base in bases {
            if let Some(resolve) = base.resolve
                && !self.contains(base.hash)
            {
                self.register(resolve());
            }
        }

        info
    }

    /// Register the Rust type `T` if it is not registered yet.
    pub fn register_type<T: Reflect + ?Sized>(&self) -> Arc<TypeInfo> {
        match self.get(T::type_hash()) {
            Some(info) => info,
            None => self.register(T::type_info()),
        }
    }

    fn index(&self, info: &TypeInfo) {
        let Some(type_id) = info.type_id else {
            return;
        };
        self.names
            .entry(type_id)
            .or_insert_with(|| Arc::clone(&info.name));

        if let Some(projection) = info.base_class.as_ref().and_then(|base| base.projection.clone()) {
            self.upcasts.insert(type_id, projection);
        }
        for interface in &info.interfaces {
            if let (Some(cast), Some(interface_id)) = (&interface.cast, interface.type_ref.type_id) {
                self.interface_casts
                    .insert((type_id, interface_id), Arc::clone(cast));
            }
        }
    }

    /// Look up a type by hash.
    pub fn get(&self, hash: TypeHash) -> Option<Arc<TypeInfo>> {
        self.types.get(&hash).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a type is registered.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a type reference, registering it on first use.
    pub fn resolve(&self, type_ref: &TypeRef) -> AccessResult<Arc<TypeInfo>> {
        if let Some(info) = self.get(type_ref.hash) {
            return Ok(info);
        }
        match type_ref.resolve {
            Some(resolve) => Ok(self.register(resolve())),
            None => Err(AccessError::invalid_argument(format!(
                "unknown type '{}' ({})",
                type_ref.name, type_ref.hash
            ))),
        }
    }

    /// Find a directly declared property of a registered type.
    pub fn property(&self, hash: TypeHash, name: &str) -> Option<PropertyInfo> {
        self.types
            .get(&hash)
            .and_then(|entry| entry.find_property(name).cloned())
    }

    /// Name of a registered Rust type.
    pub fn name_of(&self, type_id: TypeId) -> Option<Arc<str>> {
        self.names.get(&type_id).map(|name| Arc::clone(name.value()))
    }

    /// Project an instance to its embedded base, if its type has one.
    pub fn project_ref<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        let projection = Arc::clone(&self.upcasts.get(&Any::type_id(instance))?.as_ref);
        projection(instance)
    }

    /// Mutable counterpart of [`project_ref`](Self::project_ref).
    pub fn project_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let projection = Arc::clone(&self.upcasts.get(&Any::type_id(&*instance))?.as_mut);
        projection(instance)
    }

    /// Cast from the concrete type `concrete` to the interface `I`.
    pub fn interface_cast<I: ?Sized + 'static>(&self, concrete: TypeId) -> Option<InterfaceCast<I>> {
        let erased = Arc::clone(self.interface_casts.get(&(concrete, TypeId::of::<I>()))?.value());
        erased.downcast_ref::<InterfaceCast<I>>().cloned()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
