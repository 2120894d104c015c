//! Typed front door: the accessor tables of a Rust type, resolved once.

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use propcache_core::{AccessResult, Accessor, Reflect, TypeInfo};
use propcache_registry::{TableCaches, TypeAccessorTable};
use rustc_hash::FxBuildHasher;
use tracing::debug;

static FRONT_DOORS: LazyLock<DashMap<TypeId, Arc<TypedAccessors>, FxBuildHasher>> =
    LazyLock::new(|| DashMap::with_hasher(FxBuildHasher));

/// Both visibility views of one type's accessors.
///
/// Built eagerly by [`TypedAccessors::of`] and shared by every later call for
/// the same type.
#[derive(Debug)]
pub struct TypedAccessors {
    type_info: Arc<TypeInfo>,
    all: Arc<TypeAccessorTable>,
    public: Arc<TypeAccessorTable>,
    all_accessors: Vec<Arc<Accessor>>,
    public_accessors: Vec<Arc<Accessor>>,
}

impl TypedAccessors {
    /// The front door for `T`, resolving both tables on first use.
    ///
    /// A failed resolution is not remembered, so a later call retries.
    pub fn of<T: Reflect + ?Sized>() -> AccessResult<Arc<Self>> {
        let key = TypeId::of::<T>();
        if let Some(existing) = FRONT_DOORS.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        let resolved = Arc::new(Self::resolve::<T>()?);
        let published = FRONT_DOORS.entry(key).or_insert(resolved);
        Ok(Arc::clone(published.value()))
    }

    fn resolve<T: Reflect + ?Sized>() -> AccessResult<Self> {
        let caches = TableCaches::global();
        let all = caches.all().get_table_of::<T>()?;
        let public = caches.public().get_table_of::<T>()?;
        let type_info = propcache_core::catalog().register_type::<T>();
        debug!(
            type_name = %type_info.name,
            all = all.len(),
            public = public.len(),
            "resolved typed accessors"
        );

        Ok(Self {
            all_accessors: all.to_vec(),
            public_accessors: public.to_vec(),
            type_info,
            all,
            public,
        })
    }

    /// Metadata of the type.
    pub fn type_info(&self) -> &Arc<TypeInfo> {
        &self.type_info
    }

    /// Table of every instance property.
    pub fn all(&self) -> &Arc<TypeAccessorTable> {
        &self.all
    }

    /// Table of the properties that are public overall.
    pub fn public(&self) -> &Arc<TypeAccessorTable> {
        &self.public
    }

    pub fn all_accessors(&self) -> &[Arc<Accessor>] {
        &self.all_accessors
    }

    pub fn public_accessors(&self) -> &[Arc<Accessor>] {
        &self.public_accessors
    }

    /// Look up a property in the ALL table.
    pub fn get(&self, name: &str) -> Option<&Arc<Accessor>> {
        self.all.get(name)
    }
}

/// Zero-sized handle to the accessors of `T`.
///
/// ```ignore
/// let name = Properties::<Animal>::get("Name")?.expect("declared");
/// ```
pub struct Properties<T: ?Sized>(PhantomData<fn() -> *const T>);

impl<T: Reflect + ?Sized> Properties<T> {
    /// Shared front door of `T`.
    pub fn accessors() -> AccessResult<Arc<TypedAccessors>> {
        TypedAccessors::of::<T>()
    }

    pub fn all() -> AccessResult<Arc<TypeAccessorTable>> {
        Ok(Arc::clone(TypedAccessors::of::<T>()?.all()))
    }

    pub fn public() -> AccessResult<Arc<TypeAccessorTable>> {
        Ok(Arc::clone(TypedAccessors::of::<T>()?.public()))
    }

    /// Accessor for one property of `T`, or `None` if `T` has no such property.
    pub fn get(name: &str) -> AccessResult<Option<Arc<Accessor>>> {
        Ok(TypedAccessors::of::<T>()?.get(name).cloned())
    }
}
