//! Type table caches, one per visibility view.

use std::sync::{Arc, LazyLock};

use parking_lot::{Mutex, RwLock};
use propcache_core::{
    AccessError, AccessResult, Accessor, Reflect, TypeHash, TypeInfo, TypeRef, VisibilityPolicy, catalog,
};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use crate::table::TypeAccessorTable;
use crate::{AccessorRegistry, CacheOptions, accessors, builder};

static TABLES: LazyLock<TableCaches> = LazyLock::new(|| TableCaches::new(Arc::clone(accessors())));

/// Types whose tables are being built by the current lock holder.
#[derive(Default)]
pub(crate) struct BuildState {
    in_progress: FxHashSet<TypeHash>,
}

/// Lazily populated cache of type tables under one visibility policy.
///
/// Hits are served under a read lock. Misses take the build mutex, re-check
/// and build, so each table is built once. The root type is pre-seeded with
/// the shared empty table.
pub struct TableCache {
    policy: VisibilityPolicy,
    tables: RwLock<FxHashMap<TypeHash, Arc<TypeAccessorTable>>>,
    build: Mutex<BuildState>,
    registry: Arc<AccessorRegistry>,
}

impl TableCache {
    /// Create a cache with default capacity.
    pub fn new(policy: VisibilityPolicy, registry: Arc<AccessorRegistry>) -> Self {
        Self::with_options(policy, registry, &CacheOptions::default())
    }

    /// Create a cache sized by `options`.
    pub fn with_options(policy: VisibilityPolicy, registry: Arc<AccessorRegistry>, options: &CacheOptions) -> Self {
        let mut tables = FxHashMap::with_capacity_and_hasher(options.table_capacity, FxBuildHasher);
        tables.insert(TypeHash::OBJECT, TypeAccessorTable::empty());
        Self {
            policy,
            tables: RwLock::new(tables),
            build: Mutex::new(BuildState::default()),
            registry,
        }
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    /// The registry accessors are resolved through.
    pub fn registry(&self) -> &Arc<AccessorRegistry> {
        &self.registry
    }

    /// Get the table for a type, building it on first request.
    ///
    /// # Errors
    ///
    /// Fails if a base type cannot be resolved, an inheritance cycle is
    /// found, or an admitted property cannot be compiled. Nothing is cached
    /// on failure.
    pub fn get_table(&self, info: &TypeInfo) -> AccessResult<Arc<TypeAccessorTable>> {
        if let Some(table) = self.cached(info.type_hash) {
            return Ok(table);
        }
        let mut state = self.build.lock();
        self.get_locked(&mut state, info)
    }

    /// Get the table for a cataloged type.
    pub fn get_table_by_hash(&self, hash: TypeHash) -> AccessResult<Arc<TypeAccessorTable>> {
        if let Some(table) = self.cached(hash) {
            return Ok(table);
        }
        let info = catalog()
            .get(hash)
            .ok_or_else(|| AccessError::invalid_argument(format!("unknown type {hash}")))?;
        self.get_table(&info)
    }

    /// Get the table for the Rust type `T`.
    pub fn get_table_of<T: Reflect + ?Sized>(&self) -> AccessResult<Arc<TypeAccessorTable>> {
        if let Some(table) = self.cached(T::type_hash()) {
            return Ok(table);
        }
        let info = catalog().register_type::<T>();
        self.get_table(&info)
    }

    /// Look up one property's accessor. An absent property is `Ok(None)`.
    pub fn get_accessor(&self, info: &TypeInfo, name: &str) -> AccessResult<Option<Arc<Accessor>>> {
        let table = self.get_table(info)?;
        Ok(table.get(name).cloned())
    }

    /// Already published table, without building.
    pub fn cached(&self, hash: TypeHash) -> Option<Arc<TypeAccessorTable>> {
        self.tables.read().get(&hash).cloned()
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.tables.read().contains_key(&hash)
    }

    /// Number of published tables, the root included.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    /// Get or build a table while holding the build lock.
    pub(crate) fn get_locked(&self, state: &mut BuildState, info: &TypeInfo) -> AccessResult<Arc<TypeAccessorTable>> {
        if let Some(table) = self.cached(info.type_hash) {
            return Ok(table);
        }
        if !state.in_progress.insert(info.type_hash) {
            return Err(AccessError::invalid_argument(format!(
                "type '{}' inherits from itself",
                info.name
            )));
        }

        let built = builder::build(self, state, info);
        state.in_progress.remove(&info.type_hash);
        let table = built?;

        let mut tables = self.tables.write();
        Ok(Arc::clone(tables.entry(info.type_hash).or_insert(table)))
    }

    /// Resolve a base reference and get or build its table while holding the build lock.
    pub(crate) fn get_locked_ref(&self, state: &mut BuildState, type_ref: &TypeRef) -> AccessResult<Arc<TypeAccessorTable>> {
        if let Some(table) = self.cached(type_ref.hash) {
            return Ok(table);
        }
        let info = catalog().resolve(type_ref)?;
        self.get_locked(state, &info)
    }
}

/// The ALL and PUBLIC_ONLY table caches over one accessor registry.
pub struct TableCaches {
    all: TableCache,
    public: TableCache,
}

impl TableCaches {
    pub fn new(registry: Arc<AccessorRegistry>) -> Self {
        Self::with_options(registry, &CacheOptions::default())
    }

    pub fn with_options(registry: Arc<AccessorRegistry>, options: &CacheOptions) -> Self {
        Self {
            all: TableCache::with_options(VisibilityPolicy::All, Arc::clone(&registry), options),
            public: TableCache::with_options(VisibilityPolicy::PublicOnly, registry, options),
        }
    }

    /// The global caches over the global registry.
    pub fn global() -> &'static TableCaches {
        &TABLES
    }

    pub fn all(&self) -> &TableCache {
        &self.all
    }

    pub fn public(&self) -> &TableCache {
        &self.public
    }

    /// Select the cache for `policy`.
    pub fn for_policy(&self, policy: VisibilityPolicy) -> &TableCache {
        match policy {
            VisibilityPolicy::All => &self.all,
            VisibilityPolicy::PublicOnly => &self.public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Animal, Dog, IA, IB, IC, ID, IE, Puppy, Widget, open_list};
    use propcache_core::{TypeCategory, Value};

    fn caches() -> TableCaches {
        TableCaches::new(Arc::new(AccessorRegistry::new()))
    }

    fn names(table: &TypeAccessorTable) -> Vec<&str> {
        table.names().collect()
    }

    #[test]
    fn root_is_pre_seeded() {
        let caches = caches();
        for cache in [caches.all(), caches.public()] {
            let root = cache.cached(TypeHash::OBJECT).unwrap();
            assert!(TypeAccessorTable::is_shared_empty(&root));
            assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn animal_dog_scenario() {
        let caches = caches();
        let dog = Dog::type_info();

        let all = caches.all().get_table(&dog).unwrap();
        assert_eq!(names(&all), ["Name", "Age", "Breed"]);

        let public = caches.public().get_table(&dog).unwrap();
        assert_eq!(names(&public), ["Name", "Age"]);
    }

    #[test]
    fn public_is_subset_with_identical_accessors() {
        let caches = caches();
        for info in [Animal::type_info(), Dog::type_info(), Puppy::type_info()] {
            let all = caches.all().get_table(&info).unwrap();
            let public = caches.public().get_table(&info).unwrap();
            for (name, accessor) in public.iter() {
                assert!(Arc::ptr_eq(accessor, all.get(name).unwrap()));
            }
        }
    }

    #[test]
    fn inherited_accessor_is_the_base_accessor() {
        let caches = caches();
        let animal = caches.all().get_table(&Animal::type_info()).unwrap();
        let dog = caches.all().get_table(&Dog::type_info()).unwrap();
        assert!(Arc::ptr_eq(animal.get("Name").unwrap(), dog.get("Name").unwrap()));
    }

    #[test]
    fn derived_redeclaration_overrides() {
        let caches = caches();
        let table = caches.all().get_table(&Puppy::type_info()).unwrap();

        let name = table.get("Name").unwrap();
        assert_eq!(name.id().declaring, Puppy::type_hash());
        assert!(!name.can_write());

        let puppy = Puppy::new("rex");
        assert_eq!(name.get(&puppy).unwrap(), Value::String("little rex".into()));
    }

    #[test]
    fn inherited_accessor_reads_derived_instance() {
        let caches = caches();
        let table = caches.all().get_table(&Puppy::type_info()).unwrap();
        let mut puppy = Puppy::new("rex");

        let breed = table.get("Breed").unwrap();
        assert_eq!(breed.get(&puppy).unwrap(), Value::String("beagle".into()));
        breed.set(&mut puppy, Value::String("pug".into())).unwrap();
        assert_eq!(puppy.dog.breed, "pug");
    }

    #[test]
    fn indexed_properties_are_excluded() {
        let caches = caches();
        for cache in [caches.all(), caches.public()] {
            let table = cache.get_table(&Puppy::type_info()).unwrap();
            assert!(!table.contains("Item"));
        }
    }

    #[test]
    fn open_generic_is_empty() {
        let caches = caches();
        let table = caches.all().get_table(&open_list()).unwrap();
        assert!(TypeAccessorTable::is_shared_empty(&table));
    }

    #[test]
    fn interface_diamond_takes_first_declared_base() {
        let caches = caches();
        catalog().register_type::<Widget>();
        let widget = Widget { a: 1, b: 2, e: 5 };

        let ic = caches.all().get_table(&<dyn IC as Reflect>::type_info()).unwrap();
        let x = ic.get("X").unwrap();
        assert_eq!(x.id().declaring, <dyn IA as Reflect>::type_hash());
        assert_eq!(x.get(&widget).unwrap(), Value::Int(1));

        let id = caches.all().get_table(&<dyn ID as Reflect>::type_info()).unwrap();
        let x = id.get("X").unwrap();
        assert_eq!(x.id().declaring, <dyn IB as Reflect>::type_hash());
        assert_eq!(x.get(&widget).unwrap(), Value::Int(2));
    }

    #[test]
    fn interface_own_declaration_overrides() {
        let caches = caches();
        catalog().register_type::<Widget>();
        let widget = Widget { a: 1, b: 2, e: 5 };

        let table = caches.all().get_table(&<dyn IE as Reflect>::type_info()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("X").unwrap().get(&widget).unwrap(), Value::Int(5));
    }

    #[test]
    fn tables_are_built_once() {
        let caches = caches();
        let a = caches.all().get_table(&Dog::type_info()).unwrap();
        let b = caches.all().get_table(&Dog::type_info()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(caches.all().contains(Animal::type_hash()));
        assert!(!caches.public().contains(Dog::type_hash()));
    }

    #[test]
    fn get_accessor_absent_is_none() {
        let caches = caches();
        let dog = Dog::type_info();
        assert!(caches.all().get_accessor(&dog, "Breed").unwrap().is_some());
        assert!(caches.public().get_accessor(&dog, "Breed").unwrap().is_none());
        assert!(caches.all().get_accessor(&dog, "Wings").unwrap().is_none());
    }

    #[test]
    fn get_table_by_hash_needs_catalog() {
        let caches = caches();
        catalog().register_type::<Animal>();
        let table = caches.all().get_table_by_hash(Animal::type_hash()).unwrap();
        assert!(table.contains("Name"));

        let err = caches
            .all()
            .get_table_by_hash(TypeHash::from_name("tables::Unknown"))
            .unwrap_err();
        assert!(matches!(err, AccessError::InvalidArgument { .. }));
    }

    #[test]
    fn unresolvable_base_fails_without_caching() {
        let caches = caches();
        let orphan = TypeInfo::metadata("tables::Orphan", TypeCategory::Class)
            .with_base_ref(TypeRef::named("tables::MissingBase"));

        assert!(caches.all().get_table(&orphan).is_err());
        assert!(!caches.all().contains(orphan.type_hash));
    }

    #[test]
    fn inheritance_cycle_is_an_error() {
        let caches = caches();
        let looped = TypeInfo::metadata("tables::Loop", TypeCategory::Class).with_base_ref(TypeRef::named("tables::Loop"));
        catalog().register(looped.clone());

        let err = caches.all().get_table(&looped).unwrap_err();
        assert!(matches!(err, AccessError::InvalidArgument { .. }));
    }

    #[test]
    fn failed_property_fails_the_table() {
        let caches = caches();
        let broken = TypeInfo::metadata("tables::Broken", TypeCategory::Class).with_property(
            propcache_core::PropertyInfo::declared("tables::Broken", "Value", propcache_core::ValueType::of::<i32>())
                .with_getter(propcache_core::Visibility::Public),
        );
        assert!(matches!(
            caches.all().get_table(&broken),
            Err(AccessError::InvalidOperation { .. })
        ));
        assert!(!caches.all().contains(broken.type_hash));
    }

    #[test]
    fn for_policy_selects_cache() {
        let caches = caches();
        assert_eq!(caches.for_policy(VisibilityPolicy::All).policy(), VisibilityPolicy::All);
        assert_eq!(
            caches.for_policy(VisibilityPolicy::PublicOnly).policy(),
            VisibilityPolicy::PublicOnly
        );
        assert!(Arc::ptr_eq(caches.all().registry(), caches.public().registry()));
    }

    #[test]
    fn get_table_of_registers_type() {
        let caches = caches();
        let table = caches.public().get_table_of::<Puppy>().unwrap();
        assert_eq!(names(&table), ["Name", "Age"]);
        assert!(catalog().contains(Puppy::type_hash()));
    }

    #[test]
    fn interface_traits_are_used() {
        let widget = Widget { a: 1, b: 2, e: 3 };
        assert_eq!(IA::x_a(&widget) + IB::x_b(&widget) + IE::x_e(&widget), 6);
    }
}
