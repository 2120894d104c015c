//! Free-function access to the global accessor tables.

use std::sync::Arc;

use propcache_core::{AccessResult, Accessor, Reflect, TypeInfo, VisibilityPolicy};
use propcache_registry::TableCaches;

/// All accessors of a type, in table order.
///
/// With `public_only`, only properties that are public overall are returned.
/// A type without accessible properties, including an open generic
/// definition, yields an empty vector.
pub fn get_accessors(info: &TypeInfo, public_only: bool) -> AccessResult<Vec<Arc<Accessor>>> {
    Ok(internal::get_table(info, public_only)?.to_vec())
}

/// The accessor for one property of a type, looked up in the ALL table.
///
/// An absent property is `Ok(None)`.
pub fn get_accessor(info: &TypeInfo, name: &str) -> AccessResult<Option<Arc<Accessor>>> {
    TableCaches::global().all().get_accessor(info, name)
}

/// [`get_accessors`] for the Rust type `T`.
pub fn accessors_of<T: Reflect + ?Sized>(public_only: bool) -> AccessResult<Vec<Arc<Accessor>>> {
    let policy = VisibilityPolicy::from_public_only(public_only);
    Ok(TableCaches::global().for_policy(policy).get_table_of::<T>()?.to_vec())
}

/// [`get_accessor`] for the Rust type `T`.
pub fn accessor_of<T: Reflect + ?Sized>(name: &str) -> AccessResult<Option<Arc<Accessor>>> {
    let table = TableCaches::global().all().get_table_of::<T>()?;
    Ok(table.get(name).cloned())
}

/// Table-level access for hosts that iterate by name.
pub mod internal {
    use std::sync::Arc;

    use propcache_core::{AccessResult, TypeInfo, VisibilityPolicy};
    use propcache_registry::{TableCaches, TypeAccessorTable};

    /// The cached table of a type under the chosen visibility view.
    pub fn get_table(info: &TypeInfo, public_only: bool) -> AccessResult<Arc<TypeAccessorTable>> {
        TableCaches::global()
            .for_policy(VisibilityPolicy::from_public_only(public_only))
            .get_table(info)
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use propcache_core::{PropertyInfo, TypeCategory, Value, ValueType, Visibility, cast};

    struct Lamp {
        on: bool,
        watts: u32,
    }

    impl Reflect for Lamp {
        fn type_name() -> &'static str {
            "provider::Lamp"
        }

        fn type_info() -> TypeInfo {
            TypeInfo::class::<Lamp>()
                .property(
                    PropertyInfo::build::<Lamp, bool>("On")
                        .get(Visibility::Public, |l| l.on)
                        .set(Visibility::Public, |l, v| l.on = v)
                        .build(),
                )
                .property(
                    PropertyInfo::build::<Lamp, u32>("Watts")
                        .get(Visibility::Private, |l| l.watts)
                        .build(),
                )
                .build()
        }

        fn cast_ref(instance: &dyn Any) -> Option<&Self> {
            cast::class_ref::<Self>(instance)
        }

        fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
            cast::class_mut::<Self>(instance)
        }
    }

    #[test]
    fn accessors_by_visibility() {
        let info = Lamp::type_info();
        let all = get_accessors(&info, false).unwrap();
        let public = get_accessors(&info, true).unwrap();

        assert_eq!(all.iter().map(|a| a.name()).collect::<Vec<_>>(), ["On", "Watts"]);
        assert_eq!(public.len(), 1);
        assert!(Arc::ptr_eq(&public[0], &all[0]));
    }

    #[test]
    fn single_accessor_uses_all_table() {
        let info = Lamp::type_info();
        let watts = get_accessor(&info, "Watts").unwrap().unwrap();
        assert!(get_accessor(&info, "Missing").unwrap().is_none());

        let lamp = Lamp { on: false, watts: 60 };
        assert_eq!(watts.get(&lamp).unwrap(), Value::UInt(60));
    }

    #[test]
    fn generic_conveniences_match_info_lookups() {
        let by_info = get_accessors(&Lamp::type_info(), false).unwrap();
        let by_type = accessors_of::<Lamp>(false).unwrap();
        assert_eq!(by_info.len(), by_type.len());
        assert!(by_info.iter().zip(&by_type).all(|(a, b)| Arc::ptr_eq(a, b)));

        let on = accessor_of::<Lamp>("On").unwrap().unwrap();
        let mut lamp = Lamp { on: false, watts: 40 };
        on.set(&mut lamp, Value::Bool(true)).unwrap();
        assert!(lamp.on);
    }

    #[test]
    fn open_generic_is_empty() {
        let info = TypeInfo::metadata("provider::Box", TypeCategory::Class)
            .with_generic_params(["T"])
            .with_property(PropertyInfo::declared("provider::Box", "Inner", ValueType::of::<i32>()));
        assert!(get_accessors(&info, false).unwrap().is_empty());
        assert!(get_accessor(&info, "Inner").unwrap().is_none());
        assert!(internal::get_table(&info, true).unwrap().is_empty());
    }
}
