//! Delegate types for typed and boxed property accessors.
//!
//! Typed delegates are what a type description captures. Boxed delegates are
//! the uniform `(&dyn Any) -> Value` / `(&mut dyn Any, Value)` shape the
//! compiler wraps them in.

use std::any::Any;
use std::sync::Arc;

use crate::{AccessResult, Value};

/// Strongly typed getter: `(&D) -> V`.
pub type Getter<D, V> = Arc<dyn Fn(&D) -> V + Send + Sync>;

/// Strongly typed setter: `(&mut D, V)`.
pub type Setter<D, V> = Arc<dyn Fn(&mut D, V) + Send + Sync>;

/// Boxed getter over an opaque instance.
pub type BoxedGetter = Arc<dyn Fn(&dyn Any) -> AccessResult<Value> + Send + Sync>;

/// Boxed setter over an opaque instance.
pub type BoxedSetter = Arc<dyn Fn(&mut dyn Any, Value) -> AccessResult<()> + Send + Sync>;

/// Type-erased storage for a [`Getter`] or [`Setter`].
pub type ErasedDelegate = Arc<dyn Any + Send + Sync>;

/// Erase a typed getter so it can be stored next to its boxed wrapper.
pub fn erase_getter<D: ?Sized + 'static, V: 'static>(getter: Getter<D, V>) -> ErasedDelegate {
    Arc::new(getter)
}

/// Erase a typed setter so it can be stored next to its boxed wrapper.
pub fn erase_setter<D: ?Sized + 'static, V: 'static>(setter: Setter<D, V>) -> ErasedDelegate {
    Arc::new(setter)
}

/// Recover a typed getter erased with [`erase_getter`].
pub fn recover_getter<D: ?Sized + 'static, V: 'static>(erased: &ErasedDelegate) -> Option<Getter<D, V>> {
    erased.downcast_ref::<Getter<D, V>>().cloned()
}

/// Recover a typed setter erased with [`erase_setter`].
pub fn recover_setter<D: ?Sized + 'static, V: 'static>(erased: &ErasedDelegate) -> Option<Setter<D, V>> {
    erased.downcast_ref::<Setter<D, V>>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: u32,
    }

    #[test]
    fn getter_recovers_with_matching_types() {
        let getter: Getter<Counter, u32> = Arc::new(|c: &Counter| c.count);
        let erased = erase_getter(Arc::clone(&getter));

        let recovered = recover_getter::<Counter, u32>(&erased).unwrap();
        assert!(Arc::ptr_eq(&getter, &recovered));
        assert_eq!(recovered(&Counter { count: 4 }), 4);
    }

    #[test]
    fn getter_rejects_other_types() {
        let getter: Getter<Counter, u32> = Arc::new(|c: &Counter| c.count);
        let erased = erase_getter(getter);
        assert!(recover_getter::<Counter, i32>(&erased).is_none());
        assert!(recover_setter::<Counter, u32>(&erased).is_none());
    }

    #[test]
    fn setter_round_trip() {
        let setter: Setter<Counter, u32> = Arc::new(|c: &mut Counter, v| c.count = v);
        let erased = erase_setter(setter);

        let mut counter = Counter { count: 0 };
        recover_setter::<Counter, u32>(&erased).unwrap()(&mut counter, 9);
        assert_eq!(counter.count, 9);
    }
}
