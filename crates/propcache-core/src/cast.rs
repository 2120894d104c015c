//! Checked reference casts from opaque instances to declaring types.
//!
//! An instance reaches an accessor as `&dyn Any`. Converting it to the
//! property's declaring type walks:
//!
//! 1. the exact type (`downcast_ref`),
//! 2. registered base projections (derived value to embedded base value),
//! 3. registered interface casts (concrete value to `dyn Trait`).
//!
//! Projections and casts are registered with the [`TypeCatalog`](crate::TypeCatalog)
//! when a type's [`TypeInfo`](crate::TypeInfo) is registered.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::catalog;

/// Shared reference cast from an opaque instance.
pub type RefCast<T> = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a T> + Send + Sync>;

/// Mutable reference cast from an opaque instance.
pub type MutCast<T> = Arc<dyn for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut T> + Send + Sync>;

/// Wrap a closure as a [`RefCast`].
pub fn ref_cast<T, F>(f: F) -> RefCast<T>
where
    T: ?Sized + 'static,
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`MutCast`].
pub fn mut_cast<T, F>(f: F) -> MutCast<T>
where
    T: ?Sized + 'static,
    F: for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Projection from a derived instance to its embedded base instance.
#[derive(Clone)]
pub struct BaseProjection {
    pub as_ref: RefCast<dyn Any>,
    pub as_mut: MutCast<dyn Any>,
}

impl BaseProjection {
    /// Build a projection from `D` to its base `B`.
    pub fn new<D: Any, B: Any>(to_base: fn(&D) -> &B, to_base_mut: fn(&mut D) -> &mut B) -> Self {
        Self {
            as_ref: ref_cast(move |instance: &dyn Any| {
                instance.downcast_ref::<D>().map(|d| to_base(d) as &dyn Any)
            }),
            as_mut: mut_cast(move |instance: &mut dyn Any| {
                instance
                    .downcast_mut::<D>()
                    .map(|d| to_base_mut(d) as &mut dyn Any)
            }),
        }
    }
}

impl fmt::Debug for BaseProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BaseProjection")
    }
}

/// Cast from a concrete instance to the interface trait object `I`.
pub struct InterfaceCast<I: ?Sized> {
    pub as_ref: RefCast<I>,
    pub as_mut: MutCast<I>,
}

impl<I: ?Sized + 'static> InterfaceCast<I> {
    /// Build a cast from the concrete type `C` to `I`.
    pub fn new<C: Any>(as_ref: fn(&C) -> &I, as_mut: fn(&mut C) -> &mut I) -> Self {
        Self {
            as_ref: ref_cast(move |instance: &dyn Any| instance.downcast_ref::<C>().map(as_ref)),
            as_mut: mut_cast(move |instance: &mut dyn Any| instance.downcast_mut::<C>().map(as_mut)),
        }
    }
}

impl<I: ?Sized> Clone for InterfaceCast<I> {
    fn clone(&self) -> Self {
        Self {
            as_ref: Arc::clone(&self.as_ref),
            as_mut: Arc::clone(&self.as_mut),
        }
    }
}

impl<I: ?Sized> fmt::Debug for InterfaceCast<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InterfaceCast")
    }
}

/// Cast an opaque instance to the class `T`, walking registered base projections.
pub fn class_ref<T: Any>(instance: &dyn Any) -> Option<&T> {
    let mut current = instance;
    loop {
        if let Some(target) = current.downcast_ref::<T>() {
            return Some(target);
        }
        current = catalog().project_ref(current)?;
    }
}

/// Mutable counterpart of [`class_ref`].
pub fn class_mut<T: Any>(instance: &mut dyn Any) -> Option<&mut T> {
    if instance.is::<T>() {
        return instance.downcast_mut::<T>();
    }
    let base = catalog().project_mut(instance)?;
    class_mut::<T>(base)
}

/// Cast an opaque instance to the interface `I`.
///
/// The instance's own type is tried first, then each registered base in turn.
pub fn interface_ref<I: ?Sized + 'static>(instance: &dyn Any) -> Option<&I> {
    let mut current = instance;
    loop {
        if let Some(cast) = catalog().interface_cast::<I>(Any::type_id(current)) {
            return (cast.as_ref)(current);
        }
        current = catalog().project_ref(current)?;
    }
}

/// Mutable counterpart of [`interface_ref`].
pub fn interface_mut<I: ?Sized + 'static>(instance: &mut dyn Any) -> Option<&mut I> {
    if let Some(cast) = catalog().interface_cast::<I>(Any::type_id(&*instance)) {
        return (cast.as_mut)(instance);
    }
    let base = catalog().project_mut(instance)?;
    interface_mut::<I>(base)
}
