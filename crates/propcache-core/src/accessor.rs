//! Compiled property accessor.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::delegates::{self, BoxedGetter, BoxedSetter, ErasedDelegate, Getter, Setter};
use crate::{AccessError, AccessResult, PropertyId, PropertyInfo, Value};

/// Boxed getter and setter for one property.
///
/// The boxed delegates wrap the typed ones captured on the property's
/// binding. Accessors are shared as `Arc<Accessor>` and never mutated.
pub struct Accessor {
    property: PropertyInfo,
    id: PropertyId,
    getter: Option<BoxedGetter>,
    setter: Option<BoxedSetter>,
    typed_getter: Option<ErasedDelegate>,
    typed_setter: Option<ErasedDelegate>,
}

impl Accessor {
    /// Assemble an accessor from prepared parts without validation.
    ///
    /// Used by the compiler and for publishing synthetic accessors.
    pub fn internal(
        property: PropertyInfo,
        getter: Option<BoxedGetter>,
        setter: Option<BoxedSetter>,
        typed_getter: Option<ErasedDelegate>,
        typed_setter: Option<ErasedDelegate>,
    ) -> Self {
        let id = property.id();
        Self {
            property,
            id,
            getter,
            setter,
            typed_getter,
            typed_setter,
        }
    }

    /// Property metadata.
    pub fn property(&self) -> &PropertyInfo {
        &self.property
    }

    /// Registry key.
    pub fn id(&self) -> &PropertyId {
        &self.id
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.property.name
    }

    /// Boxed erased getter, if the property is readable.
    pub fn getter(&self) -> Option<&BoxedGetter> {
        self.getter.as_ref()
    }

    /// Boxed erased setter, if the property is writable.
    pub fn setter(&self) -> Option<&BoxedSetter> {
        self.setter.as_ref()
    }

    /// Recover the typed getter. `None` if unreadable or `D`/`V` don't match.
    pub fn typed_getter<D: ?Sized + 'static, V: 'static>(&self) -> Option<Getter<D, V>> {
        self.typed_getter.as_ref().and_then(delegates::recover_getter)
    }

    /// Recover the typed setter. `None` if unwritable or `D`/`V` don't match.
    pub fn typed_setter<D: ?Sized + 'static, V: 'static>(&self) -> Option<Setter<D, V>> {
        self.typed_setter.as_ref().and_then(delegates::recover_setter)
    }

    /// Check if a getter was bound.
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Check if a setter was bound.
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the property from an opaque instance.
    pub fn get(&self, instance: &dyn Any) -> AccessResult<Value> {
        let getter = self.getter.as_ref().ok_or_else(|| {
            AccessError::invalid_operation(format!("property '{}' is not readable", self.property.name))
        })?;
        getter(instance)
    }

    /// Write the property on an opaque instance.
    pub fn set(&self, instance: &mut dyn Any, value: Value) -> AccessResult<()> {
        let setter = self.setter.as_ref().ok_or_else(|| {
            AccessError::invalid_operation(format!("property '{}' is not writable", self.property.name))
        })?;
        setter(instance, value)
    }

    /// Read the property from an instance held in a [`Value`].
    pub fn get_value(&self, instance: &Value) -> AccessResult<Value> {
        let target = instance
            .as_any()
            .ok_or_else(|| AccessError::null_reference(&*self.property.name))?;
        self.get(target)
    }

    /// Write the property on an instance held in a [`Value`].
    ///
    /// Shared object handles cannot be written through.
    pub fn set_value(&self, instance: &mut Value, value: Value) -> AccessResult<()> {
        if instance.is_null() {
            return Err(AccessError::null_reference(&*self.property.name));
        }
        let target = instance.as_any_mut().ok_or_else(|| {
            AccessError::invalid_operation(format!(
                "cannot write '{}' through a shared object handle",
                self.property.name
            ))
        })?;
        self.set(target, value)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("declaring", &self.property.declaring_name)
            .field("name", &self.property.name)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

/// Shared handle to an accessor.
pub type AccessorRef = Arc<Accessor>;
