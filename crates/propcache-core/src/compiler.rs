//! Accessor compiler.
//!
//! Builds a boxed getter/setter pair for a single property from its binding.
//! The compiler does not cache: every call produces a fresh [`Accessor`].
//! Callers that want one accessor per property go through the accessor
//! registry.

use std::any::{Any, TypeId};
use std::sync::Arc;

use tracing::debug;

use crate::delegates::{BoxedGetter, BoxedSetter, Getter, Setter};
use crate::{AccessError, AccessResult, Accessor, ConversionError, PropertyInfo, PropertyValue, Reflect, Value, catalog};

/// Compile a property into an [`Accessor`].
///
/// # Errors
///
/// - `InvalidArgument` if the property name is blank
/// - `Unsupported` if the property is indexed
/// - `InvalidOperation` if the property is neither readable nor writable, or
///   has no binding
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile(property: &PropertyInfo) -> AccessResult<Accessor> {
    if property.name.trim().is_empty() {
        return Err(AccessError::invalid_argument("property name must not be blank"));
    }
    if property.is_indexed() {
        return Err(AccessError::unsupported(format!(
            "indexed property '{}.{}' cannot be compiled",
            property.declaring_name, property.name
        )));
    }
    if !property.can_read() && !property.can_write() {
        return Err(AccessError::invalid_operation(format!(
            "property '{}.{}' has neither a getter nor a setter",
            property.declaring_name, property.name
        )));
    }

    let binding = property.binding.as_ref().ok_or_else(|| {
        AccessError::invalid_operation(format!(
            "property '{}.{}' has no binding",
            property.declaring_name, property.name
        ))
    })?;
    let members = binding.bind(property);

    if property.can_read() && members.getter.is_none() {
        return Err(AccessError::invalid_operation(format!(
            "binding of '{}.{}' has no getter",
            property.declaring_name, property.name
        )));
    }
    if property.can_write() && members.setter.is_none() {
        return Err(AccessError::invalid_operation(format!(
            "binding of '{}.{}' has no setter",
            property.declaring_name, property.name
        )));
    }

    debug!(
        declaring = %property.declaring_name,
        property = %property.name,
        readable = property.can_read(),
        writable = property.can_write(),
        "compiled property accessor"
    );

    // Metadata decides readability; a binding may carry more than it admits.
    let (getter, typed_getter) = if property.can_read() {
        (members.getter, members.typed_getter)
    } else {
        (None, None)
    };
    let (setter, typed_setter) = if property.can_write() {
        (members.setter, members.typed_setter)
    } else {
        (None, None)
    };

    Ok(Accessor::internal(
        property.clone(),
        getter,
        setter,
        typed_getter,
        typed_setter,
    ))
}

/// Wrap a typed getter of `D` in a boxed getter.
///
/// The instance is cast to `D` with [`Reflect::cast_ref`] and the result is
/// converted with [`PropertyValue::into_value`].
pub fn box_getter<D: Reflect + ?Sized, V: PropertyValue>(getter: Getter<D, V>) -> BoxedGetter {
    Arc::new(move |instance: &dyn Any| -> AccessResult<Value> {
        let target = D::cast_ref(instance).ok_or_else(|| cast_error::<D>(Any::type_id(instance)))?;
        Ok(getter(target).into_value())
    })
}

/// Wrap a typed setter of `D` in a boxed setter.
///
/// The instance is cast before the value is converted.
pub fn box_setter<D: Reflect + ?Sized, V: PropertyValue>(setter: Setter<D, V>) -> BoxedSetter {
    Arc::new(move |instance: &mut dyn Any, value: Value| -> AccessResult<()> {
        let actual = Any::type_id(&*instance);
        let target = D::cast_mut(instance).ok_or_else(|| cast_error::<D>(actual))?;
        let value = V::from_value(value)?;
        setter(target, value);
        Ok(())
    })
}

fn cast_error<D: Reflect + ?Sized>(actual: TypeId) -> AccessError {
    let actual = catalog()
        .name_of(actual)
        .map_or_else(|| "unregistered type".to_string(), |name| name.to_string());
    ConversionError::mismatch(D::type_name(), actual).into()
}
