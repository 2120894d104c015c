//! Conversion between property value types and [`Value`].
//!
//! [`PropertyValue`] is implemented for every type a property can hold:
//!
//! - Integers: `i8`..`i64`, `isize` (boxed as [`Value::Int`]) and
//!   `u8`..`u64`, `usize` (boxed as [`Value::UInt`])
//! - Floats: `f32`, `f64`
//! - `bool`, `char`, `String`
//! - `Arc<T>` and `Option<Arc<T>>` for reference types
//! - `Value` itself, which passes through untouched
//!
//! User value types get an implementation from `#[derive(Reflect)]` with
//! `#[reflect(value)]`.
//!
//! ```
//! use propcache_core::{PropertyValue, Value};
//!
//! let boxed = 42i32.into_value();
//! assert_eq!(boxed, Value::Int(42));
//! assert_eq!(i32::from_value(boxed).unwrap(), 42);
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::{ConversionError, TypeKind, Value};

/// A type that can be stored in a property and moved through a boxed accessor.
pub trait PropertyValue: Sized + 'static {
    /// Value or reference semantics.
    const KIND: TypeKind;

    /// Box this value into a [`Value`].
    fn into_value(self) -> Value;

    /// Unwrap a [`Value`] into this type.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

/// Declared value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    /// Rust type name.
    pub name: &'static str,
    /// Rust type identity.
    pub type_id: TypeId,
    /// Value or reference semantics.
    pub kind: TypeKind,
}

impl ValueType {
    /// Describe the value type `V`.
    pub fn of<V: PropertyValue>() -> Self {
        Self {
            name: std::any::type_name::<V>(),
            type_id: TypeId::of::<V>(),
            kind: V::KIND,
        }
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl PropertyValue for $ty {
                const KIND: TypeKind = TypeKind::Value;

                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }

                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                            value: v as i128,
                            target_type: stringify!($ty),
                        }),
                        Value::UInt(v) => <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                            value: v as i128,
                            target_type: stringify!($ty),
                        }),
                        Value::Null => Err(ConversionError::NullHandle {
                            target_type: stringify!($ty),
                        }),
                        other => Err(ConversionError::mismatch(stringify!($ty), other.type_name())),
                    }
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl PropertyValue for $ty {
                const KIND: TypeKind = TypeKind::Value;

                fn into_value(self) -> Value {
                    Value::UInt(self as u64)
                }

                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::UInt(v) => <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                            value: v as i128,
                            target_type: stringify!($ty),
                        }),
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                            value: v as i128,
                            target_type: stringify!($ty),
                        }),
                        Value::Null => Err(ConversionError::NullHandle {
                            target_type: stringify!($ty),
                        }),
                        other => Err(ConversionError::mismatch(stringify!($ty), other.type_name())),
                    }
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, usize);

// ============================================================================
// Float implementations
// ============================================================================

impl PropertyValue for f32 {
    const KIND: TypeKind = TypeKind::Value;

    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => {
                // Infinities and NaN carry over, finite values must stay finite
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    Err(ConversionError::FloatConversion {
                        value: v,
                        target_type: "f32",
                    })
                } else {
                    Ok(v as f32)
                }
            }
            Value::Null => Err(ConversionError::NullHandle { target_type: "f32" }),
            other => Err(ConversionError::mismatch("f32", other.type_name())),
        }
    }
}

impl PropertyValue for f64 {
    const KIND: TypeKind = TypeKind::Value;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Null => Err(ConversionError::NullHandle { target_type: "f64" }),
            other => Err(ConversionError::mismatch("f64", other.type_name())),
        }
    }
}

// ============================================================================
// Other primitives
// ============================================================================

impl PropertyValue for bool {
    const KIND: TypeKind = TypeKind::Value;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Null => Err(ConversionError::NullHandle { target_type: "bool" }),
            other => Err(ConversionError::mismatch("bool", other.type_name())),
        }
    }
}

impl PropertyValue for char {
    const KIND: TypeKind = TypeKind::Value;

    fn into_value(self) -> Value {
        Value::Char(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Char(v) => Ok(v),
            Value::Null => Err(ConversionError::NullHandle { target_type: "char" }),
            other => Err(ConversionError::mismatch("char", other.type_name())),
        }
    }
}

impl PropertyValue for String {
    const KIND: TypeKind = TypeKind::Value;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(v) => Ok(v),
            Value::Null => Err(ConversionError::NullHandle {
                target_type: "String",
            }),
            other => Err(ConversionError::mismatch("String", other.type_name())),
        }
    }
}

// ============================================================================
// Erased and reference types
// ============================================================================

impl PropertyValue for Value {
    const KIND: TypeKind = TypeKind::Reference;

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl<T: Any + Send + Sync> PropertyValue for Arc<T> {
    const KIND: TypeKind = TypeKind::Reference;

    fn into_value(self) -> Value {
        Value::Object(self)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(handle) => handle.downcast::<T>().map_err(|_| {
                ConversionError::mismatch(std::any::type_name::<T>(), "object of another type")
            }),
            Value::Null => Err(ConversionError::NullHandle {
                target_type: std::any::type_name::<T>(),
            }),
            other => Err(ConversionError::mismatch(
                std::any::type_name::<T>(),
                other.type_name(),
            )),
        }
    }
}

impl<T: Any + Send + Sync> PropertyValue for Option<Arc<T>> {
    const KIND: TypeKind = TypeKind::Reference;

    fn into_value(self) -> Value {
        match self {
            Some(handle) => Value::Object(handle),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => Arc::<T>::from_value(other).map(Some),
        }
    }
}
