//! Opaque value type passed through boxed accessors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::ConversionError;

/// A type-erased property value.
///
/// Primitive value types are boxed into their own variants, user value types
/// into [`Value::Native`]. Reference types travel as a shared
/// [`Value::Object`] handle and are never copied.
///
/// `Value` does not implement `Clone` because native values may not be
/// cloneable.
pub enum Value {
    /// Null handle
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer (i8 through i64 and isize)
    Int(i64),
    /// Unsigned integer (u8 through u64 and usize)
    UInt(u64),
    /// Floating point value (f32 and f64)
    Float(f64),
    /// Character value
    Char(char),
    /// String value (owned)
    String(String),
    /// Boxed user value type
    Native(Box<dyn Any + Send + Sync>),
    /// Shared handle to a reference type
    Object(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Box a user value type.
    pub fn native<T: Any + Send + Sync>(value: T) -> Self {
        Value::Native(Box::new(value))
    }

    /// Wrap a shared reference-type handle.
    pub fn object<T: Any + Send + Sync>(handle: Arc<T>) -> Self {
        Value::Object(handle)
    }

    /// Get a human-readable name for this value's variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Native(_) => "native",
            Value::Object(_) => "object",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the payload as `&dyn Any`, or `None` for null.
    pub fn as_any(&self) -> Option<&dyn Any> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v),
            Value::Int(v) => Some(v),
            Value::UInt(v) => Some(v),
            Value::Float(v) => Some(v),
            Value::Char(v) => Some(v),
            Value::String(v) => Some(v),
            Value::Native(b) => Some(&**b),
            Value::Object(o) => Some(&**o),
        }
    }

    /// Mutably borrow the payload as `&mut dyn Any`.
    ///
    /// Returns `None` for null and for object handles that are shared.
    pub fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v),
            Value::Int(v) => Some(v),
            Value::UInt(v) => Some(v),
            Value::Float(v) => Some(v),
            Value::Char(v) => Some(v),
            Value::String(v) => Some(v),
            Value::Native(b) => Some(&mut **b),
            Value::Object(o) => Arc::get_mut(o).map(|v| v as &mut dyn Any),
        }
    }

    /// Borrow a native value as `T`.
    pub fn as_native<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Native(b) => b.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Borrow an object handle's target as `T`.
    pub fn as_object<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(o) => o.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Unwrap a native value into `T`.
    pub fn into_native<T: Any>(self) -> Result<T, ConversionError> {
        match self {
            Value::Native(b) => match b.downcast::<T>() {
                Ok(v) => Ok(*v),
                Err(_) => Err(ConversionError::mismatch(
                    std::any::type_name::<T>(),
                    "native value of another type",
                )),
            },
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

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::UInt(v) => write!(f, "UInt({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::Char(v) => write!(f, "Char({:?})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Native(_) => write!(f, "Native(...)"),
            Value::Object(o) => write!(f, "Object({:p})", Arc::as_ptr(o)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Handles compare by identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            // Native values can't be compared for equality
            _ => false,
        }
    }
}
