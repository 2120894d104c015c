//! Error types for property access.
//!
//! ```text
//! AccessError
//! ├── InvalidArgument   - absent or unknown metadata
//! ├── Unsupported       - indexed property requested as a simple one
//! ├── InvalidCast       - instance or value not convertible (wraps ConversionError)
//! ├── NullReference     - null instance handed to an instance accessor
//! └── InvalidOperation  - property shape that cannot be bound
//! ```

use thiserror::Error;

/// Errors that can occur when converting between [`Value`](crate::Value) and Rust types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Attempted to convert a null handle to a non-nullable type
    #[error("null handle cannot be converted to {target_type}")]
    NullHandle { target_type: &'static str },

    /// Integer does not fit the target type
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i128, target_type: &'static str },

    /// Float cannot be represented in the target type
    #[error("float conversion error: value {value} cannot be represented as {target_type}")]
    FloatConversion { value: f64, target_type: &'static str },
}

impl ConversionError {
    /// Create a type mismatch error.
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ConversionError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors raised by the accessor compiler, registry and type tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// Required metadata is absent, blank or unknown.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The property shape is outside the supported model.
    #[error("unsupported: {message}")]
    Unsupported { message: String },

    /// An instance or value is not convertible to the expected type.
    #[error("invalid cast: {0}")]
    InvalidCast(#[from] ConversionError),

    /// A null instance was passed to an instance accessor.
    #[error("null reference: cannot access '{property}' on a null instance")]
    NullReference { property: String },

    /// The property cannot be bound or the access cannot be performed.
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },
}

impl AccessError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AccessError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        AccessError::Unsupported {
            message: message.into(),
        }
    }

    /// Create an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        AccessError::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a null reference error for a property.
    pub fn null_reference(property: impl Into<String>) -> Self {
        AccessError::NullReference {
            property: property.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type AccessResult<T> = Result<T, AccessError>;
