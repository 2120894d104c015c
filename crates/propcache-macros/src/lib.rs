//! Proc macros for `propcache`.
//!
//! # Macros
//!
//! - `#[derive(Reflect)]` - Describe a struct and its properties
//!
//! # Example
//!
//! ```ignore
//! use propcache::Reflect;
//!
//! #[derive(Reflect)]
//! #[reflect(name = "Player")]
//! pub struct Player {
//!     #[reflect(get, set)]
//!     pub health: i32,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_reflect;

/// Derive the `Reflect` trait for a struct with named fields.
///
/// # Type Attributes
///
/// - `#[reflect(name = "...")]` - Override the type name (default: module path and struct name)
/// - `#[reflect(value)]` - Mark as a value type; also derives `PropertyValue` (needs `Clone + Send + Sync`)
/// - `#[reflect(reference)]` - Mark as a reference type (the default)
/// - `#[reflect(implements(dyn Trait, ...))]` - Interfaces the struct is accessed through
///
/// # Field Attributes
///
/// - `#[reflect(get)]` / `#[reflect(set)]` - Public getter / setter
/// - `#[reflect(get = "protected", set = "private")]` - Accessors with explicit visibility
/// - `#[reflect(name = "...")]` - Override the property name
/// - `#[reflect(base)]` - The embedded base-class field (at most one)
///
/// Getters clone the field, so property fields must be `Clone`.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// pub struct Dog {
///     #[reflect(base)]
///     animal: Animal,
///     #[reflect(get = "protected", set = "private", name = "Breed")]
///     breed: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    derive_reflect::derive_reflect_impl(input)
}
