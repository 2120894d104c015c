//! Property metadata and typed bindings.
//!
//! A [`PropertyInfo`] is immutable once described. Its binding carries the
//! strongly typed getter and setter captured at description time, and the
//! accessor compiler wraps those in boxed delegates.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::delegates::{self, BoxedGetter, BoxedSetter, ErasedDelegate, Getter, Setter};
use crate::{PropertyValue, Reflect, TypeHash, ValueType, Visibility, VisibilityPolicy, compiler};

/// Identity of a property: declaring type plus name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId {
    /// Hash of the declaring type.
    pub declaring: TypeHash,
    /// Property name.
    pub name: Arc<str>,
}

impl PropertyId {
    /// Create a property identity.
    pub fn new(declaring: TypeHash, name: impl Into<Arc<str>>) -> Self {
        Self {
            declaring,
            name: name.into(),
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring, self.name)
    }
}

/// Boxed and typed delegates produced by a [`PropertyBinding`].
#[derive(Default)]
pub struct BoundMembers {
    pub getter: Option<BoxedGetter>,
    pub setter: Option<BoxedSetter>,
    pub typed_getter: Option<ErasedDelegate>,
    pub typed_setter: Option<ErasedDelegate>,
}

/// Code behind a property's metadata.
///
/// Properties without a binding are metadata only and cannot be compiled.
pub trait PropertyBinding: Send + Sync {
    /// Produce the boxed delegates for `property`.
    fn bind(&self, property: &PropertyInfo) -> BoundMembers;
}

/// Binding over a typed getter and setter of `D`'s property of type `V`.
pub struct TypedBinding<D: ?Sized, V> {
    getter: Option<Getter<D, V>>,
    setter: Option<Setter<D, V>>,
}

impl<D: ?Sized, V> TypedBinding<D, V> {
    pub fn new(getter: Option<Getter<D, V>>, setter: Option<Setter<D, V>>) -> Self {
        Self { getter, setter }
    }
}

impl<D: Reflect + ?Sized, V: PropertyValue> PropertyBinding for TypedBinding<D, V> {
    fn bind(&self, _property: &PropertyInfo) -> BoundMembers {
        BoundMembers {
            getter: self
                .getter
                .as_ref()
                .map(|getter| compiler::box_getter::<D, V>(Arc::clone(getter))),
            setter: self
                .setter
                .as_ref()
                .map(|setter| compiler::box_setter::<D, V>(Arc::clone(setter))),
            typed_getter: self.getter.clone().map(delegates::erase_getter),
            typed_setter: self.setter.clone().map(delegates::erase_setter),
        }
    }
}

/// Metadata for a single property.
#[derive(Clone)]
pub struct PropertyInfo {
    /// Hash of the declaring type.
    pub declaring_type: TypeHash,
    /// Name of the declaring type.
    pub declaring_name: Arc<str>,
    /// Property name.
    pub name: Arc<str>,
    /// Declared value type.
    pub value_type: ValueType,
    /// Getter visibility (`None` = not readable).
    pub getter: Option<Visibility>,
    /// Setter visibility (`None` = not writable).
    pub setter: Option<Visibility>,
    /// Index parameter names (non-empty = indexed property).
    pub index_params: Vec<String>,
    /// Typed delegates (`None` = metadata only).
    pub binding: Option<Arc<dyn PropertyBinding>>,
}

impl PropertyInfo {
    /// Start describing property `name` of `D` with value type `V`.
    pub fn build<D: Reflect + ?Sized, V: PropertyValue>(name: impl Into<Arc<str>>) -> PropertyBuilder<D, V> {
        PropertyBuilder {
            name: name.into(),
            getter: None,
            setter: None,
            index_params: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Create metadata-only property without code behind it.
    pub fn declared(declaring_name: impl Into<Arc<str>>, name: impl Into<Arc<str>>, value_type: ValueType) -> Self {
        let declaring_name = declaring_name.into();
        Self {
            declaring_type: TypeHash::from_name(&declaring_name),
            declaring_name,
            name: name.into(),
            value_type,
            getter: None,
            setter: None,
            index_params: Vec::new(),
            binding: None,
        }
    }

    // === Builder Methods ===

    /// Make the property readable.
    pub fn with_getter(mut self, visibility: Visibility) -> Self {
        self.getter = Some(visibility);
        self
    }

    /// Make the property writable.
    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        self.setter = Some(visibility);
        self
    }

    /// Set index parameters (makes this an indexed property).
    pub fn with_index_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.index_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a binding.
    pub fn with_binding(mut self, binding: Arc<dyn PropertyBinding>) -> Self {
        self.binding = Some(binding);
        self
    }

    // === Query Methods ===

    /// Registry key of this property.
    pub fn id(&self) -> PropertyId {
        PropertyId::new(self.declaring_type, Arc::clone(&self.name))
    }

    /// Check if this property has a getter.
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    /// Check if this property has a setter.
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Check if this property takes index parameters.
    pub fn is_indexed(&self) -> bool {
        !self.index_params.is_empty()
    }

    /// A property is public overall when at least one of its accessors is public.
    pub fn is_public(&self) -> bool {
        self.getter.is_some_and(Visibility::is_public) || self.setter.is_some_and(Visibility::is_public)
    }

    /// Check if a table built under `policy` admits this property.
    pub fn is_admitted(&self, policy: VisibilityPolicy) -> bool {
        match policy {
            VisibilityPolicy::All => true,
            VisibilityPolicy::PublicOnly => self.is_public(),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("declaring_name", &self.declaring_name)
            .field("name", &self.name)
            .field("value_type", &self.value_type.name)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .field("index_params", &self.index_params)
            .field("bound", &self.binding.is_some())
            .finish()
    }
}

/// Builder for a [`PropertyInfo`] with typed delegates.
pub struct PropertyBuilder<D: ?Sized, V> {
    name: Arc<str>,
    getter: Option<(Visibility, Getter<D, V>)>,
    setter: Option<(Visibility, Setter<D, V>)>,
    index_params: Vec<String>,
    _marker: PhantomData<fn() -> *const D>,
}

impl<D: Reflect + ?Sized, V: PropertyValue> PropertyBuilder<D, V> {
    /// Add a getter.
    pub fn get<F>(mut self, visibility: Visibility, getter: F) -> Self
    where
        F: Fn(&D) -> V + Send + Sync + 'static,
    {
        let getter: Getter<D, V> = Arc::new(getter);
        self.getter = Some((visibility, getter));
        self
    }

    /// Add a setter.
    pub fn set<F>(mut self, visibility: Visibility, setter: F) -> Self
    where
        F: Fn(&mut D, V) + Send + Sync + 'static,
    {
        let setter: Setter<D, V> = Arc::new(setter);
        self.setter = Some((visibility, setter));
        self
    }

    /// Declare index parameters.
    pub fn indexed<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.index_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Finish the description.
    pub fn build(self) -> PropertyInfo {
        let (getter_visibility, getter) = split(self.getter);
        let (setter_visibility, setter) = split(self.setter);
        let binding: Arc<dyn PropertyBinding> = Arc::new(TypedBinding::<D, V>::new(getter, setter));

        PropertyInfo {
            declaring_type: D::type_hash(),
            declaring_name: Arc::from(D::type_name()),
            name: self.name,
            value_type: ValueType::of::<V>(),
            getter: getter_visibility,
            setter: setter_visibility,
            index_params: self.index_params,
            binding: Some(binding),
        }
    }
}

fn split<T>(member: Option<(Visibility, T)>) -> (Option<Visibility>, Option<T>) {
    match member {
        Some((visibility, delegate)) => (Some(visibility), Some(delegate)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TypeInfo, cast};
    use std::any::Any;

    struct Dog {
        breed: String,
    }

    impl Reflect for Dog {
        fn type_name() -> &'static str {
            "property_info::Dog"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::class::<Dog>().build()
        }
        fn cast_ref(instance: &dyn Any) -> Option<&Self> {
            cast::class_ref::<Self>(instance)
        }
        fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
            cast::class_mut::<Self>(instance)
        }
    }

    fn breed(getter: Visibility, setter: Visibility) -> PropertyInfo {
        PropertyInfo::build::<Dog, String>("Breed")
            .get(getter, |d| d.breed.clone())
            .set(setter, |d, v| d.breed = v)
            .build()
    }

    #[test]
    fn builder_captures_identity() {
        let info = breed(Visibility::Public, Visibility::Public);
        assert_eq!(info.declaring_type, Dog::type_hash());
        assert_eq!(&*info.declaring_name, "property_info::Dog");
        assert_eq!(info.value_type, ValueType::of::<String>());
        assert!(info.can_read() && info.can_write());
        assert!(info.binding.is_some());
        assert_eq!(info.id(), PropertyId::new(Dog::type_hash(), "Breed"));
    }

    #[test]
    fn public_if_any_accessor_public() {
        assert!(breed(Visibility::Public, Visibility::Private).is_public());
        assert!(breed(Visibility::Private, Visibility::Public).is_public());
        assert!(!breed(Visibility::Protected, Visibility::Private).is_public());
    }

    #[test]
    fn policy_admission() {
        let hidden = breed(Visibility::Protected, Visibility::Private);
        assert!(hidden.is_admitted(VisibilityPolicy::All));
        assert!(!hidden.is_admitted(VisibilityPolicy::PublicOnly));
    }

    #[test]
    fn read_only_property() {
        let info = PropertyInfo::build::<Dog, String>("Breed")
            .get(Visibility::Public, |d| d.breed.clone())
            .build();
        assert!(info.can_read());
        assert!(!info.can_write());
    }

    #[test]
    fn declared_property_has_no_binding() {
        let info = PropertyInfo::declared("List", "Count", ValueType::of::<i32>())
            .with_getter(Visibility::Public)
            .with_index_params(["index"]);
        assert!(info.binding.is_none());
        assert!(info.is_indexed());
        assert_eq!(info.declaring_type, TypeHash::from_name("List"));
    }

    #[test]
    fn binding_produces_delegates() {
        let info = breed(Visibility::Public, Visibility::Public);
        let members = info.binding.as_ref().unwrap().bind(&info);
        assert!(members.getter.is_some());
        assert!(members.setter.is_some());

        let typed = members.typed_getter.unwrap();
        let getter = delegates::recover_getter::<Dog, String>(&typed).unwrap();
        assert_eq!(getter(&Dog { breed: "collie".into() }), "collie");
    }
}
