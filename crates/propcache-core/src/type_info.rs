//! Type metadata.
//!
//! [`TypeInfo`] describes a class or an interface: its identity, its bases and
//! the properties it declares directly. Inherited properties are never copied
//! into a derived type's metadata. They are merged when the type's accessor
//! table is built.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cast::{BaseProjection, InterfaceCast};
use crate::{PropertyInfo, Reflect, TypeCategory, TypeHash, TypeKind};

/// Type-erased [`InterfaceCast`].
pub type ErasedCast = Arc<dyn std::any::Any + Send + Sync>;

/// Reference to another type by hash.
///
/// Base types are referenced rather than embedded so metadata can be
/// described before its bases are cataloged.
#[derive(Clone)]
pub struct TypeRef {
    /// Hash of the referenced type.
    pub hash: TypeHash,
    /// Qualified name of the referenced type.
    pub name: Arc<str>,
    /// Rust type identity, if the type is backed by a Rust type.
    pub type_id: Option<TypeId>,
    /// Produces the referenced type's metadata on first use.
    pub resolve: Option<fn() -> TypeInfo>,
}

impl TypeRef {
    /// Reference a [`Reflect`] type.
    pub fn of<T: Reflect + ?Sized>() -> Self {
        Self {
            hash: T::type_hash(),
            name: Arc::from(T::type_name()),
            type_id: Some(TypeId::of::<T>()),
            resolve: Some(T::type_info as fn() -> TypeInfo),
        }
    }

    /// Reference a type by name alone. It must be registered before it is resolved.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            hash: TypeHash::from_name(&name),
            name,
            type_id: None,
            resolve: None,
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("hash", &self.hash)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Base class of a class type.
#[derive(Debug, Clone)]
pub struct BaseClass {
    pub type_ref: TypeRef,
    /// Projection from the derived instance to its embedded base.
    pub projection: Option<BaseProjection>,
}

/// Base interface of a class or interface type.
#[derive(Debug, Clone)]
pub struct InterfaceRef {
    pub type_ref: TypeRef,
    /// Erased `InterfaceCast<dyn I>` from the described concrete type.
    pub cast: Option<ErasedCast>,
}

/// Metadata for a class or interface.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Qualified name.
    pub name: Arc<str>,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Rust type identity, if the type is backed by a Rust type.
    pub type_id: Option<TypeId>,
    /// Class or interface.
    pub category: TypeCategory,
    /// Value or reference semantics.
    pub kind: TypeKind,

    // === Inheritance ===
    /// Base class (classes only). `None` derives directly from the root type.
    pub base_class: Option<BaseClass>,
    /// Base interfaces in declaration order.
    pub interfaces: Vec<InterfaceRef>,

    // === Members ===
    /// Unresolved generic parameters (non-empty = open generic definition).
    pub generic_params: Vec<String>,
    /// Directly declared properties.
    pub properties: Vec<PropertyInfo>,
}

impl TypeInfo {
    /// Create metadata that is not backed by a Rust type.
    pub fn metadata(name: impl Into<Arc<str>>, category: TypeCategory) -> Self {
        let name = name.into();
        Self {
            type_hash: TypeHash::from_name(&name),
            name,
            type_id: None,
            category,
            kind: TypeKind::Reference,
            base_class: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Start describing the class `D`.
    pub fn class<D: Reflect + ?Sized>() -> TypeBuilder<D> {
        TypeBuilder::new(TypeCategory::Class)
    }

    /// Start describing the interface `I`, usually a `dyn Trait`.
    pub fn interface<I: Reflect + ?Sized>() -> TypeBuilder<I> {
        TypeBuilder::new(TypeCategory::Interface)
    }

    // === Builder Methods ===

    /// Set the type kind.
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the base class without a projection.
    pub fn with_base_ref(mut self, base: TypeRef) -> Self {
        self.base_class = Some(BaseClass {
            type_ref: base,
            projection: None,
        });
        self
    }

    /// Add a base interface without a cast.
    pub fn with_interface_ref(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(InterfaceRef {
            type_ref: interface,
            cast: None,
        });
        self
    }

    /// Set generic parameters (makes this an open generic definition).
    pub fn with_generic_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.generic_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Add a directly declared property.
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    // === Query Methods ===

    /// Check if this is a class.
    pub fn is_class(&self) -> bool {
        self.category == TypeCategory::Class
    }

    /// Check if this is an interface.
    pub fn is_interface(&self) -> bool {
        self.category == TypeCategory::Interface
    }

    /// Check if this is an open generic definition.
    pub fn is_open_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Find a directly declared property by name.
    pub fn find_property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| &*p.name == name)
    }

    /// Hash of the base class, or the root type.
    pub fn base_hash(&self) -> TypeHash {
        self.base_class
            .as_ref()
            .map_or(TypeHash::OBJECT, |base| base.type_ref.hash)
    }
}

/// Builder for [`TypeInfo`] of a Rust type.
pub struct TypeBuilder<D: ?Sized> {
    info: TypeInfo,
    _marker: PhantomData<fn() -> *const D>,
}

impl<D: Reflect + ?Sized> TypeBuilder<D> {
    fn new(category: TypeCategory) -> Self {
        let mut info = TypeInfo::metadata(D::type_name(), category);
        info.type_hash = D::type_hash();
        info.type_id = Some(TypeId::of::<D>());
        Self {
            info,
            _marker: PhantomData,
        }
    }

    /// Set the type kind.
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.info.kind = kind;
        self
    }

    /// Mark as a value type.
    pub fn value(self) -> Self {
        self.kind(TypeKind::Value)
    }

    /// Add a base interface of an interface.
    pub fn extends<I: Reflect + ?Sized>(mut self) -> Self {
        self.info.interfaces.push(InterfaceRef {
            type_ref: TypeRef::of::<I>(),
            cast: None,
        });
        self
    }

    /// Add a directly declared property.
    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.info.properties.push(property);
        self
    }

    /// Set generic parameters (makes this an open generic definition).
    pub fn generic_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.info.generic_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Finish the description.
    pub fn build(self) -> TypeInfo {
        self.info
    }
}

impl<D: Reflect> TypeBuilder<D> {
    /// Set the base class `B`, embedded in `D` and reached through the projections.
    pub fn base<B: Reflect>(mut self, to_base: fn(&D) -> &B, to_base_mut: fn(&mut D) -> &mut B) -> Self {
        self.info.base_class = Some(BaseClass {
            type_ref: TypeRef::of::<B>(),
            projection: Some(BaseProjection::new(to_base, to_base_mut)),
        });
        self
    }

    /// Add an implemented interface `I` with the casts from `D`.
    pub fn implements<I: Reflect + ?Sized>(mut self, as_ref: fn(&D) -> &I, as_mut: fn(&mut D) -> &mut I) -> Self {
        let cast: ErasedCast = Arc::new(InterfaceCast::<I>::new(as_ref, as_mut));
        self.info.interfaces.push(InterfaceRef {
            type_ref: TypeRef::of::<I>(),
            cast: Some(cast),
        });
        self
    }
}
