//! Attribute parsing for `#[reflect(...)]`.

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Attribute, Lifetime, LitStr, Token, Type, TypeParamBound, punctuated::Punctuated, spanned::Spanned};

/// Parsed `#[reflect(...)]` attributes on a struct.
#[derive(Default)]
pub struct TypeAttrs {
    /// Override type name (default: module path and struct name)
    pub name: Option<String>,
    /// Value or reference semantics
    pub kind: Option<KindAttr>,
    /// Implemented interfaces as `dyn Trait + 'static`, in declaration order
    pub implements: Vec<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindAttr {
    Value,
    Reference,
}

/// Parsed `#[reflect(...)]` attributes on a field.
#[derive(Default)]
pub struct FieldAttrs {
    /// Getter visibility, if the field has a getter
    pub get: Option<VisibilityAttr>,
    /// Setter visibility, if the field has a setter
    pub set: Option<VisibilityAttr>,
    /// Override property name
    pub name: Option<String>,
    /// Field holds the base-class sub-object
    pub base: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAttr {
    Public,
    Protected,
    Private,
}

impl VisibilityAttr {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unknown visibility '{other}', expected \"public\", \"protected\" or \"private\""),
            )),
        }
    }

    pub fn tokens(self) -> TokenStream2 {
        match self {
            Self::Public => quote! { ::propcache::Visibility::Public },
            Self::Protected => quote! { ::propcache::Visibility::Protected },
            Self::Private => quote! { ::propcache::Visibility::Private },
        }
    }
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[reflect(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("value") {
                    result.kind = Some(KindAttr::Value);
                } else if meta.path.is_ident("reference") {
                    result.kind = Some(KindAttr::Reference);
                } else if meta.path.is_ident("implements") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    for ty in types {
                        result.implements.push(static_trait_object(ty)?);
                    }
                } else {
                    return Err(meta.error(format!(
                        "unknown reflect attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[reflect(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("reflect") {
                continue;
            }
            result.span = Some(attr.span());

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("get") {
                    result.get = Some(visibility(&meta)?);
                } else if meta.path.is_ident("set") {
                    result.set = Some(visibility(&meta)?);
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("base") {
                    result.base = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown reflect field attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        if result.base && (result.get.is_some() || result.set.is_some() || result.name.is_some()) {
            return Err(syn::Error::new(
                result.span.unwrap_or_else(Span::call_site),
                "a `base` field cannot also declare a property",
            ));
        }

        Ok(result)
    }

    /// Check if the field declares a property.
    pub fn is_property(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }
}

/// Bare `get` is public, `get = "..."` names the visibility.
fn visibility(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<VisibilityAttr> {
    if meta.input.peek(Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        VisibilityAttr::parse(&lit)
    } else {
        Ok(VisibilityAttr::Public)
    }
}

/// Accept `dyn Trait` and give it a `'static` bound unless it has a lifetime.
fn static_trait_object(ty: Type) -> syn::Result<Type> {
    match ty {
        Type::TraitObject(mut object) => {
            if !object.bounds.iter().any(|b| matches!(b, TypeParamBound::Lifetime(_))) {
                object
                    .bounds
                    .push(TypeParamBound::Lifetime(Lifetime::new("'static", Span::call_site())));
            }
            Ok(Type::TraitObject(object))
        }
        other => Err(syn::Error::new_spanned(other, "expected a trait object type like `dyn Trait`")),
    }
}
