//! Implementation of the `#[derive(Reflect)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input};

use crate::attrs::{FieldAttrs, KindAttr, TypeAttrs};

pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_reflect_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_reflect_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types",
        ));
    }

    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let fields = collect_fields(input)?;

    let name_impl = match &attrs.name {
        Some(type_name) => quote! { #type_name },
        None => {
            let ident = name.to_string();
            quote! { ::core::concat!(::core::module_path!(), "::", #ident) }
        }
    };

    let type_info = generate_type_info(name, &attrs, &fields);
    let value_impl = match attrs.kind {
        Some(KindAttr::Value) => generate_property_value(name),
        _ => TokenStream2::new(),
    };

    Ok(quote! {
        impl ::propcache::Reflect for #name {
            fn type_name() -> &'static str {
                #name_impl
            }

            #type_info

            fn cast_ref(instance: &dyn ::core::any::Any) -> ::core::option::Option<&Self> {
                ::propcache::cast::class_ref::<Self>(instance)
            }

            fn cast_mut(instance: &mut dyn ::core::any::Any) -> ::core::option::Option<&mut Self> {
                ::propcache::cast::class_mut::<Self>(instance)
            }
        }

        #value_impl

        ::propcache::inventory::submit! {
            ::propcache::Registration::new(<#name as ::propcache::Reflect>::type_info)
        }
    })
}

/// A field that takes part in the description.
struct ReflectField<'a> {
    ident: &'a Ident,
    ty: &'a syn::Type,
    attrs: FieldAttrs,
}

/// Collect fields carrying `#[reflect(...)]` attributes.
fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<ReflectField<'_>>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Reflect can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Reflect can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    let mut has_base = false;
    for field in &named.named {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if !attrs.base && !attrs.is_property() {
            continue;
        }
        if attrs.base {
            if has_base {
                return Err(syn::Error::new_spanned(field, "only one field can be marked `base`"));
            }
            has_base = true;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        fields.push(ReflectField {
            ident,
            ty: &field.ty,
            attrs,
        });
    }

    Ok(fields)
}

/// Generate `type_info` with the base, interface casts and properties.
fn generate_type_info(name: &Ident, attrs: &TypeAttrs, fields: &[ReflectField<'_>]) -> TokenStream2 {
    let mut helpers = Vec::new();
    let mut steps = Vec::new();

    if attrs.kind == Some(KindAttr::Value) {
        steps.push(quote! { .value() });
    }

    if let Some(base) = fields.iter().find(|f| f.attrs.base) {
        let field = base.ident;
        let ty = base.ty;
        helpers.push(quote! {
            fn __base_ref(this: &#name) -> &#ty {
                &this.#field
            }
            fn __base_mut(this: &mut #name) -> &mut #ty {
                &mut this.#field
            }
        });
        steps.push(quote! { .base::<#ty>(__base_ref, __base_mut) });
    }

    for (index, interface) in attrs.implements.iter().enumerate() {
        let as_ref = format_ident!("__as_interface_{}", index);
        let as_mut = format_ident!("__as_interface_mut_{}", index);
        helpers.push(quote! {
            fn #as_ref(this: &#name) -> &(#interface) {
                this
            }
            fn #as_mut(this: &mut #name) -> &mut (#interface) {
                this
            }
        });
        steps.push(quote! { .implements::<#interface>(#as_ref, #as_mut) });
    }

    for field in fields.iter().filter(|f| f.attrs.is_property()) {
        let ident = field.ident;
        let ty = field.ty;
        let prop_name = field.attrs.name.clone().unwrap_or_else(|| ident.to_string());

        let getter = field.attrs.get.map(|vis| {
            let vis = vis.tokens();
            quote! {
                .get(#vis, |this: &#name| -> #ty { ::core::clone::Clone::clone(&this.#ident) })
            }
        });
        let setter = field.attrs.set.map(|vis| {
            let vis = vis.tokens();
            quote! {
                .set(#vis, |this: &mut #name, value: #ty| { this.#ident = value; })
            }
        });

        steps.push(quote! {
            .property(
                ::propcache::PropertyInfo::build::<#name, #ty>(#prop_name)
                    #getter
                    #setter
                    .build(),
            )
        });
    }

    quote! {
        fn type_info() -> ::propcache::TypeInfo {
            #(#helpers)*

            ::propcache::TypeInfo::class::<#name>()
                #(#steps)*
                .build()
        }
    }
}

/// Value types convert to and from an opaque native value.
fn generate_property_value(name: &Ident) -> TokenStream2 {
    quote! {
        impl ::propcache::PropertyValue for #name {
            const KIND: ::propcache::TypeKind = ::propcache::TypeKind::Value;

            fn into_value(self) -> ::propcache::Value {
                ::propcache::Value::native(self)
            }

            fn from_value(
                value: ::propcache::Value,
            ) -> ::core::result::Result<Self, ::propcache::ConversionError> {
                value.into_native::<Self>()
            }
        }
    }
}
