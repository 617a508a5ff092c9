use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that builds a static catalog of the fields of an input record.
///
/// For each named field it records:
/// - the wire name (honours `#[serde(rename = "...")]`)
/// - whether the field must be supplied: not an `Option<T>` and not covered
///   by `#[serde(default)]` on either the field or the container
/// - a description joined from the field's doc comments
///
/// Generates `fn field_catalog() -> &'static [crate::core::InputField]`.
#[proc_macro_derive(FieldCatalog, attributes(serde))]
pub fn derive_field_catalog(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let container_default = has_serde_flag(&input.attrs, "default");

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "FieldCatalog requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "FieldCatalog only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let wire_name = serde_rename(&field.attrs).unwrap_or_else(|| ident.to_string());
        let required = !container_default
            && !has_serde_flag(&field.attrs, "default")
            && !is_option(&field.ty);
        let description = doc_text(&field.attrs);

        Some(quote! {
            crate::core::InputField {
                name: #wire_name,
                required: #required,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn field_catalog() -> &'static [crate::core::InputField] {
                static CATALOG: &[crate::core::InputField] = &[
                    #(#entries),*
                ];
                CATALOG
            }
        }
    };

    TokenStream::from(expanded)
}

fn serde_tokens(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
}

fn has_serde_flag(attrs: &[Attribute], flag: &str) -> bool {
    serde_tokens(attrs).any(|tokens| {
        tokens
            .split(',')
            .map(|part| part.split('=').next().unwrap_or("").trim())
            .any(|key| key == flag)
    })
}

fn serde_rename(attrs: &[Attribute]) -> Option<String> {
    serde_tokens(attrs).find_map(|tokens| {
        tokens.split(',').find_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim() != "rename" {
                return None;
            }
            Some(value.trim().trim_matches('"').to_string())
        })
    })
}

fn doc_text(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
