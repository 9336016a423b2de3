//! Derive support for questionnaire section records.
//!
//! `#[derive(SectionFields)]` turns a plain struct with named fields into a
//! section whose fields can be replaced one at a time:
//!
//! ```ignore
//! #[derive(Clone, SectionFields)]
//! #[section(name = "scaling", field_enum = "ScalingField")]
//! pub struct ScalingAnswers {
//!     pub expected_users: u64,
//!     pub auto_scaling: bool,
//! }
//! ```
//!
//! expands to a `ScalingField` enum (`ExpectedUsers(u64)`, `AutoScaling(bool)`)
//! plus `with_field`, `field_from_json`, `field_to_json`, `SECTION` and
//! `FIELD_NAMES` on the struct. The dynamic helpers report failures through
//! `crate::QuestionnaireError`, so the deriving crate must export that type
//! with `InvalidField` and `InvalidValue` variants.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input};

#[proc_macro_derive(SectionFields, attributes(section))]
pub fn derive_section_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct SectionAttr {
    name: LitStr,
    field_enum: Ident,
}

fn parse_section_attr(input: &DeriveInput) -> syn::Result<SectionAttr> {
    let mut name = None;
    let mut field_enum = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("section")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else if meta.path.is_ident("field_enum") {
                let lit: LitStr = meta.value()?.parse()?;
                field_enum = Some(lit.parse::<Ident>()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `field_enum`"))
            }
        })?;
    }

    let name = name.ok_or_else(|| {
        syn::Error::new(Span::call_site(), "missing #[section(name = \"...\")]")
    })?;
    let field_enum = field_enum.ok_or_else(|| {
        syn::Error::new(Span::call_site(), "missing #[section(field_enum = \"...\")]")
    })?;

    Ok(SectionAttr { name, field_enum })
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let attr = parse_section_attr(&input)?;
    let struct_name = &input.ident;
    let vis = &input.vis;

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "SectionFields requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "SectionFields can only be derived for structs",
            ));
        }
    };

    let section = &attr.name;
    let field_enum = &attr.field_enum;

    let mut variants = Vec::new();
    let mut names = Vec::new();
    let mut name_arms = Vec::new();
    let mut apply_arms = Vec::new();
    let mut from_json_arms = Vec::new();
    let mut to_json_arms = Vec::new();

    for field in named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let key = ident.unraw().to_string();
        let variant = Ident::new(&to_upper_camel(&key), ident.span());
        let doc = format!("Replaces `{section}.{key}`.", section = section.value());

        variants.push(quote! {
            #[doc = #doc]
            #variant(#ty)
        });
        names.push(key.clone());
        name_arms.push(quote! { Self::#variant(_) => #key });
        apply_arms.push(quote! { #field_enum::#variant(value) => next.#ident = value });
        from_json_arms.push(quote! {
            #key => ::serde_json::from_value::<#ty>(value)
                .map(#field_enum::#variant)
                .map_err(|e| crate::QuestionnaireError::InvalidValue {
                    section: #section,
                    field: #key.to_string(),
                    reason: e.to_string(),
                })
        });
        to_json_arms.push(quote! { #key => ::serde_json::to_value(&self.#ident).ok() });
    }

    let enum_doc = format!(
        "Single-field update for the `{}` section.",
        section.value()
    );

    Ok(quote! {
        #[doc = #enum_doc]
        #[derive(Debug, Clone, PartialEq)]
        #vis enum #field_enum {
            #(#variants,)*
        }

        impl #field_enum {
            /// Field name as it appears in the persisted document.
            pub fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }
        }

        impl #struct_name {
            /// Section name as it appears in the persisted document.
            pub const SECTION: &'static str = #section;

            /// Every field name, in declaration order.
            pub const FIELD_NAMES: &'static [&'static str] = &[#(#names),*];

            /// Returns a copy of `self` with exactly one field replaced.
            pub fn with_field(&self, field: #field_enum) -> Self {
                let mut next = self.clone();
                match field {
                    #(#apply_arms,)*
                }
                next
            }

            /// Builds a typed field update from a field name and an untyped value.
            pub fn field_from_json(
                field: &str,
                value: ::serde_json::Value,
            ) -> ::std::result::Result<#field_enum, crate::QuestionnaireError> {
                match field {
                    #(#from_json_arms,)*
                    other => Err(crate::QuestionnaireError::InvalidField {
                        section: #section,
                        field: other.to_string(),
                    }),
                }
            }

            /// Current value of one field, or `None` for an unknown name.
            pub fn field_to_json(&self, field: &str) -> Option<::serde_json::Value> {
                match field {
                    #(#to_json_arms,)*
                    _ => None,
                }
            }
        }
    })
}

fn to_upper_camel(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
