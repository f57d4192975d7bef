//! Derive macro for error types.
//!
//! Generates `std::fmt::Display` and `std::error::Error` implementations.
//!
//! # Usage
//!
//! ```ignore
//! use wasm_isa_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum ReadError {
//!     #[error("input truncated")]
//!     Truncated,
//!
//!     #[error("field longer than {max_bytes} bytes")]
//!     TooLong { max_bytes: usize },
//!
//!     #[error("bad marker byte 0x{0:02x}")]
//!     BadMarker(u8),
//! }
//! ```
//!
//! # Supported Features
//!
//! - Unit variants: `#[error("message")]`
//! - Tuple variants with positional args: `#[error("error: {0}")]`
//! - Struct variants with named args: `#[error("expected {expected}")]`
//!
//! Fields that the message does not mention are left out of the generated
//! `write!` call, so a variant may carry context that is only meant for
//! programmatic matching (e.g. a byte offset).

use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Lit, Meta, parse_macro_input};

/// Derives `Display` and `Error` for an enum or struct.
///
/// Each variant must have an `#[error("...")]` attribute specifying
/// the display message. Supports field interpolation using `{0}`, `{1}`
/// for tuple fields or `{field_name}` for struct fields, including format
/// specs such as `{opcode:#04x}`.
pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_error_derive(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_error_derive(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let display_body = match &input.data {
        Data::Enum(data_enum) => {
            let display_arms = data_enum
                .variants
                .iter()
                .map(|variant| {
                    let variant_name = &variant.ident;
                    let error_msg = extract_error_message(variant)?;

                    let arm = match &variant.fields {
                        Fields::Unit => {
                            quote! {
                                Self::#variant_name => write!(f, #error_msg),
                            }
                        }
                        Fields::Unnamed(fields) => {
                            let field_names: Vec<_> = (0..fields.unnamed.len())
                                .map(|i| quote::format_ident!("f{}", i))
                                .collect();
                            let format_str =
                                convert_positional_to_named(&error_msg, fields.unnamed.len());
                            let bindings = field_names.iter().map(|ident| {
                                if mentions(&format_str, &ident.to_string()) {
                                    quote! { #ident }
                                } else {
                                    quote! { _ }
                                }
                            });
                            let used: Vec<_> = field_names
                                .iter()
                                .filter(|ident| mentions(&format_str, &ident.to_string()))
                                .collect();
                            quote! {
                                Self::#variant_name(#(#bindings),*) => write!(f, #format_str, #(#used = #used),*),
                            }
                        }
                        Fields::Named(fields) => {
                            let field_names: Vec<_> =
                                fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();
                            let used: Vec<_> = field_names
                                .iter()
                                .filter(|ident| mentions(&error_msg, &ident.to_string()))
                                .collect();
                            quote! {
                                Self::#variant_name { #(#used,)* .. } => write!(f, #error_msg, #(#used = #used),*),
                            }
                        }
                    };

                    Ok(arm)
                })
                .collect::<syn::Result<Vec<_>>>()?;

            quote! {
                match self {
                    #(#display_arms)*
                }
            }
        }
        Data::Struct(data_struct) => {
            let error_msg = extract_error_message_from_attrs(
                &input.attrs,
                &input.ident,
                &format!("type `{}`", input.ident),
            )?;

            match &data_struct.fields {
                Fields::Unit => {
                    quote! {
                        write!(f, #error_msg)
                    }
                }
                Fields::Named(fields) => {
                    let used: Vec<_> = fields
                        .named
                        .iter()
                        .filter_map(|f| f.ident.as_ref())
                        .filter(|ident| mentions(&error_msg, &ident.to_string()))
                        .collect();
                    quote! {
                        write!(f, #error_msg, #(#used = self.#used),*)
                    }
                }
                Fields::Unnamed(fields) => {
                    let format_str = convert_positional_to_named(&error_msg, fields.unnamed.len());
                    let (idents, indices): (Vec<_>, Vec<_>) = (0..fields.unnamed.len())
                        .map(|i| (quote::format_ident!("f{}", i), syn::Index::from(i)))
                        .filter(|(ident, _)| mentions(&format_str, &ident.to_string()))
                        .unzip();
                    quote! {
                        write!(f, #format_str, #(#idents = self.#indices),*)
                    }
                }
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Error derive does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #display_body
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

/// Extracts the error message from a variant's `#[error("...")]` attribute.
fn extract_error_message(variant: &syn::Variant) -> syn::Result<String> {
    let variant_name = variant.ident.to_string();
    extract_error_message_from_attrs(
        &variant.attrs,
        &variant.ident,
        &format!("variant `{}`", variant_name),
    )
}

/// Extracts the error message from attributes.
fn extract_error_message_from_attrs<T: ToTokens>(
    attrs: &[syn::Attribute],
    target: &T,
    target_desc: &str,
) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("error") {
            if let Meta::List(meta_list) = &attr.meta {
                let tokens = meta_list.tokens.clone();
                let lit = syn::parse2::<Lit>(tokens).map_err(|_| {
                    syn::Error::new_spanned(
                        &attr.meta,
                        "failed to parse #[error] attribute; expected a string literal like #[error(\"unknown opcode: {0}\")]",
                    )
                })?;

                if let Lit::Str(lit_str) = lit {
                    return Ok(lit_str.value());
                }

                return Err(syn::Error::new_spanned(
                    &attr.meta,
                    "invalid #[error] attribute: message must be a string literal, e.g. #[error(\"unknown opcode: {0}\")]",
                ));
            }

            return Err(syn::Error::new_spanned(
                &attr.meta,
                "invalid #[error] attribute; use #[error(\"message\")] to describe the error",
            ));
        }
    }

    Err(syn::Error::new_spanned(
        target,
        format!(
            "missing #[error(\"...\")] attribute on {}; every error variant must declare a display message",
            target_desc
        ),
    ))
}

/// Returns true if `format_str` interpolates the argument `name`,
/// either bare (`{name}`) or with a format spec (`{name:>4}`).
fn mentions(format_str: &str, name: &str) -> bool {
    let bare = format!("{{{}}}", name);
    let with_spec = format!("{{{}:", name);
    format_str.contains(&bare) || format_str.contains(&with_spec)
}

/// Converts positional format args `{0}`, `{1:x}` to named args `{f0}`, `{f1:x}`.
fn convert_positional_to_named(format_str: &str, field_count: usize) -> String {
    let mut result = format_str.to_string();
    for i in (0..field_count).rev() {
        result = result
            .replace(&format!("{{{}}}", i), &format!("{{f{}}}", i))
            .replace(&format!("{{{}:", i), &format!("{{f{}:", i));
    }
    result
}
