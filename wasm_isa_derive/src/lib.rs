//! Derive macros for the `wasm_isa` crate.
//!
//! Provides:
//! - `#[derive(Error)]` - `Display` + `std::error::Error` for error enums and structs

mod error;

use proc_macro::TokenStream;

/// Automatically implements `Display` and `Error` traits for error types.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
