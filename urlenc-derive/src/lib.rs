//! `#[derive(Record)]` for urlenc.
//!
//! The derive reports every named field to the runtime (name, visibility,
//! annotation, type) and generates by-name access to the public ones. Key names,
//! omission and pretend types are resolved by the runtime schema, not here.

extern crate proc_macro;

mod attrs;
mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

#[proc_macro_derive(Record, attributes(urlenc, serde))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = attrs::ensure_no_urlenc_attrs(&input.attrs, "the record itself").and_then(|()| {
        match &input.data {
            Data::Struct(data) => record::derive_record(&input.ident, &input.generics, data),
            Data::Enum(e) => Err(syn::Error::new(
                e.enum_token.span,
                "Record is only supported for structs with named fields",
            )),
            Data::Union(u) => Err(syn::Error::new(
                u.union_token.span,
                "Record is only supported for structs with named fields",
            )),
        }
    });
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}
