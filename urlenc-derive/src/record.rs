use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    ext::IdentExt, spanned::Spanned, DataStruct, Fields, GenericParam, Generics, Ident, Type,
    Visibility,
};

use crate::attrs::{parse_field_annotation, FieldAnnotation};

struct FieldInfo<'a> {
    ident: &'a Ident,
    name: String,
    public: bool,
    annotation: FieldAnnotation,
    ty: &'a Type,
}

fn collect_fields(data: &DataStruct) -> syn::Result<Vec<FieldInfo<'_>>> {
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.struct_token.span(),
            "Record requires a struct with named fields",
        ));
    };
    fields
        .named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new(field.span(), "unnamed field"))?;
            Ok(FieldInfo {
                ident,
                name: ident.unraw().to_string(),
                public: matches!(field.vis, Visibility::Public(_)),
                annotation: parse_field_annotation(&field.attrs)?,
                ty: &field.ty,
            })
        })
        .collect()
}

fn record_generics(generics: &Generics) -> syn::Result<Generics> {
    let mut out = generics.clone();
    let mut params = Vec::new();
    for param in &generics.params {
        match param {
            GenericParam::Lifetime(lt) => {
                return Err(syn::Error::new(
                    lt.span(),
                    "Record cannot be derived for types with lifetime parameters",
                ));
            }
            GenericParam::Type(tp) => params.push(&tp.ident),
            GenericParam::Const(_) => {}
        }
    }
    let wc = out.make_where_clause();
    for ident in params {
        wc.predicates.push(syn::parse_quote!(#ident: 'static));
    }
    Ok(out)
}

pub(crate) fn derive_record(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    let fields = collect_fields(data)?;
    let generics = record_generics(generics)?;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = fields.iter().map(|f| {
        let FieldInfo {
            name,
            public,
            annotation,
            ty,
            ..
        } = f;
        let annotation = match annotation {
            FieldAnnotation::Absent => quote!(::urlenc::Annotation::Absent),
            FieldAnnotation::Urlenc(lit) => quote!(::urlenc::Annotation::Urlenc(#lit)),
            FieldAnnotation::Fallback(lit) => quote!(::urlenc::Annotation::Fallback(#lit)),
        };
        quote! {
            ::urlenc::FieldDescriptor {
                name: #name,
                public: #public,
                annotation: #annotation,
                ty: (&&::urlenc::__private::TypeProbe::<#ty>::new()).type_desc(),
            }
        }
    });

    let exported: Vec<_> = fields.iter().filter(|f| f.public).collect();
    let read_arms = exported.iter().map(|f| {
        let (name, ident) = (&f.name, f.ident);
        quote! {
            #name => (&&&&::urlenc::__private::Probe(&self.#ident)).read_field(omit_empty),
        }
    });
    let write_arms = exported.iter().map(|f| {
        let (name, ident) = (&f.name, f.ident);
        quote! {
            #name => (&&&&::urlenc::__private::ProbeMut::new(&mut self.#ident)).write_field(value),
        }
    });

    Ok(quote! {
        #[automatically_derived]
        #[allow(clippy::needless_borrow, clippy::match_single_binding, unused_variables)]
        impl #impl_generics ::urlenc::Record for #name #ty_generics #where_clause {
            fn describe() -> ::std::vec::Vec<::urlenc::FieldDescriptor> {
                #[allow(unused_imports)]
                use ::urlenc::__private::{DescribeNative as _, DescribeOpaque as _};
                ::std::vec![#(#descriptors),*]
            }

            fn read_field(
                &self,
                field: &str,
                omit_empty: bool,
            ) -> ::core::result::Result<::core::option::Option<::urlenc::Value>, ::urlenc::Error> {
                #[allow(unused_imports)]
                use ::urlenc::__private::{
                    ReadHook as _, ReadNative as _, ReadOpaque as _, ReadOptionHook as _,
                };
                match field {
                    #(#read_arms)*
                    _ => ::core::result::Result::Err(::urlenc::__private::unknown_field::<Self>(field)),
                }
            }

            fn write_field(
                &mut self,
                field: &str,
                value: ::urlenc::Value,
            ) -> ::core::result::Result<(), ::urlenc::Error> {
                #[allow(unused_imports)]
                use ::urlenc::__private::{
                    WriteHook as _, WriteNative as _, WriteOpaque as _, WriteOptionHook as _,
                };
                match field {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(::urlenc::__private::unknown_field::<Self>(field)),
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics ::urlenc::QueryEncode for #name #ty_generics #where_clause {
            fn encode_query(
                &self,
                codec: &::urlenc::Codec<'_>,
            ) -> ::core::result::Result<::std::vec::Vec<u8>, ::urlenc::Error> {
                codec.encode_record(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::urlenc::QueryDecode for #name #ty_generics #where_clause {
            fn decode_query(
                &mut self,
                input: &[u8],
                codec: &::urlenc::Codec<'_>,
            ) -> ::core::result::Result<(), ::urlenc::Error> {
                codec.decode_record(input, self)
            }
        }
    })
}
