use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprPath, Field, Fields, Ident, Result, Token,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_decode(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Decode` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Decode` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    // Struct expressions evaluate in the order written, which is the order
    // fields are laid out in the file.
    let initializers = fields.iter().map(|field| {
        let name = &field.name;

        let value = match &field.strategy {
            Strategy::Decode => quote! {
                ::alpinequest::decode::Decode::decode(r)?
            },
            Strategy::With(path) => quote! {
                #path(r)?
            },
            Strategy::Source => quote! {
                r.source().map(::std::path::Path::to_path_buf)
            },
        };

        quote! { #name: #value }
    });

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::alpinequest::decode::Decode for #name #type_generics #where_clause {
            fn decode<R: ::std::io::Read>(
                r: &mut ::alpinequest::decode::Reader<R>,
            ) -> ::core::result::Result<Self, ::alpinequest::decode::Error> {
                Ok(Self {
                    #(#initializers,)*
                })
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    strategy: Strategy,
}

#[derive(Debug)]
enum Strategy {
    /// Defer to the field type's own `Decode` implementation.
    Decode,
    /// Call a free function taking the reader.
    With(ExprPath),
    /// Fill from the reader's source label without consuming bytes.
    Source,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("decode")) else {
            return Ok(Self {
                name,
                strategy: Strategy::Decode,
            });
        };

        let DecodeAttribute { strategy } = attr.meta.require_list()?.parse_args()?;

        Ok(Self { name, strategy })
    }
}

#[derive(Debug)]
struct DecodeAttribute {
    strategy: Strategy,
}

impl Parse for DecodeAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident = input.parse::<Ident>()?;

        let strategy = if ident == "with" {
            input.parse::<Token![=]>()?;
            Strategy::With(input.parse::<ExprPath>()?)
        } else if ident == "source" {
            Strategy::Source
        } else {
            Err(Error::new_spanned(
                ident,
                "Decode attribute must be `with = path` or `source`.",
            ))?
        };

        if !input.is_empty() {
            Err(input.error("Unexpected tokens after decode attribute."))?
        }

        Ok(Self { strategy })
    }
}
