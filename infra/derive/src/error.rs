use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type,
    Variant,
};

const CONTEXT_FIELD: &str = "context";
const INTERNAL_VARIANT: &str = "Internal";

/// What the generated impls need to know about one enum variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    contextual: bool,
    arity: usize,
    cfg: Vec<&'a Attribute>,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "ggp_error requires named fields for source/context handling",
            ));
        };

        let mut contextual = false;
        let mut source = None;

        for field in &fields.named {
            let Some(name) = field.ident.as_ref() else { continue };
            if name == CONTEXT_FIELD {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                contextual = true;
            } else if source.is_none() && is_source_field(name, field) {
                source = Some((name, &field.ty));
            }
        }

        if source.is_some() && !contextual {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "ggp_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            ));
        }

        Ok(Self {
            ident: &variant.ident,
            source,
            contextual,
            arity: fields.named.len(),
            cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
        })
    }

    fn is_internal(&self) -> bool {
        self.ident == INTERNAL_VARIANT
    }
}

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    try_expand(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "ggp_error can only be applied to enums"));
    };

    let variants =
        data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let derives = missing_derives(&input.attrs);
    let context_ext = context_trait(name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(name, &ext, v));
    let internal_impls = variants.iter().find(|v| v.is_internal()).map(|v| internal_impls(name, v));

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_ext
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| {
                ::std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    })
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let present = derived_traits(attrs);

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#derives),*)] } }
}

fn derived_traits(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                traits.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.contextual).map(|v| {
        let ident = v.ident;
        let cfg = &v.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    #[allow(unreachable_patterns)]
                    match &mut error {
                        #(#arms)*
                        _ => {}
                    }
                    error
                })
            }
        }
    }
}

/// `From<Source>` plus the `Ext` impl on `Result<T, Source>`.
///
/// Only `{ source, context }` variants qualify; anything wider cannot be built from the source alone.
fn source_impls(name: &Ident, ext: &Ident, v: &ErrorVariant<'_>) -> Option<TokenStream> {
    if v.is_internal() || v.arity != 2 {
        return None;
    }
    let (field, ty) = v.source?;
    let ident = v.ident;
    let cfg = &v.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, v: &ErrorVariant<'_>) -> TokenStream {
    let cfg = &v.cfg;

    quote! {
        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl ::std::convert::From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn is_source_field(name: &Ident, field: &Field) -> bool {
    name == "source"
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

fn is_context_type(ty: &Type) -> bool {
    let Some(Type::Path(cow)) = single_generic(ty, "Option") else {
        return false;
    };
    let Some(segment) = cow.path.segments.last() else {
        return false;
    };
    if segment.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    matches!(
        (args.next(), args.next(), args.next()),
        (
            Some(GenericArgument::Lifetime(lt)),
            Some(GenericArgument::Type(Type::Path(inner))),
            None,
        ) if lt.ident == "static" && inner.path.is_ident("str")
    )
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expanded(input: DeriveInput) -> String {
        expand(input).to_string()
    }

    #[test]
    fn test_context_and_source_impls_are_generated() {
        let output = expanded(parse_quote! {
            pub enum DemoError {
                #[error("IO error{}: {source}", format_context(.context))]
                Io { source: std::io::Error, context: Option<Cow<'static, str>> },
            }
        });

        assert!(!output.contains("compile_error"));
        assert!(output.contains("DemoErrorExt"));
        assert!(output.contains("From < std :: io :: Error > for DemoError"));
        assert!(output.contains("thiserror :: Error"));
    }

    #[test]
    fn test_internal_variant_gets_string_conversions() {
        let output = expanded(parse_quote! {
            pub enum DemoError {
                #[error("Internal error{}: {message}", format_context(.context))]
                Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
            }
        });

        assert!(output.contains("From < String > for DemoError"));
        assert!(output.contains("Cow :: Borrowed (message)"));
    }

    #[test]
    fn test_existing_derives_are_not_duplicated() {
        let output = expanded(parse_quote! {
            #[derive(Debug)]
            pub enum DemoError {
                #[error("Internal error: {message}")]
                Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
            }
        });

        assert_eq!(output.matches("Debug").count(), 1);
    }

    #[test]
    fn test_tuple_variant_is_rejected() {
        let output = expanded(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {0}")]
                Io(std::io::Error),
            }
        });

        assert!(output.contains("compile_error"));
        assert!(output.contains("named fields"));
    }

    #[test]
    fn test_source_without_context_is_rejected() {
        let output = expanded(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {source}")]
                Io { #[source] source: std::io::Error },
            }
        });

        assert!(output.contains("compile_error"));
    }

    #[test]
    fn test_wrong_context_type_is_rejected() {
        let output = expanded(parse_quote! {
            pub enum DemoError {
                #[error("Internal error: {message}")]
                Internal { message: String, context: Option<String> },
            }
        });

        assert!(output.contains("context field must be"));
    }

    #[test]
    fn test_structs_are_rejected() {
        let output = expanded(parse_quote! {
            pub struct NotAnEnum { field: u8 }
        });

        assert!(output.contains("only be applied to enums"));
    }
}
