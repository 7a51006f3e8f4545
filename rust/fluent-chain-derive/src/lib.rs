use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, parse2, *};

#[proc_macro_derive(Structural)]
pub fn structural(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input: TokenStream = input.into();

    impl_structural(input).into()
}

fn impl_structural(input: TokenStream) -> TokenStream {
    let mut item: DeriveInput = match parse2(input) {
        Ok(item) => item,
        Err(err) => {
            return err.to_compile_error();
        },
    };

    for param in item.generics.type_params_mut() {
        param.bounds.push(parse_quote!(::fluent_chain::Structural));
    }

    let body = match &item.data {
        Data::Struct(data) => struct_structure(&data.fields),
        Data::Enum(data) => {
            let class_name = &item.ident;
            let arms = data.variants.iter().map(|v| variant_arm(class_name, v));
            quote! {
                match self {
                    #(#arms),*
                }
            }
        },
        Data::Union(_) => {
            return Error::new_spanned(&item.ident, "Structural cannot be derived for unions").to_compile_error();
        },
    };

    let class_name = &item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();

    quote! {
        impl #impl_generics ::fluent_chain::Structural for #class_name #type_generics #where_clause {
            fn structure(&self) -> ::fluent_chain::Structure {
                #body
            }
        }
    }
}

fn member_name(field: &Field, index: usize) -> String {
    match &field.ident {
        Some(ident) => ident.unraw().to_string(),
        None => index.to_string(),
    }
}

fn struct_structure(fields: &Fields) -> TokenStream {
    match fields {
        Fields::Named(nf) => {
            let names = nf.named.iter().enumerate().map(|(i, f)| member_name(f, i));
            let idents = nf.named.iter().map(|f| &f.ident);
            quote! {
                ::fluent_chain::Structure::record([
                    #((#names, ::fluent_chain::Structural::structure(&self.#idents))),*
                ])
            }
        },
        Fields::Unnamed(uf) => {
            let indices = (0..uf.unnamed.len()).map(Index::from);
            quote! {
                ::fluent_chain::Structure::Sequence(::std::vec![
                    #(::fluent_chain::Structural::structure(&self.#indices)),*
                ])
            }
        },
        Fields::Unit => quote! {
            ::fluent_chain::Structure::Record(::std::collections::BTreeMap::new())
        },
    }
}

fn variant_arm(class_name: &Ident, variant: &Variant) -> TokenStream {
    let variant_name = &variant.ident;
    let label = variant_name.unraw().to_string();

    match &variant.fields {
        Fields::Named(nf) => {
            let idents = nf.named.iter().map(|f| &f.ident).collect::<Vec<_>>();
            let names = nf.named.iter().enumerate().map(|(i, f)| member_name(f, i));
            quote! {
                #class_name::#variant_name { #(#idents),* } => ::fluent_chain::Structure::variant(
                    #label,
                    ::fluent_chain::Structure::record([
                        #((#names, ::fluent_chain::Structural::structure(#idents))),*
                    ]),
                )
            }
        },
        Fields::Unnamed(uf) => {
            let inner_fields = (0..uf.unnamed.len()).map(|i| format_ident!("f{}", i)).collect::<Vec<_>>();
            quote! {
                #class_name::#variant_name(#(#inner_fields),*) => ::fluent_chain::Structure::variant(
                    #label,
                    ::fluent_chain::Structure::Sequence(::std::vec![
                        #(::fluent_chain::Structural::structure(#inner_fields)),*
                    ]),
                )
            }
        },
        Fields::Unit => quote! {
            #class_name::#variant_name => ::fluent_chain::Structure::variant(
                #label,
                ::fluent_chain::Structure::Sequence(::std::vec::Vec::new()),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: TokenStream) -> String {
        impl_structural(input).to_string().replace(' ', "")
    }

    #[test]
    fn named_fields_become_record_members() {
        let output = expand(quote! {
            struct Customer { name: String, r#type: u8 }
        });

        assert!(output.contains("Structure::record"));
        assert!(output.contains("\"name\""));
        assert!(output.contains("\"type\""));
        assert!(output.contains("self.r#type"));
    }

    #[test]
    fn tuple_fields_become_sequence() {
        let output = expand(quote! {
            struct Pair(u8, String);
        });

        assert!(output.contains("Structure::Sequence"));
        assert!(output.contains("self.0"));
        assert!(output.contains("self.1"));
    }

    #[test]
    fn enum_variants_carry_their_name() {
        let output = expand(quote! {
            enum Shape { Dot, Circle(f64), Rect { w: f64, h: f64 } }
        });

        assert!(output.contains("\"Dot\""));
        assert!(output.contains("\"Circle\""));
        assert!(output.contains("\"Rect\""));
        assert!(output.contains("Shape::Rect{w,h}"));
    }

    #[test]
    fn type_parameters_get_bound() {
        let output = expand(quote! {
            struct Wrapper<T> { inner: T }
        });

        assert!(output.contains("impl<T:::fluent_chain::Structural>"));
    }

    #[test]
    fn unions_are_rejected() {
        let output = expand(quote! {
            union Bits { a: u32, b: f32 }
        });

        assert!(output.contains("compile_error"));
    }
}
