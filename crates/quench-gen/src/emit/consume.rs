use crate::config::FieldConfig;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

/// The consume-operation set: one reset per field, packaged as an extension
/// trait blanket-implemented for every holder of the owner's state.
///
/// Each operation is a pure state transition — a structural copy that
/// clears exactly its own field and leaves every other field untouched.
#[must_use]
pub fn consume_ops(owner: &Ident, configs: &[FieldConfig]) -> TokenStream {
    let trait_ident = consume_trait_ident(owner);

    let methods = configs.iter().map(|config| {
        let name = &config.consume_name;
        let field = &config.field;
        quote! {
            fn #name(&self) {
                self.apply(|state| #owner {
                    #field: ::core::option::Option::None,
                    ..state
                });
            }
        }
    });

    quote! {
        pub trait #trait_ident: ::quench::StateHolder<#owner> {
            #(#methods)*
        }

        impl<H> #trait_ident for H where H: ::quench::StateHolder<#owner> {}
    }
}

pub fn consume_trait_ident(owner: &Ident) -> Ident {
    format_ident!("{owner}Consume")
}
