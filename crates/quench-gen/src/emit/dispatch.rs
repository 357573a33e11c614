use crate::config::{FieldConfig, OrderingPolicy};
use crate::emit::consume::consume_trait_ident;
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

/// The unified dispatcher: one function per owner that fires and retires
/// every pending one-shot field.
///
/// Per field, a non-empty snapshot value launches exactly one keyed
/// two-step sequence through the host effect primitive — keyed by the
/// value itself, so the sequence re-fires only when the value changes.
/// While the field is empty the slot is retired, which lets a later event
/// carrying an identical payload fire again. Fields launch independently;
/// ordering across fields is unspecified.
#[must_use]
pub fn dispatcher(owner: &Ident, configs: &[FieldConfig]) -> TokenStream {
    let owner_snake = owner.to_string().to_case(Case::Snake);
    let fn_ident = format_ident!("{owner_snake}_effects");
    let trait_ident = consume_trait_ident(owner);

    let params = configs.iter().map(|config| {
        let callback = callback_ident(config);
        let payload = &config.payload;
        quote!(#callback: impl FnOnce(#payload))
    });

    let blocks = configs.iter().map(|config| {
        let field = &config.field;
        let consume = &config.consume_name;
        let callback = callback_ident(config);
        let slot = format!("{owner}::{field}");

        let sequence = match config.policy {
            OrderingPolicy::ActionThenConsume => quote! {
                #callback(value);
                #trait_ident::#consume(holder);
            },
            OrderingPolicy::ConsumeThenAction => quote! {
                #trait_ident::#consume(holder);
                #callback(value);
            },
        };

        quote! {
            if let ::core::option::Option::Some(value) = state.#field.clone() {
                effects.launch(#slot, value, |value| {
                    #sequence
                });
            } else {
                effects.retire(#slot);
            }
        }
    });

    quote! {
        #[allow(clippy::too_many_arguments)]
        pub fn #fn_ident<H>(
            state: &#owner,
            holder: &H,
            effects: &mut ::quench::Effects,
            #(#params),*
        ) where
            H: ::quench::StateHolder<#owner>,
        {
            #(#blocks)*
        }
    }
}

fn callback_ident(config: &FieldConfig) -> Ident {
    format_ident!("on_{}", config.field)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn config(field: &str, consume: &str, policy: OrderingPolicy) -> FieldConfig {
        FieldConfig {
            field: format_ident!("{field}"),
            payload: syn::parse_str("String").expect("payload type parses"),
            consume_name: format_ident!("{consume}"),
            policy,
        }
    }

    #[test]
    fn one_block_and_one_callback_per_field() {
        let owner = format_ident!("ChatState");
        let configs = vec![
            config("message", "consume_message", OrderingPolicy::ActionThenConsume),
            config("route", "consume_route", OrderingPolicy::ActionThenConsume),
        ];

        let rendered = dispatcher(&owner, &configs).to_string();
        assert_eq!(rendered.matches("launch").count(), 2);
        assert!(rendered.contains("on_message"));
        assert!(rendered.contains("on_route"));
    }

    #[test]
    fn action_then_consume_fires_callback_first() {
        let owner = format_ident!("ChatState");
        let configs = vec![config(
            "message",
            "consume_message",
            OrderingPolicy::ActionThenConsume,
        )];

        let rendered = dispatcher(&owner, &configs).to_string();
        let callback = rendered
            .find("on_message (value)")
            .expect("callback invocation present");
        let consume = rendered
            .find("consume_message (holder)")
            .expect("consume invocation present");
        assert!(
            callback < consume,
            "ActionThenConsume must fire the callback before the reset",
        );
    }

    #[test]
    fn consume_then_action_resets_first() {
        let owner = format_ident!("ChatState");
        let configs = vec![config(
            "route",
            "consume_navigation",
            OrderingPolicy::ConsumeThenAction,
        )];

        let rendered = dispatcher(&owner, &configs).to_string();
        let consume = rendered
            .find("consume_navigation (holder)")
            .expect("consume invocation present");
        let callback = rendered
            .find("on_route (value)")
            .expect("callback invocation present");
        assert!(
            consume < callback,
            "ConsumeThenAction must reset before firing the callback",
        );
    }

    #[test]
    fn empty_fields_retire_their_slot() {
        let owner = format_ident!("ChatState");
        let configs = vec![config(
            "message",
            "consume_message",
            OrderingPolicy::ActionThenConsume,
        )];

        let rendered = dispatcher(&owner, &configs).to_string();
        assert!(rendered.contains("retire"));
    }
}
