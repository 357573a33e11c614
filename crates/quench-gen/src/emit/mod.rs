//! Code synthesis.
//!
//! Two artifacts per validated owner group, both pure functions of the
//! group and its resolved field configs: the consume-operation trait and
//! the unified effects dispatcher. They land in one generated file so the
//! consumer includes a single path per owner.

mod consume;
mod dispatch;

pub use consume::consume_ops;
pub use dispatch::dispatcher;

use crate::config::FieldConfig;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// Emit both artifacts for one owner.
#[must_use]
pub fn emit_group(owner: &Ident, configs: &[FieldConfig]) -> TokenStream {
    let ops = consume_ops(owner, configs);
    let dispatch = dispatcher(owner, configs);

    quote! {
        #ops
        #dispatch
    }
}
