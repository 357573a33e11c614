//! Declarative markers read by the quench generator.
//!
//! Nothing here has a runtime representation. The derive expands to an empty
//! token stream; it exists so that `#[one_shot(..)]` is a legal inert helper
//! attribute on fields, and so the generator can tell eligible owner records
//! apart from ordinary structs. All real work happens at build time in
//! `quench-gen`.

use proc_macro::TokenStream;

/// Marks an immutable view-state record as an owner of one-shot event fields.
///
/// The owning type must also derive `Clone`: every consume operation is a
/// structural copy that replaces the whole record with one field cleared.
///
/// ```ignore
/// #[derive(Clone, Default, UiState)]
/// pub struct ChatState {
///     pub loading: bool,
///
///     #[one_shot]
///     pub message: Option<String>,
///
///     #[one_shot(policy = ConsumeThenAction, consume_name = "consume_navigation")]
///     pub navigate_to: Option<String>,
/// }
/// ```
///
/// `#[one_shot]` arguments, both optional:
/// - `consume_name = "..."` — name of the generated consume operation
///   (default `consume_<field>`).
/// - `policy = ActionThenConsume | ConsumeThenAction` — whether the effect
///   callback runs before or after the field reset
///   (default `ActionThenConsume`).
///
/// A one-shot field must be an `Option`; its payload needs `Clone` (the
/// dispatcher snapshots it) and `Hash` (the effect primitive keys on it).
#[proc_macro_derive(UiState, attributes(one_shot))]
pub fn derive_ui_state(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
