use quench::UiState;

///
/// ChatState
///
/// Screen state for the demo chat view. `message` and `navigate_to` are
/// one-shot events; `loading` is ordinary persistent state the generator
/// leaves alone.
///

#[derive(Clone, Debug, Default, UiState)]
pub struct ChatState {
    pub loading: bool,

    #[one_shot]
    pub message: Option<String>,

    #[one_shot(policy = ConsumeThenAction, consume_name = "consume_navigation")]
    pub navigate_to: Option<String>,
}
