//! Full-pipeline tests: source text in, rendered artifacts and diagnostics
//! out.

use quench_gen::{Diagnostics, RoundOutcome, Severity, Snapshot, run_round};
use std::path::PathBuf;

fn run(sources: &[(&str, &str)]) -> (RoundOutcome, Diagnostics) {
    let sources = sources
        .iter()
        .map(|(path, text)| (PathBuf::from(path), (*text).to_string()))
        .collect();
    let snapshot = Snapshot::parse(sources).expect("fixture sources must parse");
    let mut diagnostics = Diagnostics::new();
    let outcome = run_round(&snapshot, &mut diagnostics);
    (outcome, diagnostics)
}

const CHAT_STATE: &str = "\
#[derive(Clone, Default, UiState)]
pub struct ChatState {
    pub loading: bool,

    #[one_shot]
    pub message: Option<String>,

    #[one_shot(policy = ConsumeThenAction, consume_name = \"consume_navigation\")]
    pub navigate_to: Option<String>,
}
";

#[test]
fn chat_scenario_generates_both_artifact_kinds() {
    let (outcome, diagnostics) = run(&[("src/state.rs", CHAT_STATE)]);

    assert!(!diagnostics.has_errors(), "scenario must generate cleanly");
    assert_eq!(outcome.artifacts.len(), 1);
    assert!(outcome.deferred.is_empty());

    let artifact = &outcome.artifacts[0];
    assert_eq!(artifact.file_name, "chat_state.rs");
    assert_eq!(artifact.owner, "ChatState");
    assert_eq!(artifact.deps, vec![PathBuf::from("src/state.rs")]);

    let contents = &artifact.contents;
    assert!(contents.contains("pub trait ChatStateConsume"));
    assert!(contents.contains("fn consume_message(&self)"));
    assert!(contents.contains("fn consume_navigation(&self)"));
    assert!(contents.contains("pub fn chat_state_effects"));
    assert!(contents.contains("on_message"));
    assert!(contents.contains("on_navigate_to"));
}

#[test]
fn chat_scenario_orders_each_field_by_its_policy() {
    let (outcome, _) = run(&[("src/state.rs", CHAT_STATE)]);
    let contents = &outcome.artifacts[0].contents;

    // message: default policy, callback strictly before the reset
    let callback = contents
        .find("on_message(value)")
        .expect("message callback invocation");
    let consume = contents
        .find("consume_message(holder)")
        .expect("message consume invocation");
    assert!(callback < consume);

    // navigate_to: ConsumeThenAction, reset strictly before the callback
    let consume = contents
        .find("consume_navigation(holder)")
        .expect("navigation consume invocation");
    let callback = contents
        .find("on_navigate_to(value)")
        .expect("navigation callback invocation");
    assert!(consume < callback);
}

#[test]
fn one_consume_op_and_one_dispatch_block_per_field() {
    let (outcome, _) = run(&[("src/state.rs", CHAT_STATE)]);
    let contents = &outcome.artifacts[0].contents;

    assert_eq!(contents.matches("fn consume_").count(), 2);
    assert_eq!(contents.matches(".launch(").count(), 2);
    assert_eq!(contents.matches(".retire(").count(), 2);
}

#[test]
fn unmarked_fields_stay_untouched() {
    let (outcome, _) = run(&[("src/state.rs", CHAT_STATE)]);
    let contents = &outcome.artifacts[0].contents;

    // `loading` is persistent state: no consume op, no dispatch block.
    assert!(!contents.contains("consume_loading"));
    assert!(!contents.contains("on_loading"));
}

#[test]
fn regenerating_an_unchanged_snapshot_is_byte_identical() {
    let (first, _) = run(&[("src/state.rs", CHAT_STATE)]);
    let (second, _) = run(&[("src/state.rs", CHAT_STATE)]);

    let first: Vec<_> = first
        .artifacts
        .iter()
        .map(|a| (&a.file_name, &a.contents))
        .collect();
    let second: Vec<_> = second
        .artifacts
        .iter()
        .map(|a| (&a.file_name, &a.contents))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn invalid_owner_yields_no_artifacts_and_one_error() {
    let (outcome, diagnostics) = run(&[(
        "src/state.rs",
        "#[derive(UiState)]\n\
         pub struct BrokenState { #[one_shot] message: Option<String> }",
    )]);

    assert!(outcome.artifacts.is_empty());

    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1, "exactly one diagnostic per invalid group");
    assert_eq!(errors[0].severity, Severity::Error);
    assert!(errors[0].message.contains("BrokenState"));
    let decl = errors[0].decl.as_ref().expect("diagnostic names the field");
    assert!(decl.name.contains("message"));
}

#[test]
fn a_failed_group_does_not_abort_the_others() {
    let (outcome, diagnostics) = run(&[
        ("src/chat.rs", CHAT_STATE),
        (
            "src/broken.rs",
            "#[derive(UiState)]\n\
             pub struct BrokenState { #[one_shot] message: Option<String> }",
        ),
    ]);

    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].file_name, "chat_state.rs");
    assert_eq!(diagnostics.errors().count(), 1);
}

#[test]
fn unresolvable_payload_defers_and_later_round_resolves() {
    let settings = "\
#[derive(Clone, UiState)]
pub struct SettingsState {
    #[one_shot]
    pub route: Option<Route>,
}
";

    let (outcome, diagnostics) = run(&[("src/settings.rs", settings)]);
    assert!(outcome.artifacts.is_empty());
    assert_eq!(outcome.deferred.len(), 1);
    assert_eq!(outcome.deferred[0].unresolved, "Route");
    assert!(
        !diagnostics.has_errors(),
        "deferral is not an error; the declaration is re-offered",
    );

    // Next round the declaring file is part of the snapshot.
    let (outcome, diagnostics) = run(&[
        ("src/settings.rs", settings),
        ("src/route.rs", "#[derive(Clone, Hash)] pub struct Route { pub target: String }"),
    ]);
    assert!(!diagnostics.has_errors());
    assert!(outcome.deferred.is_empty());
    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].file_name, "settings_state.rs");
}

#[test]
fn artifact_name_collision_skips_the_later_group() {
    let (outcome, diagnostics) = run(&[(
        "src/state.rs",
        "mod a {\n\
             #[derive(Clone, UiState)]\n\
             pub struct State { #[one_shot] message: Option<String> }\n\
         }\n\
         mod b {\n\
             #[derive(Clone, UiState)]\n\
             pub struct State { #[one_shot] route: Option<String> }\n\
         }",
    )]);

    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].owner, "a::State");
    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("b::State"));
    assert!(errors[0].message.contains("a::State"));
}

#[test]
fn malformed_policy_still_generates_with_default_order() {
    let (outcome, diagnostics) = run(&[(
        "src/state.rs",
        "#[derive(Clone, UiState)]\n\
         pub struct State { #[one_shot(policy = Sideways)] message: Option<String> }",
    )]);

    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(diagnostics.errors().count(), 1);

    let contents = &outcome.artifacts[0].contents;
    let callback = contents.find("on_message(value)").expect("callback");
    let consume = contents.find("consume_message(holder)").expect("consume");
    assert!(callback < consume, "unknown policy falls back to the default order");
}
