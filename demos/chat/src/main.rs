//! Simulated chat screen driving the generated one-shot plumbing.
//!
//! Each `frame` call plays the role of one recomposition: snapshot the
//! state, hand it to the generated dispatcher, let pending events fire and
//! retire themselves.

mod state;

use quench::prelude::*;
use state::ChatState;

mod generated {
    use crate::state::ChatState;

    include!(concat!(env!("OUT_DIR"), "/quench/mod.rs"));
}

use generated::{ChatStateConsume as _, chat_state_effects};

fn frame(holder: &StateCell<ChatState>, effects: &mut Effects) {
    let snapshot = holder.get();
    chat_state_effects(
        &snapshot,
        holder,
        effects,
        |message| println!("toast: {message}"),
        |route| println!("navigate -> {route}"),
    );
}

fn main() {
    let holder = StateCell::new(ChatState::default());
    let mut effects = Effects::new();

    // Nothing pending: a frame is a no-op.
    frame(&holder, &mut effects);

    // A message arrives and is delivered exactly once, even across frames.
    holder.apply(|state| ChatState {
        message: Some("welcome to quench".to_string()),
        ..state
    });
    frame(&holder, &mut effects);
    frame(&holder, &mut effects);
    assert!(holder.with(|state| state.message.is_none()));

    // Navigation uses ConsumeThenAction: the reset lands before the
    // callback runs, so a crash mid-navigation cannot replay it.
    holder.apply(|state| ChatState {
        navigate_to: Some("settings".to_string()),
        ..state
    });
    frame(&holder, &mut effects);
    assert!(holder.with(|state| state.navigate_to.is_none()));

    // A pending event can also be consumed without dispatching it.
    holder.apply(|state| ChatState {
        message: Some("stale toast".to_string()),
        ..state
    });
    holder.consume_message();
    frame(&holder, &mut effects);
    assert!(holder.with(|state| state.message.is_none()));

    println!(
        "done; loading flag untouched: {}",
        holder.with(|state| state.loading)
    );
}
