//! Quench — one-shot event consumption for immutable view state.
//!
//! This is the public meta-crate. Downstream users depend on **quench** only.
//!
//! It re-exports the declarative markers from `quench-marks` and owns the
//! small runtime surface the generated code is written against:
//!   - `StateHolder` (the capability used to replace the held state record)
//!   - `StateCell`   (a ready-made single-threaded holder)
//!   - `Effects`     (the keyed one-shot effect primitive)
//!
//! The generator itself lives in `quench-gen` and is driven from a build
//! script via `quench-build`.

pub use quench_marks::UiState;

pub mod effects;
pub mod holder;

pub use effects::Effects;
pub use holder::{StateCell, StateHolder};

///
/// Prelude
/// Everything a screen module needs to use generated consume/dispatch code.
///

pub mod prelude {
    pub use crate::{Effects, StateCell, StateHolder, UiState};
}
