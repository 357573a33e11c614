//! quench-gen — the one-shot consumption code generator.
//!
//! Scans a compilation snapshot for fields marked `#[one_shot]` on
//! `UiState` records and synthesizes, per owning record, the consume
//! operations and the unified effects dispatcher that fire and retire each
//! pending event in its configured order.
//!
//! ## Pipeline
//!
//! scan → resolve ownership → group by owner → validate → resolve configs
//! → synthesize → (driver) persist. One pass per round; groups fail
//! independently; deferred declarations go back to the driver for a later
//! round. See `quench-build` for the build-script driver.

pub mod config;
pub mod diag;
pub mod emit;
pub mod error;
pub mod group;
pub mod node;
pub mod owner;
pub mod round;
pub mod scan;
pub mod snapshot;
pub mod validate;
pub mod write;

pub use config::{FieldConfig, OneShotArgs, OrderingPolicy};
pub use diag::{DeclRef, Diagnostic, Diagnostics, Severity};
pub use error::GenError;
pub use round::{RoundOutcome, run_round};
pub use scan::{DeferredField, MarkedField};
pub use snapshot::Snapshot;
pub use write::{ArtifactWriter, GeneratedArtifact};
