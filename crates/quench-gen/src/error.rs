use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// GenError
///
/// Failure taxonomy for one generation round. `Parse` is the only variant
/// that aborts a round — it happens while building the snapshot, upstream of
/// any group. Everything else is scoped to a single owner group and surfaces
/// as a diagnostic while the remaining groups keep generating.
///

#[derive(Debug, ThisError)]
pub enum GenError {
    /// Source could not be parsed while building the compilation snapshot.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// The owning type is not an immutable value record.
    #[error("`{owner}` cannot own one-shot field `{field}`: {reason}")]
    Validate {
        owner: String,
        field: String,
        reason: String,
    },

    /// Field configuration could not be resolved for the group.
    #[error("invalid one-shot configuration on `{owner}.{field}`: {reason}")]
    Config {
        owner: String,
        field: String,
        reason: String,
    },

    /// An artifact could not be persisted.
    #[error("failed to write artifact `{file}` for `{owner}`")]
    Write {
        owner: String,
        file: String,
        #[source]
        source: std::io::Error,
    },
}
