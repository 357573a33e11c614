//! Artifact rendering and persistence.

use crate::error::GenError;
use proc_macro2::TokenStream;
use std::fs;
use std::path::{Path, PathBuf};

///
/// GeneratedArtifact
///
/// One emitted file: its name, rendered contents, and the source files
/// that contributed marked fields to it. The dependency list is what lets
/// the host invalidate and regenerate the artifact when a contributing
/// file changes. Artifacts are overwritten wholesale every round.
///

#[derive(Clone, Debug)]
pub struct GeneratedArtifact {
    /// Qualified owner name, for diagnostics.
    pub owner: String,
    pub file_name: String,
    pub contents: String,
    pub deps: Vec<PathBuf>,
}

/// Render emitted tokens as formatted source.
///
/// Falls back to raw token text when the artifact does not reparse, so a
/// synthesis bug degrades to an ugly file rather than a lost one.
#[must_use]
pub fn render(tokens: &TokenStream) -> String {
    match syn::parse_file(&tokens.to_string()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(_) => tokens.to_string(),
    }
}

///
/// ArtifactWriter
///
/// Persists artifacts under one target directory. A failed write is scoped
/// to its group — the caller reports it and moves on.
///

#[derive(Debug)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one artifact wholesale, returning its final path.
    pub fn persist(&self, artifact: &GeneratedArtifact) -> Result<PathBuf, GenError> {
        let write_err = |source| GenError::Write {
            owner: artifact.owner.clone(),
            file: artifact.file_name.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let path = self.dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents).map_err(write_err)?;

        Ok(path)
    }
}

///
/// TESTS
///
