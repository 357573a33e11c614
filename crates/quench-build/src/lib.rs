//! Build-script driver for quench codegen.
//!
//! The consuming crate runs the generator from its `build.rs`:
//!
//! ```no_run
//! fn main() {
//!     quench_build::Generator::from_env()
//!         .expect("quench requires the cargo build-script environment")
//!         .generate()
//!         .expect("one-shot codegen failed");
//! }
//! ```
//!
//! and includes the aggregated output where its state types are in scope:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/quench/mod.rs"));
//! ```
//!
//! The driver owns everything the engine leaves to the host: source
//! discovery, the round loop that re-offers deferred declarations, artifact
//! persistence, and the cargo metadata that keeps incremental builds
//! honest (`rerun-if-changed` for every contributing source file).

use quench_gen::{ArtifactWriter, Diagnostics, GenError, RoundOutcome, Snapshot, run_round};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error as ThisError;
use walkdir::WalkDir;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("missing build environment variable {name}")]
    Env {
        name: &'static str,
        #[source]
        source: env::VarError,
    },

    #[error("source walk failed under {root}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    WriteOut {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Gen(#[from] GenError),
}

///
/// Report
///
/// What one generation run produced, for callers and tests. Per-group
/// failures never surface here — they are diagnostics, and the missing
/// artifact is the consumer-visible effect.
///

#[derive(Debug)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub deferred: usize,
    pub diagnostics: Diagnostics,
}

///
/// Generator
///
/// Build-time entry point. Configure source roots and an output directory,
/// then `generate()`.
///

#[derive(Debug)]
pub struct Generator {
    source_roots: Vec<PathBuf>,
    out_dir: PathBuf,
    cargo_metadata: bool,
}

impl Generator {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_roots: Vec::new(),
            out_dir: out_dir.into(),
            cargo_metadata: false,
        }
    }

    /// Standard build.rs shape: scan `src/` under the manifest directory,
    /// write under `$OUT_DIR/quench/`, emit cargo dependency metadata.
    pub fn from_env() -> Result<Self, BuildError> {
        let manifest_dir = var("CARGO_MANIFEST_DIR")?;
        let out_dir = var("OUT_DIR")?;

        Ok(Self::new(Path::new(&out_dir).join("quench"))
            .source_root(Path::new(&manifest_dir).join("src"))
            .cargo_metadata(true))
    }

    #[must_use]
    pub fn source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_roots.push(root.into());
        self
    }

    /// Whether to print `cargo:` directives (on for real builds, off in
    /// tests).
    #[must_use]
    pub const fn cargo_metadata(mut self, emit: bool) -> Self {
        self.cargo_metadata = emit;
        self
    }

    /// Discover sources, run generation rounds, persist artifacts.
    ///
    /// Deferred declarations are re-offered until a round stops making
    /// progress; whatever remains is reported and retried on the next
    /// build. A group that failed simply has no artifact this round — the
    /// consumer's compile error on the missing operation is the intended
    /// signal.
    pub fn generate(self) -> Result<Report, BuildError> {
        let sources = self.collect_sources()?;
        let snapshot = Snapshot::parse(sources)?;

        let mut diagnostics = Diagnostics::new();
        let mut outcome = run_round(&snapshot, &mut diagnostics);
        while !outcome.deferred.is_empty() {
            let retry = run_round(&snapshot, &mut diagnostics);
            let progressed = retry.deferred.len() < outcome.deferred.len();
            outcome = retry;
            if !progressed {
                break;
            }
        }
        for deferred in &outcome.deferred {
            diagnostics.info(format!(
                "deferred `{}` in {} (unresolved type `{}`); retrying next build",
                deferred.field,
                deferred.file.display(),
                deferred.unresolved
            ));
        }

        let report = self.persist(&outcome, diagnostics)?;
        tracing::info!(
            artifacts = outcome.artifacts.len(),
            deferred = report.deferred,
            "quench codegen finished"
        );

        Ok(report)
    }

    fn persist(
        &self,
        outcome: &RoundOutcome,
        mut diagnostics: Diagnostics,
    ) -> Result<Report, BuildError> {
        let writer = ArtifactWriter::new(&self.out_dir);
        let mut written = Vec::new();
        let mut includes = Vec::new();
        let mut dep_files: BTreeSet<PathBuf> = BTreeSet::new();

        for artifact in &outcome.artifacts {
            match writer.persist(artifact) {
                Ok(path) => {
                    written.push(path);
                    includes.push(artifact.file_name.clone());
                    dep_files.extend(artifact.deps.iter().cloned());
                }
                // Writer failures are fatal to their group only.
                Err(err) => diagnostics.fault(None, err.to_string()),
            }
        }

        // One aggregator so consumers include a single path.
        let mod_path = self.out_dir.join("mod.rs");
        let mod_contents: String = includes
            .iter()
            .map(|file| format!("include!(\"{file}\");\n"))
            .collect();
        fs::create_dir_all(&self.out_dir).map_err(|source| BuildError::WriteOut {
            path: self.out_dir.clone(),
            source,
        })?;
        fs::write(&mod_path, mod_contents).map_err(|source| BuildError::WriteOut {
            path: mod_path.clone(),
            source,
        })?;
        written.push(mod_path);

        if self.cargo_metadata {
            for root in &self.source_roots {
                println!("cargo:rerun-if-changed={}", root.display());
            }
            for dep in &dep_files {
                println!("cargo:rerun-if-changed={}", dep.display());
            }
            for diagnostic in diagnostics.errors() {
                println!("cargo:warning=quench: {diagnostic}");
            }
        }

        Ok(Report {
            written,
            deferred: outcome.deferred.len(),
            diagnostics,
        })
    }

    fn collect_sources(&self) -> Result<Vec<(PathBuf, String)>, BuildError> {
        let mut sources = Vec::new();

        for root in &self.source_roots {
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|source| BuildError::Walk {
                    root: root.clone(),
                    source,
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if entry.path().extension().is_none_or(|ext| ext != "rs") {
                    continue;
                }
                let contents =
                    fs::read_to_string(entry.path()).map_err(|source| BuildError::Read {
                        path: entry.path().to_path_buf(),
                        source,
                    })?;
                sources.push((entry.path().to_path_buf(), contents));
            }
        }

        sources.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(sources)
    }
}

fn var(name: &'static str) -> Result<String, BuildError> {
    env::var(name).map_err(|source| BuildError::Env { name, source })
}
