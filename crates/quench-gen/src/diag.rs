//! Diagnostics boundary.
//!
//! The engine never prints. Everything a round wants to say — progress,
//! per-group failures, unexpected faults — is recorded here and surfaced by
//! whoever drives the round (build script, tests, IDE plumbing).

use std::fmt;
use std::path::PathBuf;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Progress notes: counts, round summaries.
    Info,

    /// Non-fatal per-group failure; that group produced no artifacts.
    Error,

    /// Unexpected synthesis or I/O failure, reported with full context.
    Fault,
}

///
/// DeclRef
///
/// Best-effort attachment of a diagnostic to a source declaration, so hosts
/// can surface it next to the offending code.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclRef {
    pub file: PathBuf,
    pub name: String,
}

impl DeclRef {
    pub fn new(file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub decl: Option<DeclRef>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decl {
            Some(decl) => write!(
                f,
                "{} (at `{}` in {})",
                self.message,
                decl.name,
                decl.file.display()
            ),
            None => write!(f, "{}", self.message),
        }
    }
}

///
/// Diagnostics
///
/// Collecting sink for one generation run. Round-scoped like everything
/// else: create one per run, drain it afterwards.
///

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, None, message.into());
    }

    pub fn error(&mut self, decl: Option<DeclRef>, message: impl Into<String>) {
        self.push(Severity::Error, decl, message.into());
    }

    pub fn fault(&mut self, decl: Option<DeclRef>, message: impl Into<String>) {
        self.push(Severity::Fault, decl, message.into());
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Error and fault entries only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity != Severity::Info)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    fn push(&mut self, severity: Severity, decl: Option<DeclRef>, message: String) {
        match severity {
            Severity::Info => tracing::debug!(%message, "quench"),
            Severity::Error | Severity::Fault => tracing::warn!(%message, "quench"),
        }
        self.entries.push(Diagnostic {
            severity,
            message,
            decl,
        });
    }
}

///
/// TESTS
///
