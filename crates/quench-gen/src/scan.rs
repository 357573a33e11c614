//! Symbol scanner.
//!
//! Finds every declaration carrying the `one_shot` marker and partitions
//! them into two disjoint sets: fully type-resolved fields ready for
//! grouping, and deferred fields whose type information is not available in
//! this snapshot. Deferred fields are handed back to the driver unconsumed —
//! the incremental contract is that they are re-offered in a later round,
//! never silently dropped.

use crate::diag::Diagnostics;
use crate::node::{NodeId, NodeKind};
use crate::snapshot::{Snapshot, SourceId};
use std::path::PathBuf;
use syn::{Attribute, Ident, Type};

///
/// MarkedField
///

#[derive(Clone, Debug)]
pub struct MarkedField {
    pub node: NodeId,
    pub source: SourceId,
    /// Display name: the field ident, or its positional index.
    pub name: String,
    pub ident: Option<Ident>,
    pub ty: Type,
    /// Raw marker attribute, arguments unvalidated.
    pub marker: Attribute,
}

///
/// DeferredField
///
/// A marked declaration this round could not resolve, with enough identity
/// for the driver to re-offer (and report) it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeferredField {
    pub field: String,
    pub file: PathBuf,
    pub unresolved: String,
}

///
/// ScanOutcome
///

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub resolved: Vec<MarkedField>,
    pub deferred: Vec<DeferredField>,
}

/// Scan the snapshot for marked declarations.
///
/// No side effects beyond count reporting.
pub fn scan(snapshot: &Snapshot, diagnostics: &mut Diagnostics) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for (id, node) in snapshot.tree().iter() {
        let NodeKind::Field(field) = &node.kind else {
            continue;
        };
        let Some(marker) = &field.marker else {
            continue;
        };

        if let Some(unresolved) = snapshot.first_unresolved(&field.ty) {
            outcome.deferred.push(DeferredField {
                field: field.name(),
                file: snapshot.source_path(node.source).to_path_buf(),
                unresolved,
            });
        } else {
            outcome.resolved.push(MarkedField {
                node: id,
                source: node.source,
                name: field.name(),
                ident: field.ident.clone(),
                ty: field.ty.clone(),
                marker: marker.clone(),
            });
        }
    }

    diagnostics.info(format!(
        "scan: {} marked declarations resolved, {} deferred",
        outcome.resolved.len(),
        outcome.deferred.len()
    ));

    outcome
}

///
/// TESTS
///
