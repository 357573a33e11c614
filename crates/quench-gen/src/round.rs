//! The generation round.
//!
//! Control flow per round: scan → resolve ownership → group → (per group)
//! validate → resolve configs → synthesize. Groups are processed in a
//! bounded synchronous loop with per-group error isolation: a failed group
//! reports one diagnostic and produces nothing, the rest keep generating.
//! No state outlives the round.

use crate::config::resolve_configs;
use crate::diag::{DeclRef, Diagnostics};
use crate::emit::emit_group;
use crate::error::GenError;
use crate::group::{OwnerGroup, group_by_owner};
use crate::scan::{DeferredField, scan};
use crate::snapshot::Snapshot;
use crate::validate::validate_group;
use crate::write::{GeneratedArtifact, render};
use convert_case::{Case, Casing};
use std::collections::HashMap;
use std::path::PathBuf;

///
/// RoundOutcome
///

#[derive(Debug)]
pub struct RoundOutcome {
    pub artifacts: Vec<GeneratedArtifact>,
    /// Declarations to re-offer in a later round.
    pub deferred: Vec<DeferredField>,
}

/// Run one full generation pass over the snapshot.
///
/// Deterministic in the snapshot: an unchanged symbol set yields
/// byte-identical artifacts.
pub fn run_round(snapshot: &Snapshot, diagnostics: &mut Diagnostics) -> RoundOutcome {
    let outcome = scan(snapshot, diagnostics);
    let deferred = outcome.deferred;
    let groups = group_by_owner(snapshot, outcome.resolved);
    tracing::debug!(groups = groups.len(), "grouped one-shot fields by owner");

    let mut artifacts: Vec<GeneratedArtifact> = Vec::new();
    let mut taken_names: HashMap<String, String> = HashMap::new();

    for group in &groups {
        let owner = snapshot.qualified_name(group.owner);
        match emit_for_group(snapshot, group, diagnostics) {
            Ok(artifact) => {
                if let Some(previous) = taken_names.get(&artifact.file_name) {
                    diagnostics.error(
                        Some(group_decl(snapshot, group)),
                        format!(
                            "artifact `{}` for `{owner}` collides with the one generated for `{previous}`; skipping this group",
                            artifact.file_name
                        ),
                    );
                    continue;
                }
                taken_names.insert(artifact.file_name.clone(), owner.clone());
                diagnostics.info(format!(
                    "generated `{}` for `{owner}` ({} fields)",
                    artifact.file_name,
                    group.fields.len()
                ));
                artifacts.push(artifact);
            }
            Err(err) => {
                diagnostics.error(Some(group_decl(snapshot, group)), err.to_string());
            }
        }
    }

    RoundOutcome {
        artifacts,
        deferred,
    }
}

fn emit_for_group(
    snapshot: &Snapshot,
    group: &OwnerGroup,
    diagnostics: &mut Diagnostics,
) -> Result<GeneratedArtifact, GenError> {
    validate_group(snapshot, group)?;
    let configs = resolve_configs(snapshot, group, diagnostics)?;

    let owner_ident = snapshot
        .type_ident(group.owner)
        .cloned()
        .ok_or_else(|| GenError::Validate {
            owner: snapshot.qualified_name(group.owner),
            field: String::new(),
            reason: "owner is not a type declaration".to_string(),
        })?;

    let tokens = emit_group(&owner_ident, &configs);
    let qualified = snapshot.qualified_name(group.owner);

    let mut deps: Vec<PathBuf> = group
        .fields
        .iter()
        .map(|f| snapshot.source_path(f.source).to_path_buf())
        .collect();
    deps.sort();
    deps.dedup();

    Ok(GeneratedArtifact {
        file_name: format!("{}.rs", owner_ident.to_string().to_case(Case::Snake)),
        contents: format!(
            "// Generated by quench for `{qualified}`. Do not edit.\n\n{}",
            render(&tokens)
        ),
        owner: qualified,
        deps,
    })
}

fn group_decl(snapshot: &Snapshot, group: &OwnerGroup) -> DeclRef {
    let owner = snapshot.qualified_name(group.owner);
    let name = match group.fields.first() {
        Some(field) => format!("{owner}.{}", field.name),
        None => owner,
    };
    let file = snapshot.source_path(snapshot.tree().node(group.owner).source);
    DeclRef::new(file, name)
}
