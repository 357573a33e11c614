//! Owner-type validation.

use crate::error::GenError;
use crate::group::OwnerGroup;
use crate::node::NodeKind;
use crate::snapshot::Snapshot;

/// Confirm the group's owner is an immutable value record.
///
/// A valid owner is a struct with named fields that derives `Clone` (so a
/// consume operation can copy-with a single cleared field) and carries the
/// `UiState` marker derive. Every marked field must be an `Option` — the
/// empty sentinel the reset writes back. Any violation skips this group
/// only; the round keeps processing the others.
pub fn validate_group(snapshot: &Snapshot, group: &OwnerGroup) -> Result<(), GenError> {
    let owner = snapshot.qualified_name(group.owner);
    let field = group
        .fields
        .first()
        .map(|f| f.name.clone())
        .unwrap_or_default();

    let decl = match &snapshot.tree().node(group.owner).kind {
        NodeKind::Struct(decl) => decl,
        NodeKind::Enum { .. } => {
            return Err(GenError::Validate {
                owner,
                field,
                reason: "enums are not immutable value records".to_string(),
            });
        }
        _ => {
            return Err(GenError::Validate {
                owner,
                field,
                reason: "owner is not a type declaration".to_string(),
            });
        }
    };

    if !decl.named_fields {
        return Err(GenError::Validate {
            owner,
            field,
            reason: "one-shot fields must be named; tuple records are not supported".to_string(),
        });
    }
    if !decl.derives.iter().any(|d| d == "UiState") {
        return Err(GenError::Validate {
            owner,
            field,
            reason: "missing the UiState marker derive".to_string(),
        });
    }
    if !decl.derives.iter().any(|d| d == "Clone") {
        return Err(GenError::Validate {
            owner,
            field,
            reason: "must derive Clone so consume operations can copy-with".to_string(),
        });
    }

    for marked in &group.fields {
        if option_payload(&marked.ty).is_none() {
            return Err(GenError::Validate {
                owner,
                field: marked.name.clone(),
                reason: "a one-shot field must be an Option, holding the pending event value"
                    .to_string(),
            });
        }
    }

    Ok(())
}

/// The payload type inside an `Option<_>` field declaration.
#[must_use]
pub fn option_payload(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

///
/// TESTS
///
