//! Ownership resolution.

use crate::node::{DeclTree, NodeId, NodeKind};

/// Nearest enclosing type declaration for a marked field node.
///
/// The immediate parent of a field is its container (field set, or the
/// enclosing fn for a stray parameter marker), so the walk always passes
/// through at least one non-type node. An exhausted chain yields `None` —
/// such a field cannot belong to anything and is excluded from grouping
/// without a diagnostic; that is a scanner artifact, not a user mistake.
#[must_use]
pub fn resolve_owner(tree: &DeclTree, field: NodeId) -> Option<NodeId> {
    let mut current = tree.parent(field);
    while let Some(id) = current {
        match tree.node(id).kind {
            NodeKind::Struct(_) | NodeKind::Enum { .. } => return Some(id),
            _ => current = tree.parent(id),
        }
    }
    None
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::scan::scan;
    use crate::snapshot::Snapshot;
    use std::path::PathBuf;

    fn marked_field_owner(text: &str) -> Option<NodeId> {
        let snapshot =
            Snapshot::parse(vec![(PathBuf::from("src/state.rs"), text.to_string())])
                .expect("fixture source must parse");
        let outcome = scan(&snapshot, &mut Diagnostics::new());
        let field = outcome.resolved.first().expect("fixture must mark a field");
        resolve_owner(snapshot.tree(), field.node)
    }

    #[test]
    fn named_field_resolves_through_its_container() {
        let owner = marked_field_owner(
            "#[derive(Clone, UiState)]\n\
             struct State { #[one_shot] message: Option<String> }",
        );
        assert!(owner.is_some());
    }

    #[test]
    fn tuple_field_resolves_to_the_declaring_struct() {
        let owner = marked_field_owner(
            "#[derive(Clone, UiState)]\n\
             struct State(#[one_shot] Option<String>);",
        );
        assert!(owner.is_some());
    }

    #[test]
    fn fn_local_struct_resolves_before_the_fn() {
        let snapshot = Snapshot::parse(vec![(
            PathBuf::from("src/state.rs"),
            "fn screen() {\n\
                 #[derive(Clone, UiState)]\n\
                 struct Local { #[one_shot] message: Option<String> }\n\
             }"
            .to_string(),
        )])
        .expect("fixture source must parse");
        let outcome = scan(&snapshot, &mut Diagnostics::new());
        let field = outcome.resolved.first().expect("fixture must mark a field");

        let owner = resolve_owner(snapshot.tree(), field.node).expect("local struct owns its field");
        assert!(matches!(
            snapshot.tree().node(owner).kind,
            NodeKind::Struct(_)
        ));
    }

    #[test]
    fn stray_parameter_marker_has_no_owner() {
        let owner = marked_field_owner("fn handler(#[one_shot] message: Option<String>) {}");
        assert_eq!(owner, None);
    }
}
