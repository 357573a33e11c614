//! Owner grouping.

use crate::node::NodeId;
use crate::owner::resolve_owner;
use crate::scan::MarkedField;
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;

///
/// OwnerGroup
///
/// All marked fields belonging to one owning type declaration, in
/// declaration order. Built once per round and consumed whole by synthesis.
///

#[derive(Debug)]
pub struct OwnerGroup {
    pub owner: NodeId,
    pub fields: Vec<MarkedField>,
}

/// Bucket resolved fields by owner.
///
/// The grouping key is the owner's declaration node, never its simple name —
/// two types spelled the same in different modules stay distinct. Fields
/// whose ownership walk exhausted are dropped here.
#[must_use]
pub fn group_by_owner(snapshot: &Snapshot, fields: Vec<MarkedField>) -> Vec<OwnerGroup> {
    let mut buckets: BTreeMap<NodeId, Vec<MarkedField>> = BTreeMap::new();

    for field in fields {
        let Some(owner) = resolve_owner(snapshot.tree(), field.node) else {
            continue;
        };
        buckets.entry(owner).or_default().push(field);
    }

    buckets
        .into_iter()
        .map(|(owner, fields)| OwnerGroup { owner, fields })
        .collect()
}

///
/// TESTS
///
