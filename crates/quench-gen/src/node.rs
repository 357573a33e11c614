//! Declaration tree.
//!
//! A flat arena of lexical declaration nodes with parent links, built once
//! per snapshot. The ownership resolver walks these links upward from a
//! marked field until it reaches a type declaration, so the tree keeps every
//! container the walk can pass through — field sets, functions, inline
//! modules — not just the types themselves.

use crate::snapshot::SourceId;
use syn::{Attribute, Ident, Type};

///
/// NodeId
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

///
/// StructDecl
///

#[derive(Clone, Debug)]
pub struct StructDecl {
    pub ident: Ident,
    /// Last path segments of every `#[derive(..)]` entry on the struct.
    pub derives: Vec<String>,
    pub named_fields: bool,
}

///
/// FieldDecl
///
/// Any field-position declaration the scanner may surface: a named struct
/// field, a tuple-struct or enum-variant field, or a stray marked function
/// parameter (a scanner artifact whose ownership walk will exhaust).
///

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub ident: Option<Ident>,
    pub index: u32,
    pub ty: Type,
    /// The raw `#[one_shot(..)]` attribute, when present.
    pub marker: Option<Attribute>,
}

impl FieldDecl {
    /// Display name: the identifier, or the positional index.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident
            .as_ref()
            .map_or_else(|| self.index.to_string(), ToString::to_string)
    }
}

///
/// NodeKind
///

#[derive(Clone, Debug)]
pub enum NodeKind {
    /// File root (no ident) or an inline `mod`.
    Module { ident: Option<Ident> },
    Struct(StructDecl),
    Enum { ident: Ident },
    Fn { ident: Ident },
    /// Field container of a struct or an enum variant.
    Fields,
    Field(FieldDecl),
}

///
/// Node
///

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub source: SourceId,
}

///
/// DeclTree
///

#[derive(Debug, Default)]
pub struct DeclTree {
    nodes: Vec<Node>,
}

impl DeclTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, parent: Option<NodeId>, source: SourceId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            source,
        });
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Idents of the enclosing inline modules, outermost first.
    #[must_use]
    pub fn module_path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if let NodeKind::Module { ident: Some(ident) } = &self.node(ancestor).kind {
                path.push(ident.to_string());
            }
            current = self.parent(ancestor);
        }
        path.reverse();
        path
    }
}
