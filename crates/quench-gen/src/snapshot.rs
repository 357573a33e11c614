//! Compilation snapshot.
//!
//! One round's view of the world: the parsed source files, the declaration
//! tree, and the index of type names those files declare. The snapshot is a
//! per-round value — nothing in it outlives the pass that built it.

use crate::error::GenError;
use crate::node::{DeclTree, FieldDecl, NodeId, NodeKind, StructDecl};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, Item, Token, Type};

///
/// SourceId
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceId(usize);

///
/// SourceFile
///

#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
}

// Types the host provides without a local declaration. A field type naming
// anything outside this set and the snapshot's own declarations is not yet
// resolvable and gets deferred.
const KNOWN_TYPES: &[&str] = &[
    "bool", "char", "str", "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "Option", "Result", "Vec", "VecDeque", "Box",
    "Rc", "Arc", "Cow", "PathBuf", "Duration", "Instant", "HashMap", "HashSet", "BTreeMap",
    "BTreeSet",
];

///
/// Snapshot
///

#[derive(Debug)]
pub struct Snapshot {
    sources: Vec<SourceFile>,
    tree: DeclTree,
    types: HashSet<String>,
}

impl Snapshot {
    /// Parse source texts into a snapshot.
    ///
    /// A parse failure aborts snapshot construction — it happens upstream of
    /// any owner group, so there is nothing to isolate around yet.
    pub fn parse(sources: Vec<(PathBuf, String)>) -> Result<Self, GenError> {
        let mut snapshot = Self {
            sources: Vec::with_capacity(sources.len()),
            tree: DeclTree::new(),
            types: HashSet::new(),
        };

        for (path, text) in sources {
            let ast = syn::parse_file(&text).map_err(|source| GenError::Parse {
                path: path.clone(),
                source,
            })?;
            let id = SourceId(snapshot.sources.len());
            snapshot.sources.push(SourceFile { path });

            let root = snapshot
                .tree
                .push(NodeKind::Module { ident: None }, None, id);
            snapshot.collect_items(&ast.items, root, id);
        }

        Ok(snapshot)
    }

    #[must_use]
    pub const fn tree(&self) -> &DeclTree {
        &self.tree
    }

    #[must_use]
    pub fn source_path(&self, id: SourceId) -> &Path {
        &self.sources[id.0].path
    }

    #[must_use]
    pub fn declares_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// The type declaration's ident, for struct and enum nodes.
    #[must_use]
    pub fn type_ident(&self, node: NodeId) -> Option<&Ident> {
        match &self.tree.node(node).kind {
            NodeKind::Struct(decl) => Some(&decl.ident),
            NodeKind::Enum { ident } => Some(ident),
            _ => None,
        }
    }

    /// Module-qualified display name for a type declaration node.
    #[must_use]
    pub fn qualified_name(&self, node: NodeId) -> String {
        let mut path = self.tree.module_path(node);
        if let Some(ident) = self.type_ident(node) {
            path.push(ident.to_string());
        }
        path.join("::")
    }

    /// First named type in `ty` that is neither declared in this snapshot
    /// nor known to the host — the reason a marked field must be deferred.
    #[must_use]
    pub fn first_unresolved(&self, ty: &Type) -> Option<String> {
        match ty {
            Type::Path(path) => {
                if path.qself.is_some() {
                    return None;
                }
                let segment = path.path.segments.last()?;
                let name = segment.ident.to_string();
                if !self.declares_type(&name) && !KNOWN_TYPES.contains(&name.as_str()) {
                    return Some(name);
                }
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner) = arg {
                            if let Some(found) = self.first_unresolved(inner) {
                                return Some(found);
                            }
                        }
                    }
                }
                None
            }
            Type::Reference(reference) => self.first_unresolved(&reference.elem),
            Type::Paren(paren) => self.first_unresolved(&paren.elem),
            Type::Group(group) => self.first_unresolved(&group.elem),
            Type::Array(array) => self.first_unresolved(&array.elem),
            Type::Slice(slice) => self.first_unresolved(&slice.elem),
            Type::Tuple(tuple) => tuple.elems.iter().find_map(|e| self.first_unresolved(e)),
            _ => None,
        }
    }

    fn collect_items(&mut self, items: &[Item], parent: NodeId, source: SourceId) {
        for item in items {
            match item {
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        let node = self.tree.push(
                            NodeKind::Module {
                                ident: Some(module.ident.clone()),
                            },
                            Some(parent),
                            source,
                        );
                        self.collect_items(items, node, source);
                    }
                }

                Item::Struct(decl) => {
                    self.types.insert(decl.ident.to_string());
                    let node = self.tree.push(
                        NodeKind::Struct(StructDecl {
                            ident: decl.ident.clone(),
                            derives: derive_names(&decl.attrs),
                            named_fields: matches!(decl.fields, syn::Fields::Named(_)),
                        }),
                        Some(parent),
                        source,
                    );
                    self.collect_fields(&decl.fields, node, source);
                }

                Item::Enum(decl) => {
                    self.types.insert(decl.ident.to_string());
                    let node = self.tree.push(
                        NodeKind::Enum {
                            ident: decl.ident.clone(),
                        },
                        Some(parent),
                        source,
                    );
                    for variant in &decl.variants {
                        self.collect_fields(&variant.fields, node, source);
                    }
                }

                Item::Fn(decl) => {
                    let node = self.tree.push(
                        NodeKind::Fn {
                            ident: decl.sig.ident.clone(),
                        },
                        Some(parent),
                        source,
                    );
                    self.collect_params(&decl.sig, node, source);
                    self.collect_stmts(&decl.block.stmts, node, source);
                }

                Item::Impl(block) => {
                    for impl_item in &block.items {
                        if let syn::ImplItem::Fn(method) = impl_item {
                            let node = self.tree.push(
                                NodeKind::Fn {
                                    ident: method.sig.ident.clone(),
                                },
                                Some(parent),
                                source,
                            );
                            self.collect_params(&method.sig, node, source);
                            self.collect_stmts(&method.block.stmts, node, source);
                        }
                    }
                }

                Item::Type(alias) => {
                    self.types.insert(alias.ident.to_string());
                }

                Item::Union(decl) => {
                    self.types.insert(decl.ident.to_string());
                }

                _ => {}
            }
        }
    }

    fn collect_fields(&mut self, fields: &syn::Fields, parent: NodeId, source: SourceId) {
        if matches!(fields, syn::Fields::Unit) {
            return;
        }
        let container = self.tree.push(NodeKind::Fields, Some(parent), source);
        for (index, field) in fields.iter().enumerate() {
            self.tree.push(
                NodeKind::Field(FieldDecl {
                    ident: field.ident.clone(),
                    index: index as u32,
                    ty: field.ty.clone(),
                    marker: marker_attr(&field.attrs),
                }),
                Some(container),
                source,
            );
        }
    }

    // A marked fn parameter is a scanner artifact: its parent chain (fn →
    // modules → root) holds no type declaration, so ownership resolution
    // drops it silently. Unmarked parameters are not declarations we track.
    fn collect_params(&mut self, sig: &syn::Signature, parent: NodeId, source: SourceId) {
        for (index, input) in sig.inputs.iter().enumerate() {
            let syn::FnArg::Typed(param) = input else {
                continue;
            };
            let Some(marker) = marker_attr(&param.attrs) else {
                continue;
            };
            let ident = match &*param.pat {
                syn::Pat::Ident(pat) => Some(pat.ident.clone()),
                _ => None,
            };
            self.tree.push(
                NodeKind::Field(FieldDecl {
                    ident,
                    index: index as u32,
                    ty: (*param.ty).clone(),
                    marker: Some(marker),
                }),
                Some(parent),
                source,
            );
        }
    }

    fn collect_stmts(&mut self, stmts: &[syn::Stmt], parent: NodeId, source: SourceId) {
        for stmt in stmts {
            if let syn::Stmt::Item(item) = stmt {
                self.collect_items(std::slice::from_ref(item), parent, source);
            }
        }
    }
}

fn derive_names(attrs: &[Attribute]) -> Vec<String> {
    let mut names = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        if let Ok(paths) =
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            names.extend(
                paths
                    .iter()
                    .filter_map(|p| p.segments.last().map(|s| s.ident.to_string())),
            );
        }
    }
    names
}

fn marker_attr(attrs: &[Attribute]) -> Option<Attribute> {
    attrs.iter().find(|a| a.path().is_ident("one_shot")).cloned()
}

///
/// TESTS
///
