//! Per-field configuration resolution.

use crate::diag::{DeclRef, Diagnostics};
use crate::error::GenError;
use crate::group::OwnerGroup;
use crate::snapshot::Snapshot;
use crate::validate::option_payload;
use darling::FromMeta;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::Ident;

///
/// OrderingPolicy
///
/// Effect-vs-reset ordering contract for one field's dispatch sequence.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderingPolicy {
    /// Fire the callback, then clear the field.
    #[default]
    ActionThenConsume,

    /// Clear the field, then fire the callback.
    ConsumeThenAction,
}

///
/// PolicyArg
///
/// Raw policy argument, preserved in its source shape until normalization.
/// Darling would otherwise collapse the shapes before we can match them.
///

#[derive(Clone, Debug)]
pub struct PolicyArg(pub syn::Expr);

impl FromMeta for PolicyArg {
    fn from_expr(expr: &syn::Expr) -> darling::Result<Self> {
        Ok(Self(expr.clone()))
    }
}

///
/// OneShotArgs
///
/// The `#[one_shot(..)]` argument surface, raw and pre-validation.
///

#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct OneShotArgs {
    pub consume_name: Option<String>,
    pub policy: Option<PolicyArg>,
}

impl OneShotArgs {
    /// Parse the raw marker attribute; a bare `#[one_shot]` is all defaults.
    pub fn from_attr(attr: &syn::Attribute) -> darling::Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(Self::default()),
            meta => Self::from_meta(meta),
        }
    }
}

///
/// FieldConfig
///
/// Fully resolved configuration for one marked field. Every field in a
/// group has exactly one of these before synthesis starts.
///

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub field: Ident,
    /// Unwrapped `Option` payload, used for the callback signature.
    pub payload: syn::Type,
    pub consume_name: Ident,
    pub policy: OrderingPolicy,
}

/// Normalize the raw policy argument to a policy value.
///
/// The argument reaches us in one of three shapes depending on how it was
/// spelled at the marker site. Each shape is matched against the literal
/// policy names; only a genuinely absent argument falls back to the
/// default. An unrecognized value is an error, never a silent remap.
pub fn normalize_policy(raw: Option<&PolicyArg>) -> Result<OrderingPolicy, String> {
    let Some(PolicyArg(expr)) = raw else {
        return Ok(OrderingPolicy::default());
    };

    let name = match expr {
        // bare variant reference: `policy = ConsumeThenAction`
        syn::Expr::Path(path) if path.path.segments.len() == 1 => {
            path.path.segments[0].ident.to_string()
        }
        // qualified reference: `policy = OrderingPolicy::ConsumeThenAction`
        syn::Expr::Path(path) => match path.path.segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => return Err("empty policy path".to_string()),
        },
        // printable fallback: `policy = "consume_then_action"`
        syn::Expr::Lit(lit) => match &lit.lit {
            syn::Lit::Str(value) => value.value(),
            other => {
                return Err(format!("unsupported policy literal `{}`", quote!(#other)));
            }
        },
        other => {
            return Err(format!("unrecognized policy shape `{}`", quote!(#other)));
        }
    };

    match name.as_str() {
        "ActionThenConsume" | "action_then_consume" => Ok(OrderingPolicy::ActionThenConsume),
        "ConsumeThenAction" | "consume_then_action" => Ok(OrderingPolicy::ConsumeThenAction),
        other => Err(format!("unknown ordering policy `{other}`")),
    }
}

/// Resolve one `FieldConfig` per marked field in the group.
///
/// Malformed argument values degrade to the defaults with an error
/// diagnostic and generation continues. A consume-name collision fails the
/// whole group instead: emitting either duplicate could not compile, and a
/// partial artifact would hide the defect.
pub fn resolve_configs(
    snapshot: &Snapshot,
    group: &OwnerGroup,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<FieldConfig>, GenError> {
    let owner = snapshot.qualified_name(group.owner);
    let mut configs = Vec::with_capacity(group.fields.len());
    let mut taken: HashMap<String, String> = HashMap::new();

    for marked in &group.fields {
        let Some(field) = marked.ident.clone() else {
            // unnamed fields never reach this point; the validator rejects
            // tuple records before configuration starts
            continue;
        };
        let decl = DeclRef::new(
            snapshot.source_path(marked.source),
            format!("{owner}.{field}"),
        );

        let payload = match option_payload(&marked.ty) {
            Some(inner) => inner.clone(),
            None => {
                return Err(GenError::Config {
                    owner,
                    field: field.to_string(),
                    reason: "field is not an Option".to_string(),
                });
            }
        };

        let args = match OneShotArgs::from_attr(&marked.marker) {
            Ok(args) => args,
            Err(err) => {
                diagnostics.error(
                    Some(decl.clone()),
                    format!("invalid one_shot arguments on `{owner}.{field}`: {err}; using defaults"),
                );
                OneShotArgs::default()
            }
        };

        let consume_name = match args.consume_name.as_deref() {
            Some(name) if !name.is_empty() => match syn::parse_str::<Ident>(name) {
                Ok(ident) => ident,
                Err(_) => {
                    diagnostics.error(
                        Some(decl.clone()),
                        format!(
                            "consume_name `{name}` on `{owner}.{field}` is not a valid identifier; using the default"
                        ),
                    );
                    default_consume_ident(&field)
                }
            },
            _ => default_consume_ident(&field),
        };

        let policy = match normalize_policy(args.policy.as_ref()) {
            Ok(policy) => policy,
            Err(reason) => {
                diagnostics.error(
                    Some(decl),
                    format!("on `{owner}.{field}`: {reason}; defaulting to ActionThenConsume"),
                );
                OrderingPolicy::default()
            }
        };

        if let Some(previous) = taken.insert(consume_name.to_string(), field.to_string()) {
            return Err(GenError::Config {
                owner,
                field: field.to_string(),
                reason: format!(
                    "consume operation `{consume_name}` is already used by field `{previous}`"
                ),
            });
        }

        configs.push(FieldConfig {
            field,
            payload,
            consume_name,
            policy,
        });
    }

    Ok(configs)
}

fn default_consume_ident(field: &Ident) -> Ident {
    format_ident!("consume_{field}")
}

///
/// TESTS
///
