//! Backreference classification.
//!
//! A backreference can only match something if a path through the pattern
//! visits its group first. Paths may move up, down, or forward (in matching
//! direction) relative to the group, so we walk up from the group and look
//! for the backreference among the siblings that come after it.

use std::collections::HashSet;

use regast_core::{Ast, NodeId, NodeKind};

use crate::ancestry::{closest_ancestor, matching_direction};
use crate::direction::MatchingDirection;
use crate::invariants;
use crate::length::is_zero_length;

/// Whether a backreference always matches the empty string.
///
/// True if the reference sits inside its own group, lives in a different
/// alternative than the group, can never be reached after the group, or the
/// group itself is zero-length.
pub fn is_empty_backreference(ast: &Ast, backref: NodeId) -> bool {
    let group = ast.ensure_resolved(backref);
    let common = closest_ancestor(ast, backref, group);
    if common == group {
        return true;
    }
    if !matches!(ast.kind(common), NodeKind::Alternative { .. }) {
        return true;
    }
    !reaches_backreference(ast, backref, group, false) || is_zero_length(ast, group)
}

/// Whether a backreference is always matched after its group has captured something.
///
/// Stricter than "not empty": no optional quantifier and no other alternative
/// may sit between the group and the reference, e.g. `(a)\1` is strict but
/// `(?:(a)|b)\1` and `(a)?\1` are not.
pub fn is_strict_backreference(ast: &Ast, backref: NodeId) -> bool {
    let group = ast.ensure_resolved(backref);
    let common = closest_ancestor(ast, backref, group);
    if common == group {
        return false;
    }
    if !matches!(ast.kind(common), NodeKind::Alternative { .. }) {
        return false;
    }
    reaches_backreference(ast, backref, group, true)
}

fn reaches_backreference(ast: &Ast, backref: NodeId, group: NodeId, strict: bool) -> bool {
    let mut backref_ancestors = HashSet::new();
    let mut current = Some(backref);
    while let Some(id) = current {
        backref_ancestors.insert(id);
        current = ast.parent(id);
    }

    let mut node = group;
    loop {
        let parent = ast.ensure_parent(node);
        match ast.kind(parent) {
            NodeKind::Alternative { elements } => {
                let index = elements.iter().position(|&e| e == node).unwrap_or_default();
                let next = match matching_direction(ast, node) {
                    MatchingDirection::Ltr => &elements[index + 1..],
                    MatchingDirection::Rtl => &elements[..index],
                };
                if next.iter().any(|e| backref_ancestors.contains(e)) {
                    return true;
                }

                let grandparent = ast.ensure_parent(parent);
                match ast.kind(grandparent) {
                    NodeKind::Pattern { .. } => return false,
                    // Captures are reset when leaving a negated lookaround.
                    NodeKind::Lookaround { negate: true, .. } => return false,
                    kind => {
                        if strict && kind.alternatives().is_some_and(|alts| alts.len() > 1) {
                            return false;
                        }
                        node = grandparent;
                    }
                }
            }
            NodeKind::Quantifier { min, .. } => {
                if strict && *min == 0 {
                    return false;
                }
                node = parent;
            }
            _ => invariants::unexpected_node(ast, parent, "reaches_backreference"),
        }
    }
}
