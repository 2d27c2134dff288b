//! Structural queries over the tree: ancestors, descendants, directions, group numbers.

use std::collections::HashSet;

use regast_core::{Ast, NodeId, NodeKind};

use crate::direction::MatchingDirection;
use crate::invariants;

/// Whether some strict ancestor of `node` satisfies `condition`.
pub fn has_some_ancestor(
    ast: &Ast,
    node: NodeId,
    mut condition: impl FnMut(NodeId) -> bool,
) -> bool {
    let mut current = ast.parent(node);
    while let Some(ancestor) = current {
        if condition(ancestor) {
            return true;
        }
        current = ast.parent(ancestor);
    }
    false
}

/// Whether `ancestor` is a strict ancestor of `node`.
pub fn is_ancestor_of(ast: &Ast, ancestor: NodeId, node: NodeId) -> bool {
    has_some_ancestor(ast, node, |a| a == ancestor)
}

/// Whether `node` is `ancestor` or lies inside it.
pub fn is_descendant_of(ast: &Ast, node: NodeId, ancestor: NodeId) -> bool {
    node == ancestor || is_ancestor_of(ast, ancestor, node)
}

/// Whether `node` or any node below it satisfies `condition`.
pub fn has_some_descendant(ast: &Ast, node: NodeId, condition: impl FnMut(NodeId) -> bool) -> bool {
    has_some_descendant_with(ast, node, condition, |_| true)
}

/// Like `has_some_descendant`, but only looks inside nodes for which `descend` returns true.
pub fn has_some_descendant_with(
    ast: &Ast,
    node: NodeId,
    mut condition: impl FnMut(NodeId) -> bool,
    mut descend: impl FnMut(NodeId) -> bool,
) -> bool {
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        if condition(id) {
            return true;
        }
        if descend(id) {
            stack.extend(ast.children(id).iter().rev().copied());
        }
    }
    false
}

/// The deepest node that is `a` or an ancestor of `a`, and `b` or an ancestor of `b`.
///
/// Symmetric, and `closest_ancestor(a, a) == a`.
pub fn closest_ancestor(ast: &Ast, a: NodeId, b: NodeId) -> NodeId {
    if a == b {
        return a;
    }
    match (ast.parent(a), ast.parent(b)) {
        (Some(pa), Some(pb)) if pa == pb => return pa,
        _ => {}
    }

    let mut path: HashSet<NodeId> = HashSet::new();
    let mut current = Some(a);
    while let Some(id) = current {
        path.insert(id);
        current = ast.parent(id);
    }

    let mut current = Some(b);
    while let Some(id) = current {
        if path.contains(&id) {
            return id;
        }
        current = ast.parent(id);
    }
    invariants::unrelated_nodes(a, b)
}

/// Closest common ancestor of any number of nodes; `None` for an empty input.
pub fn closest_ancestor_of(ast: &Ast, nodes: impl IntoIterator<Item = NodeId>) -> Option<NodeId> {
    nodes
        .into_iter()
        .reduce(|acc, node| closest_ancestor(ast, acc, node))
}

/// Direction in which `node` is matched: that of the closest enclosing lookaround, else ltr.
pub fn matching_direction(ast: &Ast, node: NodeId) -> MatchingDirection {
    let mut current = ast.parent(node);
    while let Some(ancestor) = current {
        if let NodeKind::Lookaround { kind, .. } = ast.kind(ancestor) {
            return MatchingDirection::of_lookaround(*kind);
        }
        current = ast.parent(ancestor);
    }
    MatchingDirection::Ltr
}

/// 1-based number of a capturing group.
pub fn capturing_group_number(ast: &Ast, group: NodeId) -> u32 {
    match ast.capturing_groups().iter().position(|&g| g == group) {
        Some(index) => index as u32 + 1,
        None => invariants::unexpected_node(ast, group, "capturing_group_number"),
    }
}

/// Whether `node` is or contains a capturing group.
pub fn contains_capturing_group(ast: &Ast, node: NodeId) -> bool {
    has_some_descendant(ast, node, |id| {
        matches!(ast.kind(id), NodeKind::CapturingGroup { .. })
    })
}

/// How often `node` may be matched in a row, counting enclosing quantifiers up
/// to the closest lookaround. `None` means unbounded.
pub fn effective_maximum_repetition(ast: &Ast, node: NodeId) -> Option<u64> {
    let mut max = Some(1u64);
    let mut current = ast.parent(node);
    while let Some(ancestor) = current {
        match ast.kind(ancestor) {
            NodeKind::Quantifier { max: Some(0), .. } => return Some(0),
            NodeKind::Quantifier { max: Some(q), .. } => {
                max = max.map(|m| m.saturating_mul(u64::from(*q)));
            }
            NodeKind::Quantifier { max: None, .. } => max = None,
            NodeKind::Lookaround { .. } => break,
            _ => {}
        }
        current = ast.parent(ancestor);
    }
    max
}
