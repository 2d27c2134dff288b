//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use regast_core::{Ast, NodeId};

/// A dispatch reached a node kind it cannot handle.
pub(crate) fn unexpected_node(ast: &Ast, id: NodeId, context: &str) -> ! {
    panic!(
        "{context}: unexpected {} node {} (`{}`)",
        ast.kind(id).name(),
        id.as_u32(),
        ast.raw(id)
    )
}

/// Two nodes were expected to live in the same tree.
pub(crate) fn unrelated_nodes(a: NodeId, b: NodeId) -> ! {
    panic!(
        "closest_ancestor: nodes {} and {} have no common ancestor",
        a.as_u32(),
        b.as_u32()
    )
}
