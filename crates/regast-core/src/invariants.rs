//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Ast, NodeId, NodeKind};

impl Ast {
    /// Alternatives of a node that must have them.
    pub fn ensure_alternatives(&self, id: NodeId) -> &[NodeId] {
        self.kind(id).alternatives().unwrap_or_else(|| {
            panic!(
                "Ast: node {} ({}) has no alternatives",
                id.as_u32(),
                self.kind(id).name()
            )
        })
    }

    /// Elements of a node that must be an `Alternative`.
    pub fn ensure_elements(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            NodeKind::Alternative { elements } => elements,
            other => panic!(
                "Ast: node {} is a {}, expected an Alternative",
                id.as_u32(),
                other.name()
            ),
        }
    }

    /// Parent of a node that cannot be the root.
    pub fn ensure_parent(&self, id: NodeId) -> NodeId {
        self.parent(id).unwrap_or_else(|| {
            panic!(
                "Ast: node {} ({}) has no parent",
                id.as_u32(),
                self.kind(id).name()
            )
        })
    }

    /// Capturing group a backreference points at.
    pub fn ensure_resolved(&self, backreference: NodeId) -> NodeId {
        self.resolved(backreference).unwrap_or_else(|| {
            panic!(
                "Ast: node {} ({}) is not a resolved backreference",
                backreference.as_u32(),
                self.kind(backreference).name()
            )
        })
    }
}
