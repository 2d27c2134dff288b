//! Structural equality of subtrees, possibly from two different trees.

use regast_core::{Ast, NodeId, NodeKind};

use crate::backref::is_strict_backreference;

/// Whether two nodes have the same structure.
///
/// Structurally equal nodes are semantically equal, but not the other way
/// around: `[ab]` and `[ba]` are not structurally equal. Backreferences are
/// equal if their groups are structurally equal and both are strict or both
/// are not. Two `Pattern` nodes also compare their flags.
pub fn structurally_equal(a: &Ast, x: NodeId, b: &Ast, y: NodeId) -> bool {
    Comparison {
        a,
        b,
        groups: Vec::new(),
    }
    .equal(x, y)
}

struct Comparison<'a> {
    a: &'a Ast,
    b: &'a Ast,
    /// Group pairs being compared further up; assumed equal when reached again.
    groups: Vec<(NodeId, NodeId)>,
}

impl Comparison<'_> {
    fn equal(&mut self, x: NodeId, y: NodeId) -> bool {
        let (a, b) = (self.a, self.b);
        if std::ptr::eq(a, b) && x == y {
            return true;
        }

        match (a.kind(x), b.kind(y)) {
            (NodeKind::Pattern { alternatives: xs }, NodeKind::Pattern { alternatives: ys }) => {
                a.flags() == b.flags() && self.all_equal(xs, ys)
            }
            (NodeKind::Alternative { elements: xs }, NodeKind::Alternative { elements: ys })
            | (NodeKind::Group { alternatives: xs }, NodeKind::Group { alternatives: ys }) => {
                self.all_equal(xs, ys)
            }
            (
                NodeKind::CapturingGroup {
                    name: x_name,
                    alternatives: xs,
                },
                NodeKind::CapturingGroup {
                    name: y_name,
                    alternatives: ys,
                },
            ) => {
                if x_name != y_name {
                    return false;
                }
                self.groups.push((x, y));
                let equal = self.all_equal(xs, ys);
                self.groups.pop();
                equal
            }
            (
                NodeKind::Quantifier {
                    min: x_min,
                    max: x_max,
                    greedy: x_greedy,
                    element: x_element,
                },
                NodeKind::Quantifier {
                    min: y_min,
                    max: y_max,
                    greedy: y_greedy,
                    element: y_element,
                },
            ) => {
                x_min == y_min
                    && x_max == y_max
                    && x_greedy == y_greedy
                    && self.equal(*x_element, *y_element)
            }
            (
                NodeKind::Lookaround {
                    kind: x_kind,
                    negate: x_negate,
                    alternatives: xs,
                },
                NodeKind::Lookaround {
                    kind: y_kind,
                    negate: y_negate,
                    alternatives: ys,
                },
            ) => x_kind == y_kind && x_negate == y_negate && self.all_equal(xs, ys),
            (
                NodeKind::CharacterClass {
                    negate: x_negate,
                    elements: xs,
                },
                NodeKind::CharacterClass {
                    negate: y_negate,
                    elements: ys,
                },
            ) => {
                x_negate == y_negate
                    && a.flags().unicode_sets == b.flags().unicode_sets
                    && self.all_equal(xs, ys)
            }
            (
                NodeKind::ClassIntersection { operands: xs },
                NodeKind::ClassIntersection { operands: ys },
            )
            | (
                NodeKind::ClassSubtraction { operands: xs },
                NodeKind::ClassSubtraction { operands: ys },
            ) => self.all_equal(xs, ys),
            (NodeKind::Backreference { .. }, NodeKind::Backreference { .. }) => {
                let (Some(x_group), Some(y_group)) = (a.resolved(x), b.resolved(y)) else {
                    return false;
                };
                if is_strict_backreference(a, x) != is_strict_backreference(b, y) {
                    return false;
                }
                self.groups.contains(&(x_group, y_group)) || self.equal(x_group, y_group)
            }
            (
                x_kind @ (NodeKind::EdgeAssertion { .. }
                | NodeKind::WordBoundary { .. }
                | NodeKind::Character { .. }
                | NodeKind::CharacterClassRange { .. }
                | NodeKind::CharacterSet(_)),
                y_kind,
            ) => x_kind == y_kind,
            _ => false,
        }
    }

    fn all_equal(&mut self, xs: &[NodeId], ys: &[NodeId]) -> bool {
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(&x, &y)| self.equal(x, y))
    }
}
