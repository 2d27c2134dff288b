//! Length ranges and the emptiness/zero-length predicates.
//!
//! The predicates are ordered:
//! - `is_empty` ⇒ `is_zero_length` ⇒ `is_potentially_zero_length`
//! - `is_empty` ⇒ `is_potentially_empty` ⇒ `is_potentially_zero_length`
//!
//! "Zero length" ignores whether assertions are involved; "empty" additionally
//! requires that nothing is asserted. A `Pattern` node is treated as the list
//! of its alternatives.

use regast_core::{Ast, NodeId, NodeKind};

use crate::ancestry::is_ancestor_of;
use crate::backref::{is_empty_backreference, is_strict_backreference};
use crate::{Error, Result, invariants};

/// Bounds on the number of characters an element consumes.
///
/// `max: None` means unbounded. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LengthRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl LengthRange {
    pub const ZERO: LengthRange = LengthRange {
        min: 0,
        max: Some(0),
    };
    pub const ONE: LengthRange = LengthRange {
        min: 1,
        max: Some(1),
    };

    pub fn new(min: u64, max: Option<u64>) -> Self {
        debug_assert!(max.is_none_or(|max| min <= max));
        Self { min, max }
    }

    /// Whether every path consumes the same finite number of characters.
    pub fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }

    fn union(self, other: LengthRange) -> LengthRange {
        LengthRange {
            min: self.min.min(other.min),
            max: self.max.zip(other.max).map(|(a, b)| a.max(b)),
        }
    }

    fn concat(self, other: LengthRange) -> LengthRange {
        LengthRange {
            min: self.min.saturating_add(other.min),
            max: self.max.zip(other.max).map(|(a, b)| a.saturating_add(b)),
        }
    }
}

/// Whether every path through `node` consumes no characters.
pub fn is_zero_length(ast: &Ast, node: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives } | NodeKind::Alternative { elements: alternatives } => {
            alternatives.iter().all(|&a| is_zero_length(ast, a))
        }
        NodeKind::Group { alternatives } | NodeKind::CapturingGroup { alternatives, .. } => {
            !alternatives.is_empty() && alternatives.iter().all(|&a| is_zero_length(ast, a))
        }
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => true,
        NodeKind::Quantifier { max, element, .. } => {
            *max == Some(0) || is_zero_length(ast, *element)
        }
        NodeKind::Backreference { .. } => is_empty_backreference(ast, node),
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => false,
    }
}

/// Whether some path through `node` consumes no characters.
pub fn is_potentially_zero_length(ast: &Ast, node: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives } => alternatives
            .iter()
            .any(|&a| potentially_zero_length_within(ast, a, a)),
        _ => potentially_zero_length_within(ast, node, node),
    }
}

/// Whether every path through `node` consumes no characters and asserts nothing.
pub fn is_empty(ast: &Ast, node: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives } | NodeKind::Alternative { elements: alternatives } => {
            alternatives.iter().all(|&a| is_empty(ast, a))
        }
        NodeKind::Group { alternatives } | NodeKind::CapturingGroup { alternatives, .. } => {
            !alternatives.is_empty() && alternatives.iter().all(|&a| is_empty(ast, a))
        }
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => false,
        NodeKind::Quantifier { max, element, .. } => *max == Some(0) || is_empty(ast, *element),
        NodeKind::Backreference { .. } => is_empty_backreference(ast, node),
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => false,
    }
}

/// Whether some path through `node` consumes no characters and asserts nothing.
pub fn is_potentially_empty(ast: &Ast, node: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives } => alternatives
            .iter()
            .any(|&a| potentially_empty_within(ast, a, a)),
        _ => potentially_empty_within(ast, node, node),
    }
}

fn potentially_zero_length_within(ast: &Ast, node: NodeId, root: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Alternative { elements } => elements
            .iter()
            .all(|&e| potentially_zero_length_within(ast, e, root)),
        NodeKind::Pattern { alternatives }
        | NodeKind::Group { alternatives }
        | NodeKind::CapturingGroup { alternatives, .. } => alternatives
            .iter()
            .any(|&a| potentially_zero_length_within(ast, a, root)),
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => true,
        NodeKind::Quantifier { min, element, .. } => {
            *min == 0 || potentially_zero_length_within(ast, *element, root)
        }
        NodeKind::Backreference { .. } => backreference_is_potentially_empty(ast, node, root),
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => false,
    }
}

fn potentially_empty_within(ast: &Ast, node: NodeId, root: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Alternative { elements } => elements
            .iter()
            .all(|&e| potentially_empty_within(ast, e, root)),
        NodeKind::Pattern { alternatives }
        | NodeKind::Group { alternatives }
        | NodeKind::CapturingGroup { alternatives, .. } => alternatives
            .iter()
            .any(|&a| potentially_empty_within(ast, a, root)),
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => false,
        NodeKind::Quantifier { min, element, .. } => {
            *min == 0 || potentially_empty_within(ast, *element, root)
        }
        NodeKind::Backreference { .. } => backreference_is_potentially_empty(ast, node, root),
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => false,
    }
}

/// A backreference inside `root` may be empty if its group is also inside
/// `root` and may itself be skipped or empty.
fn backreference_is_potentially_empty(ast: &Ast, backref: NodeId, root: NodeId) -> bool {
    if is_empty_backreference(ast, backref) {
        return true;
    }
    let group = ast.ensure_resolved(backref);
    if !is_ancestor_of(ast, root, group) {
        return false;
    }
    !is_strict_backreference(ast, backref) || potentially_zero_length_within(ast, group, root)
}

/// Number of characters `node` may consume.
pub fn length_range(ast: &Ast, node: NodeId) -> LengthRange {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives }
        | NodeKind::Group { alternatives }
        | NodeKind::CapturingGroup { alternatives, .. } => {
            expect_alternatives(ast, node, length_range_of(ast, alternatives))
        }
        NodeKind::Alternative { elements } => elements
            .iter()
            .fold(LengthRange::ZERO, |acc, &e| acc.concat(length_range(ast, e))),
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => LengthRange::ZERO,
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => LengthRange::ONE,
        NodeKind::Quantifier {
            min, max, element, ..
        } => {
            if *max == Some(0) {
                return LengthRange::ZERO;
            }
            let inner = length_range(ast, *element);
            if inner.max == Some(0) {
                return LengthRange::ZERO;
            }
            LengthRange {
                min: inner.min.saturating_mul(u64::from(*min)),
                max: inner
                    .max
                    .zip(*max)
                    .map(|(a, b)| a.saturating_mul(u64::from(b))),
            }
        }
        NodeKind::Backreference { .. } => {
            if is_empty_backreference(ast, node) {
                return LengthRange::ZERO;
            }
            let resolved = length_range(ast, ast.ensure_resolved(node));
            if resolved.min > 0 && !is_strict_backreference(ast, node) {
                LengthRange {
                    min: 0,
                    max: resolved.max,
                }
            } else {
                resolved
            }
        }
    }
}

/// Length range of a list of alternatives (their union).
pub fn length_range_of(ast: &Ast, alternatives: &[NodeId]) -> Result<LengthRange> {
    alternatives
        .iter()
        .map(|&a| length_range(ast, a))
        .reduce(LengthRange::union)
        .ok_or(Error::EmptyAlternatives)
}

/// `length_range(node).min == 0`, without computing the whole range.
pub fn is_length_range_min_zero(ast: &Ast, node: NodeId) -> bool {
    match ast.kind(node) {
        NodeKind::Pattern { alternatives }
        | NodeKind::Group { alternatives }
        | NodeKind::CapturingGroup { alternatives, .. } => {
            expect_alternatives(ast, node, is_length_range_min_zero_of(ast, alternatives))
        }
        NodeKind::Alternative { elements } => {
            elements.iter().all(|&e| is_length_range_min_zero(ast, e))
        }
        NodeKind::EdgeAssertion { .. }
        | NodeKind::WordBoundary { .. }
        | NodeKind::Lookaround { .. } => true,
        NodeKind::Character { .. }
        | NodeKind::CharacterClass { .. }
        | NodeKind::CharacterClassRange { .. }
        | NodeKind::CharacterSet(_)
        | NodeKind::ClassIntersection { .. }
        | NodeKind::ClassSubtraction { .. } => false,
        NodeKind::Quantifier { min, element, .. } => {
            *min == 0 || is_length_range_min_zero(ast, *element)
        }
        NodeKind::Backreference { .. } => {
            is_empty_backreference(ast, node)
                || !is_strict_backreference(ast, node)
                || is_length_range_min_zero(ast, ast.ensure_resolved(node))
        }
    }
}

/// `is_length_range_min_zero` over a list of alternatives.
pub fn is_length_range_min_zero_of(ast: &Ast, alternatives: &[NodeId]) -> Result<bool> {
    if alternatives.is_empty() {
        return Err(Error::EmptyAlternatives);
    }
    Ok(alternatives
        .iter()
        .any(|&a| is_length_range_min_zero(ast, a)))
}

fn expect_alternatives<T>(ast: &Ast, node: NodeId, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(_) => invariants::unexpected_node(ast, node, "length_range (no alternatives)"),
    }
}
