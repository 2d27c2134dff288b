//! Path-following engine.
//!
//! Walks every element reachable from a starting point, threading a state
//! through the walk. Alternations fork the state once per alternative and
//! join the results again when the alternation ends, so the number of
//! visited elements stays quadratic at worst even though the number of paths
//! may be exponential.
//!
//! Quantifiers are single elements: `q` with a minimum of zero behaves like
//! `(?:q|)`, otherwise like `(?:q)`. Leaving the body of a quantifier that may
//! repeat forks into "enter the quantifier again" and "continue after it".
//!
//! # Usage
//!
//! Implement `FollowOperations` for your analysis. Only `join` is required;
//! override the other hooks as needed.
//!
//! ```ignore
//! impl FollowOperations for Reachable {
//!     type State = bool;
//!
//!     fn join(&mut self, states: Vec<bool>, _: MatchingDirection) -> bool {
//!         states.into_iter().any(|s| s)
//!     }
//! }
//! ```

use regast_core::{Ast, NodeId, NodeKind};

use crate::ancestry::matching_direction;
use crate::direction::MatchingDirection;
use crate::invariants;

/// Where to begin following paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// The start element is entered first.
    Enter,
    /// Paths begin right after the start element.
    Next,
}

/// Why a path ended because of the structure of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    /// Nothing follows in the pattern.
    Pattern,
    /// Nothing follows inside a lookaround and the path may not leave it.
    Assertion,
}

/// Hooks that define how state flows along paths.
///
/// For every element, the hooks run in this order:
///
/// 1. `enter`
/// 2. if `continue_into`: element-specific work (alternatives, quantifier body, lookaround)
/// 3. `leave`
/// 4. `continue_after` (not necessarily for every element)
pub trait FollowOperations {
    type State: Clone;

    /// Split off a new path. Must not modify `state`.
    fn fork(&mut self, state: &Self::State, _direction: MatchingDirection) -> Self::State {
        state.clone()
    }

    /// Combine any number of paths into one.
    fn join(&mut self, states: Vec<Self::State>, direction: MatchingDirection) -> Self::State;

    /// Fold the result of a lookaround into the path asserting it.
    ///
    /// Not called for `^`, `$`, `\b`, `\B`; use `enter`/`leave` for those.
    fn assert(
        &mut self,
        state: Self::State,
        _direction: MatchingDirection,
        _assertion: Self::State,
        _assertion_direction: MatchingDirection,
    ) -> Self::State {
        state
    }

    fn enter(
        &mut self,
        _element: NodeId,
        state: Self::State,
        _direction: MatchingDirection,
    ) -> Self::State {
        state
    }

    fn leave(
        &mut self,
        _element: NodeId,
        state: Self::State,
        _direction: MatchingDirection,
    ) -> Self::State {
        state
    }

    /// Called when a path cannot be followed further.
    fn end_path(
        &mut self,
        state: Self::State,
        _direction: MatchingDirection,
        _reason: PathEnd,
    ) -> Self::State {
        state
    }

    /// Whether to go into `element`. If not, the state is passed to `leave` as is.
    fn continue_into(
        &mut self,
        _element: NodeId,
        _state: &Self::State,
        _direction: MatchingDirection,
    ) -> bool {
        true
    }

    /// Whether to continue with the elements after `element`.
    ///
    /// A stopped fork is still joined with its siblings.
    fn continue_after(
        &mut self,
        _element: NodeId,
        _state: &Self::State,
        _direction: MatchingDirection,
    ) -> bool {
        true
    }

    /// Whether a path may leave the given lookaround and continue after it.
    ///
    /// If `false`, `end_path` is called next.
    fn continue_outside(
        &mut self,
        _lookaround: NodeId,
        _state: &Self::State,
        _direction: MatchingDirection,
    ) -> bool {
        false
    }
}

/// Follows all paths from `start` and returns the joined state.
///
/// `direction` defaults to the matching direction of `start`. Runs in `O(n)`
/// on average and `O(n²)` at worst for `n` reachable elements.
///
/// Nothing follows the `Pattern` node: starting there ends the path right
/// after the pattern (`Next`) or after entering it (`Enter`).
pub fn follow_paths<O: FollowOperations>(
    ast: &Ast,
    start: NodeId,
    mode: StartMode,
    initial: O::State,
    ops: &mut O,
    direction: Option<MatchingDirection>,
) -> O::State {
    let direction = direction.unwrap_or_else(|| matching_direction(ast, start));
    log::trace!(
        "follow_paths: {:?} `{}` ({direction:?})",
        mode,
        ast.raw(start)
    );

    let mut walker = Walker { ast, ops };
    let mut start = start;
    let mut mode = mode;

    if let NodeKind::Alternative { elements } = ast.kind(start) {
        // Entering an alternative means entering its first element; leaving it
        // means leaving its parent.
        if elements.is_empty() {
            mode = StartMode::Next;
        }
        match mode {
            StartMode::Enter => {
                start = match direction {
                    MatchingDirection::Ltr => elements[0],
                    MatchingDirection::Rtl => elements[elements.len() - 1],
                };
            }
            StartMode::Next => {
                let parent = ast.ensure_parent(start);
                match ast.kind(parent) {
                    NodeKind::Pattern { .. } => {
                        return walker.ops.end_path(initial, direction, PathEnd::Pattern);
                    }
                    NodeKind::Lookaround { .. }
                        if !walker.ops.continue_outside(parent, &initial, direction) =>
                    {
                        return walker.ops.end_path(initial, direction, PathEnd::Assertion);
                    }
                    _ => {}
                }
                start = parent;
            }
        }
    }

    let state = match mode {
        StartMode::Enter => walker.enter(start, initial, direction),
        StartMode::Next => initial,
    };
    if let NodeKind::Pattern { .. } = ast.kind(start) {
        return walker.ops.end_path(state, direction, PathEnd::Pattern);
    }
    walker.next(start, state, direction)
}

/// What comes after an element.
enum Step {
    /// `continue_after` stopped the path.
    Stop,
    Element(NodeId),
    End(PathEnd),
}

struct Walker<'a, 'o, O> {
    ast: &'a Ast,
    ops: &'o mut O,
}

impl<O: FollowOperations> Walker<'_, '_, O> {
    fn enter(
        &mut self,
        element: NodeId,
        state: O::State,
        direction: MatchingDirection,
    ) -> O::State {
        let ast = self.ast;
        let mut state = self.ops.enter(element, state, direction);

        if self.ops.continue_into(element, &state, direction) {
            match ast.kind(element) {
                NodeKind::Lookaround {
                    kind, alternatives, ..
                } => {
                    let assertion_direction = MatchingDirection::of_lookaround(*kind);
                    let mut branches = Vec::with_capacity(alternatives.len());
                    for &alternative in alternatives {
                        let forked = self.ops.fork(&state, direction);
                        branches.push(self.enter_alternative(
                            alternative,
                            forked,
                            assertion_direction,
                        ));
                    }
                    let assertion = self.ops.join(branches, assertion_direction);
                    let assertion =
                        self.ops.end_path(assertion, assertion_direction, PathEnd::Assertion);
                    state = self.ops.assert(state, direction, assertion, assertion_direction);
                }
                NodeKind::Pattern { alternatives }
                | NodeKind::Group { alternatives }
                | NodeKind::CapturingGroup { alternatives, .. } => {
                    let mut branches = Vec::with_capacity(alternatives.len());
                    for &alternative in alternatives {
                        let forked = self.ops.fork(&state, direction);
                        branches.push(self.enter_alternative(alternative, forked, direction));
                    }
                    state = self.ops.join(branches, direction);
                }
                NodeKind::Quantifier {
                    min, max, element, ..
                } => {
                    if *max == Some(0) {
                        // never entered
                    } else if *min == 0 {
                        let forked = self.ops.fork(&state, direction);
                        let entered = self.enter(*element, forked, direction);
                        state = self.ops.join(vec![state, entered], direction);
                    } else {
                        state = self.enter(*element, state, direction);
                    }
                }
                _ => {}
            }
        }

        self.ops.leave(element, state, direction)
    }

    fn enter_alternative(
        &mut self,
        alternative: NodeId,
        mut state: O::State,
        direction: MatchingDirection,
    ) -> O::State {
        let ast = self.ast;
        let elements = ast.ensure_elements(alternative);
        let count = elements.len();
        for i in 0..count {
            let element = match direction {
                MatchingDirection::Ltr => elements[i],
                MatchingDirection::Rtl => elements[count - 1 - i],
            };
            state = self.enter(element, state, direction);
            if !self.ops.continue_after(element, &state, direction) {
                break;
            }
        }
        state
    }

    fn next(
        &mut self,
        mut element: NodeId,
        mut state: O::State,
        direction: MatchingDirection,
    ) -> O::State {
        loop {
            let (loops, step) = self.next_element(element, &state, direction);

            // Each repeatable quantifier we climbed out of may also be entered again.
            for quantifier in loops {
                let forked = self.ops.fork(&state, direction);
                let entered = self.enter(quantifier, forked, direction);
                state = self.ops.join(vec![state, entered], direction);
            }

            match step {
                Step::Stop => return state,
                Step::End(reason) => return self.ops.end_path(state, direction, reason),
                Step::Element(next) => {
                    state = self.enter(next, state, direction);
                    element = next;
                }
            }
        }
    }

    /// The element after `element`, plus the repeatable quantifiers left on the way there.
    fn next_element(
        &mut self,
        mut element: NodeId,
        state: &O::State,
        direction: MatchingDirection,
    ) -> (Vec<NodeId>, Step) {
        let ast = self.ast;
        let mut loops = Vec::new();

        loop {
            let parent = ast.ensure_parent(element);
            if matches!(
                ast.kind(parent),
                NodeKind::CharacterClass { .. }
                    | NodeKind::ClassIntersection { .. }
                    | NodeKind::ClassSubtraction { .. }
            ) {
                invariants::unexpected_node(ast, parent, "follow_paths (inside a character class)");
            }

            if !self.ops.continue_after(element, state, direction) {
                return (loops, Step::Stop);
            }

            match ast.kind(parent) {
                NodeKind::Quantifier { max, .. } => {
                    if max.is_none_or(|max| max > 1) {
                        loops.push(parent);
                    }
                    element = parent;
                }
                NodeKind::Alternative { elements } => {
                    let index = elements.iter().position(|&e| e == element).unwrap_or_default();
                    let next = match direction {
                        MatchingDirection::Ltr => elements.get(index + 1).copied(),
                        MatchingDirection::Rtl => index.checked_sub(1).map(|i| elements[i]),
                    };
                    if let Some(next) = next {
                        return (loops, Step::Element(next));
                    }

                    let grandparent = ast.ensure_parent(parent);
                    match ast.kind(grandparent) {
                        NodeKind::Pattern { .. } => return (loops, Step::End(PathEnd::Pattern)),
                        NodeKind::Lookaround { .. } => {
                            if !self.ops.continue_outside(grandparent, state, direction) {
                                return (loops, Step::End(PathEnd::Assertion));
                            }
                            element = grandparent;
                        }
                        NodeKind::Group { .. } | NodeKind::CapturingGroup { .. } => {
                            element = grandparent;
                        }
                        _ => invariants::unexpected_node(ast, grandparent, "follow_paths"),
                    }
                }
                _ => invariants::unexpected_node(ast, parent, "follow_paths"),
            }
        }
    }
}
