//! First characters of elements and of the input after a point.

use indexmap::IndexSet;
use regast_core::{CharSet, LookaroundKind, NodeId, NodeKind};

use crate::ancestry::has_some_descendant;
use crate::backref::{is_empty_backreference, is_strict_backreference};
use crate::direction::MatchingDirection;
use crate::first_char::{FirstConsumedChar, FirstLookChar};
use crate::follow::{FollowOperations, StartMode, follow_paths};
use crate::length::length_range_of;
use crate::{Cache, chars, invariants, to_char_set};

/// The first character consumed by `element` in the given direction.
///
/// Only `element` itself is considered: in `b?a`, `b?` yields `b` with a look
/// that accepts everything, because the `a` after it is outside.
///
/// Accepts `Pattern`, `Alternative`, and any element outside character classes.
pub fn first_consumed_char(
    cache: &Cache<'_>,
    element: NodeId,
    direction: MatchingDirection,
) -> FirstConsumedChar {
    FirstChars::new(cache).consumed(element, direction)
}

/// Union of `first_consumed_char` over a list of alternatives.
pub fn first_consumed_char_of(
    cache: &Cache<'_>,
    alternatives: &[NodeId],
    direction: MatchingDirection,
) -> FirstConsumedChar {
    FirstChars::new(cache).consumed_of(alternatives, direction)
}

/// The first character consumed after `after`, following paths out of it.
pub fn first_consumed_char_after(
    cache: &Cache<'_>,
    after: NodeId,
    direction: MatchingDirection,
) -> FirstConsumedChar {
    FirstChars::new(cache).consumed_after(after, direction)
}

/// The first character after `after` as a lookaround would see it.
///
/// Use the inverted direction to get the character before an element.
pub fn first_char_after(
    cache: &Cache<'_>,
    after: NodeId,
    direction: MatchingDirection,
) -> FirstLookChar {
    FirstChars::new(cache)
        .consumed_after(after, direction)
        .to_look()
}

/// A result together with the elements that contributed to it.
///
/// Everything inside a contributor contributes too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithContributors<C> {
    pub char: C,
    pub contributors: Vec<NodeId>,
}

/// `first_consumed_char_after`, also reporting the elements it looked at.
pub fn first_consumed_char_after_with_contributors(
    cache: &Cache<'_>,
    after: NodeId,
    direction: MatchingDirection,
) -> WithContributors<FirstConsumedChar> {
    let mut first_chars = FirstChars::new(cache);
    let mut ops = TrackedAfter {
        first_chars: &mut first_chars,
    };
    let initial = Tracked {
        char: FirstConsumedChar::empty_concat(cache.max_char()),
        contributors: Vec::new(),
    };
    let result = follow_paths(
        cache.ast(),
        after,
        StartMode::Next,
        initial,
        &mut ops,
        Some(direction),
    );
    WithContributors {
        char: result.char,
        contributors: result.contributors,
    }
}

/// `first_char_after`, also reporting the elements it looked at.
pub fn first_char_after_with_contributors(
    cache: &Cache<'_>,
    after: NodeId,
    direction: MatchingDirection,
) -> WithContributors<FirstLookChar> {
    let WithContributors { char, contributors } =
        first_consumed_char_after_with_contributors(cache, after, direction);
    WithContributors {
        char: char.to_look(),
        contributors,
    }
}

/// One analysis run: the session cache plus the word boundaries currently being evaluated.
struct FirstChars<'c, 'a> {
    cache: &'c Cache<'a>,
    word_boundaries: Vec<NodeId>,
}

impl<'c, 'a> FirstChars<'c, 'a> {
    fn new(cache: &'c Cache<'a>) -> Self {
        Self {
            cache,
            word_boundaries: Vec::new(),
        }
    }

    fn maximum(&self) -> u32 {
        self.cache.max_char()
    }

    fn consumed(&mut self, element: NodeId, direction: MatchingDirection) -> FirstConsumedChar {
        let cache = self.cache;
        cache.first_consumed(element, direction, || {
            self.consumed_uncached(element, direction)
        })
    }

    fn consumed_of(
        &mut self,
        alternatives: &[NodeId],
        direction: MatchingDirection,
    ) -> FirstConsumedChar {
        let maximum = self.maximum();
        let items: Vec<_> = alternatives
            .iter()
            .map(|&a| self.consumed(a, direction))
            .collect();
        FirstConsumedChar::union(items, maximum)
    }

    fn consumed_uncached(
        &mut self,
        element: NodeId,
        direction: MatchingDirection,
    ) -> FirstConsumedChar {
        let ast = self.cache.ast();
        let maximum = self.maximum();

        match ast.kind(element) {
            NodeKind::Character { .. }
            | NodeKind::CharacterClass { .. }
            | NodeKind::CharacterSet(_) => FirstConsumedChar::Full {
                char: to_char_set(self.cache, element),
                exact: true,
            },
            NodeKind::Quantifier {
                min, max, element, ..
            } => {
                if *max == Some(0) {
                    return FirstConsumedChar::empty_concat(maximum);
                }
                let inner = self.consumed(*element, direction);
                if *min == 0 {
                    inner.make_optional()
                } else {
                    inner
                }
            }
            NodeKind::Alternative { elements } => {
                let count = elements.len();
                let items = (0..count).map(|i| {
                    let element = match direction {
                        MatchingDirection::Ltr => elements[i],
                        MatchingDirection::Rtl => elements[count - 1 - i],
                    };
                    self.consumed(element, direction)
                });
                FirstConsumedChar::concat(items, maximum)
            }
            NodeKind::Pattern { alternatives }
            | NodeKind::Group { alternatives }
            | NodeKind::CapturingGroup { alternatives, .. } => {
                self.consumed_of(alternatives, direction)
            }
            NodeKind::Backreference { .. } => {
                if is_empty_backreference(ast, element) {
                    return FirstConsumedChar::empty_concat(maximum);
                }
                let mut resolved = self.consumed(ast.ensure_resolved(element), direction);
                // `(\w)\1`: the group captures any word character, but `\1` only
                // matches the one captured.
                if resolved.exact() && resolved.char().size() > 1 {
                    resolved = resolved.with_exact(false);
                }
                if is_strict_backreference(ast, element) {
                    resolved
                } else {
                    resolved.make_optional()
                }
            }
            NodeKind::EdgeAssertion { kind } => {
                if MatchingDirection::of_edge(*kind) != direction {
                    return self.misdirected();
                }
                if self.cache.flags().multiline {
                    FirstLookChar {
                        char: chars::line_terminator(self.cache.flags()),
                        edge: true,
                        exact: true,
                    }
                    .to_consumed()
                } else {
                    FirstLookChar::edge(maximum).to_consumed()
                }
            }
            NodeKind::WordBoundary { negate } => self.word_boundary(element, *negate, direction),
            NodeKind::Lookaround {
                kind,
                negate,
                alternatives,
            } => self.lookaround(element, *kind, *negate, alternatives, direction),
            NodeKind::CharacterClassRange { .. }
            | NodeKind::ClassIntersection { .. }
            | NodeKind::ClassSubtraction { .. } => {
                invariants::unexpected_node(ast, element, "first_consumed_char")
            }
        }
    }

    fn word_boundary(
        &mut self,
        element: NodeId,
        negate: bool,
        direction: MatchingDirection,
    ) -> FirstConsumedChar {
        if self.word_boundaries.contains(&element) {
            // The assertion depends on itself through the characters around it.
            log::debug!(
                "first_consumed_char: word boundary at {} depends on itself",
                self.cache.ast().node(element).span.start
            );
            return self.misdirected();
        }

        self.word_boundaries.push(element);
        let before = self.consumed_after(element, direction.invert()).to_look();
        self.word_boundaries.pop();

        // \b == (?<!\w)(?=\w)|(?<=\w)(?!\w)
        // \B == (?<=\w)(?=\w)|(?<!\w)(?!\w)
        let word = chars::word(self.cache.flags());
        if before.char.is_disjoint_with(&word) {
            self.word_assertion(&word, negate)
        } else if !before.edge && before.char.is_subset_of(&word) {
            self.word_assertion(&word, !negate)
        } else {
            self.misdirected()
        }
    }

    fn word_assertion(&self, word: &CharSet, negate: bool) -> FirstConsumedChar {
        FirstLookChar {
            char: if negate { word.negate() } else { word.clone() },
            edge: negate,
            exact: true,
        }
        .to_consumed()
    }

    fn lookaround(
        &mut self,
        element: NodeId,
        kind: LookaroundKind,
        negate: bool,
        alternatives: &[NodeId],
        direction: MatchingDirection,
    ) -> FirstConsumedChar {
        if MatchingDirection::of_lookaround(kind) != direction {
            return self.misdirected();
        }
        let first = self.consumed_of(alternatives, direction);
        if !negate {
            return first.to_look().to_consumed();
        }

        // Negating a superset only yields a subset, so only exact single
        // characters can be negated: `(?![a])` == `(?=[^a]|$)`.
        let ast = self.cache.ast();
        if has_some_descendant(ast, element, |d| d != element && ast.kind(d).is_assertion()) {
            return self.misdirected();
        }
        let Ok(range) = length_range_of(ast, alternatives) else {
            return FirstConsumedChar::empty_union(self.maximum());
        };
        if first.is_partial() {
            return FirstConsumedChar::empty_union(self.maximum());
        }
        if !first.exact() || range.max != Some(1) {
            log::debug!(
                "first_consumed_char: cannot negate `{}` exactly",
                ast.raw(element)
            );
            return self.misdirected();
        }
        FirstLookChar {
            char: first.char().negate(),
            edge: true,
            exact: true,
        }
        .to_consumed()
    }

    /// Result for assertions whose outcome depends on characters outside the element.
    fn misdirected(&self) -> FirstConsumedChar {
        FirstLookChar {
            char: CharSet::all(self.maximum()),
            edge: true,
            exact: false,
        }
        .to_consumed()
    }

    fn consumed_after(&mut self, after: NodeId, direction: MatchingDirection) -> FirstConsumedChar {
        let initial = FirstConsumedChar::empty_concat(self.maximum());
        let ast = self.cache.ast();
        let mut ops = ConsumedAfter { first_chars: self };
        follow_paths(
            ast,
            after,
            StartMode::Next,
            initial,
            &mut ops,
            Some(direction),
        )
    }
}

fn leaves_lookaround(cache: &Cache<'_>, lookaround: NodeId, direction: MatchingDirection) -> bool {
    match cache.ast().kind(lookaround) {
        NodeKind::Lookaround { kind, .. } => MatchingDirection::of_lookaround(*kind) != direction,
        _ => false,
    }
}

struct ConsumedAfter<'f, 'c, 'a> {
    first_chars: &'f mut FirstChars<'c, 'a>,
}

impl FollowOperations for ConsumedAfter<'_, '_, '_> {
    type State = FirstConsumedChar;

    fn join(
        &mut self,
        states: Vec<FirstConsumedChar>,
        _direction: MatchingDirection,
    ) -> FirstConsumedChar {
        FirstConsumedChar::union(states, self.first_chars.maximum())
    }

    fn enter(
        &mut self,
        element: NodeId,
        state: FirstConsumedChar,
        direction: MatchingDirection,
    ) -> FirstConsumedChar {
        let first = self.first_chars.consumed(element, direction);
        FirstConsumedChar::concat([state, first], self.first_chars.maximum())
    }

    fn continue_into(&mut self, _: NodeId, _: &FirstConsumedChar, _: MatchingDirection) -> bool {
        false
    }

    fn continue_after(
        &mut self,
        _: NodeId,
        state: &FirstConsumedChar,
        _: MatchingDirection,
    ) -> bool {
        state.is_partial()
    }

    fn continue_outside(
        &mut self,
        lookaround: NodeId,
        _: &FirstConsumedChar,
        direction: MatchingDirection,
    ) -> bool {
        leaves_lookaround(self.first_chars.cache, lookaround, direction)
    }
}

#[derive(Clone)]
struct Tracked {
    char: FirstConsumedChar,
    contributors: Vec<NodeId>,
}

struct TrackedAfter<'f, 'c, 'a> {
    first_chars: &'f mut FirstChars<'c, 'a>,
}

impl FollowOperations for TrackedAfter<'_, '_, '_> {
    type State = Tracked;

    fn join(&mut self, states: Vec<Tracked>, _direction: MatchingDirection) -> Tracked {
        let mut contributors = IndexSet::new();
        let mut chars = Vec::with_capacity(states.len());
        for state in states {
            contributors.extend(state.contributors);
            chars.push(state.char);
        }
        Tracked {
            char: FirstConsumedChar::union(chars, self.first_chars.maximum()),
            contributors: contributors.into_iter().collect(),
        }
    }

    fn enter(&mut self, element: NodeId, state: Tracked, direction: MatchingDirection) -> Tracked {
        let first = self.first_chars.consumed(element, direction);
        let mut contributors = state.contributors;
        contributors.push(element);
        Tracked {
            char: FirstConsumedChar::concat([state.char, first], self.first_chars.maximum()),
            contributors,
        }
    }

    fn continue_into(&mut self, _: NodeId, _: &Tracked, _: MatchingDirection) -> bool {
        false
    }

    fn continue_after(&mut self, _: NodeId, state: &Tracked, _: MatchingDirection) -> bool {
        state.char.is_partial()
    }

    fn continue_outside(
        &mut self,
        lookaround: NodeId,
        _: &Tracked,
        direction: MatchingDirection,
    ) -> bool {
        leaves_lookaround(self.first_chars.cache, lookaround, direction)
    }
}
