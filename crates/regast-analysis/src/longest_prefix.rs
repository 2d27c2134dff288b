//! Longest prefixes of alternatives.

use regast_core::{CharSet, NodeId, NodeKind};

use crate::backref::{is_empty_backreference, is_strict_backreference};
use crate::direction::MatchingDirection;
use crate::first_char::{FirstConsumedChar, FirstLookChar};
use crate::length::{is_length_range_min_zero, is_zero_length};
use crate::next_char::{first_char_after, first_consumed_char, first_consumed_char_after};
use crate::{Cache, invariants, to_char_set};

/// Options for `longest_prefix`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrefixOptions {
    /// Append the next character after the longest knowable sequence.
    ///
    /// That character may lie outside the alternative (`(ab)c` gives `a, b, c`)
    /// or only be a superset of the real one (`ab(cd|ef)` gives `a, b, [ce]`),
    /// so the result is no longer guaranteed to be a prefix.
    pub include_after: bool,
    /// With `include_after`, only look at characters inside the alternative.
    /// If the last character would depend on anything outside, it is dropped.
    pub only_inside: bool,
    /// Combine group alternatives position by position regardless of how much
    /// they differ. `(?:bitter|barber)` gives `b, [ia], [tr], [tb], e, r`
    /// instead of `b, [ia]`. The result is only a superset of the strict prefix.
    pub loose_groups: bool,
}

impl PrefixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_after(mut self, value: bool) -> Self {
        self.include_after = value;
        self
    }

    pub fn with_only_inside(mut self, value: bool) -> Self {
        self.only_inside = value;
        self
    }

    pub fn with_loose_groups(mut self, value: bool) -> Self {
        self.loose_groups = value;
        self
    }
}

/// The longest sequence of character sets every match of `alternative` starts with.
///
/// Assertions are ignored. Every set except the last is non-empty; the last
/// one is non-empty too unless `include_after` is set.
pub fn longest_prefix(
    cache: &Cache<'_>,
    alternative: NodeId,
    direction: MatchingDirection,
    options: PrefixOptions,
) -> Vec<CharSet> {
    cache.prefix(alternative, direction, options, || {
        PrefixBuilder {
            cache,
            direction,
            options,
            root: alternative,
        }
        .build()
    })
}

struct Prefix {
    chars: Vec<CharSet>,
    complete: bool,
}

impl Prefix {
    fn complete(chars: Vec<CharSet>) -> Self {
        Self {
            chars,
            complete: true,
        }
    }

    fn incomplete(chars: Vec<CharSet>) -> Self {
        Self {
            chars,
            complete: false,
        }
    }
}

#[derive(Clone, Copy)]
struct PrefixBuilder<'c, 'a> {
    cache: &'c Cache<'a>,
    direction: MatchingDirection,
    options: PrefixOptions,
    root: NodeId,
}

impl PrefixBuilder<'_, '_> {
    fn build(self) -> Vec<CharSet> {
        let Prefix {
            mut chars,
            complete,
        } = self.alternative(self.root);

        if let Some(empty) = chars.iter().position(CharSet::is_empty) {
            chars.truncate(empty);
            return chars;
        }

        if complete && self.options.include_after && !self.options.only_inside {
            chars.push(self.first_char_after_alternative(self.root).char);
        }
        chars
    }

    fn alternative(self, alternative: NodeId) -> Prefix {
        let elements = self.cache.ast().ensure_elements(alternative);
        let count = elements.len();
        let mut chars = Vec::new();
        for i in 0..count {
            let element = match self.direction {
                MatchingDirection::Ltr => elements[i],
                MatchingDirection::Rtl => elements[count - 1 - i],
            };
            let inner = self.element(element);
            chars.extend(inner.chars);
            if !inner.complete {
                return Prefix::incomplete(chars);
            }
        }
        Prefix::complete(chars)
    }

    fn element(self, element: NodeId) -> Prefix {
        let ast = self.cache.ast();
        match ast.kind(element) {
            NodeKind::EdgeAssertion { .. }
            | NodeKind::WordBoundary { .. }
            | NodeKind::Lookaround { .. } => Prefix::complete(Vec::new()),
            NodeKind::Character { .. }
            | NodeKind::CharacterClass { .. }
            | NodeKind::CharacterSet(_) => {
                Prefix::complete(vec![to_char_set(self.cache, element)])
            }
            NodeKind::Group { alternatives } | NodeKind::CapturingGroup { alternatives, .. } => {
                self.group(element, alternatives)
            }
            NodeKind::Quantifier {
                min, max, element: inner, ..
            } => self.quantifier(element, *min, *max, *inner),
            NodeKind::Backreference { .. } => {
                if is_empty_backreference(ast, element) {
                    return Prefix::complete(Vec::new());
                }
                if is_strict_backreference(ast, element) {
                    let strict = PrefixBuilder {
                        options: PrefixOptions {
                            include_after: false,
                            ..self.options
                        },
                        ..self
                    };
                    return strict.element(ast.ensure_resolved(element));
                }
                if !self.may_look_ahead(element) {
                    return Prefix::incomplete(Vec::new());
                }
                let look = self.first_consumed_char_plus_after(element).to_look();
                Prefix::incomplete(vec![look.char])
            }
            _ => invariants::unexpected_node(ast, element, "longest_prefix"),
        }
    }

    fn group(self, group: NodeId, alternatives: &[NodeId]) -> Prefix {
        let mut prefixes: Vec<Prefix> = alternatives.iter().map(|&a| self.alternative(a)).collect();
        if prefixes.len() == 1 {
            return prefixes.remove(0);
        }

        let mut chars = Vec::new();
        let mut complete = true;
        // positions at which alternatives differ, strict mode only
        let mut different = 0;

        let mut i = 0;
        while complete {
            let mut column: Vec<CharSet> = Vec::new();
            let mut ended = false;
            for prefix in &prefixes {
                match prefix.chars.get(i) {
                    None => ended = true,
                    Some(char) => {
                        column.push(char.clone());
                        if i == prefix.chars.len() - 1
                            && !prefix.complete
                            && self.options.include_after
                        {
                            complete = false;
                        }
                    }
                }
            }

            if column.is_empty() {
                // Every alternative ended at the same position.
                complete = complete && prefixes.iter().all(|p| p.complete);
                break;
            }

            if ended {
                // Some alternatives ended, so the characters after the group come into play.
                complete = false;
                if !self.may_look_ahead_after(group) {
                    break;
                }
                column.push(first_char_after(self.cache, group, self.direction).char);
            } else if !self.options.loose_groups {
                if complete && column.iter().any(|c| *c != column[0]) {
                    different += 1;
                }
                if different >= 2 {
                    complete = false;
                    if !self.options.include_after {
                        break;
                    }
                }
            }

            let maximum = self.cache.max_char();
            chars.push(
                column
                    .iter()
                    .fold(CharSet::empty(maximum), |acc, c| acc.union(c)),
            );
            i += 1;
        }

        Prefix { chars, complete }
    }

    fn quantifier(self, quantifier: NodeId, min: u32, max: Option<u32>, inner: NodeId) -> Prefix {
        let ast = self.cache.ast();
        if is_zero_length(ast, quantifier) {
            return Prefix::complete(Vec::new());
        }
        if is_length_range_min_zero(ast, quantifier) {
            if !self.may_look_ahead(quantifier) {
                return Prefix::incomplete(Vec::new());
            }
            let look = self.first_consumed_char_plus_after(quantifier).to_look();
            return Prefix::incomplete(vec![look.char]);
        }

        let inner_prefix = self.element(inner);
        if !inner_prefix.complete {
            return inner_prefix;
        }
        let Some(first) = inner_prefix.chars.first().cloned() else {
            invariants::unexpected_node(
                ast,
                quantifier,
                "longest_prefix (quantifier consumes nothing)",
            )
        };

        let limit = self.cache.config().prefix_limit;
        let mut chars = Vec::new();
        for _ in 0..min {
            chars.extend(inner_prefix.chars.iter().cloned());
            if chars.len() > limit {
                log::debug!(
                    "longest_prefix: `{}` exceeds the prefix limit of {limit}",
                    ast.raw(quantifier)
                );
                return Prefix::incomplete(chars);
            }
        }

        if max == Some(min) {
            return Prefix::complete(chars);
        }

        if self.may_look_ahead_after(quantifier) {
            let look = first_char_after(self.cache, quantifier, self.direction);
            chars.push(look.char.union(&first));
        }
        Prefix::incomplete(chars)
    }

    /// `first_consumed_char` of `element` followed by whatever comes after it.
    fn first_consumed_char_plus_after(self, element: NodeId) -> FirstConsumedChar {
        let consumed = first_consumed_char(self.cache, element, self.direction);
        if !consumed.is_partial() {
            return consumed;
        }
        let after = first_consumed_char_after(self.cache, element, self.direction);
        FirstConsumedChar::concat([consumed, after], self.cache.max_char())
    }

    fn first_char_after_alternative(self, alternative: NodeId) -> FirstLookChar {
        let ast = self.cache.ast();
        let elements = ast.ensure_elements(alternative);

        // Step back over trailing zero-length elements so assertions inside the
        // alternative still constrain the character after it.
        let last_consuming = match self.direction {
            MatchingDirection::Ltr => elements.iter().rev().find(|&&e| !is_zero_length(ast, e)),
            MatchingDirection::Rtl => elements.iter().find(|&&e| !is_zero_length(ast, e)),
        };
        match last_consuming {
            Some(&element) => first_char_after(self.cache, element, self.direction),
            None => self.first_consumed_char_plus_after(alternative).to_look(),
        }
    }

    fn may_look_ahead(self, element: NodeId) -> bool {
        if !self.options.include_after {
            return false;
        }
        if self.options.only_inside {
            return !is_length_range_min_zero(self.cache.ast(), element)
                || self.is_next_char_inside_after(element);
        }
        true
    }

    fn may_look_ahead_after(self, element: NodeId) -> bool {
        if !self.options.include_after {
            return false;
        }
        if self.options.only_inside {
            return self.is_next_char_inside_after(element);
        }
        true
    }

    /// Whether the next character consumed after `after` is decided by elements
    /// of the root alternative.
    fn is_next_char_inside_after(self, mut after: NodeId) -> bool {
        let ast = self.cache.ast();
        loop {
            let parent = ast.ensure_parent(after);
            match ast.kind(parent) {
                NodeKind::Quantifier { .. } => after = parent,
                NodeKind::Alternative { elements } => {
                    let index = elements.iter().position(|&e| e == after).unwrap_or_default();
                    let consumes = |&e: &NodeId| !is_length_range_min_zero(ast, e);
                    let found = match self.direction {
                        MatchingDirection::Ltr => elements[index + 1..].iter().any(consumes),
                        MatchingDirection::Rtl => elements[..index].iter().any(consumes),
                    };
                    if found {
                        return true;
                    }
                    if parent == self.root {
                        return false;
                    }
                    let grandparent = ast.ensure_parent(parent);
                    if !ast.kind(grandparent).is_group() {
                        invariants::unexpected_node(
                            ast,
                            grandparent,
                            "longest_prefix (outside the root)",
                        );
                    }
                    after = grandparent;
                }
                _ => invariants::unexpected_node(ast, parent, "longest_prefix"),
            }
        }
    }
}
