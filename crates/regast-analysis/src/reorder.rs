//! Whether alternatives can be reordered without changing the pattern.

use indexmap::IndexSet;
use regast_core::{CharSet, NodeId, NodeKind};

use crate::ancestry::{contains_capturing_group, matching_direction};
use crate::consumed_chars::consumed_chars;
use crate::determinism::determinism_eq_classes;
use crate::direction::{MatchingDirection, OptionalMatchingDirection};
use crate::length::length_range_of;
use crate::next_char::first_char_after;
use crate::util::common_parent;
use crate::{Cache, Result, to_char_set};

/// Options for `can_reorder`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReorderOptions {
    /// Direction in which the alternatives are matched. Defaults to the
    /// matching direction of the alternatives; `Unknown` is correct for both.
    pub matching_direction: Option<OptionalMatchingDirection>,
    /// Allow permutations that change the order of capturing groups.
    pub ignore_capturing_groups: bool,
}

impl ReorderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matching_direction(mut self, direction: OptionalMatchingDirection) -> Self {
        self.matching_direction = Some(direction);
        self
    }

    pub fn with_ignore_capturing_groups(mut self, value: bool) -> Self {
        self.ignore_capturing_groups = value;
        self
    }
}

/// Whether every permutation of `alternatives` behaves like the current order.
///
/// The alternatives must share a parent. Let `M` be the other alternatives of
/// that parent that sit between two given ones: all permutations of the given
/// alternatives and `M` that keep the relative order of `M` are equivalent.
/// Nothing is guaranteed for alternatives outside that slice.
pub fn can_reorder(
    cache: &Cache<'_>,
    alternatives: &[NodeId],
    options: ReorderOptions,
) -> Result<bool> {
    let target: IndexSet<NodeId> = alternatives.iter().copied().collect();
    if target.len() < 2 {
        return Ok(true);
    }
    let Some(parent) = common_parent(cache.ast(), alternatives)? else {
        return Ok(true);
    };

    let slice = alternatives_slice(cache, parent, &target);
    let direction = options
        .matching_direction
        .unwrap_or_else(|| matching_direction(cache.ast(), slice[0]).into());

    let ignore_groups = options.ignore_capturing_groups;
    let reorderable =
        |direction| can_reorder_directional(cache, &target, &slice, direction, ignore_groups);
    match direction {
        OptionalMatchingDirection::Ltr => reorderable(MatchingDirection::Ltr),
        OptionalMatchingDirection::Rtl => reorderable(MatchingDirection::Rtl),
        OptionalMatchingDirection::Unknown => {
            let ltr = reorderable(MatchingDirection::Ltr)?;
            Ok(ltr && reorderable(MatchingDirection::Rtl)?)
        }
    }
}

/// The smallest contiguous run of the parent's alternatives containing all targets.
fn alternatives_slice(cache: &Cache<'_>, parent: NodeId, target: &IndexSet<NodeId>) -> Vec<NodeId> {
    let siblings = cache.ast().ensure_alternatives(parent);
    let first = siblings.iter().position(|a| target.contains(a)).unwrap_or_default();
    let last = siblings
        .iter()
        .rposition(|a| target.contains(a))
        .unwrap_or(first);
    siblings[first..=last].to_vec()
}

fn can_reorder_directional(
    cache: &Cache<'_>,
    target: &IndexSet<NodeId>,
    slice: &[NodeId],
    direction: MatchingDirection,
    ignore_capturing_groups: bool,
) -> Result<bool> {
    let classes = determinism_eq_classes(cache, slice, direction.into())?;

    if !ignore_capturing_groups && !can_reorder_capturing_groups(cache, target, slice, &classes) {
        log::debug!("can_reorder: capturing groups would change order");
        return Ok(false);
    }

    Ok(classes.iter().all(|class| {
        class.len() < 2
            || class.iter().all(|a| !target.contains(a))
            || can_reorder_by_length(cache, class)
            || can_reorder_by_consumed_chars(cache, class, direction)
    }))
}

/// Swapping two alternatives with capturing groups is observable, so at most
/// one alternative of the slice may contain groups, and it must not share a
/// class with a target (or, if it is a target, with anything).
fn can_reorder_capturing_groups(
    cache: &Cache<'_>,
    target: &IndexSet<NodeId>,
    slice: &[NodeId],
    classes: &[Vec<NodeId>],
) -> bool {
    let ast = cache.ast();
    let has_groups = |a: &NodeId| contains_capturing_group(ast, *a);

    let mut target_groups = 0;
    let mut other_groups = 0;
    for a in slice.iter().filter(|&a| has_groups(a)) {
        if target.contains(a) {
            target_groups += 1;
        } else {
            other_groups += 1;
        }
    }

    if target_groups > 1 || (target_groups == 1 && other_groups != 0) {
        return false;
    }

    if other_groups != 0 {
        // `^(?:a|(b)|b)$` with targets `a` and `b`: the two `b`s cannot be swapped.
        classes
            .iter()
            .all(|class| !class.iter().any(has_groups) || class.iter().all(|a| !target.contains(a)))
    } else if target_groups != 0 {
        classes
            .iter()
            .all(|class| class.len() < 2 || !class.iter().any(has_groups))
    } else {
        true
    }
}

/// Same fixed length: the engine ends up at the same position whichever alternative it takes.
fn can_reorder_by_length(cache: &Cache<'_>, class: &[NodeId]) -> bool {
    length_range_of(cache.ast(), class).is_ok_and(|range| range.is_fixed())
}

/// Nothing the alternatives consume may follow them.
///
/// Common prefixes and suffixes are factored out first: `(?:foobar|footwear)`
/// is checked like `foo(?:b|twe)ar`.
fn can_reorder_by_consumed_chars(
    cache: &Cache<'_>,
    class: &[NodeId],
    direction: MatchingDirection,
) -> bool {
    let ast = cache.ast();
    let elements: Vec<&[NodeId]> = class.iter().map(|&a| ast.ensure_elements(a)).collect();
    let factored = factor_out_common(cache, &elements);

    let consumed = factored
        .rest
        .iter()
        .flat_map(|elements| elements.iter())
        .fold(CharSet::empty(cache.max_char()), |acc, &e| {
            acc.union(&consumed_chars(cache, e).chars)
        });

    let suffix = match direction {
        MatchingDirection::Ltr => &factored.right,
        MatchingDirection::Rtl => &factored.left,
    };
    if suffix.iter().any(|set| set.is_disjoint_with(&consumed)) {
        return true;
    }

    let parent = ast.ensure_parent(class[0]);
    if matches!(
        ast.kind(parent),
        NodeKind::Pattern { .. } | NodeKind::Lookaround { .. }
    ) {
        return false;
    }
    first_char_after(cache, parent, direction)
        .char
        .is_disjoint_with(&consumed)
}

struct FactoredOut<'e> {
    left: Vec<CharSet>,
    right: Vec<CharSet>,
    rest: Vec<&'e [NodeId]>,
}

fn factor_out_common<'e>(cache: &Cache<'_>, alternatives: &[&'e [NodeId]]) -> FactoredOut<'e> {
    let left = common_char_prefix(cache, alternatives, MatchingDirection::Ltr);
    let rest: Vec<&[NodeId]> = alternatives.iter().map(|&e| &e[left.len()..]).collect();
    let right = common_char_prefix(cache, &rest, MatchingDirection::Rtl);
    let rest = rest.iter().map(|&e| &e[..e.len() - right.len()]).collect();
    FactoredOut { left, right, rest }
}

/// Character sets shared position by position by all alternatives, from the given end.
fn common_char_prefix(
    cache: &Cache<'_>,
    alternatives: &[&[NodeId]],
    direction: MatchingDirection,
) -> Vec<CharSet> {
    let ast = cache.ast();
    let mut prefix = Vec::new();

    let mut i = 0;
    loop {
        let mut common: Option<CharSet> = None;
        for elements in alternatives {
            if i >= elements.len() {
                return prefix;
            }
            let element = match direction {
                MatchingDirection::Ltr => elements[i],
                MatchingDirection::Rtl => elements[elements.len() - 1 - i],
            };
            if !matches!(
                ast.kind(element),
                NodeKind::Character { .. }
                    | NodeKind::CharacterClass { .. }
                    | NodeKind::CharacterSet(_)
            ) {
                return prefix;
            }
            let set = to_char_set(cache, element);
            match &common {
                None => common = Some(set),
                Some(c) if *c != set => return prefix,
                Some(_) => {}
            }
        }
        match common {
            Some(set) => prefix.push(set),
            None => return prefix,
        }
        i += 1;
    }
}
