//! Determinism equivalence classes.
//!
//! Alternatives can be reordered freely if the regex engine never has a
//! choice between them: `food|butter|bread` can, `a|aa` cannot. The classes
//! returned here may be reordered relative to each other; alternatives within
//! one class still need another proof.

use indexmap::IndexSet;
use regast_core::{CharBase, CharSet, NodeId};

use crate::direction::{MatchingDirection, OptionalMatchingDirection};
use crate::longest_prefix::{PrefixOptions, longest_prefix};
use crate::util::{common_parent, merge_by_keys};
use crate::{Cache, Result};

const PREFIX_OPTIONS: PrefixOptions = PrefixOptions {
    include_after: true,
    only_inside: false,
    loose_groups: true,
};

/// Splits alternatives of one parent into disjoint, non-empty equivalence classes.
///
/// The classes depend on the reading direction: `a|ba` can be reordered when
/// read left to right, but not right to left. `Unknown` yields classes that
/// hold for both directions.
///
/// Classes appear in the order of their first member; members keep input order.
pub fn determinism_eq_classes(
    cache: &Cache<'_>,
    alternatives: &[NodeId],
    direction: OptionalMatchingDirection,
) -> Result<Vec<Vec<NodeId>>> {
    if common_parent(cache.ast(), alternatives)?.is_none() {
        return Ok(Vec::new());
    }

    let classes = match direction {
        OptionalMatchingDirection::Ltr => directional(cache, alternatives, MatchingDirection::Ltr),
        OptionalMatchingDirection::Rtl => directional(cache, alternatives, MatchingDirection::Rtl),
        OptionalMatchingDirection::Unknown => direction_independent(cache, alternatives),
    };
    Ok(classes)
}

fn direction_independent(cache: &Cache<'_>, alternatives: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut classes = directional(cache, alternatives, MatchingDirection::Ltr);
    classes.extend(directional(cache, alternatives, MatchingDirection::Rtl));

    let indexes: Vec<usize> = (0..classes.len()).collect();
    let merged = merge_by_keys(&indexes, |i| classes[i].clone());

    let position = |a: &NodeId| alternatives.iter().position(|b| b == a);
    merged
        .into_iter()
        .map(|group| {
            let members: IndexSet<NodeId> = group
                .into_iter()
                .flat_map(|i| classes[i].iter().copied())
                .collect();
            let mut members: Vec<NodeId> = members.into_iter().collect();
            members.sort_by_key(|a| position(a));
            members
        })
        .collect()
}

fn directional(
    cache: &Cache<'_>,
    alternatives: &[NodeId],
    direction: MatchingDirection,
) -> Vec<Vec<NodeId>> {
    // Known concatenations per alternative: `abc*de` gives `a, b, [cd]`.
    let prefixes: Vec<Vec<CharSet>> = alternatives
        .iter()
        .map(|&a| {
            let mut prefix = longest_prefix(cache, a, direction, PREFIX_OPTIONS);
            // Trailing all-character sets never separate anything, and neither does a
            // trailing empty set: nothing may follow, as before `$`.
            while prefix.last().is_some_and(|set| set.is_all() || set.is_empty()) {
                prefix.pop();
            }
            prefix
        })
        .collect();

    // Remap onto a shared base so that overlap checks become index comparisons.
    let base = CharBase::new(prefixes.iter().flatten());
    let characters: Vec<Vec<Vec<usize>>> = prefixes
        .iter()
        .map(|prefix| prefix.iter().map(|set| base.split(set)).collect())
        .collect();

    let all: Vec<usize> = (0..alternatives.len()).collect();
    let mut classes = Vec::new();
    subdivide(&characters, all, 0, &mut classes);
    classes.sort_by_key(|class| class.first().copied());

    classes
        .into_iter()
        .map(|class| class.into_iter().map(|i| alternatives[i]).collect())
        .collect()
}

/// Refines `class` by the character at `index` until some member runs out of characters.
fn subdivide(
    characters: &[Vec<Vec<usize>>],
    class: Vec<usize>,
    index: usize,
    out: &mut Vec<Vec<usize>>,
) {
    if class.len() < 2 || class.iter().any(|&i| index >= characters[i].len()) {
        out.push(class);
        return;
    }

    let disjoint = merge_by_keys(&class, |j| characters[class[j]][index].clone());
    for set in disjoint {
        subdivide(characters, set, index + 1, out);
    }
}
