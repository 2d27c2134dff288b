//! Conversion of character nodes into code point sets.

use regast_core::{CharRange, CharSet, CharacterSetKind, NodeId, NodeKind, unicode};

use crate::{Cache, chars, invariants};

/// The set of characters a character node matches, honoring `i`, `s`, and `u`/`v`.
///
/// Accepts `Character`, `CharacterClass`, `CharacterClassRange`, `CharacterSet`,
/// and the unicodeSets operator nodes. Panics for any other node.
pub fn to_char_set(cache: &Cache<'_>, element: NodeId) -> CharSet {
    cache.char_set(element, || compute(cache, element))
}

/// Whether a character node matches every character.
pub fn matches_all_characters(cache: &Cache<'_>, element: NodeId) -> bool {
    to_char_set(cache, element).is_all()
}

/// Whether a character node matches no character at all, e.g. `[]`.
pub fn matches_no_characters(cache: &Cache<'_>, element: NodeId) -> bool {
    to_char_set(cache, element).is_empty()
}

fn compute(cache: &Cache<'_>, element: NodeId) -> CharSet {
    let flags = cache.flags();
    let maximum = cache.max_char();
    let fold = |set: CharSet| {
        if flags.ignore_case {
            unicode::case_closure(&set, flags.is_unicode())
        } else {
            set
        }
    };

    match cache.ast().kind(element) {
        NodeKind::Character { value } => fold(CharSet::from_char(maximum, *value)),
        NodeKind::CharacterClassRange { min, max } => {
            fold(CharSet::from_ranges(maximum, [CharRange::new(*min, *max)]))
        }
        NodeKind::CharacterSet(kind) => match kind {
            CharacterSetKind::Any if flags.dot_all => chars::all(flags),
            CharacterSetKind::Any => chars::non_line_terminator(flags),
            CharacterSetKind::Digit { negate } => negate_if(*negate, chars::digit(flags)),
            CharacterSetKind::Space { negate } => negate_if(*negate, chars::space(flags)),
            CharacterSetKind::Word { negate } => negate_if(*negate, chars::word(flags)),
            CharacterSetKind::Property { key, value, negate } => {
                let ranges = unicode::property_ranges(key.as_deref(), value).unwrap_or_default();
                negate_if(*negate, fold(CharSet::from_ranges(maximum, ranges)))
            }
        },
        NodeKind::CharacterClass { negate, elements } => {
            let union = elements
                .iter()
                .fold(CharSet::empty(maximum), |acc, &e| acc.union(&to_char_set(cache, e)));
            negate_if(*negate, union)
        }
        NodeKind::ClassIntersection {
            operands: [left, right],
        } => to_char_set(cache, *left).intersect(&to_char_set(cache, *right)),
        NodeKind::ClassSubtraction {
            operands: [left, right],
        } => to_char_set(cache, *left).without(&to_char_set(cache, *right)),
        _ => invariants::unexpected_node(cache.ast(), element, "to_char_set"),
    }
}

fn negate_if(negate: bool, set: CharSet) -> CharSet {
    if negate { set.negate() } else { set }
}
