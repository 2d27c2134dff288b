//! Unicode tables backed by `regex-syntax`.
//!
//! Property escapes (`\p{…}`) and case-insensitive matching both need Unicode
//! data; `regex-syntax` already ships it, so we go through its HIR classes.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_syntax::hir::{Class, ClassUnicode, ClassUnicodeRange, HirKind};

use crate::{CharRange, CharSet};

const SURROGATES: CharRange = CharRange {
    min: 0xD800,
    max: 0xDFFF,
};

/// Code point ranges of a Unicode property, e.g. `Letter` or `Script=Greek`.
///
/// Returns `None` for unknown properties.
pub fn property_ranges(key: Option<&str>, value: &str) -> Option<Vec<CharRange>> {
    let body = match key {
        Some(key) => format!("{key}={value}"),
        None => value.to_owned(),
    };
    let hir = regex_syntax::ParserBuilder::new()
        .build()
        .parse(&format!(r"\p{{{body}}}"))
        .ok()?;

    match hir.kind() {
        HirKind::Class(Class::Unicode(class)) => Some(
            class
                .iter()
                .map(|r| CharRange::new(r.start() as u32, r.end() as u32))
                .collect(),
        ),
        _ => None,
    }
}

/// Closes `set` under case-insensitive equivalence.
///
/// In Unicode mode this is simple case folding. Otherwise two code points are
/// equivalent if they canonicalize to the same code unit, where canonicalizing
/// upper-cases a code point unless the result is longer than one UTF-16 code
/// unit or maps a non-ASCII code point into ASCII.
pub fn case_closure(set: &CharSet, unicode: bool) -> CharSet {
    if unicode {
        return fold(set);
    }

    let members = LEGACY_CLASSES
        .iter()
        .filter(|class| class.iter().any(|&c| set.contains(c)))
        .flatten()
        .map(|&c| CharRange::single(c));
    set.union(&CharSet::from_ranges(set.maximum(), members))
}

/// Upper-casing as done by case-insensitive matching without the `u` or `v` flag.
fn canonicalize_legacy(c: u32) -> u32 {
    let Some(ch) = char::from_u32(c) else {
        return c;
    };
    let mut upper = ch.to_uppercase();
    let (Some(u), None) = (upper.next(), upper.next()) else {
        return c;
    };
    let u = u as u32;
    if u > 0xFFFF || (c >= 0x80 && u < 0x80) {
        return c;
    }
    u
}

/// Every legacy case-equivalence class with more than one member.
static LEGACY_CLASSES: LazyLock<Vec<Vec<u32>>> = LazyLock::new(|| {
    let mut by_canonical: HashMap<u32, Vec<u32>> = HashMap::new();
    for c in 0..=0xFFFF {
        by_canonical
            .entry(canonicalize_legacy(c))
            .or_default()
            .push(c);
    }
    let mut classes: Vec<Vec<u32>> = by_canonical
        .into_values()
        .filter(|class| class.len() > 1)
        .collect();
    classes.sort_unstable();
    classes
});

fn fold(set: &CharSet) -> CharSet {
    let mut class = ClassUnicode::new(set.ranges().iter().flat_map(|&r| to_unicode_ranges(r)));
    if class.try_case_fold_simple().is_err() {
        return set.clone();
    }
    let folded = class
        .iter()
        .map(|r| CharRange::new(r.start() as u32, r.end() as u32));
    CharSet::from_ranges(set.maximum(), set.ranges().iter().copied().chain(folded))
}

/// Splits a range around the surrogate block, which `char` cannot represent.
fn to_unicode_ranges(range: CharRange) -> impl Iterator<Item = ClassUnicodeRange> {
    let below =
        (range.min < SURROGATES.min).then(|| (range.min, range.max.min(SURROGATES.min - 1)));
    let above =
        (range.max > SURROGATES.max).then(|| (range.min.max(SURROGATES.max + 1), range.max));

    below.into_iter().chain(above).filter_map(|(min, max)| {
        let start = char::from_u32(min)?;
        let end = char::from_u32(max)?;
        Some(ClassUnicodeRange::new(start, end))
    })
}
