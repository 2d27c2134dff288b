//! Immutable sets of code points.
//!
//! A `CharSet` is a sorted list of disjoint, non-adjacent inclusive ranges
//! bounded by a maximum code point (`0xFFFF` or `0x10FFFF`, see `Flags::max_char`).
//! All set operations return new values; operands must share the same maximum.

use std::fmt;

use indexmap::IndexMap;

/// Inclusive range of code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharRange {
    pub min: u32,
    pub max: u32,
}

impl CharRange {
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "CharRange: min {min} > max {max}");
        Self { min, max }
    }

    pub fn single(c: u32) -> Self {
        Self { min: c, max: c }
    }

    #[inline]
    pub fn contains(&self, c: u32) -> bool {
        self.min <= c && c <= self.max
    }

    #[inline]
    pub fn len(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }
}

/// A set of code points in `0..=maximum`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CharSet {
    maximum: u32,
    ranges: Vec<CharRange>,
}

impl CharSet {
    pub fn empty(maximum: u32) -> Self {
        Self {
            maximum,
            ranges: Vec::new(),
        }
    }

    pub fn all(maximum: u32) -> Self {
        Self {
            maximum,
            ranges: vec![CharRange::new(0, maximum)],
        }
    }

    pub fn from_char(maximum: u32, c: u32) -> Self {
        Self::from_ranges(maximum, [CharRange::single(c)])
    }

    /// Build a set from arbitrary (unsorted, overlapping) ranges.
    ///
    /// Ranges are clamped to `maximum`; ranges entirely above it are dropped.
    pub fn from_ranges(maximum: u32, ranges: impl IntoIterator<Item = CharRange>) -> Self {
        let mut ranges: Vec<CharRange> = ranges
            .into_iter()
            .filter(|r| r.min <= maximum)
            .map(|r| CharRange::new(r.min, r.max.min(maximum)))
            .collect();
        ranges.sort_unstable();

        let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.min <= last.max.saturating_add(1) => {
                    last.max = last.max.max(range.max);
                }
                _ => merged.push(range),
            }
        }

        Self {
            maximum,
            ranges: merged,
        }
    }

    #[inline]
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    #[inline]
    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn is_all(&self) -> bool {
        matches!(self.ranges.as_slice(), [r] if r.min == 0 && r.max == self.maximum)
    }

    /// Number of code points in the set.
    pub fn size(&self) -> u64 {
        self.ranges.iter().map(CharRange::len).sum()
    }

    pub fn contains(&self, c: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if r.max < c {
                    std::cmp::Ordering::Less
                } else if r.min > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn union(&self, other: &CharSet) -> CharSet {
        self.check_compatible(other);
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self::from_ranges(
            self.maximum,
            self.ranges.iter().chain(other.ranges.iter()).copied(),
        )
    }

    pub fn intersect(&self, other: &CharSet) -> CharSet {
        self.check_compatible(other);
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let a = self.ranges[i];
            let b = other.ranges[j];
            let min = a.min.max(b.min);
            let max = a.max.min(b.max);
            if min <= max {
                result.push(CharRange::new(min, max));
            }
            if a.max < b.max {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self {
            maximum: self.maximum,
            ranges: result,
        }
    }

    pub fn negate(&self) -> CharSet {
        let mut result = Vec::with_capacity(self.ranges.len() + 1);
        let mut next = 0u32;
        for range in &self.ranges {
            if range.min > next {
                result.push(CharRange::new(next, range.min - 1));
            }
            next = range.max.saturating_add(1);
        }
        let ends_at_max = self.ranges.last().is_some_and(|r| r.max == self.maximum);
        if !ends_at_max {
            result.push(CharRange::new(next, self.maximum));
        }
        Self {
            maximum: self.maximum,
            ranges: result,
        }
    }

    /// Set difference `self \ other`.
    pub fn without(&self, other: &CharSet) -> CharSet {
        self.intersect(&other.negate())
    }

    pub fn is_subset_of(&self, other: &CharSet) -> bool {
        self.without(other).is_empty()
    }

    pub fn is_superset_of(&self, other: &CharSet) -> bool {
        other.is_subset_of(self)
    }

    pub fn is_disjoint_with(&self, other: &CharSet) -> bool {
        self.intersect(other).is_empty()
    }

    fn check_compatible(&self, other: &CharSet) {
        debug_assert_eq!(
            self.maximum, other.maximum,
            "CharSet: operands have different maximums"
        );
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for range in &self.ranges {
            write_char(f, range.min)?;
            if range.max != range.min {
                write!(f, "-")?;
                write_char(f, range.max)?;
            }
        }
        write!(f, "]")
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet{self}")
    }
}

fn write_char(f: &mut fmt::Formatter<'_>, c: u32) -> fmt::Result {
    match char::from_u32(c) {
        Some(ch) if ch.is_ascii_alphanumeric() || "_ !\"#$%&'()*+,./:;<=>?@{|}~`".contains(ch) => {
            write!(f, "{ch}")
        }
        _ => write!(f, "\\u{{{c:x}}}"),
    }
}

/// Minimal partition of the code points covered by a list of sets.
///
/// Every input set is exactly the union of some base sets, and base sets are
/// pairwise disjoint. Two inputs overlap iff their base index lists share an
/// element, which makes repeated overlap tests cheap.
#[derive(Debug, Clone)]
pub struct CharBase {
    bases: Vec<CharSet>,
}

impl CharBase {
    pub fn new<'s>(sets: impl IntoIterator<Item = &'s CharSet>) -> Self {
        let sets: Vec<&CharSet> = sets.into_iter().collect();
        let Some(maximum) = sets.first().map(|s| s.maximum()) else {
            return Self { bases: Vec::new() };
        };

        let mut boundaries: Vec<u32> = Vec::new();
        for set in &sets {
            for range in set.ranges() {
                boundaries.push(range.min);
                if range.max < maximum {
                    boundaries.push(range.max + 1);
                }
            }
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut by_signature: IndexMap<Vec<usize>, Vec<CharRange>> = IndexMap::new();
        for (i, &start) in boundaries.iter().enumerate() {
            let end = boundaries.get(i + 1).map_or(maximum, |&next| next - 1);
            let signature: Vec<usize> = sets
                .iter()
                .enumerate()
                .filter(|(_, set)| set.contains(start))
                .map(|(index, _)| index)
                .collect();
            if signature.is_empty() {
                continue;
            }
            by_signature
                .entry(signature)
                .or_default()
                .push(CharRange::new(start, end));
        }

        let bases = by_signature
            .into_values()
            .map(|ranges| CharSet::from_ranges(maximum, ranges))
            .collect();
        Self { bases }
    }

    pub fn bases(&self) -> &[CharSet] {
        &self.bases
    }

    /// Indexes of the base sets that make up `set`.
    ///
    /// `set` should be one of the sets the base was built from (or a union of them).
    pub fn split(&self, set: &CharSet) -> Vec<usize> {
        self.bases
            .iter()
            .enumerate()
            .filter(|(_, base)| !base.is_disjoint_with(set))
            .map(|(index, _)| index)
            .collect()
    }
}
