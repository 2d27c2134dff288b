//! Small helpers for inexact character sets and equivalence classes.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use regast_core::{Ast, CharSet, NodeId};

use crate::{Error, Result};

/// Union of two possibly-inexact sets.
///
/// Exact if both sides are exact, or if the exact side already covers the inexact one.
pub(crate) fn union_inexact(left: (&CharSet, bool), right: (&CharSet, bool)) -> (CharSet, bool) {
    let char = left.0.union(right.0);
    let exact = match (left.1, right.1) {
        (true, true) => true,
        (true, false) => left.0.is_superset_of(right.0),
        (false, true) => right.0.is_superset_of(left.0),
        (false, false) => false,
    };
    (char, exact)
}

/// Intersection of two possibly-inexact sets. An empty result is always exact.
pub(crate) fn intersect_inexact(
    left: (&CharSet, bool),
    right: (&CharSet, bool),
) -> (CharSet, bool) {
    let char = left.0.intersect(right.0);
    let exact = (left.1 && right.1) || char.is_empty();
    (char, exact)
}

/// Accumulates a union of sets, some of which may be inexact.
#[derive(Debug, Clone)]
pub(crate) struct CharUnion {
    exact: CharSet,
    inexact: CharSet,
}

impl CharUnion {
    pub(crate) fn new(maximum: u32) -> Self {
        Self {
            exact: CharSet::empty(maximum),
            inexact: CharSet::empty(maximum),
        }
    }

    pub(crate) fn add(&mut self, char: &CharSet, exact: bool) {
        if exact {
            self.exact = self.exact.union(char);
        } else {
            self.inexact = self.inexact.union(char);
        }
    }

    pub(crate) fn char(&self) -> CharSet {
        self.exact.union(&self.inexact)
    }

    /// The union is exact iff the exact members already cover every inexact one.
    pub(crate) fn exact(&self) -> bool {
        self.exact.is_superset_of(&self.inexact)
    }
}

/// Union-find over `0..size`.
#[derive(Debug, Clone)]
pub(crate) struct SetEquivalence {
    parents: Vec<usize>,
}

impl SetEquivalence {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            parents: (0..size).collect(),
        }
    }

    pub(crate) fn make_equal(&mut self, a: usize, b: usize) {
        let a = self.find(a);
        let b = self.find(b);
        // The root is always the smallest member.
        match a.cmp(&b) {
            Ordering::Less => self.parents[b] = a,
            Ordering::Greater => self.parents[a] = b,
            Ordering::Equal => {}
        }
    }

    pub(crate) fn find(&mut self, mut a: usize) -> usize {
        while self.parents[a] != a {
            let grandparent = self.parents[self.parents[a]];
            self.parents[a] = grandparent;
            a = grandparent;
        }
        a
    }

    /// Numbers the equivalence sets `0..count` in order of their smallest member.
    ///
    /// Returns `(count, indexes)` where `indexes[i]` is the set of element `i`.
    pub(crate) fn equivalence_sets(&mut self) -> (usize, Vec<usize>) {
        let size = self.parents.len();
        let mut indexes = vec![0; size];
        let mut count = 0;
        for i in 0..size {
            let root = self.find(i);
            if root == i {
                indexes[i] = count;
                count += 1;
            } else {
                indexes[i] = indexes[root];
            }
        }
        (count, indexes)
    }
}

/// Groups items into the minimal partition where items sharing a key end up together.
///
/// `keys_of(i)` returns the keys of item `i`; classes keep the input order.
pub(crate) fn merge_by_keys<T: Copy, K: Eq + Hash>(
    items: &[T],
    mut keys_of: impl FnMut(usize) -> Vec<K>,
) -> Vec<Vec<T>> {
    let mut equivalence = SetEquivalence::new(items.len());
    let mut first_with_key: HashMap<K, usize> = HashMap::new();
    for i in 0..items.len() {
        for key in keys_of(i) {
            match first_with_key.get(&key) {
                Some(&j) => equivalence.make_equal(i, j),
                None => {
                    first_with_key.insert(key, i);
                }
            }
        }
    }

    let (count, indexes) = equivalence.equivalence_sets();
    let mut classes: Vec<Vec<T>> = vec![Vec::new(); count];
    for (i, &item) in items.iter().enumerate() {
        classes[indexes[i]].push(item);
    }
    classes
}

/// The common parent of a list of nodes.
///
/// `Ok(None)` for an empty list, `Err(MixedParents)` if the parents differ.
pub(crate) fn common_parent(ast: &Ast, nodes: &[NodeId]) -> Result<Option<NodeId>> {
    let mut parents = nodes.iter().map(|&n| ast.parent(n));
    let Some(first) = parents.next() else {
        return Ok(None);
    };
    if first.is_none() || parents.any(|p| p != first) {
        return Err(Error::MixedParents);
    }
    Ok(first)
}
