//! Per-session memoization.
//!
//! A `Cache` is created for one `Ast` and one set of flags. Results are keyed
//! by `NodeId`, which is stable because the AST is immutable while borrowed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

use regast_core::{Ast, CharSet, Flags, NodeId};

use crate::Config;
use crate::direction::MatchingDirection;
use crate::first_char::FirstConsumedChar;
use crate::longest_prefix::PrefixOptions;

/// Analysis session: the AST, its flags, and memo tables shared by all analyses.
///
/// Not `Sync`; use one cache per thread.
pub struct Cache<'a> {
    ast: &'a Ast,
    flags: Flags,
    config: Config,
    char_sets: RefCell<HashMap<NodeId, CharSet>>,
    first_consumed: RefCell<HashMap<(NodeId, MatchingDirection), FirstConsumedChar>>,
    prefixes: RefCell<HashMap<(NodeId, MatchingDirection, PrefixOptions), Vec<CharSet>>>,
}

impl<'a> Cache<'a> {
    /// Session using the flags the AST was parsed with.
    pub fn new(ast: &'a Ast) -> Self {
        Self::with_flags(ast, ast.flags())
    }

    pub fn with_flags(ast: &'a Ast, flags: Flags) -> Self {
        Self {
            ast,
            flags,
            config: Config::default(),
            char_sets: RefCell::default(),
            first_consumed: RefCell::default(),
            prefixes: RefCell::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Largest code point under the session flags.
    #[inline]
    pub fn max_char(&self) -> u32 {
        self.flags.max_char()
    }

    pub(crate) fn char_set(&self, id: NodeId, compute: impl FnOnce() -> CharSet) -> CharSet {
        memo(&self.char_sets, id, compute)
    }

    pub(crate) fn first_consumed(
        &self,
        id: NodeId,
        direction: MatchingDirection,
        compute: impl FnOnce() -> FirstConsumedChar,
    ) -> FirstConsumedChar {
        memo(&self.first_consumed, (id, direction), compute)
    }

    pub(crate) fn prefix(
        &self,
        id: NodeId,
        direction: MatchingDirection,
        options: PrefixOptions,
        compute: impl FnOnce() -> Vec<CharSet>,
    ) -> Vec<CharSet> {
        memo(&self.prefixes, (id, direction, options), compute)
    }
}

/// The table is not borrowed while `compute` runs, so computations may recurse.
fn memo<K: Hash + Eq, V: Clone>(
    table: &RefCell<HashMap<K, V>>,
    key: K,
    compute: impl FnOnce() -> V,
) -> V {
    let cached = table.borrow().get(&key).cloned();
    if let Some(value) = cached {
        return value;
    }
    let value = compute();
    table.borrow_mut().insert(key, value.clone());
    value
}
