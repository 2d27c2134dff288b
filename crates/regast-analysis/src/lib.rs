//! Static analysis of JavaScript regular expression ASTs.
//!
//! Answers questions about a pattern without running it:
//! - `length` - emptiness predicates and length ranges
//! - `backref` - whether backreferences can match anything
//! - `follow` - generic path-following engine
//! - `next_char` - first characters of elements and of what follows them
//! - `longest_prefix` - guaranteed prefixes of alternatives
//! - `determinism` / `reorder` - whether alternatives can be reordered
//!
//! Every analysis that depends on flags takes a `Cache`, which also memoizes
//! results for the lifetime of one analysis session.
//!
//! # Example
//!
//! ```
//! use regast_analysis::{Cache, can_reorder, ReorderOptions};
//!
//! let ast = regast_parser::parse_literal("/foo|bar|baz/").unwrap();
//! let cache = Cache::new(&ast);
//! let alternatives = ast.children(ast.pattern());
//! assert!(can_reorder(&cache, alternatives, ReorderOptions::default()).unwrap());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod ancestry;
mod backref;
mod cache;
pub mod chars;
mod config;
mod consumed_chars;
mod determinism;
mod direction;
mod equal;
mod first_char;
pub mod follow;
mod invariants;
mod length;
mod longest_prefix;
mod next_char;
mod reorder;
mod to_char_set;
mod util;

#[cfg(test)]
mod test_utils;

pub use ancestry::{
    capturing_group_number, closest_ancestor, closest_ancestor_of, contains_capturing_group,
    effective_maximum_repetition, has_some_ancestor, has_some_descendant, has_some_descendant_with,
    is_ancestor_of, is_descendant_of, matching_direction,
};
pub use backref::{is_empty_backreference, is_strict_backreference};
pub use cache::Cache;
pub use config::{Config, DEFAULT_PREFIX_LIMIT};
pub use consumed_chars::{ConsumedChars, consumed_chars};
pub use determinism::determinism_eq_classes;
pub use direction::{MatchingDirection, OptionalMatchingDirection};
pub use equal::structurally_equal;
pub use first_char::{FirstConsumedChar, FirstLookChar};
pub use length::{
    LengthRange, is_empty, is_length_range_min_zero, is_length_range_min_zero_of,
    is_potentially_empty, is_potentially_zero_length, is_zero_length, length_range, length_range_of,
};
pub use longest_prefix::{PrefixOptions, longest_prefix};
pub use next_char::{
    WithContributors, first_char_after, first_char_after_with_contributors, first_consumed_char,
    first_consumed_char_after, first_consumed_char_after_with_contributors, first_consumed_char_of,
};
pub use reorder::{ReorderOptions, can_reorder};
pub use to_char_set::{matches_all_characters, matches_no_characters, to_char_set};

/// Caller-side precondition violations.
///
/// Internal invariant violations (malformed trees, unexpected node kinds) panic instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operation that needs at least one alternative got none.
    #[error("expected at least one alternative")]
    EmptyAlternatives,

    /// The given alternatives do not all belong to the same parent.
    #[error("alternatives must share the same parent")]
    MixedParents,
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod backref_tests;
#[cfg(test)]
mod determinism_tests;
#[cfg(test)]
mod equal_tests;
#[cfg(test)]
mod first_char_tests;
#[cfg(test)]
mod longest_prefix_tests;
#[cfg(test)]
mod reorder_tests;
