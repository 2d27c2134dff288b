#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for regast.
//!
//! - `Flags`: the flag set of a regular expression
//! - `CharSet` / `CharBase`: code point set algebra
//! - `Ast`: arena-allocated, parent-linked regex syntax tree
//! - `unicode`: property tables and case folding

mod ast;
mod charset;
mod dump;
mod flags;
mod invariants;
pub mod unicode;

pub use ast::{
    Ast, AstBuilder, AstError, CharacterSetKind, Descendants, EdgeKind, GroupRef, LookaroundKind,
    Node, NodeId, NodeKind, Span,
};
pub use charset::{CharBase, CharRange, CharSet};
pub use flags::{Flags, FlagsError};

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod flags_tests;
#[cfg(test)]
mod unicode_tests;
