#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parser for JavaScript regular expressions.
//!
//! Produces an immutable `regast_core::Ast`. Supports the ES2024 pattern
//! grammar including named groups, lookbehind, Unicode property escapes, and
//! unicodeSets (`v`) classes, plus the Annex B extensions for legacy patterns.
//!
//! # Example
//!
//! ```
//! let ast = regast_parser::parse_literal(r"/(a)\1/u").unwrap();
//! assert_eq!(ast.capturing_groups().len(), 1);
//! ```

mod class;
mod core;
mod error;
mod escape;
mod grammar;

pub use error::ParseError;

use regast_core::{Ast, Flags};

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;

const DEFAULT_MAX_DEPTH: u32 = 4096;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    max_depth: u32,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting of groups, lookarounds, and unicodeSets classes.
    pub fn with_max_depth(mut self, limit: u32) -> Self {
        self.max_depth = limit;
        self
    }

    /// Parse a literal such as `/ab+c/gi`.
    pub fn parse_literal(&self, literal: &str) -> Result<Ast> {
        let Some(body) = literal.strip_prefix('/') else {
            return Err(ParseError::InvalidLiteral("missing opening `/`"));
        };
        let Some(end) = body.rfind('/') else {
            return Err(ParseError::InvalidLiteral("missing closing `/`"));
        };
        let (pattern, flags) = (&body[..end], &body[end + 1..]);
        if pattern.is_empty() {
            return Err(ParseError::InvalidLiteral("empty pattern"));
        }
        self.parse_pattern(pattern, flags.parse()?)
    }

    /// Parse a pattern source without slashes.
    pub fn parse_pattern(&self, pattern: &str, flags: Flags) -> Result<Ast> {
        crate::core::Parser::new(pattern, flags, self.max_depth).parse()
    }
}

/// Parse a literal such as `/ab+c/gi` with the default configuration.
pub fn parse_literal(literal: &str) -> Result<Ast> {
    ParserBuilder::default().parse_literal(literal)
}

/// Parse a pattern source with the default configuration.
pub fn parse_pattern(pattern: &str, flags: Flags) -> Result<Ast> {
    ParserBuilder::default().parse_pattern(pattern, flags)
}

#[cfg(test)]
mod grammar_tests;
