use regast_core::{AstError, FlagsError};

/// Errors that can occur while parsing a regular expression.
///
/// Offsets are byte offsets into the pattern source (without the literal's slashes).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid regex literal: {0}")]
    InvalidLiteral(&'static str),

    #[error(transparent)]
    Flags(#[from] FlagsError),

    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    #[error("unexpected `{found}` at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("unmatched `)` at offset {0}")]
    UnmatchedParen(usize),

    #[error("nothing to repeat at offset {0}")]
    NothingToRepeat(usize),

    #[error("numbers out of order in quantifier at offset {0}")]
    QuantifierOutOfOrder(usize),

    #[error("range out of order in character class at offset {0}")]
    RangeOutOfOrder(usize),

    #[error("invalid escape at offset {0}")]
    InvalidEscape(usize),

    #[error("invalid group name at offset {0}")]
    InvalidGroupName(usize),

    #[error("duplicate group name `{0}`")]
    DuplicateGroupName(String),

    #[error("invalid backreference at offset {0}")]
    InvalidBackreference(usize),

    #[error("unknown Unicode property `{0}`")]
    UnknownProperty(String),

    #[error("{what} is not supported (offset {offset})")]
    Unsupported { what: &'static str, offset: usize },

    /// Input nested too deeply.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error(transparent)]
    Ast(#[from] AstError),
}
