//! Matching directions.

use regast_core::{EdgeKind, LookaroundKind};

/// Direction in which the regex engine consumes input at some point of the pattern.
///
/// Everything is matched left to right except the contents of lookbehinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingDirection {
    Ltr,
    Rtl,
}

impl MatchingDirection {
    pub fn invert(self) -> Self {
        match self {
            MatchingDirection::Ltr => MatchingDirection::Rtl,
            MatchingDirection::Rtl => MatchingDirection::Ltr,
        }
    }

    /// Direction in which a lookaround of this kind matches its contents.
    pub fn of_lookaround(kind: LookaroundKind) -> Self {
        match kind {
            LookaroundKind::Lookahead => MatchingDirection::Ltr,
            LookaroundKind::Lookbehind => MatchingDirection::Rtl,
        }
    }

    /// Direction in which an edge assertion looks: `$` looks ahead, `^` looks behind.
    pub fn of_edge(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::End => MatchingDirection::Ltr,
            EdgeKind::Start => MatchingDirection::Rtl,
        }
    }
}

/// A matching direction that may be unknown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionalMatchingDirection {
    Ltr,
    Rtl,
    Unknown,
}

impl From<MatchingDirection> for OptionalMatchingDirection {
    fn from(direction: MatchingDirection) -> Self {
        match direction {
            MatchingDirection::Ltr => OptionalMatchingDirection::Ltr,
            MatchingDirection::Rtl => OptionalMatchingDirection::Rtl,
        }
    }
}
