//! Regex flags (`/…/dgimsuvy`).

use std::fmt;
use std::str::FromStr;

/// The flag set of one regular expression.
///
/// Flags are fixed for the lifetime of an analysis session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub sticky: bool,
    pub has_indices: bool,
}

/// Errors from parsing a flag string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagsError {
    #[error("unknown flag `{0}`")]
    Unknown(char),

    #[error("duplicate flag `{0}`")]
    Duplicate(char),

    #[error("flags `u` and `v` cannot be combined")]
    UnicodeConflict,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_case(mut self, value: bool) -> Self {
        self.ignore_case = value;
        self
    }

    pub fn with_multiline(mut self, value: bool) -> Self {
        self.multiline = value;
        self
    }

    pub fn with_dot_all(mut self, value: bool) -> Self {
        self.dot_all = value;
        self
    }

    pub fn with_unicode(mut self, value: bool) -> Self {
        self.unicode = value;
        self
    }

    pub fn with_unicode_sets(mut self, value: bool) -> Self {
        self.unicode_sets = value;
        self
    }

    /// Whether the pattern is matched by code point rather than UTF-16 code unit.
    #[inline]
    pub fn is_unicode(&self) -> bool {
        self.unicode || self.unicode_sets
    }

    /// Largest code point a character can have under these flags.
    #[inline]
    pub fn max_char(&self) -> u32 {
        if self.is_unicode() { 0x10FFFF } else { 0xFFFF }
    }

    fn letters(&self) -> [(char, bool); 8] {
        [
            ('d', self.has_indices),
            ('g', self.global),
            ('i', self.ignore_case),
            ('m', self.multiline),
            ('s', self.dot_all),
            ('u', self.unicode),
            ('v', self.unicode_sets),
            ('y', self.sticky),
        ]
    }
}

impl FromStr for Flags {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for c in s.chars() {
            let slot = match c {
                'd' => &mut flags.has_indices,
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multiline,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'v' => &mut flags.unicode_sets,
                'y' => &mut flags.sticky,
                other => return Err(FlagsError::Unknown(other)),
            };
            if *slot {
                return Err(FlagsError::Duplicate(c));
            }
            *slot = true;
        }

        if flags.unicode && flags.unicode_sets {
            return Err(FlagsError::UnicodeConflict);
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, set) in self.letters() {
            if set {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
