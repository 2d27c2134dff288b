//! Predefined character sets for a set of flags.

use regast_core::{CharRange, CharSet, Flags};

const LINE_TERMINATORS: [CharRange; 3] = [
    CharRange { min: 0x0A, max: 0x0A },
    CharRange { min: 0x0D, max: 0x0D },
    CharRange {
        min: 0x2028,
        max: 0x2029,
    },
];

const WORD: [CharRange; 4] = [
    CharRange {
        min: '0' as u32,
        max: '9' as u32,
    },
    CharRange {
        min: 'A' as u32,
        max: 'Z' as u32,
    },
    CharRange {
        min: '_' as u32,
        max: '_' as u32,
    },
    CharRange {
        min: 'a' as u32,
        max: 'z' as u32,
    },
];

/// `ſ` (U+017F) and `K` (U+212A) fold into `\w` under `/iu`.
const WORD_UNICODE_IGNORE_CASE: [CharRange; 2] = [
    CharRange {
        min: 0x017F,
        max: 0x017F,
    },
    CharRange {
        min: 0x212A,
        max: 0x212A,
    },
];

const SPACE: [CharRange; 10] = [
    CharRange { min: 0x09, max: 0x0D },
    CharRange { min: 0x20, max: 0x20 },
    CharRange { min: 0xA0, max: 0xA0 },
    CharRange {
        min: 0x1680,
        max: 0x1680,
    },
    CharRange {
        min: 0x2000,
        max: 0x200A,
    },
    CharRange {
        min: 0x2028,
        max: 0x2029,
    },
    CharRange {
        min: 0x202F,
        max: 0x202F,
    },
    CharRange {
        min: 0x205F,
        max: 0x205F,
    },
    CharRange {
        min: 0x3000,
        max: 0x3000,
    },
    CharRange {
        min: 0xFEFF,
        max: 0xFEFF,
    },
];

pub fn empty(flags: Flags) -> CharSet {
    CharSet::empty(flags.max_char())
}

pub fn all(flags: Flags) -> CharSet {
    CharSet::all(flags.max_char())
}

/// `\n`, `\r`, U+2028, U+2029.
pub fn line_terminator(flags: Flags) -> CharSet {
    CharSet::from_ranges(flags.max_char(), LINE_TERMINATORS)
}

/// Everything `.` matches without the `s` flag.
pub fn non_line_terminator(flags: Flags) -> CharSet {
    line_terminator(flags).negate()
}

/// `\w`, including the extra case-folded characters under `/iu` and `/iv`.
pub fn word(flags: Flags) -> CharSet {
    let base = CharSet::from_ranges(flags.max_char(), WORD);
    if flags.is_unicode() && flags.ignore_case {
        return base.union(&CharSet::from_ranges(
            flags.max_char(),
            WORD_UNICODE_IGNORE_CASE,
        ));
    }
    base
}

/// `\d`
pub fn digit(flags: Flags) -> CharSet {
    CharSet::from_ranges(flags.max_char(), [WORD[0]])
}

/// `\s`
pub fn space(flags: Flags) -> CharSet {
    CharSet::from_ranges(flags.max_char(), SPACE)
}
