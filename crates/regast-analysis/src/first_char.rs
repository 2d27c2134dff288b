//! The first-character lattice.
//!
//! `FirstLookChar` describes what a lookaround sees at some point of the
//! input; `FirstConsumedChar` describes the first character an element
//! consumes, plus what it may assert instead of consuming. Both carry an
//! `exact` bit: when false, `char` is only a superset of the real set.

use regast_core::CharSet;

use crate::util::{CharUnion, intersect_inexact, union_inexact};

/// The first character after some point, as a lookaround would see it.
///
/// Equivalent to `(?=[char]|$)` if `edge`, else `(?=[char])` (or the
/// lookbehind forms, depending on direction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstLookChar {
    /// Superset of the first character.
    pub char: CharSet,
    /// Whether the start/end of the input is accepted too.
    pub edge: bool,
    /// Whether `char` is exactly the first character.
    pub exact: bool,
}

impl FirstLookChar {
    /// Accepts everything: `(?=[^]|$)`.
    pub fn all(maximum: u32) -> Self {
        Self {
            char: CharSet::all(maximum),
            edge: true,
            exact: true,
        }
    }

    /// Accepts only the edge of the input: `$` or `^`.
    pub fn edge(maximum: u32) -> Self {
        Self {
            char: CharSet::empty(maximum),
            edge: true,
            exact: true,
        }
    }

    pub fn is_accept_all(&self) -> bool {
        self.exact && self.edge && self.char.is_all()
    }

    pub fn is_reject_all(&self) -> bool {
        !self.edge && self.char.is_empty()
    }

    /// `(?=b|$)` as a consumed char: `[]|(?=b|$)`.
    ///
    /// Fully consumed (and empty) only if the look rejects everything.
    pub fn to_consumed(self) -> FirstConsumedChar {
        let maximum = self.char.maximum();
        if self.is_reject_all() {
            FirstConsumedChar::Full {
                char: CharSet::empty(maximum),
                exact: true,
            }
        } else {
            FirstConsumedChar::Partial {
                char: CharSet::empty(maximum),
                exact: true,
                look: self,
            }
        }
    }
}

/// The first character consumed by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstConsumedChar {
    /// Equivalent to `[char]`.
    Full { char: CharSet, exact: bool },
    /// Equivalent to `[char]|(?=[look.char])`, or `[char]|(?=[look.char]|$)`
    /// if the look accepts the edge: the element may also consume nothing.
    Partial {
        char: CharSet,
        exact: bool,
        look: FirstLookChar,
    },
}

impl FirstConsumedChar {
    /// The empty concatenation: consumes nothing, asserts nothing.
    pub fn empty_concat(maximum: u32) -> Self {
        FirstConsumedChar::Partial {
            char: CharSet::empty(maximum),
            exact: true,
            look: FirstLookChar::all(maximum),
        }
    }

    /// The empty union: matches nothing at all.
    pub fn empty_union(maximum: u32) -> Self {
        FirstConsumedChar::Full {
            char: CharSet::empty(maximum),
            exact: true,
        }
    }

    pub fn char(&self) -> &CharSet {
        match self {
            FirstConsumedChar::Full { char, .. } | FirstConsumedChar::Partial { char, .. } => char,
        }
    }

    pub fn exact(&self) -> bool {
        match self {
            FirstConsumedChar::Full { exact, .. } | FirstConsumedChar::Partial { exact, .. } => {
                *exact
            }
        }
    }

    /// Whether the element may consume nothing.
    pub fn is_partial(&self) -> bool {
        matches!(self, FirstConsumedChar::Partial { .. })
    }

    pub fn look(&self) -> Option<&FirstLookChar> {
        match self {
            FirstConsumedChar::Full { .. } => None,
            FirstConsumedChar::Partial { look, .. } => Some(look),
        }
    }

    pub(crate) fn with_exact(self, exact: bool) -> Self {
        match self {
            FirstConsumedChar::Full { char, .. } => FirstConsumedChar::Full { char, exact },
            FirstConsumedChar::Partial { char, look, .. } => {
                FirstConsumedChar::Partial { char, exact, look }
            }
        }
    }

    /// Wraps the element into a lookaround: `a|(?=b|$)` becomes `(?=[ab]|$)`.
    pub fn to_look(&self) -> FirstLookChar {
        match self {
            FirstConsumedChar::Full { char, exact } => FirstLookChar {
                char: char.clone(),
                edge: false,
                exact: *exact,
            },
            FirstConsumedChar::Partial { char, exact, look } => {
                let (char, exact) = union_inexact((char, *exact), (&look.char, look.exact));
                FirstLookChar {
                    char,
                    edge: look.edge,
                    exact,
                }
            }
        }
    }

    /// `a|(?=b|$)` becomes `a?`.
    pub fn make_optional(self) -> Self {
        let maximum = self.char().maximum();
        let exact = self.exact();
        let char = match self {
            FirstConsumedChar::Full { char, .. } | FirstConsumedChar::Partial { char, .. } => char,
        };
        FirstConsumedChar::Partial {
            char,
            exact,
            look: FirstLookChar::all(maximum),
        }
    }

    /// Union of alternatives. Independent of the order of `items`.
    pub fn union(items: impl IntoIterator<Item = FirstConsumedChar>, maximum: u32) -> Self {
        let mut chars = CharUnion::new(maximum);
        let mut looks = Vec::new();

        for item in items {
            chars.add(item.char(), item.exact());
            if let FirstConsumedChar::Partial { look, .. } = item {
                looks.push(look);
            }
        }

        // `(?=a)|(?=b)` == `(?=a|b)`
        let look = match looks.len() {
            0 => {
                return FirstConsumedChar::Full {
                    char: chars.char(),
                    exact: chars.exact(),
                };
            }
            1 => looks.pop().unwrap_or_else(|| FirstLookChar::all(maximum)),
            _ => {
                let mut look_chars = CharUnion::new(maximum);
                let mut edge = false;
                for look in &looks {
                    look_chars.add(&look.char, look.exact);
                    edge |= look.edge;
                }
                FirstLookChar {
                    char: look_chars.char(),
                    edge,
                    exact: look_chars.exact(),
                }
            }
        };

        FirstConsumedChar::Partial {
            char: chars.char(),
            exact: chars.exact(),
            look,
        }
    }

    /// Concatenation of a sequence.
    ///
    /// `items` is consumed lazily: iteration stops at the first fully consumed
    /// item or once the accumulated look rejects everything.
    pub fn concat(items: impl IntoIterator<Item = FirstConsumedChar>, maximum: u32) -> Self {
        let mut chars = CharUnion::new(maximum);
        let mut look = FirstLookChar::all(maximum);

        for item in items {
            let (char, exact) =
                intersect_inexact((item.char(), item.exact()), (&look.char, look.exact));
            chars.add(&char, exact);

            match item {
                FirstConsumedChar::Partial {
                    look: item_look, ..
                } => {
                    // `(?=b)(?=d)` == `(?=[b&&d])`; the edge survives only if both accept it.
                    let (char, exact) = intersect_inexact(
                        (&look.char, look.exact),
                        (&item_look.char, item_look.exact),
                    );
                    look = FirstLookChar {
                        char,
                        edge: look.edge && item_look.edge,
                        exact,
                    };
                    if look.is_reject_all() {
                        break;
                    }
                }
                FirstConsumedChar::Full { .. } => {
                    return FirstConsumedChar::Full {
                        char: chars.char(),
                        exact: chars.exact(),
                    };
                }
            }
        }

        if look.is_reject_all() {
            return FirstConsumedChar::Full {
                char: chars.char(),
                exact: chars.exact(),
            };
        }
        FirstConsumedChar::Partial {
            char: chars.char(),
            exact: chars.exact(),
            look,
        }
    }
}
