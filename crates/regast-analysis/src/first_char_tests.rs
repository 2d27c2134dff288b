use regast_core::{CharRange, CharSet};

use crate::{FirstConsumedChar, FirstLookChar};

const MAX: u32 = 0xFFFF;

fn set(chars: &str) -> CharSet {
    CharSet::from_ranges(MAX, chars.chars().map(|c| CharRange::single(c as u32)))
}

fn full(chars: &str) -> FirstConsumedChar {
    FirstConsumedChar::Full {
        char: set(chars),
        exact: true,
    }
}

fn look(chars: &str, edge: bool) -> FirstLookChar {
    FirstLookChar {
        char: set(chars),
        edge,
        exact: true,
    }
}

fn partial(chars: &str, look: FirstLookChar) -> FirstConsumedChar {
    FirstConsumedChar::Partial {
        char: set(chars),
        exact: true,
        look,
    }
}

fn samples() -> Vec<FirstConsumedChar> {
    vec![
        full("a"),
        full("ab"),
        FirstConsumedChar::Full {
            char: set("xyz"),
            exact: false,
        },
        partial("a", look("b", false)),
        partial("c", look("", true)),
        partial("", FirstLookChar::all(MAX)),
        FirstConsumedChar::empty_concat(MAX),
        FirstConsumedChar::empty_union(MAX),
        partial(
            "ab",
            FirstLookChar {
                char: set("cd"),
                edge: true,
                exact: false,
            },
        ),
    ]
}

#[test]
fn union_is_idempotent() {
    for x in samples() {
        assert_eq!(FirstConsumedChar::union([x.clone(), x.clone()], MAX), x, "{x:?}");
    }
}

#[test]
fn union_is_commutative() {
    for x in samples() {
        for y in samples() {
            assert_eq!(
                FirstConsumedChar::union([x.clone(), y.clone()], MAX),
                FirstConsumedChar::union([y.clone(), x.clone()], MAX),
                "{x:?} | {y:?}"
            );
        }
    }
}

#[test]
fn empty_union_is_neutral_for_union() {
    for x in samples() {
        let union = FirstConsumedChar::union([FirstConsumedChar::empty_union(MAX), x.clone()], MAX);
        assert_eq!(union, x, "{x:?}");
    }
}

#[test]
fn empty_concat_is_neutral_for_concat() {
    for x in samples() {
        let empty = FirstConsumedChar::empty_concat(MAX);
        let left = FirstConsumedChar::concat([empty.clone(), x.clone()], MAX);
        let right = FirstConsumedChar::concat([x.clone(), empty], MAX);
        assert_eq!(left, x, "{x:?}");
        assert_eq!(right, x, "{x:?}");
    }
}

#[test]
fn concat_stops_at_full_item() {
    let result = FirstConsumedChar::concat([full("a"), full("b")], MAX);
    assert_eq!(result, full("a"));

    // `(?:a|(?=b))[bc]` consumes `a` or `b`
    let result = FirstConsumedChar::concat([partial("a", look("b", false)), full("bc")], MAX);
    assert_eq!(result, full("ab"));
}

#[test]
fn concat_intersects_looks() {
    // `(?=[ab]|$)(?=[bc])` can only be followed by `b`
    let result = FirstConsumedChar::concat(
        [partial("", look("ab", true)), partial("", look("bc", false))],
        MAX,
    );
    assert_eq!(result, partial("", look("b", false)));

    // `(?=a)(?=b)` rejects everything
    let result = FirstConsumedChar::concat(
        [partial("", look("a", false)), partial("", look("b", false))],
        MAX,
    );
    assert_eq!(result, full(""));
}

#[test]
fn union_merges_looks() {
    let result = FirstConsumedChar::union(
        [partial("a", look("b", false)), partial("c", look("d", true)), full("e")],
        MAX,
    );
    assert_eq!(result, partial("ace", look("bd", true)));
}

#[test]
fn inexact_union() {
    let inexact = FirstConsumedChar::Full {
        char: set("ab"),
        exact: false,
    };
    // an exact superset makes the union exact again
    let superset = FirstConsumedChar::union([inexact.clone(), full("abc")], MAX);
    assert!(superset.exact());
    assert!(!FirstConsumedChar::union([inexact, full("c")], MAX).exact());
}

#[test]
fn looks() {
    assert_eq!(full("a").to_look(), look("a", false));
    assert_eq!(partial("a", look("b", true)).to_look(), look("ab", true));

    assert!(FirstLookChar::all(MAX).is_accept_all());
    assert!(!FirstLookChar::edge(MAX).is_accept_all());
    assert!(!FirstLookChar::edge(MAX).is_reject_all());
    assert!(look("", false).is_reject_all());

    assert_eq!(look("", false).to_consumed(), full(""));
    assert_eq!(look("a", true).to_consumed(), partial("", look("a", true)));
}

#[test]
fn make_optional() {
    assert_eq!(
        full("a").make_optional(),
        partial("a", FirstLookChar::all(MAX))
    );
    assert_eq!(
        partial("a", look("b", false)).make_optional(),
        partial("a", FirstLookChar::all(MAX))
    );
    assert!(full("a").make_optional().is_partial());
    assert_eq!(
        full("a").make_optional().look(),
        Some(&FirstLookChar::all(MAX))
    );
}
