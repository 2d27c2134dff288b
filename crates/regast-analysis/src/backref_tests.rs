use crate::test_utils::{find_element, parse};
use crate::{is_empty_backreference, is_strict_backreference};

/// `(empty, strict)` for the first backreference `raw` in `literal`.
fn classify(literal: &str, raw: &str) -> (bool, bool) {
    let ast = parse(literal);
    let backref = find_element(&ast, raw);
    (
        is_empty_backreference(&ast, backref),
        is_strict_backreference(&ast, backref),
    )
}

#[test]
fn strict_after_group() {
    assert_eq!(classify(r"/(a)\1/", r"\1"), (false, true));
    assert_eq!(classify(r"/(a)b+\1/", r"\1"), (false, true));
    assert_eq!(classify(r"/(?<n>a)\k<n>/", r"\k<n>"), (false, true));
    assert_eq!(classify(r"/(?:(a)b)+\1/", r"\1"), (false, true));
}

#[test]
fn reachable_but_not_strict() {
    assert_eq!(classify(r"/(a)?\1/", r"\1"), (false, false));
    assert_eq!(classify(r"/(?:(a)|b)\1/", r"\1"), (false, false));
    assert_eq!(classify(r"/(?:(a)b)*\1/", r"\1"), (false, false));
}

#[test]
fn unreachable_is_empty() {
    // different alternative
    assert_eq!(classify(r"/(a)|\1/", r"\1"), (true, false));
    // before its group
    assert_eq!(classify(r"/\1(a)/", r"\1"), (true, false));
    // inside its group
    assert_eq!(classify(r"/(a\1)/", r"\1"), (true, false));
    // captures are reset after a negated lookaround
    assert_eq!(classify(r"/(?!(a))\1/", r"\1"), (true, false));
}

#[test]
fn zero_length_group_is_empty() {
    let (empty, strict) = classify(r"/()\1/", r"\1");
    assert!(empty);
    assert!(strict);
    assert_eq!(classify(r"/(\b)\1/", r"\1"), (true, true));
}

#[test]
fn lookbehind_reads_right_to_left() {
    // In a lookbehind the group must sit to the right of the reference.
    assert_eq!(classify(r"/(?<=\1(a))/", r"\1"), (false, true));
    assert_eq!(classify(r"/(?<=(a)\1)/", r"\1"), (true, false));
}

#[test]
fn positive_lookaround_keeps_captures() {
    assert_eq!(classify(r"/(?=(a))\1/", r"\1"), (false, true));
    assert_eq!(classify(r"/(?=(a)|b)\1/", r"\1"), (false, false));
}

#[test]
fn empty_never_strict_unless_group_is_zero_length() {
    let literals = [
        r"/(a)\1|\1(b)|(c)?\3/",
        r"/(?<=(a)\1)(?!(b))\2/",
        r"/(?:(a)|b)\1(c)\2/",
        r"/(a)(?:\1|b)/",
    ];
    for literal in literals {
        let ast = parse(literal);
        for node in ast.descendants(ast.pattern()) {
            if !matches!(ast.kind(node), regast_core::NodeKind::Backreference { .. }) {
                continue;
            }
            let group = ast.ensure_resolved(node);
            if is_strict_backreference(&ast, node) && is_empty_backreference(&ast, node) {
                assert!(crate::is_zero_length(&ast, group), "{literal} `{}`", ast.raw(node));
            }
        }
    }
}
