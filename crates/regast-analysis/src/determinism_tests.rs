use crate::test_utils::{classes, find_alternative, find_element, parse, top_alternatives};
use crate::{Cache, Error, OptionalMatchingDirection, determinism_eq_classes};

use OptionalMatchingDirection::{Ltr, Rtl, Unknown};

fn eq_classes(literal: &str, direction: OptionalMatchingDirection) -> Vec<String> {
    let ast = parse(literal);
    let cache = Cache::new(&ast);
    let result = determinism_eq_classes(&cache, &top_alternatives(&ast), direction).unwrap();
    classes(&ast, &result)
}

#[test]
fn prefix_of_another_alternative() {
    assert_eq!(eq_classes("/a|aa/", Ltr), ["a|aa"]);
    assert_eq!(eq_classes("/a|aa/", Rtl), ["a|aa"]);
}

#[test]
fn disjoint_alternatives() {
    assert_eq!(eq_classes("/a|b|c|d/", Ltr), ["a", "b", "c", "d"]);
    assert_eq!(eq_classes("/food|butter|bread/", Ltr), ["food", "butter", "bread"]);
    assert_eq!(eq_classes("/a+|b/", Ltr), ["a+", "b"]);
}

#[test]
fn classes_refine_by_position() {
    assert_eq!(eq_classes("/ab|ac|bc/", Ltr), ["ab", "ac", "bc"]);
    assert_eq!(eq_classes("/ab|ac|bc/", Rtl), ["ab", "ac", "bc"]);
    assert_eq!(eq_classes("/ab|ac|bc/", Unknown), ["ab", "ac", "bc"]);
    assert_eq!(eq_classes("/[ab]c|[bc]d|e/", Ltr), ["[ab]c", "[bc]d", "e"]);
}

#[test]
fn direction_matters() {
    assert_eq!(eq_classes("/a|ba/", Ltr), ["a", "ba"]);
    assert_eq!(eq_classes("/a|ba/", Rtl), ["a|ba"]);
    assert_eq!(eq_classes("/a|ba/", Unknown), ["a|ba"]);

    assert_eq!(eq_classes("/int|integer/", Ltr), ["int|integer"]);
    assert_eq!(eq_classes("/int|integer/", Rtl), ["int", "integer"]);
}

#[test]
fn unknown_direction_keeps_input_order() {
    // `xa` and `a` share a class only when read right to left
    assert_eq!(eq_classes("/b|xa|a/", Ltr), ["b", "xa", "a"]);
    assert_eq!(eq_classes("/b|xa|a/", Rtl), ["b", "xa|a"]);
    assert_eq!(eq_classes("/b|xa|a/", Unknown), ["b", "xa|a"]);
}

#[test]
fn assertions_are_ignored() {
    assert_eq!(eq_classes(r"/(?=a)\w|b/", Ltr), [r"(?=a)\w|b"]);
}

#[test]
fn group_alternatives() {
    // `a` is followed by `y`
    let ast = parse("/x(?:a|b|ab|ay)y/");
    let cache = Cache::new(&ast);
    let alternatives = ["a", "b", "ab", "ay"].map(|raw| find_alternative(&ast, raw));
    let result = determinism_eq_classes(&cache, &alternatives, Ltr).unwrap();
    assert_eq!(classes(&ast, &result), ["a|ay", "b", "ab"]);
}

#[test]
fn alternatives_before_the_end_of_input() {
    // nothing may follow either alternative, which must not tell them apart
    let ast = parse("/(?:(b)|b)$/");
    let cache = Cache::new(&ast);
    let alternatives = ast.children(find_element(&ast, "(?:(b)|b)"));
    let result = determinism_eq_classes(&cache, alternatives, Ltr).unwrap();
    assert_eq!(classes(&ast, &result), ["(b)|b"]);

    let ast = parse("/^(?:a|(b)|b)$/");
    let cache = Cache::new(&ast);
    let alternatives = ast.children(find_element(&ast, "(?:a|(b)|b)"));
    let result = determinism_eq_classes(&cache, alternatives, Ltr).unwrap();
    assert_eq!(classes(&ast, &result), ["a", "(b)|b"]);
}

#[test]
fn long_repetitions_are_fast() {
    assert_eq!(
        eq_classes("/a{20}|b{20}|[^]{20}/", Ltr),
        ["a{20}|b{20}|[^]{20}"]
    );
}

#[test]
fn classes_partition_the_input() {
    let patterns = [
        "/a|aa|b|ab|ba|[ab]c/",
        "/foo|bar|baz|f(?:o|a)/",
        r"/\d+|\w+|[a-f]+|\s/",
        "/x?|y|/",
    ];
    for literal in patterns {
        let ast = parse(literal);
        let cache = Cache::new(&ast);
        let alternatives = top_alternatives(&ast);
        for direction in [Ltr, Rtl, Unknown] {
            let result = determinism_eq_classes(&cache, &alternatives, direction).unwrap();
            assert!(result.iter().all(|class| !class.is_empty()), "{literal}");

            let mut members: Vec<_> = result.into_iter().flatten().collect();
            members.sort();
            let mut expected = alternatives.clone();
            expected.sort();
            assert_eq!(members, expected, "{literal} ({direction:?})");
        }
    }
}

#[test]
fn empty_input() {
    let ast = parse("/a/");
    let cache = Cache::new(&ast);
    assert_eq!(determinism_eq_classes(&cache, &[], Ltr), Ok(Vec::new()));
}

#[test]
fn mixed_parents() {
    let ast = parse("/a|(?:b|c)/");
    let cache = Cache::new(&ast);
    let alternatives = [find_alternative(&ast, "a"), find_alternative(&ast, "b")];
    assert_eq!(
        determinism_eq_classes(&cache, &alternatives, Unknown),
        Err(Error::MixedParents)
    );
}
