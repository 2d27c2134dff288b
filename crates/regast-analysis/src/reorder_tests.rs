use regast_core::NodeId;

use crate::test_utils::{find_alternative, find_element, parse, top_alternatives};
use crate::{Cache, Error, OptionalMatchingDirection, ReorderOptions, can_reorder};

fn reorderable(literal: &str) -> bool {
    reorderable_with(literal, ReorderOptions::new())
}

fn reorderable_with(literal: &str, options: ReorderOptions) -> bool {
    let ast = parse(literal);
    let cache = Cache::new(&ast);
    can_reorder(&cache, &top_alternatives(&ast), options).unwrap()
}

#[test]
fn disjoint_alternatives() {
    assert!(reorderable("/foo|bar|baz/"));
    assert!(reorderable(r"/\d+|[a-z]+|_/"));
}

#[test]
fn ambiguous_alternatives() {
    assert!(!reorderable("/a|aa/"));
    assert!(!reorderable(r"/\w+|\d+/"));
}

#[test]
fn fixed_length_classes() {
    assert!(reorderable("/ab|a./"));
    assert!(reorderable_group("/(?:a|[ab])c/"));
}

#[test]
fn consumed_chars_and_what_follows() {
    // the group is followed by `b`, which neither alternative consumes
    assert!(reorderable_group("/(?:a|a+)b/"));
    assert!(!reorderable_group("/(?:a|a+)a/"));
    // common suffix `x`
    assert!(reorderable("/a+x|ax/"));
    assert!(!reorderable("/a+a|aa/"));
}

fn reorderable_group(literal: &str) -> bool {
    let ast = parse(literal);
    let cache = Cache::new(&ast);
    let group = ast.children(ast.children(ast.pattern())[0])[0];
    can_reorder(&cache, ast.children(group), ReorderOptions::new()).unwrap()
}

#[test]
fn direction() {
    let rtl = ReorderOptions::new().with_matching_direction(OptionalMatchingDirection::Rtl);
    let unknown = ReorderOptions::new().with_matching_direction(OptionalMatchingDirection::Unknown);

    assert!(reorderable("/a|ba/"));
    assert!(!reorderable_with("/a|ba/", rtl));
    assert!(!reorderable_with("/a|ba/", unknown));
    assert!(reorderable_with("/a|b/", unknown));

    // lookbehinds default to right to left
    let ast = parse("/(?<=a|ba)/");
    let cache = Cache::new(&ast);
    let lookbehind = find_element(&ast, "(?<=a|ba)");
    let alternatives = ast.children(lookbehind);
    assert_eq!(can_reorder(&cache, alternatives, ReorderOptions::new()), Ok(false));
}

#[test]
fn capturing_groups() {
    let ignore = ReorderOptions::new().with_ignore_capturing_groups(true);

    // reordering `(a)` and `(b)` renumbers them
    assert!(!reorderable("/(a)|(b)/"));
    assert!(reorderable_with("/(a)|(b)/", ignore));
    assert!(reorderable("/(a)|b/"));

    // `b` may not move before `(b)`
    let ast = parse("/^(?:a|(b)|b)$/");
    let cache = Cache::new(&ast);
    let group = find_element(&ast, "(?:a|(b)|b)");
    let alternatives = ast.children(group);
    let targets = [alternatives[0], alternatives[2]];
    let strict = ReorderOptions::new();
    assert!(!can_reorder(&cache, &targets, strict).unwrap());
    assert!(can_reorder(&cache, &targets, ignore).unwrap());
    assert!(can_reorder(&cache, &alternatives[..2], strict).unwrap());

    // both alternatives end the input
    let ast = parse("/(?:(b)|b)$/");
    let cache = Cache::new(&ast);
    let alternatives = ast.children(find_element(&ast, "(?:(b)|b)"));
    assert!(!can_reorder(&cache, alternatives, strict).unwrap());
    assert!(can_reorder(&cache, alternatives, ignore).unwrap());
}

#[test]
fn only_the_slice_between_targets_matters() {
    let ast = parse("/a|b|ab/");
    let cache = Cache::new(&ast);
    let [a, b, ab] = [0, 1, 2].map(|i| top_alternatives(&ast)[i]);
    let reorderable = |targets: &[NodeId]| can_reorder(&cache, targets, ReorderOptions::new());
    assert_eq!(reorderable(&[a, b]), Ok(true));
    assert_eq!(reorderable(&[a, ab]), Ok(false));
    assert_eq!(reorderable(&[b, ab, a]), Ok(false));
}

#[test]
fn trivial_inputs() {
    let ast = parse("/a|b/");
    let cache = Cache::new(&ast);
    let a = find_alternative(&ast, "a");
    let reorderable = |targets: &[NodeId]| can_reorder(&cache, targets, ReorderOptions::new());
    assert_eq!(reorderable(&[]), Ok(true));
    assert_eq!(reorderable(&[a]), Ok(true));
    assert_eq!(reorderable(&[a, a]), Ok(true));
}

#[test]
fn mixed_parents() {
    let ast = parse("/a|(?:b|c)/");
    let cache = Cache::new(&ast);
    let alternatives = [find_alternative(&ast, "a"), find_alternative(&ast, "b")];
    assert_eq!(
        can_reorder(&cache, &alternatives, ReorderOptions::new()),
        Err(Error::MixedParents)
    );
}
