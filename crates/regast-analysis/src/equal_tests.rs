use regast_core::Ast;

use crate::structurally_equal;
use crate::test_utils::{find_element, parse, top_alternatives};

fn patterns_equal(a: &str, b: &str) -> bool {
    let (a, b) = (parse(a), parse(b));
    structurally_equal(&a, a.pattern(), &b, b.pattern())
}

fn elements_equal(a: &Ast, x: &str, b: &Ast, y: &str) -> bool {
    structurally_equal(a, find_element(a, x), b, find_element(b, y))
}

#[test]
fn same_tree() {
    let ast = parse("/ab|ab|ba/");
    let [first, second, third] = [0, 1, 2].map(|i| top_alternatives(&ast)[i]);
    assert!(structurally_equal(&ast, first, &ast, first));
    assert!(structurally_equal(&ast, first, &ast, second));
    assert!(!structurally_equal(&ast, first, &ast, third));
}

#[test]
fn across_trees() {
    assert!(patterns_equal("/(a+)b|[c-e]/", "/(a+)b|[c-e]/"));
    assert!(patterns_equal("/a/", r"/\x61/"));
    assert!(!patterns_equal("/[ab]/", "/[ba]/"));
    assert!(!patterns_equal("/a|b/", "/b|a/"));
    assert!(!patterns_equal("/aa/", "/a{2}/"));
    assert!(!patterns_equal("/a/", "/[a]/"));
    assert!(!patterns_equal("/a+/", "/a+?/"));
    assert!(!patterns_equal("/(?=a)/", "/(?!a)/"));
    assert!(!patterns_equal("/(?=a)/", "/(?<=a)/"));
    assert!(!patterns_equal(r"/\b/", r"/\B/"));
}

#[test]
fn flags_only_matter_on_patterns() {
    assert!(!patterns_equal("/ab/", "/ab/i"));

    let (a, b) = (parse("/ab/"), parse("/ab/i"));
    let (x, y) = (top_alternatives(&a)[0], top_alternatives(&b)[0]);
    assert!(structurally_equal(&a, x, &b, y));
}

#[test]
fn group_names() {
    let a = parse("/(?<x>a)/");
    let same = parse("/(?<x>a)/");
    assert!(elements_equal(&a, "(?<x>a)", &same, "(?<x>a)"));
    let renamed = parse("/(?<y>a)/");
    assert!(!elements_equal(&a, "(?<x>a)", &renamed, "(?<y>a)"));
    assert!(!elements_equal(&a, "(?<x>a)", &parse("/(a)/"), "(a)"));
    assert!(!elements_equal(&a, "(?<x>a)", &parse("/(?:a)/"), "(?:a)"));
}

#[test]
fn backreferences() {
    let strict = parse(r"/(a)\1/");
    assert!(elements_equal(&strict, r"\1", &parse(r"/x(a)\1/"), r"\1"));
    assert!(!elements_equal(&strict, r"\1", &parse(r"/(b)\1/"), r"\1"));
    // same group, but it may not have matched
    assert!(!elements_equal(&strict, r"\1", &parse(r"/(a)?\1/"), r"\1"));

    // a group that refers to itself
    assert!(patterns_equal(r"/(a\1)/", r"/(a\1)/"));
}
