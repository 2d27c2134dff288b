use regast_core::{CharSet, NodeId};

use crate::test_utils::{find_alternative, parse, top_alternatives};
use crate::{Cache, Config, MatchingDirection, PrefixOptions, longest_prefix};

use MatchingDirection::{Ltr, Rtl};

fn show(prefix: &[CharSet]) -> String {
    prefix
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prefix of the first alternative of the pattern.
fn prefix(literal: &str, direction: MatchingDirection, options: PrefixOptions) -> String {
    let ast = parse(literal);
    let cache = Cache::new(&ast);
    let alternative = top_alternatives(&ast)[0];
    show(&longest_prefix(&cache, alternative, direction, options))
}

fn strict(literal: &str) -> String {
    prefix(literal, Ltr, PrefixOptions::new())
}

fn after() -> PrefixOptions {
    PrefixOptions::new().with_include_after(true)
}

#[test]
fn characters() {
    insta::assert_snapshot!(strict("/abc/"), @"[a], [b], [c]");
    insta::assert_snapshot!(prefix("/abc/", Rtl, PrefixOptions::new()), @"[c], [b], [a]");
    insta::assert_snapshot!(
        prefix("/abc/", Ltr, after()),
        @r"[a], [b], [c], [\u{0}-\u{ffff}]"
    );
    insta::assert_snapshot!(
        prefix("/abc/", Ltr, after().with_only_inside(true)),
        @"[a], [b], [c]"
    );
}

#[test]
fn assertions_are_ignored() {
    insta::assert_snapshot!(strict("/^foo/"), @"[f], [o], [o]");
    insta::assert_snapshot!(strict("/a(?!c)b/"), @"[a], [b]");
    // nothing may follow `$`
    insta::assert_snapshot!(prefix("/foo$/", Ltr, after()), @"[f], [o], [o], []");
}

#[test]
fn groups() {
    insta::assert_snapshot!(strict("/a(foo|bar)z/"), @"[a], [bf]");
    insta::assert_snapshot!(
        prefix("/a(foo|bar)z/", Ltr, PrefixOptions::new().with_loose_groups(true)),
        @"[a], [bf], [ao], [or], [z]"
    );
    insta::assert_snapshot!(strict("/a(b|c|d)z/"), @"[a], [b-d], [z]");
    insta::assert_snapshot!(strict("/(?:bitter|barber)/"), @"[b], [ai]");
    insta::assert_snapshot!(
        prefix("/(?:bitter|barber)/", Ltr, PrefixOptions::new().with_loose_groups(true)),
        @"[b], [ai], [rt], [bt], [e], [r]"
    );
}

#[test]
fn groups_with_alternatives_of_different_length() {
    insta::assert_snapshot!(strict("/(int|integer)/"), @"[i], [n], [t]");
    insta::assert_snapshot!(prefix("/(int|integer)/", Rtl, PrefixOptions::new()), @"[rt]");
    insta::assert_snapshot!(
        prefix("/(int|integer)/", Ltr, after()),
        @r"[i], [n], [t], [\u{0}-\u{ffff}]"
    );
    // an incomplete alternative ends the group
    insta::assert_snapshot!(strict("/(ab*|c)d/"), @"[ac]");
}

#[test]
fn quantifiers() {
    insta::assert_snapshot!(strict("/a{4}b/"), @"[a], [a], [a], [a], [b]");
    insta::assert_snapshot!(strict("/a{0}b/"), @"[b]");
    insta::assert_snapshot!(strict("/a+b/"), @"[a]");
    insta::assert_snapshot!(prefix("/a+b/", Ltr, after()), @"[a], [a-b]");
    insta::assert_snapshot!(strict("/a?b/"), @"");
    insta::assert_snapshot!(prefix("/a?b/", Ltr, after()), @"[a-b]");
}

#[test]
fn prefix_limit() {
    let ast = parse("/a{10}b/");
    let cache = Cache::new(&ast).with_config(Config::new().with_prefix_limit(3));
    let prefix = longest_prefix(&cache, top_alternatives(&ast)[0], Ltr, PrefixOptions::new());
    insta::assert_snapshot!(show(&prefix), @"[a], [a], [a], [a]");
}

#[test]
fn backreferences() {
    insta::assert_snapshot!(strict(r"/(a)b\1c/"), @"[a], [b], [a], [c]");
    insta::assert_snapshot!(strict(r"/(?:(a)|f)b\1c/"), @"[af], [b]");
}

#[test]
fn characters_after_the_alternative() {
    let ast = parse("/(ab)c/");
    let cache = Cache::new(&ast);
    let ab = find_alternative(&ast, "ab");
    let prefix = |options| show(&longest_prefix(&cache, ab, Ltr, options));

    insta::assert_snapshot!(prefix(PrefixOptions::new()), @"[a], [b]");
    insta::assert_snapshot!(prefix(after()), @"[a], [b], [c]");
    insta::assert_snapshot!(prefix(after().with_only_inside(true)), @"[a], [b]");
}

#[test]
fn memoized_per_options() {
    let ast = parse("/ab/");
    let cache = Cache::new(&ast);
    let alternative: NodeId = top_alternatives(&ast)[0];
    let first = longest_prefix(&cache, alternative, Ltr, after());
    assert_eq!(longest_prefix(&cache, alternative, Ltr, after()), first);
    let strict = longest_prefix(&cache, alternative, Ltr, PrefixOptions::new());
    assert_eq!(strict.len(), 2);
    assert_eq!(first.len(), 3);
}
