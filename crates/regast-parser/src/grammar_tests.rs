use regast_core::NodeKind;

use crate::{ParseError, ParserBuilder, parse_literal};

fn dump(literal: &str) -> String {
    let ast = parse_literal(literal).unwrap();
    ast.dump(ast.pattern())
}

fn error(literal: &str) -> ParseError {
    parse_literal(literal).unwrap_err()
}

#[test]
fn alternation_and_lazy_quantifier() {
    insta::assert_snapshot!(dump("/a|b*?/"), @r"
    Pattern
      Alternative
        Character 'a'
      Alternative
        Quantifier {0,inf} lazy
          Character 'b'
    ");
}

#[test]
fn named_group_and_backreference() {
    insta::assert_snapshot!(dump(r"/(?<year>\d{4})-\k<year>/"), @r"
    Pattern
      Alternative
        CapturingGroup <year>
          Alternative
            Quantifier {4,4}
              CharacterSet \d
        Character '-'
        Backreference <year>
    ");
}

#[test]
fn assertions() {
    insta::assert_snapshot!(dump(r"/^(?<=a)(?!b)\b$/"), @r"
    Pattern
      Alternative
        Assertion ^
        Lookbehind
          Alternative
            Character 'a'
        NegativeLookahead
          Alternative
            Character 'b'
        Assertion \b
        Assertion $
    ");
}

#[test]
fn empty_alternatives() {
    insta::assert_snapshot!(dump("/(?:|a)|/"), @r"
    Pattern
      Alternative
        Group
          Alternative
          Alternative
            Character 'a'
      Alternative
    ");
}

#[test]
fn forward_backreference() {
    let ast = parse_literal(r"/\1(a)/").unwrap();
    let backref = ast
        .descendants(ast.pattern())
        .find(|&id| matches!(ast.kind(id), NodeKind::Backreference { .. }))
        .unwrap();

    assert_eq!(ast.resolved(backref), Some(ast.capturing_groups()[0]));
}

#[test]
fn legacy_escapes() {
    insta::assert_snapshot!(dump(r"/\1\8a{\c/"), @r"
    Pattern
      Alternative
        Character U+0001
        Character '8'
        Character 'a'
        Character '{'
        Character '\'
        Character 'c'
    ");
}

#[test]
fn unicode_escapes() {
    insta::assert_snapshot!(dump(r"/\x41B\u{43}\cJ😀/u"), @r"
    Pattern
      Alternative
        Character 'A'
        Character 'B'
        Character 'C'
        Character U+000A
        Character U+1F600
    ");
}

#[test]
fn astral_characters_split_outside_unicode_mode() {
    insta::assert_snapshot!(dump("/😀+/"), @r"
    Pattern
      Alternative
        Character U+D83D
        Quantifier {1,inf}
          Character U+DE00
    ");
    insta::assert_snapshot!(dump("/😀/u"), @r"
    Pattern
      Alternative
        Character U+1F600
    ");
}

#[test]
fn spans_cover_source_text() {
    let ast = parse_literal(r"/a(?:b|c)+\d/").unwrap();
    let raws: Vec<&str> = ast
        .descendants(ast.pattern())
        .map(|id| ast.raw(id))
        .collect();

    assert_eq!(
        raws,
        [r"a(?:b|c)+\d", r"a(?:b|c)+\d", "a", "(?:b|c)+", "(?:b|c)", "b", "b", "c", "c", r"\d"]
    );
}

#[test]
fn quantified_lookahead_is_legacy_only() {
    assert!(parse_literal("/(?=a)*/").is_ok());
    assert_eq!(error("/(?=a)*/u"), ParseError::NothingToRepeat(5));
    assert_eq!(error("/(?<=a)*/"), ParseError::NothingToRepeat(6));
}

#[test]
fn syntax_errors() {
    assert_eq!(error("/a**/"), ParseError::NothingToRepeat(2));
    assert_eq!(error(r"/\b+/"), ParseError::NothingToRepeat(2));
    assert_eq!(error("/(a/"), ParseError::UnexpectedEnd);
    assert_eq!(error("/a)/"), ParseError::UnmatchedParen(1));
    assert_eq!(error("/a{2,1}/"), ParseError::QuantifierOutOfOrder(1));
    assert_eq!(error("/{/u"), ParseError::NothingToRepeat(0));
    assert_eq!(error(r"/\1/u"), ParseError::InvalidBackreference(0));
    assert_eq!(
        error(r"/\k<b>(?<a>x)/"),
        ParseError::InvalidBackreference(0)
    );
    assert_eq!(error(r"/\a/u"), ParseError::InvalidEscape(0));
    assert_eq!(
        error(r"/\p{Foo}/u"),
        ParseError::UnknownProperty("Foo".into())
    );
    assert_eq!(
        error("/(?<a>x)(?<a>y)/"),
        ParseError::DuplicateGroupName("a".into())
    );
}

#[test]
fn literal_errors() {
    assert_eq!(
        error("abc"),
        ParseError::InvalidLiteral("missing opening `/`")
    );
    assert_eq!(error("//"), ParseError::InvalidLiteral("empty pattern"));
    assert!(matches!(error("/a/x"), ParseError::Flags(_)));
}

#[test]
fn recursion_limit() {
    let parser = ParserBuilder::new().with_max_depth(2);

    assert!(parser.parse_literal("/((a))/").is_ok());
    assert_eq!(
        parser.parse_literal("/(((a)))/").unwrap_err(),
        ParseError::RecursionLimitExceeded
    );
}

#[test]
fn large_quantifier_bounds_saturate() {
    let ast = parse_literal("/a{99999999999}/").unwrap();
    let quantifier = ast
        .descendants(ast.pattern())
        .find(|&id| matches!(ast.kind(id), NodeKind::Quantifier { .. }))
        .unwrap();

    let NodeKind::Quantifier { min, max, .. } = ast.kind(quantifier) else {
        panic!("expected quantifier");
    };
    assert_eq!(*min, u32::MAX);
    assert_eq!(*max, Some(u32::MAX));
}
