use crate::unicode::{case_closure, property_ranges};
use crate::{CharRange, CharSet};

fn chars(maximum: u32, s: &str) -> CharSet {
    CharSet::from_ranges(maximum, s.chars().map(|c| CharRange::single(c as u32)))
}

#[test]
fn general_category_lookup() {
    let ranges = property_ranges(None, "Lu").unwrap();
    let set = CharSet::from_ranges(0x10FFFF, ranges);

    assert!(set.contains('A' as u32));
    assert!(set.contains('Ω' as u32));
    assert!(!set.contains('a' as u32));
}

#[test]
fn script_lookup_with_key() {
    let ranges = property_ranges(Some("Script"), "Greek").unwrap();
    let set = CharSet::from_ranges(0x10FFFF, ranges);

    assert!(set.contains('α' as u32));
    assert!(!set.contains('a' as u32));
}

#[test]
fn unknown_property() {
    assert_eq!(property_ranges(None, "NotAProperty"), None);
}

#[test]
fn unicode_case_closure_includes_special_folds() {
    let folded = case_closure(&chars(0x10FFFF, "ks"), true);

    assert!(folded.contains('K' as u32));
    assert!(folded.contains('S' as u32));
    assert!(folded.contains(0x212A));
    assert!(folded.contains(0x017F));
}

#[test]
fn legacy_case_closure_stays_on_its_side_of_ascii() {
    let folded = case_closure(&chars(0xFFFF, "ks"), false);

    assert_eq!(folded, chars(0xFFFF, "KSks"));
}

#[test]
fn case_closure_keeps_surrogates() {
    let set = CharSet::from_ranges(0xFFFF, [CharRange::new(0xD800, 0xDBFF)]);
    assert_eq!(case_closure(&set, false), set);
}

#[test]
fn legacy_case_closure_folds_outside_ascii() {
    // `µ` upper-cases to Greek capital mu, which `μ` also upper-cases to
    let folded = case_closure(&chars(0xFFFF, "µ"), false);
    assert_eq!(folded, chars(0xFFFF, "µΜμ"));
}

#[test]
fn legacy_case_closure_skips_multi_unit_upper_case() {
    // `ß` upper-cases to `SS`
    assert_eq!(case_closure(&chars(0xFFFF, "ß"), false), chars(0xFFFF, "ß"));
    assert!(case_closure(&chars(0x10FFFF, "ß"), true).contains(0x1E9E));
    // `ſ` upper-cases to `S`, which is ASCII
    assert_eq!(case_closure(&chars(0xFFFF, "ſ"), false), chars(0xFFFF, "ſ"));
}
