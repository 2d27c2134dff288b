use crate::{Flags, FlagsError};

#[test]
fn parse_flag_string() {
    let flags: Flags = "gimsuy".parse().unwrap();

    assert!(flags.global);
    assert!(flags.ignore_case);
    assert!(flags.multiline);
    assert!(flags.dot_all);
    assert!(flags.unicode);
    assert!(flags.sticky);
    assert!(!flags.unicode_sets);
    assert!(!flags.has_indices);
}

#[test]
fn display_uses_canonical_order() {
    let flags: Flags = "yvgd".parse().unwrap();
    assert_eq!(flags.to_string(), "dgvy");
}

#[test]
fn reject_bad_flags() {
    assert_eq!("x".parse::<Flags>(), Err(FlagsError::Unknown('x')));
    assert_eq!("gg".parse::<Flags>(), Err(FlagsError::Duplicate('g')));
    assert_eq!("uv".parse::<Flags>(), Err(FlagsError::UnicodeConflict));
}

#[test]
fn max_char_depends_on_unicode_mode() {
    assert_eq!(Flags::new().max_char(), 0xFFFF);
    assert_eq!(Flags::new().with_unicode(true).max_char(), 0x10FFFF);
    assert_eq!(Flags::new().with_unicode_sets(true).max_char(), 0x10FFFF);
}

#[test]
fn deserialize_with_defaults() {
    let flags: Flags = serde_json::from_str(r#"{ "ignoreCase": true }"#).unwrap();
    assert_eq!(flags, Flags::new().with_ignore_case(true));
}
