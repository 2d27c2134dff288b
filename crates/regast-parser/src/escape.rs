//! Escape sequences, shared between atoms and character classes.

use regast_core::{CharacterSetKind, GroupRef, NodeId, NodeKind, unicode};

use crate::core::Parser;
use crate::{ParseError, Result};

const SYNTAX_CHARS: &str = "^$\\.*+?()[]{}|/";
/// Punctuators that may be escaped inside a unicodeSets class.
const CLASS_SET_PUNCTUATORS: &str = "&-!#%,:;<=>@`~";

/// An escape that denotes a set of characters rather than a single one.
pub(crate) enum ClassEscape {
    Char(u32),
    Set(CharacterSetKind),
}

impl Parser<'_> {
    /// Escape outside a class; `\b` and `\B` are handled as assertions before this.
    pub(crate) fn parse_atom_escape(&mut self, elements: &mut Vec<NodeId>) -> Result<()> {
        let start = self.pos;
        self.bump();

        match self.peek() {
            Some('1'..='9') => {
                let digits_start = self.pos;
                let n = self.parse_decimal().unwrap_or(0);
                if n <= self.group_count {
                    let kind = NodeKind::Backreference {
                        reference: GroupRef::Index(n),
                    };
                    elements.push(self.push(kind, self.span_from(start)));
                    return Ok(());
                }
                if self.unicode() {
                    return Err(ParseError::InvalidBackreference(start));
                }
                self.pos = digits_start;
                let value = self.parse_legacy_octal_or_digit();
                self.push_char(value, self.span_from(start), elements);
                Ok(())
            }
            Some('k') if self.unicode() || !self.group_names.is_empty() => {
                self.bump();
                if !self.eat('<') {
                    return Err(ParseError::InvalidEscape(start));
                }
                let name = self.parse_group_name()?;
                if !self.group_names.contains(&name) {
                    return Err(ParseError::InvalidBackreference(start));
                }
                let kind = NodeKind::Backreference {
                    reference: GroupRef::Name(name),
                };
                elements.push(self.push(kind, self.span_from(start)));
                Ok(())
            }
            _ => match self.parse_class_escape(start, false)? {
                ClassEscape::Char(value) => {
                    self.push_char(value, self.span_from(start), elements);
                    Ok(())
                }
                ClassEscape::Set(kind) => {
                    let set = self.push(NodeKind::CharacterSet(kind), self.span_from(start));
                    elements.push(set);
                    Ok(())
                }
            },
        }
    }

    /// Escape after the backslash (already consumed, `start` points at it).
    ///
    /// `in_class` enables the class-only escapes `\b` (backspace) and `\-`.
    pub(crate) fn parse_class_escape(
        &mut self,
        start: usize,
        in_class: bool,
    ) -> Result<ClassEscape> {
        let Some(c) = self.bump() else {
            return Err(ParseError::UnexpectedEnd);
        };

        match c {
            'd' | 'D' => Ok(ClassEscape::Set(CharacterSetKind::Digit { negate: c == 'D' })),
            's' | 'S' => Ok(ClassEscape::Set(CharacterSetKind::Space { negate: c == 'S' })),
            'w' | 'W' => Ok(ClassEscape::Set(CharacterSetKind::Word { negate: c == 'W' })),
            'p' | 'P' if self.unicode() => {
                let (key, value) = self.parse_property_body(start)?;
                Ok(ClassEscape::Set(CharacterSetKind::Property {
                    key,
                    value,
                    negate: c == 'P',
                }))
            }
            'b' if in_class => Ok(ClassEscape::Char(0x08)),
            '-' if in_class && self.unicode() => Ok(ClassEscape::Char('-' as u32)),
            'n' => Ok(ClassEscape::Char('\n' as u32)),
            'r' => Ok(ClassEscape::Char('\r' as u32)),
            't' => Ok(ClassEscape::Char('\t' as u32)),
            'v' => Ok(ClassEscape::Char(0x0B)),
            'f' => Ok(ClassEscape::Char(0x0C)),
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => Ok(ClassEscape::Char(0)),
            '0'..='9' if self.legacy() => {
                self.pos -= 1;
                Ok(ClassEscape::Char(self.parse_legacy_octal_or_digit()))
            }
            'c' => match self.peek() {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    self.bump();
                    Ok(ClassEscape::Char(letter as u32 % 32))
                }
                Some(d) if in_class && self.legacy() && (d.is_ascii_digit() || d == '_') => {
                    self.bump();
                    Ok(ClassEscape::Char(d as u32 % 32))
                }
                _ if self.legacy() => {
                    // `\c` without a control letter is a literal backslash; `c` is read next.
                    self.pos -= 1;
                    Ok(ClassEscape::Char('\\' as u32))
                }
                _ => Err(ParseError::InvalidEscape(start)),
            },
            'x' => match self.parse_hex_digits(2) {
                Some(value) => Ok(ClassEscape::Char(value)),
                None if self.legacy() => Ok(ClassEscape::Char('x' as u32)),
                None => Err(ParseError::InvalidEscape(start)),
            },
            'u' => match self.parse_unicode_escape() {
                Some(value) => Ok(ClassEscape::Char(value)),
                None if self.legacy() => Ok(ClassEscape::Char('u' as u32)),
                None => Err(ParseError::InvalidEscape(start)),
            },
            _ if self.unicode() => {
                let set_punctuator =
                    in_class && self.flags.unicode_sets && CLASS_SET_PUNCTUATORS.contains(c);
                if SYNTAX_CHARS.contains(c) || set_punctuator {
                    Ok(ClassEscape::Char(c as u32))
                } else {
                    Err(ParseError::InvalidEscape(start))
                }
            }
            'k' if !self.group_names.is_empty() => Err(ParseError::InvalidEscape(start)),
            _ => Ok(ClassEscape::Char(c as u32)),
        }
    }

    /// Legacy octal escape (`\1` … `\377`), or a literal `8`/`9`.
    fn parse_legacy_octal_or_digit(&mut self) -> u32 {
        let Some(first) = self.peek().and_then(|c| c.to_digit(8)) else {
            // `\8` and `\9` are identity escapes.
            return self.bump().map_or(0, |c| c as u32);
        };
        self.bump();

        let mut value = first;
        let max_digits = if first <= 3 { 3 } else { 2 };
        for _ in 1..max_digits {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(8)) else {
                break;
            };
            self.bump();
            value = value * 8 + digit;
        }
        value
    }

    fn parse_hex_digits(&mut self, count: usize) -> Option<u32> {
        let rest = self.source.get(self.pos..self.pos + count)?;
        let value = u32::from_str_radix(rest, 16).ok()?;
        if !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        self.pos += count;
        Some(value)
    }

    /// Body of `\u`: `XXXX`, or in Unicode mode a surrogate pair `XXXX\uXXXX` or `{X…}`.
    fn parse_unicode_escape(&mut self) -> Option<u32> {
        if self.unicode() && self.eat('{') {
            let start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let value = u32::from_str_radix(&self.source[start..self.pos], 16).ok()?;
            if value > 0x10FFFF || !self.eat('}') {
                return None;
            }
            return Some(value);
        }

        let lead = self.parse_hex_digits(4)?;
        if self.unicode() && (0xD800..=0xDBFF).contains(&lead) && self.at("\\u") {
            let resume = self.pos;
            self.pos += 2;
            match self.parse_hex_digits(4) {
                Some(trail) if (0xDC00..=0xDFFF).contains(&trail) => {
                    return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
                }
                _ => self.pos = resume,
            }
        }
        Some(lead)
    }

    /// `{Name}` or `{Key=Value}` after `\p`.
    fn parse_property_body(&mut self, start: usize) -> Result<(Option<String>, String)> {
        if !self.eat('{') {
            return Err(ParseError::InvalidEscape(start));
        }
        let body_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '=')
        {
            self.bump();
        }
        let body = self.source[body_start..self.pos].to_owned();
        if !self.eat('}') {
            return Err(ParseError::InvalidEscape(start));
        }

        let (key, value) = match body.split_once('=') {
            Some((key, value)) => (Some(key.to_owned()), value.to_owned()),
            None => (None, body.clone()),
        };
        if unicode::property_ranges(key.as_deref(), &value).is_none() {
            return Err(ParseError::UnknownProperty(body));
        }
        Ok((key, value))
    }
}
