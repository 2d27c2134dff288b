//! Indented textual AST dump, used by tests and debugging.

use std::fmt::Write;

use crate::{Ast, CharacterSetKind, EdgeKind, GroupRef, LookaroundKind, NodeId, NodeKind};

impl Ast {
    /// Render the subtree rooted at `id`, one node per line.
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, id, 0);
        out
    }

    fn dump_into(&self, out: &mut String, id: NodeId, depth: usize) {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), self.label(id));
        for &child in self.children(id) {
            self.dump_into(out, child, depth + 1);
        }
    }

    fn label(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Pattern { .. } => "Pattern".into(),
            NodeKind::Alternative { .. } => "Alternative".into(),
            NodeKind::Group { .. } => "Group".into(),
            NodeKind::CapturingGroup { name: None, .. } => "CapturingGroup".into(),
            NodeKind::CapturingGroup { name: Some(name), .. } => {
                format!("CapturingGroup <{name}>")
            }
            NodeKind::Quantifier {
                min, max, greedy, ..
            } => {
                let max = max.map_or_else(|| "inf".to_owned(), |m| m.to_string());
                let lazy = if *greedy { "" } else { " lazy" };
                format!("Quantifier {{{min},{max}}}{lazy}")
            }
            NodeKind::EdgeAssertion { kind: EdgeKind::Start } => "Assertion ^".into(),
            NodeKind::EdgeAssertion { kind: EdgeKind::End } => "Assertion $".into(),
            NodeKind::WordBoundary { negate: false } => r"Assertion \b".into(),
            NodeKind::WordBoundary { negate: true } => r"Assertion \B".into(),
            NodeKind::Lookaround { kind, negate, .. } => {
                let kind = match kind {
                    LookaroundKind::Lookahead => "Lookahead",
                    LookaroundKind::Lookbehind => "Lookbehind",
                };
                if *negate {
                    format!("Negative{kind}")
                } else {
                    kind.to_owned()
                }
            }
            NodeKind::Character { value } => format!("Character {}", char_label(*value)),
            NodeKind::CharacterClass { negate: false, .. } => "CharacterClass".into(),
            NodeKind::CharacterClass { negate: true, .. } => "CharacterClass ^".into(),
            NodeKind::CharacterClassRange { min, max } => {
                format!("Range {}-{}", char_label(*min), char_label(*max))
            }
            NodeKind::CharacterSet(kind) => format!("CharacterSet {}", set_label(kind)),
            NodeKind::Backreference {
                reference: GroupRef::Index(n),
            } => format!("Backreference {n}"),
            NodeKind::Backreference {
                reference: GroupRef::Name(name),
            } => format!("Backreference <{name}>"),
            NodeKind::ClassIntersection { .. } => "ClassIntersection".into(),
            NodeKind::ClassSubtraction { .. } => "ClassSubtraction".into(),
        }
    }
}

fn char_label(value: u32) -> String {
    match char::from_u32(value) {
        Some(c) if c.is_ascii_graphic() => format!("'{c}'"),
        _ => format!("U+{value:04X}"),
    }
}

fn set_label(kind: &CharacterSetKind) -> String {
    let escape = |letter: char, negate: bool| {
        if negate {
            format!("\\{}", letter.to_ascii_uppercase())
        } else {
            format!("\\{letter}")
        }
    };
    match kind {
        CharacterSetKind::Any => ".".into(),
        CharacterSetKind::Digit { negate } => escape('d', *negate),
        CharacterSetKind::Space { negate } => escape('s', *negate),
        CharacterSetKind::Word { negate } => escape('w', *negate),
        CharacterSetKind::Property { key, value, negate } => {
            let letter = if *negate { 'P' } else { 'p' };
            match key {
                Some(key) => format!("\\{letter}{{{key}={value}}}"),
                None => format!("\\{letter}{{{value}}}"),
            }
        }
    }
}
