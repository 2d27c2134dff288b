//! Parser state and low-level cursor operations.

use indexmap::IndexSet;
use regast_core::{Ast, AstBuilder, Flags, NodeId, NodeKind, Span};

use crate::{ParseError, Result};

/// Recursive-descent parser over the pattern source.
///
/// Nodes are pushed into an `AstBuilder` children-first; `finish` links them.
pub struct Parser<'src> {
    pub(crate) source: &'src str,
    pub(crate) pos: usize,
    pub(crate) flags: Flags,
    pub(crate) builder: AstBuilder,
    pub(crate) depth: u32,
    max_depth: u32,
    /// Number of capturing groups in the whole pattern (forward references are legal).
    pub(crate) group_count: u32,
    pub(crate) group_names: IndexSet<String>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, flags: Flags, max_depth: u32) -> Self {
        Self {
            source,
            pos: 0,
            flags,
            builder: AstBuilder::new(),
            depth: 0,
            max_depth,
            group_count: 0,
            group_names: IndexSet::new(),
        }
    }

    pub fn parse(mut self) -> Result<Ast> {
        self.scan_groups()?;

        let alternatives = self.parse_disjunction()?;
        if let Some(c) = self.peek() {
            return Err(match c {
                ')' => ParseError::UnmatchedParen(self.pos),
                found => ParseError::Unexpected {
                    found,
                    offset: self.pos,
                },
            });
        }

        let root = self.push(
            NodeKind::Pattern { alternatives },
            Span::new(0, self.source.len()),
        );
        Ok(self.builder.finish(root, self.source, self.flags)?)
    }

    #[inline]
    pub(crate) fn unicode(&self) -> bool {
        self.flags.is_unicode()
    }

    /// Annex B leniency applies to legacy (non-Unicode) patterns.
    #[inline]
    pub(crate) fn legacy(&self) -> bool {
        !self.flags.is_unicode()
    }

    pub(crate) fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.builder.push(kind, span)
    }

    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    pub(crate) fn at(&self, prefix: &str) -> bool {
        self.source[self.pos..].starts_with(prefix)
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.at(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            return Ok(());
        }
        Err(self.unexpected())
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::Unexpected {
                found,
                offset: self.pos,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    pub(crate) fn enter_nested(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::RecursionLimitExceeded);
        }
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    /// Pushes a literal character. Outside Unicode mode, astral characters are
    /// two UTF-16 code units and become two `Character` nodes.
    pub(crate) fn push_char(&mut self, value: u32, span: Span, out: &mut Vec<NodeId>) {
        for unit in self.code_units(value) {
            out.push(self.push(NodeKind::Character { value: unit }, span));
        }
    }

    pub(crate) fn code_units(&self, value: u32) -> Vec<u32> {
        if self.unicode() || value <= 0xFFFF {
            return vec![value];
        }
        let offset = value - 0x10000;
        vec![0xD800 + (offset >> 10), 0xDC00 + (offset & 0x3FF)]
    }

    /// Counts capturing groups and collects group names before parsing, since
    /// backreferences may point forward.
    fn scan_groups(&mut self) -> Result<()> {
        let bytes = self.source.as_bytes();
        let mut class_depth = 0u32;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 1,
                b'[' if class_depth == 0 || self.flags.unicode_sets => class_depth += 1,
                b']' if class_depth > 0 => class_depth -= 1,
                b'(' if class_depth == 0 => {
                    let rest = &self.source[i + 1..];
                    if !rest.starts_with('?') {
                        self.group_count += 1;
                    } else if rest.starts_with("?<")
                        && !rest.starts_with("?<=")
                        && !rest.starts_with("?<!")
                    {
                        self.group_count += 1;
                        if let Some(end) = rest.find('>') {
                            let name = rest[2..end].to_owned();
                            if !self.group_names.insert(name.clone()) {
                                return Err(ParseError::DuplicateGroupName(name));
                            }
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Ok(())
    }
}
