//! Pattern grammar: disjunctions, terms, groups, and quantifiers.

use regast_core::{EdgeKind, LookaroundKind, NodeId, NodeKind};

use crate::core::Parser;
use crate::{ParseError, Result};

/// What a parsed term may be followed by.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Allowed,
    /// Annex B permits quantified lookaheads in legacy patterns.
    LegacyLookahead,
    Forbidden,
}

impl Parser<'_> {
    pub(crate) fn parse_disjunction(&mut self) -> Result<Vec<NodeId>> {
        let mut alternatives = vec![self.parse_alternative()?];
        while self.eat('|') {
            alternatives.push(self.parse_alternative()?);
        }
        Ok(alternatives)
    }

    fn parse_alternative(&mut self) -> Result<NodeId> {
        let start = self.pos;
        let mut elements = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            self.parse_term(&mut elements)?;
        }
        Ok(self.push(NodeKind::Alternative { elements }, self.span_from(start)))
    }

    fn parse_term(&mut self, elements: &mut Vec<NodeId>) -> Result<()> {
        let repeat = self.parse_atom(elements)?;

        let quantifier_start = self.pos;
        let Some((min, max)) = self.parse_quantifier()? else {
            return Ok(());
        };
        let greedy = !self.eat('?');

        let (Some(element), Repeat::Allowed | Repeat::LegacyLookahead) = (elements.pop(), repeat)
        else {
            return Err(ParseError::NothingToRepeat(quantifier_start));
        };
        if repeat == Repeat::LegacyLookahead && self.unicode() {
            return Err(ParseError::NothingToRepeat(quantifier_start));
        }

        let element_start = self.builder.span(element).start;
        let quantifier = self.push(
            NodeKind::Quantifier {
                min,
                max,
                greedy,
                element,
            },
            self.span_from(element_start),
        );
        elements.push(quantifier);
        Ok(())
    }

    fn parse_atom(&mut self, elements: &mut Vec<NodeId>) -> Result<Repeat> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Err(ParseError::UnexpectedEnd);
        };

        match c {
            '^' | '$' => {
                self.bump();
                let kind = if c == '^' {
                    EdgeKind::Start
                } else {
                    EdgeKind::End
                };
                elements.push(self.push(NodeKind::EdgeAssertion { kind }, self.span_from(start)));
                Ok(Repeat::Forbidden)
            }
            '\\' if matches!(self.peek_nth(1), Some('b' | 'B')) => {
                self.bump();
                let negate = self.bump() == Some('B');
                elements.push(self.push(NodeKind::WordBoundary { negate }, self.span_from(start)));
                Ok(Repeat::Forbidden)
            }
            '(' if self.at("(?=") || self.at("(?!") || self.at("(?<=") || self.at("(?<!") => {
                self.parse_lookaround(elements)
            }
            '(' => {
                elements.push(self.parse_group()?);
                Ok(Repeat::Allowed)
            }
            '.' => {
                self.bump();
                let kind = NodeKind::CharacterSet(regast_core::CharacterSetKind::Any);
                elements.push(self.push(kind, self.span_from(start)));
                Ok(Repeat::Allowed)
            }
            '[' => {
                elements.push(self.parse_class()?);
                Ok(Repeat::Allowed)
            }
            '\\' => {
                self.parse_atom_escape(elements)?;
                Ok(Repeat::Allowed)
            }
            '*' | '+' | '?' => Err(ParseError::NothingToRepeat(start)),
            '{' if self.unicode() || self.looks_like_quantifier() => {
                Err(ParseError::NothingToRepeat(start))
            }
            '}' | ']' if self.unicode() => Err(ParseError::Unexpected {
                found: c,
                offset: start,
            }),
            _ => {
                self.bump();
                self.push_char(c as u32, self.span_from(start), elements);
                Ok(Repeat::Allowed)
            }
        }
    }

    fn parse_lookaround(&mut self, elements: &mut Vec<NodeId>) -> Result<Repeat> {
        let start = self.pos;
        self.eat_str("(?");
        let kind = if self.eat('<') {
            LookaroundKind::Lookbehind
        } else {
            LookaroundKind::Lookahead
        };
        let negate = self.bump() == Some('!');

        self.enter_nested()?;
        let alternatives = self.parse_disjunction()?;
        self.expect(')')?;
        self.exit_nested();

        let node = NodeKind::Lookaround {
            kind,
            negate,
            alternatives,
        };
        elements.push(self.push(node, self.span_from(start)));
        Ok(match kind {
            LookaroundKind::Lookahead => Repeat::LegacyLookahead,
            LookaroundKind::Lookbehind => Repeat::Forbidden,
        })
    }

    fn parse_group(&mut self) -> Result<NodeId> {
        let start = self.pos;
        self.bump();

        enum Shape {
            Plain,
            Capturing(Option<String>),
        }
        let shape = if self.eat_str("?:") {
            Shape::Plain
        } else if self.eat_str("?<") {
            Shape::Capturing(Some(self.parse_group_name()?))
        } else if self.peek() == Some('?') {
            return Err(self.unexpected());
        } else {
            Shape::Capturing(None)
        };

        self.enter_nested()?;
        let alternatives = self.parse_disjunction()?;
        self.expect(')')?;
        self.exit_nested();

        let kind = match shape {
            Shape::Plain => NodeKind::Group { alternatives },
            Shape::Capturing(name) => NodeKind::CapturingGroup { name, alternatives },
        };
        Ok(self.push(kind, self.span_from(start)))
    }

    /// Parses `name>` (the `<` is already consumed).
    pub(crate) fn parse_group_name(&mut self) -> Result<String> {
        let start = self.pos;
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '>' {
                break;
            }
            let valid = if name.is_empty() {
                c.is_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_alphanumeric() || c == '_' || c == '$'
            };
            if !valid {
                return Err(ParseError::InvalidGroupName(start));
            }
            name.push(c);
            self.bump();
        }
        if name.is_empty() || !self.eat('>') {
            return Err(ParseError::InvalidGroupName(start));
        }
        Ok(name)
    }

    /// Returns `(min, max)`; `max == None` means unbounded.
    fn parse_quantifier(&mut self) -> Result<Option<(u32, Option<u32>)>> {
        let start = self.pos;
        match self.peek() {
            Some('*') => {
                self.bump();
                Ok(Some((0, None)))
            }
            Some('+') => {
                self.bump();
                Ok(Some((1, None)))
            }
            Some('?') => {
                self.bump();
                Ok(Some((0, Some(1))))
            }
            Some('{') => {
                let Some((min, max)) = self.parse_braces() else {
                    if self.unicode() {
                        return Err(ParseError::Unexpected {
                            found: '{',
                            offset: start,
                        });
                    }
                    return Ok(None);
                };
                if max.is_some_and(|max| max < min) {
                    return Err(ParseError::QuantifierOutOfOrder(start));
                }
                Ok(Some((min, max)))
            }
            _ => Ok(None),
        }
    }

    fn looks_like_quantifier(&mut self) -> bool {
        let start = self.pos;
        let found = self.parse_braces().is_some();
        self.pos = start;
        found
    }

    /// `{n}`, `{n,}`, or `{n,m}`. Restores the position when the braces do not form a quantifier.
    fn parse_braces(&mut self) -> Option<(u32, Option<u32>)> {
        let start = self.pos;
        let parsed = (|| {
            if !self.eat('{') {
                return None;
            }
            let min = self.parse_decimal()?;
            let max = if self.eat(',') {
                if self.peek() == Some('}') {
                    None
                } else {
                    Some(self.parse_decimal()?)
                }
            } else {
                Some(min)
            };
            self.eat('}').then_some((min, max))
        })();
        if parsed.is_none() {
            self.pos = start;
        }
        parsed
    }

    /// Decimal digits, saturating at `u32::MAX`.
    pub(crate) fn parse_decimal(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.bump();
            let current = value.unwrap_or(0);
            value = Some(current.saturating_mul(10).saturating_add(digit));
        }
        value
    }
}
