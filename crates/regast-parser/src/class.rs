//! Character classes: `[…]`, and the unicodeSets `[…&&…]` / `[…--…]` forms.

use regast_core::{CharacterSetKind, NodeId, NodeKind, Span};

use crate::core::Parser;
use crate::escape::ClassEscape;
use crate::{ParseError, Result};

/// A class member before it becomes a node.
enum ClassAtom {
    /// One code point, or two UTF-16 code units for astral characters in legacy mode.
    Chars { units: Vec<u32>, span: Span },
    Set { kind: CharacterSetKind, span: Span },
}

/// An operand of a unicodeSets class.
enum SetOperand {
    Char { value: u32, span: Span },
    Set { kind: CharacterSetKind, span: Span },
    Class(NodeId),
}

impl Parser<'_> {
    pub(crate) fn parse_class(&mut self) -> Result<NodeId> {
        if self.flags.unicode_sets {
            return self.parse_set_class();
        }

        let start = self.pos;
        self.bump();
        let negate = self.eat('^');

        let mut elements = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnexpectedEnd),
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            let left = self.parse_class_atom()?;
            let is_range = self.peek() == Some('-') && self.peek_nth(1).is_some_and(|c| c != ']');
            if !is_range {
                self.push_class_atom(left, &mut elements);
                continue;
            }

            let dash = self.pos;
            self.bump();
            let right = self.parse_class_atom()?;
            match (left, right) {
                (
                    ClassAtom::Chars {
                        units: left,
                        span: left_span,
                    },
                    ClassAtom::Chars {
                        units: right,
                        span: right_span,
                    },
                ) => {
                    self.push_range(&left, left_span, &right, right_span, &mut elements)?;
                }
                (left, right) => {
                    if self.unicode() {
                        return Err(ParseError::Unexpected {
                            found: '-',
                            offset: dash,
                        });
                    }
                    self.push_class_atom(left, &mut elements);
                    let kind = NodeKind::Character { value: '-' as u32 };
                    elements.push(self.push(kind, Span::new(dash, dash + 1)));
                    self.push_class_atom(right, &mut elements);
                }
            }
        }

        let kind = NodeKind::CharacterClass { negate, elements };
        Ok(self.push(kind, self.span_from(start)))
    }

    fn parse_class_atom(&mut self) -> Result<ClassAtom> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(ParseError::UnexpectedEnd);
        };
        if c != '\\' {
            let units = self.code_units(c as u32);
            return Ok(ClassAtom::Chars {
                units,
                span: self.span_from(start),
            });
        }

        match self.parse_class_escape(start, true)? {
            ClassEscape::Char(value) => Ok(ClassAtom::Chars {
                units: self.code_units(value),
                span: self.span_from(start),
            }),
            ClassEscape::Set(kind) => Ok(ClassAtom::Set {
                kind,
                span: self.span_from(start),
            }),
        }
    }

    fn push_class_atom(&mut self, atom: ClassAtom, elements: &mut Vec<NodeId>) {
        match atom {
            ClassAtom::Chars { units, span } => {
                for value in units {
                    elements.push(self.push(NodeKind::Character { value }, span));
                }
            }
            ClassAtom::Set { kind, span } => {
                elements.push(self.push(NodeKind::CharacterSet(kind), span));
            }
        }
    }

    /// A range spans the code units adjacent to the dash; leftover surrogate
    /// halves stay single characters.
    fn push_range(
        &mut self,
        left: &[u32],
        left_span: Span,
        right: &[u32],
        right_span: Span,
        elements: &mut Vec<NodeId>,
    ) -> Result<()> {
        let (Some((&min, left_rest)), Some((&max, right_rest))) =
            (left.split_last(), right.split_first())
        else {
            return Err(ParseError::UnexpectedEnd);
        };
        if min > max {
            return Err(ParseError::RangeOutOfOrder(left_span.start));
        }

        for &value in left_rest {
            elements.push(self.push(NodeKind::Character { value }, left_span));
        }
        let span = Span::new(left_span.start, right_span.end);
        elements.push(self.push(NodeKind::CharacterClassRange { min, max }, span));
        for &value in right_rest {
            elements.push(self.push(NodeKind::Character { value }, right_span));
        }
        Ok(())
    }

    fn parse_set_class(&mut self) -> Result<NodeId> {
        let start = self.pos;
        self.bump();
        self.enter_nested()?;
        let negate = self.eat('^');

        let mut elements = Vec::new();
        if !self.at("]") {
            let first_start = self.pos;
            let first = self.parse_set_operand()?;

            if self.at("&&") || self.at("--") {
                let operator = if self.at("&&") { "&&" } else { "--" };
                let mut left = self.push_set_operand(first);
                while self.eat_str(operator) {
                    let operand = self.parse_set_operand()?;
                    let right = self.push_set_operand(operand);
                    let operands = [left, right];
                    let kind = if operator == "&&" {
                        NodeKind::ClassIntersection { operands }
                    } else {
                        NodeKind::ClassSubtraction { operands }
                    };
                    left = self.push(kind, self.span_from(first_start));
                }
                if !self.at("]") {
                    return Err(self.unexpected());
                }
                elements.push(left);
            } else {
                self.push_union_operand(first, &mut elements)?;
                while !self.at("]") {
                    if self.eof() {
                        return Err(ParseError::UnexpectedEnd);
                    }
                    let operand = self.parse_set_operand()?;
                    self.push_union_operand(operand, &mut elements)?;
                }
            }
        }

        self.expect(']')?;
        self.exit_nested();
        let kind = NodeKind::CharacterClass { negate, elements };
        Ok(self.push(kind, self.span_from(start)))
    }

    fn parse_set_operand(&mut self) -> Result<SetOperand> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Err(ParseError::UnexpectedEnd);
        };

        match c {
            '[' => Ok(SetOperand::Class(self.parse_set_class()?)),
            '\\' if self.at("\\q{") => Err(ParseError::Unsupported {
                what: "class string disjunction",
                offset: start,
            }),
            '\\' => {
                self.bump();
                match self.parse_class_escape(start, true)? {
                    ClassEscape::Char(value) => Ok(SetOperand::Char {
                        value,
                        span: self.span_from(start),
                    }),
                    ClassEscape::Set(kind) => Ok(SetOperand::Set {
                        kind,
                        span: self.span_from(start),
                    }),
                }
            }
            '(' | ')' | '{' | '}' | '/' | '|' | '-' | ']' => Err(self.unexpected()),
            _ if self.at("&&") => Err(self.unexpected()),
            _ => {
                self.bump();
                Ok(SetOperand::Char {
                    value: c as u32,
                    span: self.span_from(start),
                })
            }
        }
    }

    fn push_set_operand(&mut self, operand: SetOperand) -> NodeId {
        match operand {
            SetOperand::Char { value, span } => self.push(NodeKind::Character { value }, span),
            SetOperand::Set { kind, span } => self.push(NodeKind::CharacterSet(kind), span),
            SetOperand::Class(id) => id,
        }
    }

    fn push_union_operand(
        &mut self,
        operand: SetOperand,
        elements: &mut Vec<NodeId>,
    ) -> Result<()> {
        let SetOperand::Char {
            value: min,
            span: left_span,
        } = operand
        else {
            elements.push(self.push_set_operand(operand));
            return Ok(());
        };

        if !self.at("-") || self.at("--") {
            elements.push(self.push(NodeKind::Character { value: min }, left_span));
            return Ok(());
        }

        self.bump();
        let SetOperand::Char {
            value: max,
            span: right_span,
        } = self.parse_set_operand()?
        else {
            return Err(ParseError::Unexpected {
                found: '-',
                offset: left_span.end,
            });
        };
        if min > max {
            return Err(ParseError::RangeOutOfOrder(left_span.start));
        }
        let span = Span::new(left_span.start, right_span.end);
        elements.push(self.push(NodeKind::CharacterClassRange { min, max }, span));
        Ok(())
    }
}
