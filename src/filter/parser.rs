//! Decoding of filter strings, as done by the external source before it
//! evaluates a pushed down filter against its rows.

use std::fmt::{Display, Formatter};

use crate::catalog::operator::OperatorCode;
use crate::catalog::r#type::DataType;
use crate::error::{Error, Result};
use crate::filter::constant::NULL_CONSTANT;
use crate::filter::serialize::{ATTR_CODE, CONST_CODE, CONST_DATA, OPERATOR_CODE, SIZE_BYTES};
use crate::parse_err;

/// A scalar operand of a decoded comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// 0-based column index
    Column(usize),
    Constant { typ: DataType, text: String },
}

/// A decoded filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Compare { left: Operand, op: OperatorCode, right: Operand },
    IsNull(usize),
    IsNotNull(usize),
    And(Box<Filter>, Box<Filter>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Column(usize),
    Constant { typ: DataType, text: String },
    Operator(OperatorCode),
}

/// Splits a filter string into its tokens.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Consumes the expected tag char or fails.
    fn expect(&mut self, tag: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == tag as u8 => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(parse_err!(
                "Expected '{}' at position {}, found '{}'",
                tag,
                self.pos,
                c as char
            )),
            None => {
                Err(parse_err!("Expected '{}' at position {}, found end of filter", tag, self.pos))
            }
        }
    }

    /// Consumes consecutive ascii digits as a decimal number.
    fn scan_number(&mut self, what: &str) -> Result<usize> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(parse_err!("Expected {} at position {}", what, start));
        }
        Ok(self.input[start..self.pos].parse::<usize>()?)
    }

    /// Scans `c<typecode>s<length>d<bytes>`, the leading tag already consumed.
    fn scan_constant(&mut self) -> Result<Token> {
        let typ = u32::try_from(self.scan_number("type code")?)
            .map_err(|err| Error::parse(err.to_string()))?;
        self.expect(SIZE_BYTES)?;
        let len = self.scan_number("constant length")?;
        self.expect(CONST_DATA)?;
        let end = self.pos.checked_add(len).filter(|end| *end <= self.input.len()).ok_or_else(
            || parse_err!("Constant of {} bytes at position {} exceeds the filter", len, self.pos),
        )?;
        let text = self
            .input
            .get(self.pos..end)
            .ok_or_else(|| parse_err!("Constant at position {} splits a character", self.pos))?;
        self.pos = end;
        Ok(Token::Constant { typ: DataType::from_oid(typ), text: text.to_string() })
    }

    fn scan(&mut self) -> Result<Option<Token>> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        self.pos += 1;
        let token = match c as char {
            ATTR_CODE => Token::Column(self.scan_number("column index")?),
            CONST_CODE => self.scan_constant()?,
            OPERATOR_CODE => {
                let code = self.scan_number("operator code")?;
                let op = u32::try_from(code)
                    .ok()
                    .and_then(OperatorCode::from_code)
                    .ok_or_else(|| parse_err!("Unknown operator code {}", code))?;
                Token::Operator(op)
            }
            other => {
                let pos = self.pos - 1;
                return Err(parse_err!("Unexpected character '{}' at position {}", other, pos));
            }
        };
        Ok(Some(token))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        let token = self.scan().transpose();
        if matches!(token, Some(Err(_))) {
            // no way to resync after a malformed token
            self.pos = self.input.len();
        }
        token
    }
}

enum StackItem {
    Operand(Operand),
    Filter(Filter),
}

/// Parses a filter string into a filter tree, evaluating the postfix token
/// run on an operand stack.
pub fn parse_filter(input: &str) -> Result<Filter> {
    let mut stack: Vec<StackItem> = Vec::new();
    for token in Lexer::new(input) {
        let item = match token? {
            Token::Column(idx) => StackItem::Operand(Operand::Column(idx)),
            Token::Constant { typ, text } => StackItem::Operand(Operand::Constant { typ, text }),
            Token::Operator(op) => StackItem::Filter(reduce(&mut stack, op)?),
        };
        stack.push(item);
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(StackItem::Filter(filter)), true) => Ok(filter),
        (None, _) => Err(Error::parse("Empty filter")),
        (Some(StackItem::Operand(_)), true) => Err(Error::parse("Filter has no operator")),
        (Some(_), false) => Err(parse_err!("Filter leaves {} unconsumed items", stack.len() + 1)),
    }
}

fn reduce(stack: &mut Vec<StackItem>, op: OperatorCode) -> Result<Filter> {
    if stack.len() < op.arity() {
        let (arity, got) = (op.arity(), stack.len());
        return Err(parse_err!("Operator {} needs {} operands, got {}", op, arity, got));
    }
    let mut args = stack.split_off(stack.len() - op.arity());
    let filter = match op {
        OperatorCode::And => match (args.pop(), args.pop()) {
            (Some(StackItem::Filter(right)), Some(StackItem::Filter(left))) => {
                Filter::And(Box::new(left), Box::new(right))
            }
            _ => return Err(Error::parse("AND expects two filters")),
        },
        OperatorCode::IsNull | OperatorCode::IsNotNull => match args.pop() {
            Some(StackItem::Operand(Operand::Column(idx))) if op == OperatorCode::IsNull => {
                Filter::IsNull(idx)
            }
            Some(StackItem::Operand(Operand::Column(idx))) => Filter::IsNotNull(idx),
            _ => return Err(parse_err!("{} expects a column", op)),
        },
        _ => match (args.pop(), args.pop()) {
            (Some(StackItem::Operand(right)), Some(StackItem::Operand(left)))
                if matches!(left, Operand::Column(_)) != matches!(right, Operand::Column(_)) =>
            {
                Filter::Compare { left, op, right }
            }
            _ => return Err(parse_err!("Operator {} expects a column and a constant", op)),
        },
    };
    Ok(filter)
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Column(idx) => write!(f, "#{}", idx),
            Operand::Constant { text, .. } if text == NULL_CONSTANT => f.write_str("NULL"),
            Operand::Constant { typ, text } if typ.is_numeric() || *typ == DataType::Bool => {
                f.write_str(text)
            }
            Operand::Constant { text, .. } => write!(f, "'{}'", text.replace('\'', "''")),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Compare { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Filter::IsNull(idx) => write!(f, "#{} IS NULL", idx),
            Filter::IsNotNull(idx) => write!(f, "#{} IS NOT NULL", idx),
            Filter::And(lhs, rhs) => write!(f, "{} AND {}", lhs, rhs),
        }
    }
}
