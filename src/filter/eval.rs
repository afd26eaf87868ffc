use std::cmp::Ordering;

use regex::Regex;

use crate::catalog::operator::OperatorCode;
use crate::catalog::r#type::{DataType, Value};
use crate::error::Result;
use crate::filter::constant::NULL_CONSTANT;
use crate::filter::parser::{Filter, Operand};
use crate::value_err;

impl Operand {
    /// Resolves the operand against a row.
    pub fn value(&self, row: &[Value]) -> Result<Value> {
        match self {
            Operand::Column(idx) => row.get(*idx).cloned().ok_or_else(|| {
                value_err!("Column #{} is out of range for a row of {}", idx, row.len())
            }),
            Operand::Constant { typ, text } => constant_value(*typ, text),
        }
    }
}

/// Coerces the wire text of a constant back into a value of its type.
fn constant_value(typ: DataType, text: &str) -> Result<Value> {
    if text == NULL_CONSTANT {
        return Ok(Value::Null);
    }
    let value = match typ {
        DataType::Int2 | DataType::Int4 | DataType::Int8 => Value::Integer(text.parse()?),
        DataType::Float4 | DataType::Float8 | DataType::Numeric => Value::Float(text.parse()?),
        DataType::Bool => match text {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            other => return Err(value_err!("Invalid boolean constant {}", other)),
        },
        DataType::Other(oid) => return Err(value_err!("Can't evaluate constant of type {}", oid)),
        _ => Value::String(text.to_string()),
    };
    Ok(value)
}

impl Filter {
    /// Evaluates the filter against a row with SQL three-valued logic,
    /// `None` standing for unknown.
    pub fn evaluate(&self, row: &[Value]) -> Result<Option<bool>> {
        let ans = match self {
            Filter::IsNull(idx) => Some(Operand::Column(*idx).value(row)?.is_null()),
            Filter::IsNotNull(idx) => Some(!Operand::Column(*idx).value(row)?.is_null()),
            Filter::And(lhs, rhs) => match (lhs.evaluate(row)?, rhs.evaluate(row)?) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Filter::Compare { left, op, right } => {
                let (lhs, rhs) = (left.value(row)?, right.value(row)?);
                if lhs.is_null() || rhs.is_null() {
                    return Ok(None);
                }
                Some(compare(&lhs, *op, &rhs)?)
            }
        };
        Ok(ans)
    }
}

fn compare(lhs: &Value, op: OperatorCode, rhs: &Value) -> Result<bool> {
    if op == OperatorCode::Like {
        return like(lhs, rhs);
    }
    let ordering =
        lhs.partial_cmp(rhs).ok_or_else(|| value_err!("Can't compare {} and {}", lhs, rhs))?;
    let ans = match op {
        OperatorCode::Eq => ordering == Ordering::Equal,
        OperatorCode::Ne => ordering != Ordering::Equal,
        OperatorCode::Lt => ordering == Ordering::Less,
        OperatorCode::Le => ordering != Ordering::Greater,
        OperatorCode::Gt => ordering == Ordering::Greater,
        OperatorCode::Ge => ordering != Ordering::Less,
        other => return Err(value_err!("{} is not a comparison", other)),
    };
    Ok(ans)
}

fn like(lhs: &Value, rhs: &Value) -> Result<bool> {
    match (lhs, rhs) {
        (Value::String(lhs), Value::String(rhs)) => {
            let pattern = regex::escape(rhs).replace('%', ".*").replace('_', ".");
            // `%` spans newlines too
            let pattern = format!("(?s)^{}$", pattern);
            Ok(Regex::new(&pattern)?.is_match(lhs))
        }
        (lhs, rhs) => Err(value_err!("Can't LIKE {} and {}", lhs, rhs)),
    }
}
