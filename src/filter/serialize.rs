use std::fmt::Write;

use log::debug;

use crate::catalog::operator::OperatorCode;
use crate::catalog::TypeOutput;
use crate::error::Result;
use crate::filter::extract::extract;
use crate::filter::item::{ExpressionItem, ItemNode};
use crate::filter::{FilterDesc, FilterOperand};

pub const ATTR_CODE: char = 'a';
pub const CONST_CODE: char = 'c';
pub const SIZE_BYTES: char = 's';
pub const CONST_DATA: char = 'd';
pub const OPERATOR_CODE: char = 'o';

/// Serializes the items into one filter string, in list order.
///
/// Items are concatenated without separator, so a list of more than one
/// qualifier should be passed through [`enrich`](crate::filter::item::enrich)
/// first. Returns `Ok(None)` if any qualifier has no pushdown eligible
/// shape, as the AND markers around it would be left without an operand.
/// Callers wanting a partial pushdown drop such qualifiers before enriching.
pub fn serialize(
    output: &dyn TypeOutput,
    items: &[ExpressionItem<'_>],
) -> Result<Option<String>> {
    let mut buf = String::new();
    for item in items {
        match item.node {
            ItemNode::And => write_operator(&mut buf, OperatorCode::And),
            ItemNode::Qual(expr) if item.processed => match &item.filter {
                Some(filter) => write_filter(&mut buf, filter),
                None => {
                    debug!("Qualifier {} can't be pushed down, no filter", expr);
                    return Ok(None);
                }
            },
            ItemNode::Qual(expr) => match extract(output, expr)? {
                Some(filter) => write_filter(&mut buf, &filter),
                None => {
                    debug!("Qualifier {} can't be pushed down, no filter", expr);
                    return Ok(None);
                }
            },
        }
    }
    Ok(Some(buf))
}

/// Appends the postfix token run of a single filter.
pub fn write_filter(buf: &mut String, filter: &FilterDesc) {
    match filter {
        FilterDesc::Binary { left, right, op } => {
            write_operand(buf, left);
            write_operand(buf, right);
            write_operator(buf, *op);
        }
        FilterDesc::NullTest { attno, op } => {
            write_operand(buf, &FilterOperand::Attribute(*attno));
            write_operator(buf, *op);
        }
    }
}

// Writing into a String never fails.
fn write_operand(buf: &mut String, operand: &FilterOperand) {
    match operand {
        // column positions are 0-based on the wire
        FilterOperand::Attribute(attno) => {
            let _ = write!(buf, "{}{}", ATTR_CODE, attno - 1);
        }
        FilterOperand::Constant { typ, text } => {
            let _ = write!(
                buf,
                "{}{}{}{}{}{}",
                CONST_CODE,
                typ.oid(),
                SIZE_BYTES,
                text.len(),
                CONST_DATA,
                text
            );
        }
    }
}

fn write_operator(buf: &mut String, op: OperatorCode) {
    let _ = write!(buf, "{}{}", OPERATOR_CODE, op.code());
}
