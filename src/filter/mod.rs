//! Predicate pushdown: turns the qualifiers of a scan over an external
//! table into a compact filter string the external source evaluates
//! before rows cross the I/O boundary.
//!
//! The filter string is a postfix token run:
//!
//! ```text
//! filter-list := item (item)*
//! item        := attr-ref | const-val | attr-ref const-val op
//!              | const-val attr-ref op | attr-ref op
//! attr-ref    := "a" <decimal-int>
//! const-val   := "c" <decimal-typecode> "s" <decimal-length> "d" <raw-bytes-of-that-length>
//! op          := "o" <decimal-opcode>
//! ```
//!
//! e.g. `title = '1984' AND author IS NOT NULL` on the first two columns
//! is sent as `a0c25s4d1984o5a1o9o10`.

pub mod constant;
pub mod eval;
pub mod extract;
pub mod item;
pub mod parser;
pub mod serialize;

use log::{debug, trace};

use crate::catalog::operator::OperatorCode;
use crate::catalog::r#type::DataType;
use crate::catalog::TypeOutput;
use crate::config::Config;
use crate::error::Result;
use crate::filter::item::{enrich, ExpressionItem};
use crate::filter::serialize::serialize;
use crate::sql::expr::Expr;

/// One side of a binary filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOperand {
    /// 1-based column position
    Attribute(i32),
    /// A rendered constant together with its declared type
    Constant { typ: DataType, text: String },
}

impl FilterOperand {
    pub fn is_attribute(&self) -> bool {
        matches!(self, FilterOperand::Attribute(_))
    }
}

/// A single predicate the external source can evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDesc {
    /// `left op right`, with exactly one attribute and one constant side,
    /// in the order they appear in the qualifier.
    Binary { left: FilterOperand, right: FilterOperand, op: OperatorCode },
    /// `IS NULL` or `IS NOT NULL` on a column.
    NullTest { attno: i32, op: OperatorCode },
}

impl FilterDesc {
    /// Builds a binary filter, refusing operand pairs that aren't one
    /// attribute and one constant.
    pub fn binary(left: FilterOperand, right: FilterOperand, op: OperatorCode) -> Option<Self> {
        if left.is_attribute() == right.is_attribute() {
            return None;
        }
        Some(FilterDesc::Binary { left, right, op })
    }

    pub fn op(&self) -> OperatorCode {
        match self {
            FilterDesc::Binary { op, .. } | FilterDesc::NullTest { op, .. } => *op,
        }
    }
}

/// Builds the filter string for the qualifiers of one scan.
///
/// Qualifiers that don't have a pushdown eligible shape are left out, the
/// remaining ones are conjoined. A constant that can't be rendered fails
/// the whole build, leaving the caller to decide whether to scan without
/// a filter.
pub struct FilterBuilder<'a> {
    output: &'a dyn TypeOutput,
    enabled: bool,
}

impl<'a> FilterBuilder<'a> {
    pub fn new(output: &'a dyn TypeOutput) -> FilterBuilder<'a> {
        FilterBuilder { output, enabled: true }
    }

    pub fn with_config(output: &'a dyn TypeOutput, config: &Config) -> FilterBuilder<'a> {
        FilterBuilder { output, enabled: config.filter_pushdown }
    }

    /// Returns the filter string, or `None` when nothing can be pushed down.
    pub fn build(&self, quals: &[Expr]) -> Result<Option<String>> {
        if !self.enabled {
            debug!("Filter pushdown is disabled, skip {} qualifiers", quals.len());
            return Ok(None);
        }

        let mut items = ExpressionItem::from_quals(quals);
        for item in items.iter_mut() {
            item.derive(self.output)?;
        }
        let accepted: Vec<ExpressionItem> =
            items.into_iter().filter(|it| it.filter.is_some()).collect();
        if accepted.is_empty() {
            return Ok(None);
        }

        let items = enrich(accepted);
        let filter = serialize(self.output, &items)?;
        if let Some(filter) = &filter {
            trace!("Serialized {} filter items: {}", items.len(), filter);
        }
        Ok(filter)
    }
}
