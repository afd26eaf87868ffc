use crate::catalog::TypeOutput;
use crate::error::Result;
use crate::filter::extract::extract;
use crate::filter::FilterDesc;
use crate::sql::expr::Expr;

/// What an [`ExpressionItem`] stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemNode<'a> {
    /// A qualifier owned by the caller
    Qual(&'a Expr),
    /// A synthetic binary AND joining the two preceding operands
    And,
}

/// An entry of the flat qualifier list the serializer walks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionItem<'a> {
    pub node: ItemNode<'a>,
    /// Whether the filter of this item has been derived already
    pub processed: bool,
    /// Position of the AND marker that consumes this item, if any
    pub parent: Option<usize>,
    pub filter: Option<FilterDesc>,
}

impl<'a> ExpressionItem<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        ExpressionItem { node: ItemNode::Qual(expr), processed: false, parent: None, filter: None }
    }

    pub fn and_marker() -> Self {
        ExpressionItem { node: ItemNode::And, processed: true, parent: None, filter: None }
    }

    /// One item per top-level qualifier, in order.
    pub fn from_quals(quals: &'a [Expr]) -> Vec<Self> {
        quals.iter().map(ExpressionItem::new).collect()
    }

    pub fn is_and_marker(&self) -> bool {
        self.node == ItemNode::And
    }

    /// Derives and keeps the filter of this item, once.
    pub fn derive(&mut self, output: &dyn TypeOutput) -> Result<Option<&FilterDesc>> {
        if !self.processed {
            if let ItemNode::Qual(expr) = self.node {
                self.filter = extract(output, expr)?;
            }
            self.processed = true;
        }
        Ok(self.filter.as_ref())
    }
}

/// Makes the implicit conjunction of the items explicit.
///
/// N items become the postfix run `i1 i2 AND i3 AND ... iN AND` of 2N-1
/// items; a list of at most one item is returned as is.
pub fn enrich(items: Vec<ExpressionItem<'_>>) -> Vec<ExpressionItem<'_>> {
    if items.len() <= 1 {
        return items;
    }
    let n = items.len();
    let mut out = Vec::with_capacity(2 * n - 1);
    for (i, mut item) in items.into_iter().enumerate() {
        // the marker joining item i lands right after it, except for the
        // first item which shares the marker of the second one.
        let marker = if i == 0 { 2 } else { 2 * i };
        item.parent = Some(marker);
        out.push(item);
        if i > 0 {
            let mut and = ExpressionItem::and_marker();
            if i + 1 < n {
                and.parent = Some(2 * i + 2);
            }
            out.push(and);
        }
    }
    out
}
