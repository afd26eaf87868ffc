use std::fmt::{Display, Formatter};

use crate::catalog::r#type::{DataType, Datum, Oid};

/// Qualifier expressions as handed over by the planner, already resolved
/// against the catalog.
///
/// For example the qualifier `title = '1984'` on the first column will be
/// represented as
///
///```text
///  OpExpr {
///    opno: 98,
///    args: [Expr::Var(Var { vartype: Text, attno: 1 }),
///           Expr::Const(Const { consttype: Text, value: Some(Datum::Text("1984")) })]
/// }
///```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A column reference
    Var(Var),
    /// A literal constant
    Const(Const),
    /// An operator invocation, such as `a < 1`
    OpExpr(OpExpr),
    /// `IS NULL` or `IS NOT NULL`
    NullTest(NullTest),
    /// AND, OR or NOT over other expressions
    BoolExpr(BoolExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Var {
    pub vartype: DataType,
    /// 1-based column position
    pub attno: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Const {
    pub consttype: DataType,
    /// `None` for the NULL constant
    pub value: Option<Datum>,
}

impl Const {
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OpExpr {
    pub opno: Oid,
    pub args: Vec<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullTestType {
    IsNull,
    IsNotNull,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NullTest {
    pub arg: Box<Expr>,
    pub kind: NullTestType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolExprType {
    And,
    Or,
    Not,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoolExpr {
    pub op: BoolExprType,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn var(vartype: DataType, attno: i32) -> Expr {
        Expr::Var(Var { vartype, attno })
    }

    pub fn constant(consttype: DataType, value: Datum) -> Expr {
        Expr::Const(Const { consttype, value: Some(value) })
    }

    pub fn null(consttype: DataType) -> Expr {
        Expr::Const(Const { consttype, value: None })
    }

    pub fn op(opno: Oid, left: Expr, right: Expr) -> Expr {
        Expr::OpExpr(OpExpr { opno, args: vec![left, right] })
    }

    pub fn is_null(arg: Expr) -> Expr {
        Expr::NullTest(NullTest { arg: Box::new(arg), kind: NullTestType::IsNull })
    }

    pub fn is_not_null(arg: Expr) -> Expr {
        Expr::NullTest(NullTest { arg: Box::new(arg), kind: NullTestType::IsNotNull })
    }

    pub fn and(args: Vec<Expr>) -> Expr {
        Expr::BoolExpr(BoolExpr { op: BoolExprType::And, args })
    }

    pub fn or(args: Vec<Expr>) -> Expr {
        Expr::BoolExpr(BoolExpr { op: BoolExprType::Or, args })
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(Var { attno, .. }) => write!(f, "#{}", attno),
            Expr::Const(Const { value: None, .. }) => f.write_str("NULL"),
            Expr::Const(Const { consttype, value: Some(datum) }) => {
                write!(f, "{:?}::{}", datum, consttype)
            }
            Expr::OpExpr(OpExpr { opno, args }) => match args.as_slice() {
                [lhs, rhs] => write!(f, "{} op({}) {}", lhs, opno, rhs),
                _ => write!(f, "op({})({} args)", opno, args.len()),
            },
            Expr::NullTest(NullTest { arg, kind: NullTestType::IsNull }) => {
                write!(f, "{} IS NULL", arg)
            }
            Expr::NullTest(NullTest { arg, kind: NullTestType::IsNotNull }) => {
                write!(f, "{} IS NOT NULL", arg)
            }
            Expr::BoolExpr(BoolExpr { op: BoolExprType::Not, args }) => match args.as_slice() {
                [arg] => write!(f, "NOT {}", arg),
                _ => f.write_str("NOT (...)"),
            },
            Expr::BoolExpr(BoolExpr { op, args }) => {
                let sep = if *op == BoolExprType::And { " AND " } else { " OR " };
                let parts: Vec<String> = args.iter().map(|it| it.to_string()).collect();
                write!(f, "({})", parts.join(sep))
            }
        }
    }
}
