use log::debug;

use crate::catalog::operator::{lookup_operator, OperatorCode};
use crate::catalog::TypeOutput;
use crate::error::Result;
use crate::filter::constant::render_constant;
use crate::filter::{FilterDesc, FilterOperand};
use crate::sql::expr::{Const, Expr, NullTest, NullTestType, OpExpr, Var};

/// Derives the filter for a single qualifier.
///
/// Returns `Ok(None)` when the qualifier doesn't have a shape the external
/// source can evaluate. Errors only come from rendering the constant of an
/// otherwise eligible comparison.
pub fn extract(output: &dyn TypeOutput, expr: &Expr) -> Result<Option<FilterDesc>> {
    match expr {
        Expr::NullTest(test) => Ok(null_test_to_filter(test)),
        Expr::OpExpr(op) => op_expr_to_filter(output, op),
        _ => {
            debug!("Qualifier {} is not a comparison or a null test", expr);
            Ok(None)
        }
    }
}

fn null_test_to_filter(test: &NullTest) -> Option<FilterDesc> {
    let Expr::Var(var) = test.arg.as_ref() else {
        debug!("Null test on a non column expression {}", test.arg);
        return None;
    };
    if !is_eligible_var(var) {
        return None;
    }
    let op = match test.kind {
        NullTestType::IsNull => OperatorCode::IsNull,
        NullTestType::IsNotNull => OperatorCode::IsNotNull,
    };
    Some(FilterDesc::NullTest { attno: var.attno, op })
}

fn op_expr_to_filter(output: &dyn TypeOutput, expr: &OpExpr) -> Result<Option<FilterDesc>> {
    let [left, right] = expr.args.as_slice() else {
        debug!("Operator {} with {} arguments can't be pushed down", expr.opno, expr.args.len());
        return Ok(None);
    };
    let (var, constant, const_first) = match (left, right) {
        (Expr::Var(var), Expr::Const(constant)) => (var, constant, false),
        (Expr::Const(constant), Expr::Var(var)) => (var, constant, true),
        _ => {
            debug!("Operator {} needs exactly one column and one constant", expr.opno);
            return Ok(None);
        }
    };
    if !is_eligible_var(var) {
        return Ok(None);
    }
    let Some(op) = lookup_operator(expr.opno) else {
        debug!("Operator {} is not supported by the external source", expr.opno);
        return Ok(None);
    };

    let attr = FilterOperand::Attribute(var.attno);
    let constant = const_operand(output, constant)?;
    let (left, right) = if const_first { (constant, attr) } else { (attr, constant) };
    Ok(FilterDesc::binary(left, right, op))
}

fn const_operand(output: &dyn TypeOutput, constant: &Const) -> Result<FilterOperand> {
    let text = render_constant(output, constant)?;
    Ok(FilterOperand::Constant { typ: constant.consttype, text })
}

fn is_eligible_var(var: &Var) -> bool {
    if var.attno < 1 {
        debug!("Column #{} is not a user column", var.attno);
        return false;
    }
    if !var.vartype.is_supported() {
        debug!("Column #{} of type {} can't be pushed down", var.attno, var.vartype);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::operator::SUPPORTED_OPERATORS;
    use crate::catalog::r#type::{DataType, Datum, SUPPORTED_TYPES};
    use crate::catalog::PgTypeOutput;
    use crate::error::Error;
    use crate::filter::constant::NULL_CONSTANT;

    fn attr(attno: i32) -> FilterOperand {
        FilterOperand::Attribute(attno)
    }

    fn cons(typ: DataType, text: &str) -> FilterOperand {
        FilterOperand::Constant { typ, text: text.to_string() }
    }

    fn int2(value: i64) -> Expr {
        Expr::constant(DataType::Int2, Datum::Int(value))
    }

    #[test]
    fn test_no_arguments() -> Result<()> {
        let expr = Expr::OpExpr(OpExpr { opno: 94, args: vec![] });
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_unary_op_expr() -> Result<()> {
        let expr = Expr::OpExpr(OpExpr { opno: 94, args: vec![Expr::var(DataType::Int2, 1)] });
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_int_gt() -> Result<()> {
        // int2gt
        let expr = Expr::op(520, Expr::var(DataType::Int2, 1), int2(1984));
        let expected = FilterDesc::Binary {
            left: attr(1),
            right: cons(DataType::Int2, "1984"),
            op: OperatorCode::Gt,
        };
        assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected));
        Ok(())
    }

    #[test]
    fn test_all_supported_operators() -> Result<()> {
        for (dbop, code) in SUPPORTED_OPERATORS {
            let expr = Expr::op(*dbop, Expr::var(DataType::Int2, 1), int2(1984));
            let expected = FilterDesc::Binary {
                left: attr(1),
                right: cons(DataType::Int2, "1984"),
                op: *code,
            };
            assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected), "operator {}", dbop);

            let expr = Expr::op(*dbop, int2(1984), Expr::var(DataType::Int2, 1));
            let expected = FilterDesc::Binary {
                left: cons(DataType::Int2, "1984"),
                right: attr(1),
                op: *code,
            };
            assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected), "operator {}", dbop);
        }
        Ok(())
    }

    #[test]
    fn test_all_supported_types() -> Result<()> {
        for typ in SUPPORTED_TYPES {
            let expr = Expr::op(94, Expr::var(typ, 2), Expr::constant(typ, Datum::Raw("x".into())));
            let desc = extract(&PgTypeOutput, &expr)?.unwrap();
            let FilterDesc::Binary { right: FilterOperand::Constant { typ: ctyp, .. }, .. } = desc
            else {
                panic!("Expect a constant on the right for {}", typ);
            };
            assert_eq!(ctyp, typ);
        }
        Ok(())
    }

    #[test]
    fn test_attribute_equals_null() -> Result<()> {
        // int2eq
        let expr = Expr::op(94, Expr::var(DataType::Int2, 1), Expr::null(DataType::Int2));
        let expected = FilterDesc::Binary {
            left: attr(1),
            right: cons(DataType::Int2, NULL_CONSTANT),
            op: OperatorCode::Eq,
        };
        assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected));
        Ok(())
    }

    #[test]
    fn test_attribute_is_null() -> Result<()> {
        let expr = Expr::is_null(Expr::var(DataType::Int2, 1));
        let expected = FilterDesc::NullTest { attno: 1, op: OperatorCode::IsNull };
        assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected));

        let expr = Expr::is_not_null(Expr::var(DataType::Text, 7));
        let expected = FilterDesc::NullTest { attno: 7, op: OperatorCode::IsNotNull };
        assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected));

        let expr = Expr::is_null(int2(1));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_different_types() -> Result<()> {
        // int28lt, constant first
        let expr = Expr::op(
            1864,
            Expr::constant(DataType::Int8, Datum::Int(13)),
            Expr::var(DataType::Int2, 3),
        );
        let expected = FilterDesc::Binary {
            left: cons(DataType::Int8, "13"),
            right: attr(3),
            op: OperatorCode::Lt,
        };
        assert_eq!(extract(&PgTypeOutput, &expr)?, Some(expected));
        Ok(())
    }

    #[test]
    fn test_unsupported_type_circle() -> Result<()> {
        let circle = DataType::Other(DataType::CIRCLE_OID);
        let expr = Expr::op(0, Expr::null(circle), Expr::var(circle, 8));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);

        // supported column and operator, but the constant can't be rendered
        let expr = Expr::op(
            98,
            Expr::var(DataType::Text, 8),
            Expr::constant(circle, Datum::Raw("<3,3,9>".into())),
        );
        assert_eq!(
            extract(&PgTypeOutput, &expr),
            Err(Error::UnsupportedType { typ: 718, value: "<3,3,9>".to_string() })
        );
        Ok(())
    }

    #[test]
    fn test_two_vars() -> Result<()> {
        let expr = Expr::op(0, Expr::var(DataType::Int4, 8), Expr::var(DataType::Int4, 9));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        let expr = Expr::op(96, Expr::var(DataType::Int4, 8), Expr::var(DataType::Int4, 9));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_two_consts() -> Result<()> {
        let expr = Expr::op(94, int2(1), int2(2));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_unsupported_op_not() -> Result<()> {
        // int2not
        let expr = Expr::op(
            1877,
            Expr::constant(DataType::Int2, Datum::Raw("not".into())),
            Expr::var(DataType::Int2, 3),
        );
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_system_column() -> Result<()> {
        let expr = Expr::op(94, Expr::var(DataType::Int2, 0), int2(1));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        let expr = Expr::is_null(Expr::var(DataType::Int2, -1));
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }

    #[test]
    fn test_bool_expr() -> Result<()> {
        let expr = Expr::and(vec![
            Expr::is_null(Expr::var(DataType::Int2, 1)),
            Expr::is_null(Expr::var(DataType::Int2, 2)),
        ]);
        assert_eq!(extract(&PgTypeOutput, &expr)?, None);
        Ok(())
    }
}
