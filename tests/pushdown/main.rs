use filterpush::catalog::operator::{TEXT_EQUAL_OPERATOR, TEXT_LIKE_OPERATOR};
use filterpush::catalog::r#type::{DataType, Datum, Value};
use filterpush::catalog::{PgTypeOutput, TypeOutput};
use filterpush::error::{Error, Result};
use filterpush::filter::parser::parse_filter;
use filterpush::filter::FilterBuilder;
use filterpush::sql::expr::Expr;

macro_rules! setup {
    ($output:ident) => {
        let _ = env_logger::builder().is_test(true).try_init();
        let $output = PgTypeOutput;
    };
}

fn text_qual(attno: i32, value: &str, opno: u32) -> Expr {
    Expr::op(
        opno,
        Expr::var(DataType::Text, attno),
        Expr::constant(DataType::Text, Datum::Text(value.to_string())),
    )
}

fn books() -> Vec<Vec<Value>> {
    let book = |title: &str, author: Option<&str>, pages: i64| {
        vec![
            Value::String(title.to_string()),
            author.map(|it| Value::String(it.to_string())).unwrap_or(Value::Null),
            Value::Integer(pages),
        ]
    };
    vec![
        book("1984", Some("George Orwell"), 328),
        book("Animal Farm", Some("George Orwell"), 112),
        book("Brave New World", Some("Aldous Huxley"), 311),
        book("Beowulf", None, 90),
    ]
}

/// Builds the filter for the qualifiers, decodes it the way the external
/// source does and returns the titles of the rows it keeps.
fn pushdown(output: &dyn TypeOutput, quals: &[Expr]) -> Result<(String, Vec<String>)> {
    let filter = FilterBuilder::new(output)
        .build(quals)?
        .ok_or_else(|| Error::value("Nothing to push down"))?;
    let decoded = parse_filter(&filter)?;
    let mut titles = vec![];
    for row in books() {
        if decoded.evaluate(&row)? == Some(true) {
            titles.push(row[0].to_string());
        }
    }
    Ok((filter, titles))
}

#[test]
fn push_single_comparison() -> Result<()> {
    setup!(output);
    let (filter, titles) = pushdown(&output, &[text_qual(1, "1984", TEXT_EQUAL_OPERATOR)])?;
    assert_eq!(filter, "a0c25s4d1984o5");
    assert_eq!(titles, vec!["'1984'"]);
    Ok(())
}

#[test]
fn push_conjunction() -> Result<()> {
    setup!(output);
    let quals = vec![
        text_qual(2, "George Orwell", TEXT_EQUAL_OPERATOR),
        // int48lt, constant first: 200 < pages
        Expr::op(
            37,
            Expr::constant(DataType::Int4, Datum::Int(200)),
            Expr::var(DataType::Int8, 3),
        ),
    ];
    let (filter, titles) = pushdown(&output, &quals)?;
    assert_eq!(filter, "a1c25s13dGeorge Orwello5c23s3d200a2o1o10");
    assert_eq!(titles, vec!["'1984'"]);
    Ok(())
}

#[test]
fn push_like_and_null_tests() -> Result<()> {
    setup!(output);
    let quals = vec![
        text_qual(1, "B%", TEXT_LIKE_OPERATOR),
        Expr::is_null(Expr::var(DataType::Text, 2)),
    ];
    let (filter, titles) = pushdown(&output, &quals)?;
    assert_eq!(filter, "a0c25s2dB%o7a1o8o10");
    assert_eq!(titles, vec!["'Beowulf'"]);

    let quals = vec![Expr::is_not_null(Expr::var(DataType::Text, 2))];
    let (_, titles) = pushdown(&output, &quals)?;
    assert_eq!(titles.len(), 3);
    Ok(())
}

#[test]
fn unsupported_qualifiers_are_left_to_the_scan() -> Result<()> {
    setup!(output);
    let circle = DataType::Other(DataType::CIRCLE_OID);
    let quals = vec![
        // OR can't be pushed down
        Expr::or(vec![
            text_qual(1, "1984", TEXT_EQUAL_OPERATOR),
            text_qual(1, "Beowulf", TEXT_EQUAL_OPERATOR),
        ]),
        // column of an unsupported type
        Expr::is_null(Expr::var(circle, 4)),
        // two columns
        Expr::op(TEXT_EQUAL_OPERATOR, Expr::var(DataType::Text, 1), Expr::var(DataType::Text, 2)),
        text_qual(2, "George%", TEXT_LIKE_OPERATOR),
    ];
    let (filter, titles) = pushdown(&output, &quals)?;
    assert_eq!(filter, "a1c25s7dGeorge%o7");
    assert_eq!(titles, vec!["'1984'", "'Animal Farm'"]);
    Ok(())
}

#[test]
fn unsupported_constant_fails_the_filter() {
    setup!(output);
    let quals = vec![
        text_qual(1, "1984", TEXT_EQUAL_OPERATOR),
        Expr::op(
            TEXT_EQUAL_OPERATOR,
            Expr::var(DataType::Text, 2),
            Expr::constant(DataType::Other(DataType::CIRCLE_OID), Datum::Raw("<3,3,9>".into())),
        ),
    ];
    let err = FilterBuilder::new(&output).build(&quals).unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal error in filter constant rendering. \
         Using unsupported data type (718) (value <3,3,9>)"
    );
}
