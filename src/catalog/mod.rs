pub mod operator;
pub mod r#type;

use crate::catalog::r#type::{DataType, Datum};
use crate::error::Result;

/// The output functions of the catalog: turns a non-null datum of the
/// given type into its canonical text form.
pub trait TypeOutput {
    fn output(&self, typ: DataType, datum: &Datum) -> Result<String>;
}

/// Renders datums the way the database's builtin output functions do.
#[derive(Debug, Default, Clone, Copy)]
pub struct PgTypeOutput;

impl TypeOutput for PgTypeOutput {
    fn output(&self, _typ: DataType, datum: &Datum) -> Result<String> {
        let ans = match datum {
            Datum::Bool(true) => "t".to_string(),
            Datum::Bool(false) => "f".to_string(),
            Datum::Int(i) => i.to_string(),
            Datum::Float(f) => f.to_string(),
            Datum::Numeric(s) | Datum::Text(s) | Datum::Raw(s) => s.clone(),
            Datum::Bytes(b) => format!("\\x{}", hex::encode(b)),
            Datum::Date(d) => d.format("%Y-%m-%d").to_string(),
            Datum::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        Ok(ans)
    }
}
