use crate::catalog::r#type::DataType;
use crate::catalog::TypeOutput;
use crate::error::{Error, Result};
use crate::sql::expr::Const;

/// What a NULL constant looks like on the wire, whatever its type.
pub const NULL_CONSTANT: &str = "\"NULL\"";

/// Renders a constant into the text sent to the external source.
///
/// NULL renders as `"NULL"`, booleans as `true`/`false`, and every other
/// supported type passes the output function's text through unchanged.
/// Constants of unsupported types fail with [`Error::UnsupportedType`].
pub fn render_constant(output: &dyn TypeOutput, constant: &Const) -> Result<String> {
    let datum = match &constant.value {
        None => return Ok(NULL_CONSTANT.to_string()),
        Some(datum) => datum,
    };
    let text = output.output(constant.consttype, datum)?;
    match constant.consttype {
        DataType::Bool => Ok(if text == "t" { "true" } else { "false" }.to_string()),
        DataType::Other(typ) => Err(Error::UnsupportedType { typ, value: text }),
        _ => Ok(text),
    }
}
