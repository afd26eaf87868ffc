use std::fmt::{Debug, Display, Formatter};
use std::num::{ParseFloatError, ParseIntError};

use config::ConfigError;

use crate::catalog::r#type::Oid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Internal(String),
    Value(String),
    Parse(String),
    /// A constant whose type can't be pushed down, carrying the type code
    /// and the text the output function produced for it.
    UnsupportedType { typ: Oid, value: String },
}

impl Error {
    pub fn value(msg: impl Into<String>) -> Error {
        Error::Value(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Error {
        Error::Parse(msg.into())
    }
}

#[macro_export]
macro_rules! value_err {
    ($($arg:tt)*) => {
        $crate::error::Error::value(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! parse_err {
    ($($arg:tt)*) => {
        $crate::error::Error::parse(format!($($arg)*))
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Internal(s) | Error::Value(s) | Error::Parse(s) => {
                write!(f, "{}", s)
            }
            Error::UnsupportedType { typ, value } => write!(
                f,
                "internal error in filter constant rendering. \
                 Using unsupported data type ({}) (value {})",
                typ, value
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<log::ParseLevelError> for Error {
    fn from(err: log::ParseLevelError) -> Self {
        Error::Value(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
