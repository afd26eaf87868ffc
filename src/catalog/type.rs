use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Object identifier of a type or an operator, as handed out by the catalog.
pub type Oid = u32;

/// The column and constant types the pushdown layer knows about. The
/// protocol type code of each type is its catalog OID.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Text,
    Varchar,
    Bpchar,
    Char,
    Bytea,
    Bool,
    Date,
    Timestamp,
    /// Any type outside the closed set above, e.g. geometric types.
    Other(Oid),
}

/// Types whose constants can be pushed down to the external source.
pub const SUPPORTED_TYPES: [DataType; 14] = [
    DataType::Int2,
    DataType::Int4,
    DataType::Int8,
    DataType::Float4,
    DataType::Float8,
    DataType::Numeric,
    DataType::Text,
    DataType::Varchar,
    DataType::Bpchar,
    DataType::Char,
    DataType::Bytea,
    DataType::Bool,
    DataType::Date,
    DataType::Timestamp,
];

impl DataType {
    pub const BOOL_OID: Oid = 16;
    pub const BYTEA_OID: Oid = 17;
    pub const CHAR_OID: Oid = 18;
    pub const INT8_OID: Oid = 20;
    pub const INT2_OID: Oid = 21;
    pub const INT4_OID: Oid = 23;
    pub const TEXT_OID: Oid = 25;
    pub const FLOAT4_OID: Oid = 700;
    pub const FLOAT8_OID: Oid = 701;
    pub const CIRCLE_OID: Oid = 718;
    pub const BPCHAR_OID: Oid = 1042;
    pub const VARCHAR_OID: Oid = 1043;
    pub const DATE_OID: Oid = 1082;
    pub const TIMESTAMP_OID: Oid = 1114;
    pub const NUMERIC_OID: Oid = 1700;

    pub fn from_oid(oid: Oid) -> DataType {
        match oid {
            Self::BOOL_OID => DataType::Bool,
            Self::BYTEA_OID => DataType::Bytea,
            Self::CHAR_OID => DataType::Char,
            Self::INT8_OID => DataType::Int8,
            Self::INT2_OID => DataType::Int2,
            Self::INT4_OID => DataType::Int4,
            Self::TEXT_OID => DataType::Text,
            Self::FLOAT4_OID => DataType::Float4,
            Self::FLOAT8_OID => DataType::Float8,
            Self::BPCHAR_OID => DataType::Bpchar,
            Self::VARCHAR_OID => DataType::Varchar,
            Self::DATE_OID => DataType::Date,
            Self::TIMESTAMP_OID => DataType::Timestamp,
            Self::NUMERIC_OID => DataType::Numeric,
            other => DataType::Other(other),
        }
    }

    /// The protocol type code, which is the type's catalog OID.
    pub fn oid(&self) -> Oid {
        match self {
            DataType::Bool => Self::BOOL_OID,
            DataType::Bytea => Self::BYTEA_OID,
            DataType::Char => Self::CHAR_OID,
            DataType::Int8 => Self::INT8_OID,
            DataType::Int2 => Self::INT2_OID,
            DataType::Int4 => Self::INT4_OID,
            DataType::Text => Self::TEXT_OID,
            DataType::Float4 => Self::FLOAT4_OID,
            DataType::Float8 => Self::FLOAT8_OID,
            DataType::Bpchar => Self::BPCHAR_OID,
            DataType::Varchar => Self::VARCHAR_OID,
            DataType::Date => Self::DATE_OID,
            DataType::Timestamp => Self::TIMESTAMP_OID,
            DataType::Numeric => Self::NUMERIC_OID,
            DataType::Other(oid) => *oid,
        }
    }

    /// Whether predicates on this type are eligible for pushdown.
    pub fn is_supported(&self) -> bool {
        !matches!(self, DataType::Other(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DataType::Int2 | DataType::Int4 | DataType::Int8)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, DataType::Float4 | DataType::Float8 | DataType::Numeric)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Int2 => f.write_str("SMALLINT"),
            Self::Int4 => f.write_str("INTEGER"),
            Self::Int8 => f.write_str("BIGINT"),
            Self::Float4 => f.write_str("REAL"),
            Self::Float8 => f.write_str("DOUBLE"),
            Self::Numeric => f.write_str("NUMERIC"),
            Self::Text => f.write_str("TEXT"),
            Self::Varchar => f.write_str("VARCHAR"),
            Self::Bpchar => f.write_str("BPCHAR"),
            Self::Char => f.write_str("CHAR"),
            Self::Bytea => f.write_str("BYTEA"),
            Self::Bool => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Other(oid) => write!(f, "TYPE({})", oid),
        }
    }
}

/// Raw payload of a non-null constant, before the output function turns
/// it into text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary precision decimal, kept in its exact textual form.
    Numeric(String),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    /// A payload of a type this layer has no structured form for.
    Raw(String),
}

/// A value of a row as seen by the external source when it evaluates a
/// pushed down filter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,

            // Cross-type numeric equality
            (Value::Integer(a), Value::Float(b)) => *a as f64 == *b,
            (Value::Float(a), Value::Integer(b)) => *a == *b as f64,

            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),

            // Cross-type numeric comparisons
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),

            // NULL sorts first, the evaluator never compares it
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),

            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ans = match self {
            Value::Null => "NULL".to_string(),
            Value::Boolean(b) if *b => "TRUE".to_string(),
            Value::Boolean(_) => "FALSE".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("'{}'", s),
        };
        // Use pad to work with formatting flags.
        f.pad(&ans)
    }
}
