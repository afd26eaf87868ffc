use serde::{Deserialize, Serialize};

use crate::catalog::r#type::Oid;

/// Operator codes understood by the external source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OperatorCode {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Like,
    IsNull,
    IsNotNull,
    /// Binary conjunction marker between two serialized predicates.
    And,
}

impl OperatorCode {
    pub fn code(&self) -> u32 {
        match self {
            OperatorCode::Lt => 1,
            OperatorCode::Gt => 2,
            OperatorCode::Le => 3,
            OperatorCode::Ge => 4,
            OperatorCode::Eq => 5,
            OperatorCode::Ne => 6,
            OperatorCode::Like => 7,
            OperatorCode::IsNull => 8,
            OperatorCode::IsNotNull => 9,
            OperatorCode::And => 10,
        }
    }

    pub fn from_code(code: u32) -> Option<OperatorCode> {
        let op = match code {
            1 => OperatorCode::Lt,
            2 => OperatorCode::Gt,
            3 => OperatorCode::Le,
            4 => OperatorCode::Ge,
            5 => OperatorCode::Eq,
            6 => OperatorCode::Ne,
            7 => OperatorCode::Like,
            8 => OperatorCode::IsNull,
            9 => OperatorCode::IsNotNull,
            10 => OperatorCode::And,
            _ => return None,
        };
        Some(op)
    }

    /// Number of operands the operator consumes on the wire.
    pub fn arity(&self) -> usize {
        match self {
            OperatorCode::IsNull | OperatorCode::IsNotNull => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OperatorCode::Lt => "<",
            OperatorCode::Gt => ">",
            OperatorCode::Le => "<=",
            OperatorCode::Ge => ">=",
            OperatorCode::Eq => "=",
            OperatorCode::Ne => "<>",
            OperatorCode::Like => "LIKE",
            OperatorCode::IsNull => "IS NULL",
            OperatorCode::IsNotNull => "IS NOT NULL",
            OperatorCode::And => "AND",
        })
    }
}

pub const TEXT_EQUAL_OPERATOR: Oid = 98;
pub const TEXT_LIKE_OPERATOR: Oid = 1209;

/// Catalog comparison operators that can be evaluated by the external
/// source, grouped by the operand types they are defined on.
pub static SUPPORTED_OPERATORS: &[(Oid, OperatorCode)] = &[
    // int2
    (94, OperatorCode::Eq),
    (95, OperatorCode::Lt),
    (520, OperatorCode::Gt),
    (522, OperatorCode::Le),
    (524, OperatorCode::Ge),
    (519, OperatorCode::Ne),
    // int4
    (96, OperatorCode::Eq),
    (97, OperatorCode::Lt),
    (521, OperatorCode::Gt),
    (523, OperatorCode::Le),
    (525, OperatorCode::Ge),
    (518, OperatorCode::Ne),
    // int8
    (410, OperatorCode::Eq),
    (412, OperatorCode::Lt),
    (413, OperatorCode::Gt),
    (414, OperatorCode::Le),
    (415, OperatorCode::Ge),
    (411, OperatorCode::Ne),
    // int2 vs int4
    (532, OperatorCode::Eq),
    (534, OperatorCode::Lt),
    (536, OperatorCode::Gt),
    (540, OperatorCode::Le),
    (542, OperatorCode::Ge),
    (538, OperatorCode::Ne),
    // int4 vs int2
    (533, OperatorCode::Eq),
    (535, OperatorCode::Lt),
    (537, OperatorCode::Gt),
    (541, OperatorCode::Le),
    (543, OperatorCode::Ge),
    (539, OperatorCode::Ne),
    // int8 vs int4
    (416, OperatorCode::Eq),
    (418, OperatorCode::Lt),
    (419, OperatorCode::Gt),
    (420, OperatorCode::Le),
    (430, OperatorCode::Ge),
    (417, OperatorCode::Ne),
    // int4 vs int8
    (15, OperatorCode::Eq),
    (37, OperatorCode::Lt),
    (76, OperatorCode::Gt),
    (80, OperatorCode::Le),
    (82, OperatorCode::Ge),
    (36, OperatorCode::Ne),
    // int2 vs int8
    (1862, OperatorCode::Eq),
    (1864, OperatorCode::Lt),
    (1865, OperatorCode::Gt),
    (1866, OperatorCode::Le),
    (1867, OperatorCode::Ge),
    (1863, OperatorCode::Ne),
    // int8 vs int2
    (1868, OperatorCode::Eq),
    (1870, OperatorCode::Lt),
    (1871, OperatorCode::Gt),
    (1872, OperatorCode::Le),
    (1873, OperatorCode::Ge),
    (1869, OperatorCode::Ne),
    // float4
    (620, OperatorCode::Eq),
    (622, OperatorCode::Lt),
    (623, OperatorCode::Gt),
    (624, OperatorCode::Le),
    (625, OperatorCode::Ge),
    (621, OperatorCode::Ne),
    // float8
    (670, OperatorCode::Eq),
    (672, OperatorCode::Lt),
    (674, OperatorCode::Gt),
    (673, OperatorCode::Le),
    (675, OperatorCode::Ge),
    (671, OperatorCode::Ne),
    // float4 vs float8
    (1120, OperatorCode::Eq),
    (1122, OperatorCode::Lt),
    (1123, OperatorCode::Gt),
    (1124, OperatorCode::Le),
    (1125, OperatorCode::Ge),
    (1121, OperatorCode::Ne),
    // numeric
    (1752, OperatorCode::Eq),
    (1754, OperatorCode::Lt),
    (1756, OperatorCode::Gt),
    (1755, OperatorCode::Le),
    (1757, OperatorCode::Ge),
    (1753, OperatorCode::Ne),
    // text
    (TEXT_EQUAL_OPERATOR, OperatorCode::Eq),
    (664, OperatorCode::Lt),
    (666, OperatorCode::Gt),
    (665, OperatorCode::Le),
    (667, OperatorCode::Ge),
    (531, OperatorCode::Ne),
    (TEXT_LIKE_OPERATOR, OperatorCode::Like),
    // bpchar
    (1054, OperatorCode::Eq),
    (1058, OperatorCode::Lt),
    (1060, OperatorCode::Gt),
    (1059, OperatorCode::Le),
    (1061, OperatorCode::Ge),
    (1057, OperatorCode::Ne),
    // date
    (1093, OperatorCode::Eq),
    (1095, OperatorCode::Lt),
    (1097, OperatorCode::Gt),
    (1096, OperatorCode::Le),
    (1098, OperatorCode::Ge),
    (1094, OperatorCode::Ne),
    // bool
    (91, OperatorCode::Eq),
    (85, OperatorCode::Ne),
];

/// Looks up the operator code for a catalog operator, if the external
/// source supports it.
pub fn lookup_operator(opno: Oid) -> Option<OperatorCode> {
    SUPPORTED_OPERATORS.iter().find(|(dbop, _)| *dbop == opno).map(|(_, op)| *op)
}
