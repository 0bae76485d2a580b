//! Native-to-semantic type classification.
//!
//! Impala reports column types as strings (`BIGINT`, `varchar(255)`,
//! `int unsigned`, `array<string>`). The engine only needs a portable
//! [`SemanticType`]; [`map_native_type`] is the total function between the
//! two. Unknown names never fail, they classify as [`SemanticType::Unknown`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Portable, database-agnostic column classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    Integer,
    BigInteger,
    Text,
    Boolean,
    Date,
    DateTime,
    Decimal,
    Float,
    Unknown,
}

impl SemanticType {
    /// Whether values of this type are numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Integer
                | SemanticType::BigInteger
                | SemanticType::Decimal
                | SemanticType::Float
        )
    }

    /// Whether values of this type are temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::Date | SemanticType::DateTime)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::Integer => "Integer",
            SemanticType::BigInteger => "BigInteger",
            SemanticType::Text => "Text",
            SemanticType::Boolean => "Boolean",
            SemanticType::Date => "Date",
            SemanticType::DateTime => "DateTime",
            SemanticType::Decimal => "Decimal",
            SemanticType::Float => "Float",
            SemanticType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Native type name of Impala timestamps.
pub const TIMESTAMP_TYPE_NAME: &str = "TIMESTAMP";

static UNSIGNED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+unsigned\s*$").unwrap());

static TYPE_PARAMETERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*[(<].*$").unwrap());

/// Normalize a native type name to its bare upper-case base name.
///
/// `"BigInt UNSIGNED"` → `"BIGINT"`, `"decimal(10,2)"` → `"DECIMAL"`,
/// `"array<int>"` → `"ARRAY"`.
pub fn normalize_type_name(native: &str) -> String {
    let stripped = UNSIGNED_SUFFIX.replace(native.trim(), "");
    let base = TYPE_PARAMETERS.replace(&stripped, "");
    base.trim().to_uppercase()
}

/// Classify a native Impala type name.
///
/// Total and deterministic: every input yields a `SemanticType`.
pub fn map_native_type(native: &str) -> SemanticType {
    match normalize_type_name(native).as_str() {
        "INT" | "SMALLINT" | "TINYINT" => SemanticType::Integer,
        "BIGINT" => SemanticType::BigInteger,
        "STRING" | "ARRAY" | "CHAR" | "VARCHAR" | "MAP" | "STRUCT" => SemanticType::Text,
        "BINARY" => SemanticType::Unknown,
        "BOOLEAN" => SemanticType::Boolean,
        "DATE" => SemanticType::Date,
        "DECIMAL" => SemanticType::Decimal,
        "DOUBLE" | "FLOAT" => SemanticType::Float,
        "TIMESTAMP" => SemanticType::DateTime,
        _ => SemanticType::Unknown,
    }
}
