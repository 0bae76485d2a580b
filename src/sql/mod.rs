//! SQL generation module.
//!
//! The dialect translators build small expression trees rather than
//! strings. This module holds:
//!
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations and the registry
//! - [`types`] - Native-to-semantic type classification

pub mod dialect;
pub mod expr;
pub mod token;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, DialectRegistry, SqlDialect};
pub use expr::{
    cast, col, extract, func, lit_int, lit_str, raw_sql,
    table_col, BinaryOperator, CastType, DatePart, Expr, ExprExt, Literal,
};
pub use token::{Token, TokenStream};
pub use types::{map_native_type, normalize_type_name, SemanticType};
