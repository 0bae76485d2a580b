//! Test utilities for SQL emission validation.
//!
//! Provides helpers for validating that emitted SQL is syntactically correct
//! using sqlparser-rs for roundtrip validation.

use sqlparser::dialect::{GenericDialect, HiveDialect};
use sqlparser::parser::Parser;

use super::dialect::Dialect;
use super::expr::Expr;

/// Validates that a SQL string is syntactically valid for the given dialect.
///
/// sqlparser has no Impala dialect; Hive shares its backtick quoting and
/// function-call syntax, so it stands in.
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Generic => Box::new(GenericDialect {}),
        Dialect::Impala => Box::new(HiveDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

/// Renders `expr` for `dialect` and validates it as a select-list item.
pub fn validate_expr(expr: &Expr, dialect: Dialect) -> Result<String, String> {
    let rendered = expr.to_sql(dialect);
    validate_sql(&format!("SELECT {}", rendered), dialect)?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::expr::{col, func};

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users", Dialect::Generic).unwrap();
        validate_sql("SELECT `id` FROM `users`", Dialect::Impala).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM users", Dialect::Generic);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expr() {
        let expr = func("dayofweek", vec![col("ts")]);
        assert_eq!(
            validate_expr(&expr, Dialect::Impala).unwrap(),
            "dayofweek(`ts`)"
        );
    }
}
