//! Expression AST - the composable SQL fragments handed back to the engine.
//!
//! This module provides a strongly-typed AST for the expressions the
//! dialect translators build, with exhaustive pattern matching enforced
//! by the compiler. Expressions are immutable once built; every builder
//! returns a new value.

use super::dialect::{Dialect, SqlDialect};
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens_for_dialect()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference: optional_table.column
    Column {
        table: Option<String>,
        column: String,
    },

    /// Literal values
    Literal(Literal),

    /// Binary operation: left op right
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Function call: name(args...)
    Function { name: String, args: Vec<Expr> },

    /// CAST(expr AS type)
    Cast { expr: Box<Expr>, to: CastType },

    /// ANSI field extraction: EXTRACT(part FROM expr)
    Extract { part: DatePart, expr: Box<Expr> },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Raw SQL expression passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection vulnerabilities. Only use with:
    /// - Trusted, static SQL fragments
    /// - Fragments rendered from closed enums (interval units, session variables)
    ///
    /// For user-provided values, use `Expr::Literal` variants which properly
    /// escape content for the target dialect.
    Raw(String),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    String(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    /// Integer (floor) division - `DIV` in Impala.
    IntDiv,
}

/// Target types for `CAST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Timestamp,
}

impl CastType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CastType::Timestamp => "TIMESTAMP",
        }
    }
}

/// Date/time fields understood by extraction functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Minute,
    Hour,
    Day,
    DayOfWeek,
    DayOfYear,
    Week,
    Month,
    Quarter,
    Year,
}

impl DatePart {
    /// ANSI field keyword (`EXTRACT(<keyword> FROM ...)`).
    pub fn keyword(&self) -> &'static str {
        match self {
            DatePart::Minute => "MINUTE",
            DatePart::Hour => "HOUR",
            DatePart::Day => "DAY",
            DatePart::DayOfWeek => "DOW",
            DatePart::DayOfYear => "DOY",
            DatePart::Week => "WEEK",
            DatePart::Month => "MONTH",
            DatePart::Quarter => "QUARTER",
            DatePart::Year => "YEAR",
        }
    }

    /// Lower-case unit name passed as a string argument (`extract(expr, 'month')`).
    pub fn unit_name(&self) -> &'static str {
        match self {
            DatePart::Minute => "minute",
            DatePart::Hour => "hour",
            DatePart::Day => "day",
            DatePart::DayOfWeek => "dow",
            DatePart::DayOfYear => "doy",
            DatePart::Week => "week",
            DatePart::Month => "month",
            DatePart::Quarter => "quarter",
            DatePart::Year => "year",
        }
    }
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl Expr {
    /// Convert this expression to a token stream (dialect-agnostic).
    pub fn to_tokens(&self) -> TokenStream {
        self.to_tokens_for_dialect(Dialect::default())
    }

    /// Render this expression as SQL text for a dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens_for_dialect(dialect).serialize(dialect)
    }

    /// Convert this expression to a token stream for a specific dialect.
    pub fn to_tokens_for_dialect(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column { table, column } => {
                if let Some(t) = table {
                    ts.push(Token::Ident(t.clone()));
                    ts.push(Token::Dot);
                }
                ts.push(Token::Ident(column.clone()));
            }

            Expr::Literal(lit) => {
                ts.push(match lit {
                    Literal::Int(n) => Token::LitInt(*n),
                    Literal::String(s) => Token::LitString(s.clone()),
                });
            }

            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens_for_dialect(dialect));
                ts.space();
                ts.push(binary_op_to_token(*op));
                ts.space();
                ts.append(&right.to_tokens_for_dialect(dialect));
            }

            Expr::Function { name, args } => {
                ts.push(Token::FunctionName(name.clone()));
                ts.lparen();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens_for_dialect(dialect));
                }
                ts.rparen();
            }

            Expr::Cast { expr, to } => {
                ts.push(Token::Cast).lparen();
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.space()
                    .push(Token::As)
                    .space()
                    .push(Token::Raw(to.as_sql().into()));
                ts.rparen();
            }

            Expr::Extract { part, expr } => {
                ts.push(Token::Extract).lparen();
                ts.push(Token::Raw(part.keyword().into()))
                    .space()
                    .push(Token::From)
                    .space();
                ts.append(&expr.to_tokens_for_dialect(dialect));
                ts.rparen();
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens_for_dialect(dialect));
                ts.rparen();
            }

            Expr::Raw(sql) => {
                ts.push(Token::Raw(sql.clone()));
            }
        }

        ts
    }
}

fn binary_op_to_token(op: BinaryOperator) -> Token {
    match op {
        BinaryOperator::Plus => Token::Plus,
        BinaryOperator::IntDiv => Token::IntDiv,
    }
}

// =============================================================================
// Expression Constructors
// =============================================================================

/// Create a column reference.
pub fn col(name: &str) -> Expr {
    Expr::Column {
        table: None,
        column: name.into(),
    }
}

/// Create a qualified column reference (table.column).
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: Some(table.into()),
        column: column.into(),
    }
}

/// Create an integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Create a string literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// Generic function call.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function {
        name: name.into(),
        args,
    }
}

/// CAST(expr AS type)
pub fn cast(expr: Expr, to: CastType) -> Expr {
    Expr::Cast {
        expr: Box::new(expr),
        to,
    }
}

/// EXTRACT(part FROM expr)
pub fn extract(part: DatePart, expr: Expr) -> Expr {
    Expr::Extract {
        part,
        expr: Box::new(expr),
    }
}

/// Raw SQL expression (pass-through, no parsing).
///
/// # Security Warning
///
/// **Never pass user input to this function.** The SQL is not sanitized
/// and can lead to SQL injection vulnerabilities.
pub fn raw_sql(sql: &str) -> Expr {
    Expr::Raw(sql.into())
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Extension trait for building expressions fluently.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn add(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Plus, other.into())
    }

    /// Integer division (`DIV` where the dialect has one).
    fn int_div(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::IntDiv, other.into())
    }

    /// Wrap in parentheses.
    fn paren(self) -> Expr {
        Expr::Paren(Box::new(self.into_expr()))
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        lit_int(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        lit_int(n as i64)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit_str(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Literal(Literal::String(s))
    }
}

// =============================================================================
// Tests
// =============================================================================
