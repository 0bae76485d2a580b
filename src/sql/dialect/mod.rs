//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! The trait's default methods form the *base table*: generic SQL-family
//! behavior (ANSI quoting, `DATE_TRUNC`, `EXTRACT(.. FROM ..)`, `+ INTERVAL`).
//! Each dialect implements `SqlDialect` and overrides only what differs,
//! which makes the implementation its *override table*. Composition is
//! resolved statically; nothing falls back at call time.
//!
//! - Identifier quoting: `"` (generic), `` ` `` (Impala)
//! - Date bucketing: `DATE_TRUNC` vs `trunc(expr, 'MI')`
//! - Extraction: `EXTRACT(MONTH FROM expr)` vs `extract(expr, 'month')`
//! - Interval arithmetic: `expr + INTERVAL '3' DAY` vs `date_add(expr, INTERVAL 3 day)`
//!
//! # Usage
//!
//! ```ignore
//! use mantis_impala::dialect::{Dialect, SqlDialect};
//! use mantis_impala::temporal::GranularityUnit;
//!
//! let dialect = Dialect::Impala;
//! let bucket = dialect.truncate(GranularityUnit::Month, col("created_at"));
//! assert_eq!(bucket.to_sql(dialect), "trunc(`created_at`, 'month')");
//! ```

mod ansi;
mod capabilities;
pub mod helpers;
mod impala;
mod registry;

pub use ansi::Ansi;
pub use capabilities::{ConnectionProperty, DialectCapabilities, PropertyKind, QuoteStyle};
pub use impala::{Impala, DEFAULT_PORT, IMPALA_CAPABILITIES};
pub use registry::{DialectRegistry, RegistryError};

use super::expr::{cast, extract, func, lit_str, raw_sql, CastType, DatePart, Expr, ExprExt};
use crate::temporal::interval::truncate_amount;
use crate::temporal::{GranularityUnit, IntervalUnit};

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations are the generic SQL base behavior.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Static facts about the dialect.
    fn capabilities(&self) -> &'static DialectCapabilities;

    /// Dialect name for display/logging and registry lookup.
    fn name(&self) -> &'static str {
        self.capabilities().name
    }

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias) using the registered quote style.
    fn quote_identifier(&self, ident: &str) -> String {
        match self.capabilities().quote_style {
            QuoteStyle::DoubleQuote => helpers::quote_double(ident),
            QuoteStyle::Backtick => helpers::quote_backtick(ident),
        }
    }

    /// Quote a string literal.
    ///
    /// All supported dialects use single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// Integer division operator.
    ///
    /// The base has none, so plain `/` is emitted.
    fn integer_divide_operator(&self) -> &'static str {
        "/"
    }

    // =========================================================================
    // Date/Time literals
    // =========================================================================

    /// Format a date literal (`DATE 'YYYY-MM-DD'`).
    fn format_date_literal(&self, date: &str) -> String {
        format!("DATE {}", self.quote_string(date))
    }

    /// Format a time-of-day literal (`TIME 'HH:MM:SS'`).
    fn format_time_literal(&self, time: &str) -> String {
        format!("TIME {}", self.quote_string(time))
    }

    /// Format a timestamp literal (`TIMESTAMP 'YYYY-MM-DD HH:MM:SS'`).
    fn format_timestamp_literal(&self, timestamp: &str) -> String {
        format!("TIMESTAMP {}", self.quote_string(timestamp))
    }

    /// Session variable holding the connection's timezone, if the dialect has one.
    fn session_timezone_variable(&self) -> Option<&'static str> {
        self.capabilities().session_timezone_variable
    }

    // =========================================================================
    // Temporal translation
    // =========================================================================

    /// Truncate or extract `expr` at the given granularity.
    fn truncate(&self, unit: GranularityUnit, expr: Expr) -> Expr {
        let trunc = |name: &str, expr: Expr| func("DATE_TRUNC", vec![lit_str(name), expr]);
        match unit {
            GranularityUnit::Minute => trunc("minute", expr),
            GranularityUnit::MinuteOfHour => extract(DatePart::Minute, expr),
            GranularityUnit::Hour => trunc("hour", expr),
            GranularityUnit::HourOfDay => extract(DatePart::Hour, expr),
            GranularityUnit::Day => trunc("day", expr),
            GranularityUnit::DayOfWeek => extract(DatePart::DayOfWeek, expr),
            GranularityUnit::DayOfMonth => extract(DatePart::Day, expr),
            GranularityUnit::DayOfYear => extract(DatePart::DayOfYear, expr),
            GranularityUnit::Week => trunc("week", expr),
            GranularityUnit::WeekOfYear => extract(DatePart::Week, expr),
            GranularityUnit::Month => trunc("month", expr),
            GranularityUnit::MonthOfYear => extract(DatePart::Month, expr),
            GranularityUnit::Quarter => trunc("quarter", expr),
            GranularityUnit::QuarterOfYear => extract(DatePart::Quarter, expr),
            GranularityUnit::Year => trunc("year", expr),
            GranularityUnit::Default => cast(expr, CastType::Timestamp),
        }
    }

    /// Add `amount` (truncated toward zero) `unit`s to `expr`.
    fn add_interval(&self, expr: Expr, amount: f64, unit: IntervalUnit) -> Expr {
        let interval = format!(
            "INTERVAL '{}' {}",
            truncate_amount(amount),
            unit.as_sql().to_uppercase()
        );
        expr.add(raw_sql(&interval))
    }

    // =========================================================================
    // Schema enumeration
    // =========================================================================

    /// Schemas omitted from table/schema enumeration.
    fn excluded_schemas(&self) -> &'static [&'static str] {
        self.capabilities().excluded_schemas
    }

    /// Whether `schema` should be skipped during enumeration (case-insensitive).
    fn is_excluded_schema(&self, schema: &str) -> bool {
        self.excluded_schemas()
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(schema))
    }

    /// Default server port, if the dialect has one.
    fn default_port(&self) -> Option<u16> {
        self.capabilities().default_port
    }
}

/// Dialect tag passed through compilation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Generic SQL-family base behavior.
    #[default]
    Generic,
    Impala,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Ansi,
            Dialect::Impala => &Impala,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn capabilities(&self) -> &'static DialectCapabilities {
        self.dialect().capabilities()
    }

    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn integer_divide_operator(&self) -> &'static str {
        self.dialect().integer_divide_operator()
    }

    fn format_date_literal(&self, date: &str) -> String {
        self.dialect().format_date_literal(date)
    }

    fn format_time_literal(&self, time: &str) -> String {
        self.dialect().format_time_literal(time)
    }

    fn format_timestamp_literal(&self, timestamp: &str) -> String {
        self.dialect().format_timestamp_literal(timestamp)
    }

    fn session_timezone_variable(&self) -> Option<&'static str> {
        self.dialect().session_timezone_variable()
    }

    fn truncate(&self, unit: GranularityUnit, expr: Expr) -> Expr {
        self.dialect().truncate(unit, expr)
    }

    fn add_interval(&self, expr: Expr, amount: f64, unit: IntervalUnit) -> Expr {
        self.dialect().add_interval(expr, amount, unit)
    }

    fn excluded_schemas(&self) -> &'static [&'static str] {
        self.dialect().excluded_schemas()
    }

    fn is_excluded_schema(&self, schema: &str) -> bool {
        self.dialect().is_excluded_schema(schema)
    }

    fn default_port(&self) -> Option<u16> {
        self.dialect().default_port()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
