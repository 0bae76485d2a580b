//! Impala SQL dialect.
//!
//! Impala differences from the generic base:
//! - Backtick identifier quoting (`` `name` ``)
//! - `trunc(expr, 'MI' | 'HH' | 'dd' | 'day' | 'month' | 'Q')` for bucketing
//! - `extract(expr, 'unit')` and `dayofweek`/`weekofyear`-style helpers
//! - `date_add(expr, INTERVAL n unit)` for interval arithmetic
//! - `DIV` integer division
//! - No TIME type; time-of-day values travel as strings

use super::capabilities::{ConnectionProperty, DialectCapabilities, PropertyKind, QuoteStyle};
use super::SqlDialect;
use crate::sql::expr::{cast, func, lit_str, raw_sql, CastType, DatePart, Expr, ExprExt};
use crate::temporal::interval::interval_literal;
use crate::temporal::{GranularityUnit, IntervalUnit};

/// Default Impala daemon port (HiveServer2 protocol).
pub const DEFAULT_PORT: u16 = 21050;

/// Static facts about Impala.
pub static IMPALA_CAPABILITIES: DialectCapabilities = DialectCapabilities {
    name: "impala",
    display_name: "Impala",
    parent: Some("sql"),
    quote_style: QuoteStyle::Backtick,
    default_port: Some(DEFAULT_PORT),
    excluded_schemas: &["default", "_impala_builtins", "_canary"],
    session_timezone_variable: Some("@@time_zone"),
    connection_properties: &[
        ConnectionProperty {
            name: "host",
            display_name: "Host",
            kind: PropertyKind::String,
            required: false,
            default: Some("localhost"),
            placeholder: None,
        },
        ConnectionProperty {
            name: "port",
            display_name: "Port",
            kind: PropertyKind::Integer,
            required: false,
            default: Some("21050"),
            placeholder: None,
        },
        ConnectionProperty {
            name: "database",
            display_name: "Database name",
            kind: PropertyKind::String,
            required: true,
            default: None,
            placeholder: Some("default"),
        },
        ConnectionProperty {
            name: "ssl",
            display_name: "Use a secure connection (SSL)?",
            kind: PropertyKind::Boolean,
            required: false,
            default: Some("false"),
            placeholder: None,
        },
        ConnectionProperty {
            name: "additional_options",
            display_name: "Additional connection string options",
            kind: PropertyKind::String,
            required: false,
            default: None,
            placeholder: Some("useSSL=true;trustServerCertificate=true"),
        },
    ],
};

/// Impala SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Impala;

impl Impala {
    fn trunc(expr: Expr, format: &str) -> Expr {
        func("trunc", vec![expr, lit_str(format)])
    }

    fn extract(expr: Expr, part: DatePart) -> Expr {
        func("extract", vec![expr, lit_str(part.unit_name())])
    }
}

impl SqlDialect for Impala {
    fn capabilities(&self) -> &'static DialectCapabilities {
        &IMPALA_CAPABILITIES
    }

    fn integer_divide_operator(&self) -> &'static str {
        "DIV"
    }

    fn format_time_literal(&self, time: &str) -> String {
        self.quote_string(time)
    }

    fn format_timestamp_literal(&self, timestamp: &str) -> String {
        format!("CAST({} AS TIMESTAMP)", self.quote_string(timestamp))
    }

    fn truncate(&self, unit: GranularityUnit, expr: Expr) -> Expr {
        match unit {
            GranularityUnit::Minute => Self::trunc(expr, "MI"),
            GranularityUnit::MinuteOfHour => Self::extract(expr, DatePart::Minute),
            GranularityUnit::Hour => Self::trunc(expr, "HH"),
            GranularityUnit::HourOfDay => Self::extract(expr, DatePart::Hour),
            GranularityUnit::Day => Self::trunc(expr, "dd"),
            GranularityUnit::DayOfWeek => func("dayofweek", vec![expr]),
            GranularityUnit::DayOfMonth => func("dayofmonth", vec![expr]),
            GranularityUnit::DayOfYear => func("dayofyear", vec![expr]),
            GranularityUnit::Week => Self::trunc(expr, "day"),
            GranularityUnit::WeekOfYear => func("weekofyear", vec![expr]),
            GranularityUnit::Month => Self::trunc(expr, "month"),
            GranularityUnit::MonthOfYear => Self::extract(expr, DatePart::Month),
            GranularityUnit::Quarter => Self::trunc(expr, "Q"),
            GranularityUnit::QuarterOfYear => Self::extract(expr, DatePart::Month)
                .add(2)
                .paren()
                .int_div(3),
            GranularityUnit::Year => Self::extract(expr, DatePart::Year),
            GranularityUnit::Default => cast(expr, CastType::Timestamp),
        }
    }

    fn add_interval(&self, expr: Expr, amount: f64, unit: IntervalUnit) -> Expr {
        func(
            "date_add",
            vec![expr, raw_sql(&interval_literal(amount, unit))],
        )
    }
}
