//! Generic SQL-family base dialect.
//!
//! Every behavior comes from the `SqlDialect` default methods; this type
//! exists so the base table can be registered and selected like any other
//! dialect (and serves as the parent of concrete dialects).

use super::capabilities::{DialectCapabilities, QuoteStyle};
use super::SqlDialect;

/// Static facts about the generic base dialect.
pub static ANSI_CAPABILITIES: DialectCapabilities = DialectCapabilities {
    name: "sql",
    display_name: "Generic SQL",
    parent: None,
    quote_style: QuoteStyle::DoubleQuote,
    default_port: None,
    excluded_schemas: &["information_schema"],
    session_timezone_variable: None,
    connection_properties: &[],
};

/// Generic SQL dialect (base table).
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn capabilities(&self) -> &'static DialectCapabilities {
        &ANSI_CAPABILITIES
    }
}
