//! Static capability descriptors.
//!
//! A [`DialectCapabilities`] value is plain data: quoting style, default port,
//! schemas hidden from enumeration, the session timezone variable, and the
//! connection property schema shown by configuration tooling.

use serde::Serialize;

/// Identifier quoting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `"name"`
    DoubleQuote,
    /// `` `name` ``
    Backtick,
}

/// Value kind of a connection property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    String,
    Integer,
    Boolean,
}

/// One entry of the connection property schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionProperty {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: PropertyKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

/// Static facts about a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialectCapabilities {
    /// Registry name.
    pub name: &'static str,
    pub display_name: &'static str,
    /// Name of the dialect whose behavior this one inherits.
    pub parent: Option<&'static str>,
    pub quote_style: QuoteStyle,
    pub default_port: Option<u16>,
    pub excluded_schemas: &'static [&'static str],
    pub session_timezone_variable: Option<&'static str>,
    pub connection_properties: &'static [ConnectionProperty],
}

impl DialectCapabilities {
    /// Look up a connection property by name.
    pub fn property(&self, name: &str) -> Option<&'static ConnectionProperty> {
        self.connection_properties.iter().find(|p| p.name == name)
    }
}
