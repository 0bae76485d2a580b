//! Humanization of connection failure messages.
//!
//! Driver diagnostics are matched against an ordered rule list; the first
//! matching rule wins, so the order below is part of the behavior. Text
//! that matches nothing is shown unchanged.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Canonical category of a connection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The server did not respond at the given address.
    Unreachable,
    UnknownDatabase,
    AccessDenied,
    /// The host string could not be parsed (e.g. `host:` with no port).
    InvalidHostname,
}

impl ErrorCategory {
    /// Display text for the category.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCategory::Unreachable => "check host and port",
            ErrorCategory::UnknownDatabase => "database name incorrect",
            ErrorCategory::AccessDenied => "username or password incorrect",
            ErrorCategory::InvalidHostname => "invalid hostname",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A single (pattern, category) rule.
#[derive(Debug)]
pub struct ErrorPattern {
    pub pattern: Regex,
    pub category: ErrorCategory,
}

/// The ordered rule list. Earlier entries win.
pub static ERROR_PATTERNS: LazyLock<Vec<ErrorPattern>> = LazyLock::new(|| {
    vec![
        ErrorPattern {
            pattern: Regex::new(r"Communications link failure|no response from server")
                .unwrap(),
            category: ErrorCategory::Unreachable,
        },
        ErrorPattern {
            pattern: Regex::new(r"Unknown database").unwrap(),
            category: ErrorCategory::UnknownDatabase,
        },
        ErrorPattern {
            pattern: Regex::new(r"Access denied for user").unwrap(),
            category: ErrorCategory::AccessDenied,
        },
        ErrorPattern {
            pattern: Regex::new(r"Must specify port after ':'").unwrap(),
            category: ErrorCategory::InvalidHostname,
        },
    ]
});

/// Category of the first rule matching `message`.
pub fn classify(message: &str) -> Option<ErrorCategory> {
    ERROR_PATTERNS
        .iter()
        .find(|rule| rule.pattern.is_match(message))
        .map(|rule| rule.category)
}

/// Display text for a raw connection failure message.
pub fn humanize(message: &str) -> String {
    match classify(message) {
        Some(category) => category.message().to_string(),
        None => message.to_string(),
    }
}
