//! Advisory diagnostics.
//!
//! An advisory is a non-fatal notice: it is logged through `tracing` the
//! moment it is raised and carried alongside the result in [`Built`], but it
//! never changes the value it accompanies or the control flow around it.

use std::fmt;

use serde::Serialize;

/// A non-fatal notice raised while building a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// SSL is enabled but `trustServerCertificate` is not set, so the server
    /// certificate must validate against the client trust store.
    SslWithoutTrustServerCertificate,

    /// The server reports a version below the supported minimum.
    UnsupportedServerVersion { found: f64, minimum: f64 },

    /// The server version string could not be read, so compatibility is
    /// unknown.
    UnreadableServerVersion { reported: String },
}

impl Advisory {
    /// Stable identifier for log filtering.
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::SslWithoutTrustServerCertificate => "ssl_without_trust_server_certificate",
            Advisory::UnsupportedServerVersion { .. } => "unsupported_server_version",
            Advisory::UnreadableServerVersion { .. } => "unreadable_server_version",
        }
    }

    /// Log this advisory. Never fails.
    pub fn emit(&self) {
        tracing::warn!(advisory = self.code(), "{}", self);
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SslWithoutTrustServerCertificate => write!(
                f,
                "SSL is enabled without trustServerCertificate; the server certificate \
                 must be trusted by the client trust store"
            ),
            Advisory::UnsupportedServerVersion { found, minimum } => write!(
                f,
                "server version {found} is below the supported minimum {minimum}"
            ),
            Advisory::UnreadableServerVersion { reported } => {
                write!(f, "could not read server version from {reported:?}")
            }
        }
    }
}

/// A value together with the advisories raised while producing it.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Built<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Built<T> {
    /// Wrap a value with no advisories.
    pub fn new(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    /// Log `advisory` and record it.
    pub fn raise(&mut self, advisory: Advisory) {
        advisory.emit();
        self.advisories.push(advisory);
    }

    /// Discard the advisories (they have already been logged).
    pub fn into_value(self) -> T {
        self.value
    }

    /// Whether any advisory was raised.
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Built<U> {
        Built {
            value: f(self.value),
            advisories: self.advisories,
        }
    }
}
