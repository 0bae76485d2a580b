//! MetadataProbe trait definition.

use async_trait::async_trait;

use super::version::DatabaseVersion;
use crate::humanize::humanize;

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors surfaced by a metadata probe.
///
/// Driver messages are kept verbatim so they can be humanized for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The probe could not reach the server or the query failed.
    #[error("{0}")]
    Connection(String),

    /// The server answered with a version string that could not be read.
    #[error("unreadable server version: {0}")]
    InvalidVersion(String),
}

impl ProbeError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Display text for the error, with known driver messages replaced by
    /// their canonical category.
    pub fn humanized(&self) -> String {
        match self {
            ProbeError::Connection(message) => humanize(message),
            other => other.to_string(),
        }
    }
}

/// Read-only view of a live connection's server metadata.
///
/// Implementations wrap whatever the transport uses; no timeout or retry is
/// layered on top of the calls made through this trait.
#[async_trait]
pub trait MetadataProbe: Send + Sync {
    /// Major/minor version reported by the server.
    async fn database_version(&self) -> ProbeResult<DatabaseVersion>;

    /// Whether the underlying connection is usable.
    async fn is_valid(&self) -> bool;
}
