//! Server version compatibility check.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::probe::{MetadataProbe, ProbeError, ProbeResult};
use crate::advisory::{Advisory, Built};

/// Lowest server version without an advisory, in legacy-number form.
pub const MIN_SUPPORTED_VERSION: f64 = 5.7;

/// A server version as reported by the metadata probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DatabaseVersion {
    pub major: u32,
    pub minor: u32,
}

impl DatabaseVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// `major.<first digit of minor>` as a decimal.
    ///
    /// Only the leading digit of the minor version survives, so 5.12 reads
    /// as 5.1. [`check_connectivity`] compares this number against
    /// [`MIN_SUPPORTED_VERSION`].
    pub fn legacy_number(&self) -> f64 {
        let first_digit = self
            .minor
            .to_string()
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0);
        (f64::from(self.major) * 10.0 + f64::from(first_digit)) / 10.0
    }

    /// Whether this version is at least `major.minor`, comparing the pair
    /// in order.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for DatabaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for DatabaseVersion {
    type Err = ProbeError;

    /// Parses the leading `major.minor` of a version string such as
    /// `4.1.0-cdh7` or `5.7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProbeError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split(|c: char| !c.is_ascii_digit());
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        Ok(Self { major, minor })
    }
}

/// Report connectivity, then probe the server version once.
///
/// The returned value is the probe's own `is_valid` answer. A version below
/// [`MIN_SUPPORTED_VERSION`] or an unreadable version string raises an
/// advisory and nothing else. Only a failed version query is returned as an
/// error; it is not retried.
pub async fn check_connectivity<P>(probe: &P) -> ProbeResult<Built<bool>>
where
    P: MetadataProbe + ?Sized,
{
    let mut built = Built::new(probe.is_valid().await);

    let version = match probe.database_version().await {
        Ok(version) => version,
        Err(ProbeError::InvalidVersion(reported)) => {
            built.raise(Advisory::UnreadableServerVersion { reported });
            return Ok(built);
        }
        Err(err) => return Err(err),
    };

    let number = version.legacy_number();
    tracing::debug!(version = %version, legacy_number = number, "probed server version");

    if number < MIN_SUPPORTED_VERSION {
        built.raise(Advisory::UnsupportedServerVersion {
            found: number,
            minimum: MIN_SUPPORTED_VERSION,
        });
    }
    Ok(built)
}
