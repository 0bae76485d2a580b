//! Server metadata probing.
//!
//! The transport layer owns the live connection; this module only sees it
//! through the [`MetadataProbe`] trait. After a successful low-level
//! connect, [`check_connectivity`] asks the probe for the server version
//! once and reports the probe's own validity result.
//!
//! # Example
//!
//! ```ignore
//! use mantis_impala::metadata::{check_connectivity, MetadataProbe};
//!
//! async fn connect(probe: &impl MetadataProbe) -> Result<bool, ProbeError> {
//!     let checked = check_connectivity(probe).await?;
//!     // Advisories have already been logged; they never change the result.
//!     Ok(checked.value)
//! }
//! ```

mod probe;
mod version;

pub use probe::{MetadataProbe, ProbeError, ProbeResult};
pub use version::{check_connectivity, DatabaseVersion, MIN_SUPPORTED_VERSION};
