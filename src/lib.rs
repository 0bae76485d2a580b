//! # mantis-impala
//!
//! Impala dialect adapter for the Mantis multi-dialect SQL layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │               Generic query engine                      │
//! └─────────────────────────────────────────────────────────┘
//!        │ truncate / add_interval          │ map_native_type
//!        ▼                                  ▼
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ sql::dialect (Impala)    │   │ sql::types               │
//! │ base table + overrides   │   │ native → SemanticType    │
//! └──────────────────────────┘   └──────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Transport layer                         │
//! └─────────────────────────────────────────────────────────┘
//!   │ ConnectionDescriptor   │ check_connectivity   │ humanize
//!   ▼                        ▼                      ▼
//!  config::connection     metadata               humanize
//!
//!  temporal::codec: per bind parameter / result column
//! ```
//!
//! Everything except the version check is a pure function. Non-fatal
//! notices travel as [`advisory::Advisory`] values and are logged through
//! `tracing` when raised.

pub mod advisory;
pub mod config;
pub mod humanize;
pub mod metadata;
pub mod sql;
pub mod temporal;

// Re-export SQL submodules at crate level for convenience
pub use sql::dialect;
pub use sql::expr;
pub use sql::types;

/// Commonly used items.
pub mod prelude {
    pub use crate::advisory::{Advisory, Built};
    pub use crate::config::{ConnectionDescriptor, ConnectionError, ConnectionParams};
    pub use crate::humanize::{classify, humanize, ErrorCategory};
    pub use crate::metadata::{check_connectivity, DatabaseVersion, MetadataProbe, ProbeError};
    pub use crate::sql::dialect::{Dialect, DialectRegistry, Impala, SqlDialect, IMPALA_CAPABILITIES};
    pub use crate::sql::expr::{col, Expr, ExprExt};
    pub use crate::sql::types::{map_native_type, SemanticType};
    pub use crate::temporal::{
        encode_bind, render_literal, GranularityUnit, IntervalUnit, SessionTimezone,
        TemporalValue,
    };
}
