//! Impala connection descriptors.
//!
//! [`ConnectionParams`] is what configuration tooling collects; the
//! transport layer calls [`ConnectionDescriptor::build`] once per connection
//! attempt and connects with the result. Building is a pure transform: no
//! I/O, and malformed additional options are passed through for the
//! transport to reject on its own terms.
//!
//! Supports configuration via environment variables:
//! - `MANTIS_IMPALA_HOST`: Server hostname (default `localhost`)
//! - `MANTIS_IMPALA_PORT`: Port (default 21050)
//! - `MANTIS_IMPALA_DATABASE`: Database name (required)
//! - `MANTIS_IMPALA_SSL`: `true`/`false`
//! - `MANTIS_IMPALA_OPTIONS`: Additional options (`key=value;key=value`)

use std::collections::BTreeMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::advisory::{Advisory, Built};
use crate::sql::dialect::DEFAULT_PORT;

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Database name is required")]
    MissingDatabase,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Fixed connection arguments, applied before anything the user supplies.
pub const DEFAULT_ARGS: &[(&str, &str)] = &[
    ("characterEncoding", "UTF8"),
    ("useCompression", "true"),
    ("useUnicode", "true"),
    ("zeroDateTimeBehavior", "convertToNull"),
];

/// Property key carrying the effective SSL flag.
pub const SSL_KEY: &str = "useSSL";

/// Property key carrying the database name.
pub const DATABASE_KEY: &str = "database";

/// Option key whose presence silences the SSL trust advisory.
pub const TRUST_SERVER_CERTIFICATE_KEY: &str = "trustServerCertificate";

/// Secure-tunnel settings. Opaque here and passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelSettings(pub BTreeMap<String, String>);

/// Raw connection parameters as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    /// Server hostname. Empty means `localhost`.
    pub host: String,
    /// Port; `None` means 21050.
    pub port: Option<u16>,
    /// Database name (required).
    pub database: String,
    /// Explicit SSL flag.
    pub ssl: bool,
    /// Free-form options, e.g. `useSSL=true;trustServerCertificate=true`.
    pub additional_options: Option<String>,
    /// Secure-tunnel settings inherited from the generic layer.
    pub tunnel: Option<TunnelSettings>,
}

impl ConnectionParams {
    /// Parameters for `host` / `database` with everything else defaulted.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    pub fn with_additional_options(mut self, options: impl Into<String>) -> Self {
        self.additional_options = Some(options.into());
        self
    }

    pub fn with_tunnel(mut self, tunnel: TunnelSettings) -> Self {
        self.tunnel = Some(tunnel);
        self
    }

    /// Load parameters from environment variables.
    ///
    /// Required:
    /// - `MANTIS_IMPALA_DATABASE`
    ///
    /// Optional:
    /// - `MANTIS_IMPALA_HOST`, `MANTIS_IMPALA_PORT`, `MANTIS_IMPALA_SSL`,
    ///   `MANTIS_IMPALA_OPTIONS`
    pub fn from_env() -> Result<Self, ConnectionError> {
        let database = env::var("MANTIS_IMPALA_DATABASE")
            .map_err(|_| ConnectionError::MissingEnvVar("MANTIS_IMPALA_DATABASE".to_string()))?;

        let host = env::var("MANTIS_IMPALA_HOST").unwrap_or_default();

        let port = match env::var("MANTIS_IMPALA_PORT") {
            Ok(p) => Some(p.trim().parse::<u16>().map_err(|_| {
                ConnectionError::InvalidConfig(format!("MANTIS_IMPALA_PORT is not a port: {}", p))
            })?),
            Err(_) => None,
        };

        let ssl = env::var("MANTIS_IMPALA_SSL")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let additional_options = env::var("MANTIS_IMPALA_OPTIONS").ok();

        Ok(Self {
            host,
            port,
            database,
            ssl,
            additional_options,
            tunnel: None,
        })
    }
}

/// Canonical spelling of a known property key, matched case-insensitively.
/// Unknown keys are returned as written.
fn canonical_key(key: &str) -> String {
    DEFAULT_ARGS
        .iter()
        .map(|(k, _)| *k)
        .chain([SSL_KEY, DATABASE_KEY, TRUST_SERVER_CERTIFICATE_KEY])
        .find(|known| known.eq_ignore_ascii_case(key))
        .map_or_else(|| key.to_string(), str::to_string)
}

/// Split an additional-options string into ordered key/value pairs.
///
/// Entries are separated by `;` or `&`; a leading `?` is ignored. Keys and
/// values are trimmed. An entry without `=` is kept with an empty value,
/// and empty entries are dropped. No other validation happens here.
pub fn parse_additional_options(options: &str) -> Vec<(String, String)> {
    options
        .trim()
        .trim_start_matches('?')
        .split(['&', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (entry.to_string(), String::new()),
        })
        .collect()
}

/// Normalized, immutable connection descriptor handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Effective SSL: the explicit flag OR `useSSL=true` in the options.
    pub ssl: bool,
    /// Merged connection properties: defaults, then `useSSL`, then the
    /// database, then user options (last write wins).
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tunnel: Option<TunnelSettings>,
}

impl ConnectionDescriptor {
    /// Build a descriptor from raw parameters.
    ///
    /// Fails only when the database name is missing. Enabling SSL without a
    /// `trustServerCertificate` option raises an advisory and nothing else.
    pub fn build(params: &ConnectionParams) -> Result<Built<Self>, ConnectionError> {
        if params.database.trim().is_empty() {
            return Err(ConnectionError::MissingDatabase);
        }

        let options = params
            .additional_options
            .as_deref()
            .map(parse_additional_options)
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (canonical_key(&k), v))
            .collect::<Vec<_>>();

        let inferred_ssl = options
            .iter()
            .any(|(k, v)| k == SSL_KEY && v.eq_ignore_ascii_case("true"));
        let ssl = params.ssl || inferred_ssl;

        let trusts_server = options
            .iter()
            .any(|(k, _)| k == TRUST_SERVER_CERTIFICATE_KEY);

        let mut properties: BTreeMap<String, String> = DEFAULT_ARGS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        properties.insert(SSL_KEY.to_string(), ssl.to_string());
        properties.insert(DATABASE_KEY.to_string(), params.database.clone());
        for (key, value) in &options {
            properties.insert(key.clone(), value.clone());
        }

        let host = if params.host.trim().is_empty() {
            "localhost".to_string()
        } else {
            params.host.trim().to_string()
        };
        let port = params.port.unwrap_or(DEFAULT_PORT);

        tracing::debug!(
            host = %host,
            port,
            database = %params.database,
            ssl,
            option_keys = ?options.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            "built Impala connection descriptor"
        );

        let mut built = Built::new(Self {
            host,
            port,
            database: params.database.clone(),
            ssl,
            properties,
            tunnel: params.tunnel.clone(),
        });

        if ssl && !trusts_server {
            built.raise(Advisory::SslWithoutTrustServerCertificate);
        }

        Ok(built)
    }

    /// The fixed default arguments every descriptor starts from.
    pub fn default_args(&self) -> &'static [(&'static str, &'static str)] {
        DEFAULT_ARGS
    }

    /// Look up a merged property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Render `impala://host:port/database?key=value&...`.
    ///
    /// The path carries the merged `database` property, so a `database=`
    /// option overrides the configured name here as well.
    pub fn to_connection_string(&self) -> String {
        let database = self.property(DATABASE_KEY).unwrap_or(&self.database);
        let params: Vec<String> = self
            .properties
            .iter()
            .filter(|(k, _)| k.as_str() != DATABASE_KEY)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        let base = format!("impala://{}:{}/{}", self.host, self.port, database);
        if params.is_empty() {
            base
        } else {
            format!("{}?{}", base, params.join("&"))
        }
    }
}
