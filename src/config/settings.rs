//! TOML-based configuration for mantis-impala.
//!
//! Supports a config file (`mantis-impala.toml`) with environment variable
//! expansion in string values.
//!
//! Example configuration:
//! ```toml
//! [connections.production]
//! host = "impala.prod.internal"
//! port = 21050
//! database = "${PROD_IMPALA_DB}"
//! ssl = true
//! additional_options = "trustServerCertificate=true"
//!
//! [connections.production.tunnel]
//! ssh_host = "bastion.internal"
//! ssh_user = "deploy"
//!
//! [connections.dev]
//! host = "localhost"
//! database = "sandbox"
//!
//! [logging]
//! level = "debug"
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::connection::{ConnectionParams, TunnelSettings};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MANTIS_IMPALA_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named Impala connections.
    pub connections: BTreeMap<String, ConnectionParams>,

    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), connections = settings.connections.len(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MANTIS_IMPALA_CONFIG`
    /// 2. `./mantis-impala.toml`
    /// 3. `<config dir>/mantis-impala/config.toml`
    ///
    /// Falls back to defaults when no file exists.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mantis-impala.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mantis-impala").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a connection by name, exactly as written in the file.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionParams, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get a connection by name with environment variables expanded in its
    /// string fields (tunnel settings included).
    pub fn resolved_connection(&self, name: &str) -> Result<ConnectionParams, SettingsError> {
        let raw = self.get_connection(name)?;
        let tunnel = match &raw.tunnel {
            Some(TunnelSettings(entries)) => Some(TunnelSettings(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), expand_env_vars(v)?)))
                    .collect::<Result<_, SettingsError>>()?,
            )),
            None => None,
        };

        Ok(ConnectionParams {
            host: expand_env_vars(&raw.host)?,
            port: raw.port,
            database: expand_env_vars(&raw.database)?,
            ssl: raw.ssl,
            additional_options: raw
                .additional_options
                .as_deref()
                .map(expand_env_vars)
                .transpose()?,
            tunnel,
        })
    }

    /// Get the default connection (`default` if defined, else the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionParams)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
