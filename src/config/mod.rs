//! Configuration module for mantis-impala.
//!
//! Handles connection parameters, descriptor construction, environment
//! variables, and the settings file.

pub mod connection;
pub mod settings;

pub use connection::{
    parse_additional_options, ConnectionDescriptor, ConnectionError, ConnectionParams,
    TunnelSettings, DEFAULT_ARGS,
};
pub use settings::{expand_env_vars, LoggingSettings, Settings, SettingsError, CONFIG_ENV_VAR};
