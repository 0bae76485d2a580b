//! Explicit dialect registry.
//!
//! The registry is built once during startup and passed by reference to
//! whatever needs dialect lookup. There is no process-wide registration
//! state: a dialect exists for a component only if the registry it was
//! handed contains it.

use std::collections::BTreeMap;

use super::{Ansi, Impala, SqlDialect};

/// Errors raised while registering or resolving dialects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("dialect already registered: {0}")]
    AlreadyRegistered(String),

    #[error("dialect {dialect} declares unknown parent {parent}")]
    UnknownParent { dialect: String, parent: String },

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Name → dialect lookup table.
#[derive(Debug, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<&'static str, &'static dyn SqlDialect>,
}

impl DialectRegistry {
    /// Registry holding the generic base and Impala.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert(&Ansi);
        registry.insert(&Impala);
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            dialects: BTreeMap::new(),
        }
    }

    fn insert(&mut self, dialect: &'static dyn SqlDialect) {
        self.dialects.insert(dialect.name(), dialect);
    }

    /// Register a dialect. Its parent, if any, must already be registered.
    pub fn register(&mut self, dialect: &'static dyn SqlDialect) -> Result<(), RegistryError> {
        let name = dialect.name();
        if self.dialects.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }
        if let Some(parent) = dialect.capabilities().parent {
            if !self.dialects.contains_key(parent) {
                return Err(RegistryError::UnknownParent {
                    dialect: name.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
        tracing::debug!(dialect = name, "registered dialect");
        self.insert(dialect);
        Ok(())
    }

    /// Look up a dialect by name.
    pub fn get(&self, name: &str) -> Result<&'static dyn SqlDialect, RegistryError> {
        self.dialects
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownDialect(name.to_string()))
    }

    /// Names of all registered dialects, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dialects.keys().copied()
    }

    /// The dialect followed by its ancestors, nearest first.
    pub fn resolve_parent_chain(&self, name: &str) -> Result<Vec<&'static str>, RegistryError> {
        let mut chain = Vec::new();
        let mut current = Some(self.get(name)?);
        while let Some(dialect) = current {
            chain.push(dialect.name());
            current = match dialect.capabilities().parent {
                // Guard against a cycle introduced by a misdeclared parent.
                Some(parent) if !chain.contains(&parent) => Some(self.get(parent)?),
                _ => None,
            };
        }
        Ok(chain)
    }
}
