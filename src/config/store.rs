//! Keyed storage of partial financial configuration

use std::collections::HashMap;
use std::fmt;

use super::FinancialConfigOverride;
use crate::error::ConfigError;

/// Where a stored configuration applies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Override for a single property (development, unit or prototype)
    Property(String),
    /// Default for every property of a company
    Company(String),
}

impl ConfigKey {
    /// Parse a `(scope, key)` pair as written in configuration files
    pub fn parse(scope: &str, key: &str) -> Result<Self, ConfigError> {
        match scope.to_ascii_lowercase().as_str() {
            "property" => Ok(ConfigKey::Property(key.to_string())),
            "company" => Ok(ConfigKey::Company(key.to_string())),
            other => Err(ConfigError::UnknownScope(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKey::Property(id) => write!(f, "property:{}", id),
            ConfigKey::Company(id) => write!(f, "company:{}", id),
        }
    }
}

/// Source of stored configuration records.
///
/// Implementations may be remote; the engine never calls this directly.
pub trait ConfigStore {
    /// Fetch the stored partial configuration for a key, if any
    fn fetch(&self, key: &ConfigKey) -> Result<Option<FinancialConfigOverride>, ConfigError>;
}

/// Configuration held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    entries: HashMap<ConfigKey, FinancialConfigOverride>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any previous one for the key
    pub fn insert(&mut self, key: ConfigKey, config: FinancialConfigOverride) {
        self.entries.insert(key, config);
    }

    /// Mutable access to the record for a key, creating an empty one if missing
    pub fn entry_mut(&mut self, key: ConfigKey) -> &mut FinancialConfigOverride {
        self.entries.entry(key).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn fetch(&self, key: &ConfigKey) -> Result<Option<FinancialConfigOverride>, ConfigError> {
        Ok(self.entries.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(
            ConfigKey::parse("Property", "unit-1").unwrap(),
            ConfigKey::Property("unit-1".to_string())
        );
        assert_eq!(
            ConfigKey::parse("company", "acme").unwrap(),
            ConfigKey::Company("acme".to_string())
        );
        assert!(matches!(
            ConfigKey::parse("region", "north"),
            Err(ConfigError::UnknownScope(s)) if s == "region"
        ));
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = InMemoryConfigStore::new();
        assert!(store.is_empty());

        store.entry_mut(ConfigKey::Company("acme".into())).operator_commission_pct = Some(18.0);
        assert_eq!(store.len(), 1);

        let fetched = store.fetch(&ConfigKey::Company("acme".into())).unwrap();
        assert_eq!(fetched.unwrap().operator_commission_pct, Some(18.0));
        assert!(store.fetch(&ConfigKey::Property("acme".into())).unwrap().is_none());
    }
}
