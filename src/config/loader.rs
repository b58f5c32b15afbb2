//! CSV-based configuration loader
//!
//! Each row sets one field of one scope:
//! `Scope,Key,Field,Value,IsPercentage`

use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, Trim};

use super::{ConfigKey, ConfigStore, ExpenseSetting, FinancialConfigOverride, InMemoryConfigStore};
use crate::error::ConfigError;

/// Default path to the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "data/financial_config.csv";

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Scope")]
    scope: String,
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "IsPercentage", default)]
    is_percentage: Option<String>,
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, ConfigError> {
    match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(true),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some("false") | Some("0") | Some("no") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Apply one `(field, value, is_percentage)` triple to a partial configuration
pub fn apply_field(
    config: &mut FinancialConfigOverride,
    field: &str,
    value: &str,
    is_percentage: Option<&str>,
) -> Result<(), ConfigError> {
    let number = parse_number(field, value)?;

    let expense = || -> Result<ExpenseSetting, ConfigError> {
        Ok(ExpenseSetting {
            value: number,
            is_percentage: parse_flag(field, is_percentage)?,
        })
    };

    match field {
        "operator_commission" => config.operator_commission_pct = Some(number),
        "maintenance" => config.maintenance = Some(expense()?),
        "fixed_expenses" => config.fixed_expenses = Some(expense()?),
        "variable_expenses" => config.variable_expenses = Some(expense()?),
        "taxes" => config.taxes = Some(expense()?),
        "appreciation" => config.annual_appreciation_pct = Some(number),
        "alternative_interest" => config.alternative_interest_pct = Some(number),
        "nightly_rate" => config.nightly_rate = Some(number),
        "occupancy_rate" => config.occupancy_rate = Some(number),
        other => return Err(ConfigError::UnknownField(other.to_string())),
    }

    Ok(())
}

fn read_store<R: std::io::Read>(mut reader: Reader<R>) -> Result<InMemoryConfigStore, ConfigError> {
    let mut store = InMemoryConfigStore::new();
    let mut rows = 0usize;

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let key = ConfigKey::parse(&row.scope, &row.key)?;
        apply_field(
            store.entry_mut(key),
            row.field.trim(),
            &row.value,
            row.is_percentage.as_deref(),
        )?;
        rows += 1;
    }

    log::debug!("Loaded {} configuration rows into {} scopes", rows, store.len());
    Ok(store)
}

/// Load a configuration store from a CSV file
pub fn load_config_store<P: AsRef<Path>>(path: P) -> Result<InMemoryConfigStore, ConfigError> {
    read_store(ReaderBuilder::new().trim(Trim::All).from_path(path)?)
}

/// Load the configuration store from the default location
pub fn load_default_config_store() -> Result<InMemoryConfigStore, ConfigError> {
    load_config_store(DEFAULT_CONFIG_PATH)
}

/// Load a configuration store from any reader
pub fn load_config_store_from_reader<R: std::io::Read>(reader: R) -> Result<InMemoryConfigStore, ConfigError> {
    read_store(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

/// Configuration store backed by a CSV file, read once at load time
#[derive(Debug, Clone, Default)]
pub struct CsvConfigStore {
    source: Option<PathBuf>,
    store: InMemoryConfigStore,
}

impl CsvConfigStore {
    /// Read every row of the file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let store = load_config_store(path)?;
        log::info!("Loaded configuration for {} scopes from {}", store.len(), path.display());
        Ok(Self {
            source: Some(path.to_path_buf()),
            store,
        })
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(Self {
            source: None,
            store: load_config_store_from_reader(reader)?,
        })
    }

    /// File the rows came from; `None` when read from memory or empty
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl ConfigStore for CsvConfigStore {
    fn fetch(&self, key: &ConfigKey) -> Result<Option<FinancialConfigOverride>, ConfigError> {
        self.store.fetch(key)
    }
}
