//! Financial configuration: defaults, stored overrides, and resolution

mod financial;
mod store;
mod resolver;
pub mod loader;

pub use financial::{
    BaselineRates, ExpenseSetting, FinancialConfig, FinancialConfigOverride,
    DEFAULT_ALTERNATIVE_INTEREST_PCT, DEFAULT_APPRECIATION_PCT, DEFAULT_FIXED_EXPENSES,
    DEFAULT_MAINTENANCE_PCT, DEFAULT_NIGHTLY_RATE, DEFAULT_OCCUPANCY_RATE,
    DEFAULT_OPERATOR_COMMISSION_PCT, DEFAULT_TAXES_PCT, DEFAULT_VARIABLE_EXPENSES_PCT,
};
pub use store::{ConfigKey, ConfigStore, InMemoryConfigStore};
pub use resolver::{build_input, ConfigResolver, ResolvedConfig};
pub use loader::{
    load_config_store, load_config_store_from_reader, load_default_config_store, CsvConfigStore,
    DEFAULT_CONFIG_PATH,
};
