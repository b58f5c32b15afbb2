//! Layered resolution of financial configuration
//!
//! Resolution order per field:
//! 1. Property-level override
//! 2. Company-level default
//! 3. Hard-coded defaults (see [`FinancialConfig::default_pricing`])

use super::{BaselineRates, ConfigKey, ConfigStore, FinancialConfig, FinancialConfigOverride};
use crate::error::ConfigError;
use crate::property::{ProjectionInput, PropertyRecord};

/// Configuration resolved for one property
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub financial: FinancialConfig,
    pub baseline: BaselineRates,
}

/// Resolves configuration from a store without ever touching the engine
pub struct ConfigResolver<S: ConfigStore> {
    store: S,
}

impl<S: ConfigStore> ConfigResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the configuration for a property, falling back through its company
    pub fn resolve(
        &self,
        property_id: Option<&str>,
        company_id: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let property = match property_id {
            Some(id) => self.fetch_or_empty(&ConfigKey::Property(id.to_string()))?,
            None => FinancialConfigOverride::default(),
        };
        let company = match company_id {
            Some(id) => self.fetch_or_empty(&ConfigKey::Company(id.to_string()))?,
            None => FinancialConfigOverride::default(),
        };

        if property.is_empty() && company.is_empty() {
            log::warn!(
                "No stored configuration for property {:?} / company {:?}, using defaults",
                property_id,
                company_id
            );
        }

        let (financial, baseline) = property.or(&company).finalize();
        Ok(ResolvedConfig { financial, baseline })
    }

    /// Build the projection input and configuration for a portfolio record.
    ///
    /// A known unit price replaces the listed property value. Nightly rate and
    /// occupancy come from the record when given, otherwise from the resolved baseline.
    pub fn resolve_input(
        &self,
        record: &PropertyRecord,
    ) -> Result<(ProjectionInput, FinancialConfig), ConfigError> {
        let resolved = self.resolve(Some(&record.property_id), record.company_id.as_deref())?;
        Ok((
            build_input(record, &resolved.baseline),
            resolved.financial,
        ))
    }

    fn fetch_or_empty(&self, key: &ConfigKey) -> Result<FinancialConfigOverride, ConfigError> {
        Ok(self.store.fetch(key)?.unwrap_or_default())
    }
}

/// Combine a record with baseline rates into a projection input
pub fn build_input(record: &PropertyRecord, baseline: &BaselineRates) -> ProjectionInput {
    let property_value = record.unit_price.unwrap_or(record.property_value);

    ProjectionInput {
        property_value,
        nightly_rate: record.nightly_rate.unwrap_or(baseline.nightly_rate),
        occupancy_rate: record.occupancy_rate.unwrap_or(baseline.occupancy_rate),
        annual_growth_rate: record.annual_growth_rate,
        horizon_years: record.horizon_years,
    }
}
