//! Financial configuration consumed by the projection engine

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Default operator commission (% of gross revenue)
pub const DEFAULT_OPERATOR_COMMISSION_PCT: f64 = 15.0;
/// Default maintenance (% of property value)
pub const DEFAULT_MAINTENANCE_PCT: f64 = 5.0;
/// Default fixed expenses (flat amount per year)
pub const DEFAULT_FIXED_EXPENSES: f64 = 2500.0;
/// Default variable expenses (% of gross revenue)
pub const DEFAULT_VARIABLE_EXPENSES_PCT: f64 = 12.0;
/// Default taxes (% of taxable base)
pub const DEFAULT_TAXES_PCT: f64 = 35.0;
/// Default property appreciation (%/yr)
pub const DEFAULT_APPRECIATION_PCT: f64 = 4.0;
/// Default alternative investment interest (%/yr)
pub const DEFAULT_ALTERNATIVE_INTEREST_PCT: f64 = 7.0;
/// Default baseline nightly rate
pub const DEFAULT_NIGHTLY_RATE: f64 = 1800.0;
/// Default baseline occupancy (%)
pub const DEFAULT_OCCUPANCY_RATE: f64 = 74.0;

/// An expense that is either a percentage of a context base or a flat amount.
///
/// Flat amounts are constant across years; they are never inflated by growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSetting {
    pub value: f64,
    pub is_percentage: bool,
}

impl ExpenseSetting {
    pub const fn percentage(value: f64) -> Self {
        Self { value, is_percentage: true }
    }

    pub const fn flat(value: f64) -> Self {
        Self { value, is_percentage: false }
    }

    /// Expense amount against the given base (ignored for flat amounts)
    pub fn amount(&self, base: f64) -> f64 {
        if self.is_percentage {
            base * self.value / 100.0
        } else {
            self.value
        }
    }
}

/// Fully resolved financial configuration for one projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialConfig {
    /// Operator commission, always a percentage of gross revenue
    pub operator_commission_pct: f64,

    /// Maintenance, percentage of property value or flat
    pub maintenance: ExpenseSetting,

    /// Fixed expenses, percentage of property value or flat
    pub fixed_expenses: ExpenseSetting,

    /// Variable expenses, percentage of gross revenue or flat
    pub variable_expenses: ExpenseSetting,

    /// Taxes, percentage of taxable base or flat
    pub taxes: ExpenseSetting,

    /// Property appreciation rate (%/yr)
    pub annual_appreciation_pct: f64,

    /// Opportunity-cost rate for the alternative investment (%/yr)
    pub alternative_interest_pct: f64,
}

impl FinancialConfig {
    /// Hard-coded defaults used when neither the property nor the company sets a field
    pub const fn default_pricing() -> Self {
        Self {
            operator_commission_pct: DEFAULT_OPERATOR_COMMISSION_PCT,
            maintenance: ExpenseSetting::percentage(DEFAULT_MAINTENANCE_PCT),
            fixed_expenses: ExpenseSetting::flat(DEFAULT_FIXED_EXPENSES),
            variable_expenses: ExpenseSetting::percentage(DEFAULT_VARIABLE_EXPENSES_PCT),
            taxes: ExpenseSetting::percentage(DEFAULT_TAXES_PCT),
            annual_appreciation_pct: DEFAULT_APPRECIATION_PCT,
            alternative_interest_pct: DEFAULT_ALTERNATIVE_INTEREST_PCT,
        }
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        ProjectionError::check_finite("operator_commission_pct", self.operator_commission_pct)?;
        ProjectionError::check_finite("maintenance", self.maintenance.value)?;
        ProjectionError::check_finite("fixed_expenses", self.fixed_expenses.value)?;
        ProjectionError::check_finite("variable_expenses", self.variable_expenses.value)?;
        ProjectionError::check_finite("taxes", self.taxes.value)?;
        ProjectionError::check_finite("annual_appreciation_pct", self.annual_appreciation_pct)?;
        ProjectionError::check_finite("alternative_interest_pct", self.alternative_interest_pct)?;
        Ok(())
    }
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self::default_pricing()
    }
}

/// Generic nightly rate and occupancy used when a property has no figures of its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineRates {
    pub nightly_rate: f64,
    pub occupancy_rate: f64,
}

impl Default for BaselineRates {
    fn default() -> Self {
        Self {
            nightly_rate: DEFAULT_NIGHTLY_RATE,
            occupancy_rate: DEFAULT_OCCUPANCY_RATE,
        }
    }
}

/// Partial configuration as stored for a property or a company.
/// Unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialConfigOverride {
    #[serde(default)]
    pub operator_commission_pct: Option<f64>,
    #[serde(default)]
    pub maintenance: Option<ExpenseSetting>,
    #[serde(default)]
    pub fixed_expenses: Option<ExpenseSetting>,
    #[serde(default)]
    pub variable_expenses: Option<ExpenseSetting>,
    #[serde(default)]
    pub taxes: Option<ExpenseSetting>,
    #[serde(default)]
    pub annual_appreciation_pct: Option<f64>,
    #[serde(default)]
    pub alternative_interest_pct: Option<f64>,
    #[serde(default)]
    pub nightly_rate: Option<f64>,
    #[serde(default)]
    pub occupancy_rate: Option<f64>,
}

impl FinancialConfigOverride {
    /// Layer `self` over `fallback`: fields set here win, unset fields take the fallback's
    pub fn or(&self, fallback: &Self) -> Self {
        Self {
            operator_commission_pct: self.operator_commission_pct.or(fallback.operator_commission_pct),
            maintenance: self.maintenance.or(fallback.maintenance),
            fixed_expenses: self.fixed_expenses.or(fallback.fixed_expenses),
            variable_expenses: self.variable_expenses.or(fallback.variable_expenses),
            taxes: self.taxes.or(fallback.taxes),
            annual_appreciation_pct: self.annual_appreciation_pct.or(fallback.annual_appreciation_pct),
            alternative_interest_pct: self.alternative_interest_pct.or(fallback.alternative_interest_pct),
            nightly_rate: self.nightly_rate.or(fallback.nightly_rate),
            occupancy_rate: self.occupancy_rate.or(fallback.occupancy_rate),
        }
    }

    /// Fill every unset field from the hard-coded defaults
    pub fn finalize(&self) -> (FinancialConfig, BaselineRates) {
        let defaults = FinancialConfig::default_pricing();
        let baseline = BaselineRates::default();

        let config = FinancialConfig {
            operator_commission_pct: self
                .operator_commission_pct
                .unwrap_or(defaults.operator_commission_pct),
            maintenance: self.maintenance.unwrap_or(defaults.maintenance),
            fixed_expenses: self.fixed_expenses.unwrap_or(defaults.fixed_expenses),
            variable_expenses: self.variable_expenses.unwrap_or(defaults.variable_expenses),
            taxes: self.taxes.unwrap_or(defaults.taxes),
            annual_appreciation_pct: self
                .annual_appreciation_pct
                .unwrap_or(defaults.annual_appreciation_pct),
            alternative_interest_pct: self
                .alternative_interest_pct
                .unwrap_or(defaults.alternative_interest_pct),
        };

        let baseline = BaselineRates {
            nightly_rate: self.nightly_rate.unwrap_or(baseline.nightly_rate),
            occupancy_rate: self.occupancy_rate.unwrap_or(baseline.occupancy_rate),
        };

        (config, baseline)
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
