//! Core projection engine for yearly rental-versus-alternative projections

use crate::config::FinancialConfig;
use crate::error::ProjectionError;
use crate::property::ProjectionInput;
use super::state::ProjectionState;
use super::year::{ProjectionResult, YearProjection};

/// Years over which displayed occupancy ramps up to the baseline
const OCCUPANCY_RAMP_YEARS: u32 = 5;

/// Occupancy points gained per ramp year
const OCCUPANCY_RAMP_STEP: f64 = 2.0;

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: FinancialConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with a resolved configuration
    pub fn new(config: FinancialConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FinancialConfig {
        &self.config
    }

    /// Run the projection for one property, one row per year in ascending order
    pub fn project(&self, input: &ProjectionInput) -> Result<Vec<YearProjection>, ProjectionError> {
        input.validate()?;
        self.config.validate()?;

        let mut state = ProjectionState::from_input(input);
        let mut years = Vec::with_capacity(input.horizon_years as usize);

        for _year in 1..=input.horizon_years {
            state.advance_year();
            years.push(self.calculate_year(input, &mut state));
        }

        log::debug!(
            "Projected {} years for property value {:.2}",
            years.len(),
            input.property_value
        );

        Ok(years)
    }

    /// Run the projection and attach the property identity
    pub fn project_property(
        &self,
        property_id: &str,
        input: &ProjectionInput,
    ) -> Result<ProjectionResult, ProjectionError> {
        let years = self.project(input)?;
        Ok(ProjectionResult::new(property_id, input.property_value, years))
    }

    /// Calculate one year's row and roll the accumulator forward
    fn calculate_year(&self, input: &ProjectionInput, state: &mut ProjectionState) -> YearProjection {
        let config = &self.config;
        let mut row = YearProjection::new(state.year, config);

        // Revenue always uses baseline occupancy; growth starts after year 1
        let growth_factor = state.growth_factor(input.annual_growth_rate);
        let revenue = input.base_annual_revenue() * growth_factor;
        row.gross_revenue = revenue;

        // Operating costs
        row.commission = revenue * config.operator_commission_pct / 100.0;
        row.maintenance_cost = config.maintenance.amount(input.property_value);
        row.variable_expenses_cost = config.variable_expenses.amount(revenue);
        row.fixed_expenses_cost = config.fixed_expenses.amount(input.property_value);

        // No floor: a negative base yields a negative (credit) percentage tax,
        // and a flat tax applies regardless
        row.taxable_base = revenue
            - row.commission
            - row.maintenance_cost
            - row.variable_expenses_cost
            - row.fixed_expenses_cost;
        row.tax_amount = config.taxes.amount(row.taxable_base);

        row.net_profit_this_year = row.taxable_base - row.tax_amount;
        state.record_profit(row.net_profit_this_year);
        row.cumulative_net_profit = state.cumulative_net_profit;

        // Value comparison, both compounding from the original price
        row.property_appreciation = state.cumulative_gain(config.annual_appreciation_pct);
        row.alternative_gain = state.cumulative_gain(config.alternative_interest_pct);

        row.yearly_roi = round_one_decimal(row.net_profit_this_year / input.property_value * 100.0);
        row.cumulative_rental_value =
            input.property_value + state.cumulative_net_profit + row.property_appreciation;
        row.alternative_investment_value = input.property_value + row.alternative_gain;
        row.value_difference = row.cumulative_rental_value - row.alternative_investment_value;

        row.effective_occupancy_rate = effective_occupancy(input.occupancy_rate, state.year);
        row.effective_nightly_rate = input.nightly_rate * growth_factor;

        row
    }
}

/// Run a projection with the given configuration
pub fn project(
    input: &ProjectionInput,
    config: &FinancialConfig,
) -> Result<Vec<YearProjection>, ProjectionError> {
    ProjectionEngine::new(*config).project(input)
}

/// Displayed occupancy ramps up by two points a year until it meets the
/// baseline in year 5. Display only: revenue is computed from the baseline.
pub fn effective_occupancy(occupancy_rate: f64, year: u32) -> f64 {
    if year <= OCCUPANCY_RAMP_YEARS {
        occupancy_rate - (OCCUPANCY_RAMP_YEARS - year) as f64 * OCCUPANCY_RAMP_STEP
    } else {
        occupancy_rate
    }
}

/// Round to one decimal place, ties toward positive infinity
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpenseSetting;
    use crate::property::MAX_HORIZON_YEARS;
    use approx::assert_abs_diff_eq;

    fn scenario_a(horizon_years: u32) -> ProjectionInput {
        ProjectionInput::new(3_500_000.0, 1800.0, 74.0, 5.0, horizon_years)
    }

    #[test]
    fn test_scenario_a_year_one() {
        let years = project(&scenario_a(1), &FinancialConfig::default()).unwrap();
        assert_eq!(years.len(), 1);
        let row = &years[0];

        assert_eq!(row.year, 1);
        assert_abs_diff_eq!(row.gross_revenue, 486_180.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.commission, 72_927.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.maintenance_cost, 175_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.variable_expenses_cost, 58_341.6, epsilon = 1e-6);
        assert_abs_diff_eq!(row.fixed_expenses_cost, 2_500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.taxable_base, 177_411.4, epsilon = 1e-6);
        assert_abs_diff_eq!(row.tax_amount, 62_093.99, epsilon = 1e-6);
        assert_abs_diff_eq!(row.net_profit_this_year, 115_317.41, epsilon = 1e-6);
        assert_abs_diff_eq!(row.property_appreciation, 140_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.cumulative_rental_value, 3_755_317.41, epsilon = 1e-6);
        assert_abs_diff_eq!(row.alternative_investment_value, 3_745_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(row.value_difference, 10_317.41, epsilon = 1e-6);
        assert_eq!(row.yearly_roi, 3.3);
        assert_eq!(row.effective_nightly_rate, 1800.0);
        assert_eq!(row.effective_occupancy_rate, 66.0);
    }

    #[test]
    fn test_cumulative_profit_carries_forward() {
        let years = project(&scenario_a(3), &FinancialConfig::default()).unwrap();
        let sum: f64 = years.iter().map(|r| r.net_profit_this_year).sum();
        assert_abs_diff_eq!(years[2].cumulative_net_profit, sum, epsilon = 1e-6);

        // Year 2 revenue grows by exactly one growth step
        assert_abs_diff_eq!(years[1].gross_revenue, 486_180.0 * 1.05, epsilon = 1e-6);
        assert_abs_diff_eq!(years[1].effective_nightly_rate, 1890.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_taxable_base_is_taxed_as_credit() {
        let config = FinancialConfig {
            maintenance: ExpenseSetting::flat(1_000_000.0),
            ..FinancialConfig::default()
        };
        let years = project(&scenario_a(1), &config).unwrap();
        let row = &years[0];
        assert!(row.taxable_base < 0.0);
        assert!(row.tax_amount < 0.0);
        assert_abs_diff_eq!(row.net_profit_this_year, row.taxable_base * 0.65, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_tax_applies_to_negative_base() {
        let config = FinancialConfig {
            maintenance: ExpenseSetting::flat(1_000_000.0),
            taxes: ExpenseSetting::flat(5_000.0),
            ..FinancialConfig::default()
        };
        let row = &project(&scenario_a(1), &config).unwrap()[0];
        assert_eq!(row.tax_amount, 5_000.0);
        assert_abs_diff_eq!(row.net_profit_this_year, row.taxable_base - 5_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let config = FinancialConfig::default();
        assert_eq!(
            project(&scenario_a(0), &config),
            Err(ProjectionError::InvalidHorizon(0))
        );

        let mut input = scenario_a(5);
        input.property_value = -1.0;
        assert_eq!(
            project(&input, &config),
            Err(ProjectionError::InvalidPropertyValue(-1.0))
        );

        let bad_config = FinancialConfig {
            alternative_interest_pct: f64::INFINITY,
            ..config
        };
        assert!(matches!(
            project(&scenario_a(5), &bad_config),
            Err(ProjectionError::NonFinite { field: "alternative_interest_pct" })
        ));
    }

    #[test]
    fn test_oversized_horizon_rejected_before_allocation() {
        let config = FinancialConfig::default();
        assert_eq!(
            project(&scenario_a(u32::MAX), &config),
            Err(ProjectionError::HorizonTooLarge(u32::MAX))
        );

        let years = project(&scenario_a(MAX_HORIZON_YEARS), &config).unwrap();
        assert_eq!(years.len(), MAX_HORIZON_YEARS as usize);
        assert!(years.iter().all(|r| r.net_profit_this_year.is_finite()));
    }

    #[test]
    fn test_effective_occupancy_ramp() {
        assert_eq!(effective_occupancy(74.0, 1), 66.0);
        assert_eq!(effective_occupancy(74.0, 4), 72.0);
        assert_eq!(effective_occupancy(74.0, 5), 74.0);
        assert_eq!(effective_occupancy(74.0, 6), 74.0);
        assert_eq!(effective_occupancy(74.0, 20), 74.0);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(3.2948), 3.3);
        assert_eq!(round_one_decimal(3.25), 3.3);
        assert_eq!(round_one_decimal(-3.25), -3.2);
        assert_eq!(round_one_decimal(-3.26), -3.3);
        assert_eq!(round_one_decimal(0.04), 0.0);
    }

    #[test]
    fn test_project_property() {
        let engine = ProjectionEngine::new(FinancialConfig::default());
        let result = engine.project_property("tulum-a1", &scenario_a(10)).unwrap();
        assert_eq!(result.property_id, "tulum-a1");
        assert_eq!(result.years.len(), 10);
        assert_eq!(result.summary().total_years, 10);
    }
}
