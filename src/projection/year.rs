//! Output structures for projections

use serde::{Deserialize, Serialize};

use crate::config::{ExpenseSetting, FinancialConfig};

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,

    // Comparison
    pub cumulative_rental_value: f64,
    pub alternative_investment_value: f64,
    /// Net profit over original value, in percent, rounded to one decimal
    pub yearly_roi: f64,
    pub value_difference: f64,
    pub net_profit_this_year: f64,

    // Display-only rates
    pub effective_occupancy_rate: f64,
    pub effective_nightly_rate: f64,

    // Echoed configuration
    pub operator_commission_pct: f64,
    pub fixed_expenses: ExpenseSetting,
    pub variable_expenses: ExpenseSetting,
    pub maintenance: ExpenseSetting,
    pub tax_rate: f64,

    // Breakdown
    pub gross_revenue: f64,
    pub commission: f64,
    pub maintenance_cost: f64,
    pub variable_expenses_cost: f64,
    pub fixed_expenses_cost: f64,
    pub taxable_base: f64,
    pub tax_amount: f64,
    pub cumulative_net_profit: f64,
    pub property_appreciation: f64,
    pub alternative_gain: f64,
}

impl YearProjection {
    /// Create an empty row for `year` with the configuration echoed
    pub fn new(year: u32, config: &FinancialConfig) -> Self {
        Self {
            year,
            cumulative_rental_value: 0.0,
            alternative_investment_value: 0.0,
            yearly_roi: 0.0,
            value_difference: 0.0,
            net_profit_this_year: 0.0,
            effective_occupancy_rate: 0.0,
            effective_nightly_rate: 0.0,
            operator_commission_pct: config.operator_commission_pct,
            fixed_expenses: config.fixed_expenses,
            variable_expenses: config.variable_expenses,
            maintenance: config.maintenance,
            tax_rate: config.taxes.value,
            gross_revenue: 0.0,
            commission: 0.0,
            maintenance_cost: 0.0,
            variable_expenses_cost: 0.0,
            fixed_expenses_cost: 0.0,
            taxable_base: 0.0,
            tax_amount: 0.0,
            cumulative_net_profit: 0.0,
            property_appreciation: 0.0,
            alternative_gain: 0.0,
        }
    }
}

/// Complete projection result for one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Property identifier
    pub property_id: String,

    /// Original acquisition price the run was based on
    pub property_value: f64,

    /// Yearly rows in ascending year order
    pub years: Vec<YearProjection>,
}

impl ProjectionResult {
    pub fn new(property_id: impl Into<String>, property_value: f64, years: Vec<YearProjection>) -> Self {
        Self {
            property_id: property_id.into(),
            property_value,
            years,
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary::from_years(&self.years)
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_net_profit: f64,
    pub total_gross_revenue: f64,
    pub total_tax: f64,
    pub average_roi: f64,
    pub final_rental_value: f64,
    pub final_alternative_value: f64,
    pub final_value_difference: f64,
    /// First year the rental strategy is worth at least the alternative
    pub break_even_year: Option<u32>,
}

impl ProjectionSummary {
    pub fn from_years(years: &[YearProjection]) -> Self {
        let total_net_profit: f64 = years.iter().map(|r| r.net_profit_this_year).sum();
        let total_gross_revenue: f64 = years.iter().map(|r| r.gross_revenue).sum();
        let total_tax: f64 = years.iter().map(|r| r.tax_amount).sum();
        let average_roi = if years.is_empty() {
            0.0
        } else {
            years.iter().map(|r| r.yearly_roi).sum::<f64>() / years.len() as f64
        };

        let last = years.last();

        Self {
            total_years: years.len() as u32,
            total_net_profit,
            total_gross_revenue,
            total_tax,
            average_roi,
            final_rental_value: last.map(|r| r.cumulative_rental_value).unwrap_or(0.0),
            final_alternative_value: last.map(|r| r.alternative_investment_value).unwrap_or(0.0),
            final_value_difference: last.map(|r| r.value_difference).unwrap_or(0.0),
            break_even_year: years
                .iter()
                .find(|r| r.value_difference >= 0.0)
                .map(|r| r.year),
        }
    }
}
