//! Running state carried from one projection year to the next

use crate::property::ProjectionInput;

/// Accumulator for a single projection run
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first advance)
    pub year: u32,

    /// Sum of net profit over years 1..=year
    pub cumulative_net_profit: f64,

    /// Original acquisition price; appreciation and alternative gains compound from here
    pub property_value: f64,
}

impl ProjectionState {
    /// Initialize state before year 1
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            year: 0,
            cumulative_net_profit: 0.0,
            property_value: input.property_value,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Add this year's net profit to the running total
    pub fn record_profit(&mut self, net_profit: f64) {
        self.cumulative_net_profit += net_profit;
    }

    /// Revenue growth multiplier. Year 1 carries no growth.
    pub fn growth_factor(&self, annual_growth_rate: f64) -> f64 {
        (1.0 + annual_growth_rate / 100.0).powi(self.year as i32 - 1)
    }

    /// Cumulative gain on the original value at `rate_pct` after `year` full years.
    /// Unlike revenue growth, the exponent is the year itself.
    pub fn cumulative_gain(&self, rate_pct: f64) -> f64 {
        self.property_value * ((1.0 + rate_pct / 100.0).powi(self.year as i32) - 1.0)
    }
}
