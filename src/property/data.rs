//! Projection input for a single rental property

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::ProjectionError;

/// Property value bounds offered by the simulator controls
pub const PROPERTY_VALUE_RANGE: RangeInclusive<f64> = 1_000_000.0..=50_000_000.0;

/// Horizon bounds offered by the simulator controls (years)
pub const HORIZON_RANGE: RangeInclusive<u32> = 1..=20;

/// Longest horizon the engine will project (years)
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Occupancy bounds offered by the simulator controls (%)
pub const OCCUPANCY_RANGE: RangeInclusive<f64> = 40.0..=100.0;

/// Growth bounds offered by the simulator controls (%)
pub const GROWTH_RANGE: RangeInclusive<f64> = 0.0..=10.0;

/// Growth slider step (%)
pub const GROWTH_STEP: f64 = 0.5;

/// Economic parameters of one property for one projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Baseline acquisition price
    pub property_value: f64,

    /// Baseline average nightly rental price
    pub nightly_rate: f64,

    /// Baseline annual occupancy (0-100)
    pub occupancy_rate: f64,

    /// Annual growth applied compoundingly to revenue and nightly rate (0-100)
    pub annual_growth_rate: f64,

    /// Number of years to project
    pub horizon_years: u32,
}

impl ProjectionInput {
    pub fn new(
        property_value: f64,
        nightly_rate: f64,
        occupancy_rate: f64,
        annual_growth_rate: f64,
        horizon_years: u32,
    ) -> Self {
        Self {
            property_value,
            nightly_rate,
            occupancy_rate,
            annual_growth_rate,
            horizon_years,
        }
    }

    /// Reject inputs that would produce NaN or infinite projections
    pub fn validate(&self) -> Result<(), ProjectionError> {
        ProjectionError::check_finite("property_value", self.property_value)?;
        ProjectionError::check_finite("nightly_rate", self.nightly_rate)?;
        ProjectionError::check_finite("occupancy_rate", self.occupancy_rate)?;
        ProjectionError::check_finite("annual_growth_rate", self.annual_growth_rate)?;

        if self.property_value <= 0.0 {
            return Err(ProjectionError::InvalidPropertyValue(self.property_value));
        }
        if self.horizon_years < 1 {
            return Err(ProjectionError::InvalidHorizon(self.horizon_years));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ProjectionError::HorizonTooLarge(self.horizon_years));
        }
        Ok(())
    }

    /// Clamp every field into the range the simulator controls allow.
    /// Growth is also snapped to the slider step.
    pub fn clamp_to_ui_bounds(&self) -> Self {
        let growth = self
            .annual_growth_rate
            .clamp(*GROWTH_RANGE.start(), *GROWTH_RANGE.end());

        Self {
            property_value: self
                .property_value
                .clamp(*PROPERTY_VALUE_RANGE.start(), *PROPERTY_VALUE_RANGE.end()),
            nightly_rate: self.nightly_rate.max(0.0),
            occupancy_rate: self
                .occupancy_rate
                .clamp(*OCCUPANCY_RANGE.start(), *OCCUPANCY_RANGE.end()),
            annual_growth_rate: (growth / GROWTH_STEP).round() * GROWTH_STEP,
            horizon_years: self
                .horizon_years
                .clamp(*HORIZON_RANGE.start(), *HORIZON_RANGE.end()),
        }
    }

    /// Gross revenue of year 1 (no growth applied yet)
    pub fn base_annual_revenue(&self) -> f64 {
        self.nightly_rate * 365.0 * (self.occupancy_rate / 100.0)
    }
}

/// A property row from a portfolio file: identity plus the known economics.
/// Missing rate fields fall back to the resolved configuration baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Property (development or unit) identifier
    pub property_id: String,

    /// Owning company, used for the company-level default config
    pub company_id: Option<String>,

    /// Listed property value
    pub property_value: f64,

    /// Known unit/prototype price, overrides `property_value` when present
    pub unit_price: Option<f64>,

    /// Explicit nightly rate, if the caller has one
    pub nightly_rate: Option<f64>,

    /// Explicit occupancy, if the caller has one
    pub occupancy_rate: Option<f64>,

    pub annual_growth_rate: f64,

    pub horizon_years: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectionInput {
        ProjectionInput::new(3_500_000.0, 1800.0, 74.0, 5.0, 10)
    }

    #[test]
    fn test_validate_accepts_normal_input() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_input() {
        let mut input = sample();
        input.horizon_years = 0;
        assert_eq!(input.validate(), Err(ProjectionError::InvalidHorizon(0)));

        let mut input = sample();
        input.property_value = 0.0;
        assert_eq!(
            input.validate(),
            Err(ProjectionError::InvalidPropertyValue(0.0))
        );

        let mut input = sample();
        input.nightly_rate = f64::NAN;
        assert_eq!(
            input.validate(),
            Err(ProjectionError::NonFinite { field: "nightly_rate" })
        );
    }

    #[test]
    fn test_validate_horizon_upper_bound() {
        let mut input = sample();
        input.horizon_years = MAX_HORIZON_YEARS;
        assert!(input.validate().is_ok());

        input.horizon_years = MAX_HORIZON_YEARS + 1;
        assert_eq!(
            input.validate(),
            Err(ProjectionError::HorizonTooLarge(MAX_HORIZON_YEARS + 1))
        );

        input.horizon_years = u32::MAX;
        assert_eq!(input.validate(), Err(ProjectionError::HorizonTooLarge(u32::MAX)));
    }

    #[test]
    fn test_base_annual_revenue() {
        assert!((sample().base_annual_revenue() - 486_180.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_to_ui_bounds() {
        let input = ProjectionInput::new(500_000.0, -10.0, 20.0, 3.3, 40).clamp_to_ui_bounds();
        assert_eq!(input.property_value, 1_000_000.0);
        assert_eq!(input.nightly_rate, 0.0);
        assert_eq!(input.occupancy_rate, 40.0);
        assert_eq!(input.annual_growth_rate, 3.5);
        assert_eq!(input.horizon_years, 20);

        let input = ProjectionInput::new(90_000_000.0, 1800.0, 120.0, 12.0, 0).clamp_to_ui_bounds();
        assert_eq!(input.property_value, 50_000_000.0);
        assert_eq!(input.occupancy_rate, 100.0);
        assert_eq!(input.annual_growth_rate, 10.0);
        assert_eq!(input.horizon_years, 1);
    }
}
