//! Scenario runner for batch projections
//!
//! Holds a base configuration once, then runs many properties, configuration
//! variants, or parameter sweeps against it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigResolver, ConfigStore, FinancialConfig};
use crate::error::{ConfigError, ProjectionError};
use crate::projection::{ProjectionEngine, ProjectionResult, YearProjection};
use crate::property::{ProjectionInput, PropertyRecord};

/// One property ready to project: identity, input, and its resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCase {
    pub property_id: String,
    pub input: ProjectionInput,
    pub config: FinancialConfig,
}

impl PropertyCase {
    /// Resolve every record of a portfolio against a configuration store
    pub fn from_records<S: ConfigStore>(
        resolver: &ConfigResolver<S>,
        records: &[PropertyRecord],
    ) -> Result<Vec<Self>, ConfigError> {
        records
            .iter()
            .map(|record| {
                let (input, config) = resolver.resolve_input(record)?;
                Ok(Self {
                    property_id: record.property_id.clone(),
                    input,
                    config,
                })
            })
            .collect()
    }
}

/// Input parameter varied by a sensitivity sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    OccupancyRate,
    NightlyRate,
    AnnualGrowthRate,
    PropertyValue,
}

impl SweepParameter {
    /// Copy of `input` with this parameter set to `value`
    pub fn apply(&self, input: &ProjectionInput, value: f64) -> ProjectionInput {
        let mut varied = *input;
        match self {
            SweepParameter::OccupancyRate => varied.occupancy_rate = value,
            SweepParameter::NightlyRate => varied.nightly_rate = value,
            SweepParameter::AnnualGrowthRate => varied.annual_growth_rate = value,
            SweepParameter::PropertyValue => varied.property_value = value,
        }
        varied
    }
}

/// One point of a sensitivity sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub years: Vec<YearProjection>,
}

/// Pre-configured scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for occupancy in [60.0, 70.0, 80.0] {
///     let input = ProjectionInput { occupancy_rate: occupancy, ..base };
///     let years = runner.run(&input)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: FinancialConfig,
}

impl ScenarioRunner {
    /// Create runner with the hard-coded default configuration
    pub fn new() -> Self {
        Self {
            base_config: FinancialConfig::default_pricing(),
        }
    }

    /// Create runner with a resolved configuration
    pub fn with_config(config: FinancialConfig) -> Self {
        Self { base_config: config }
    }

    /// Run a single projection against the base configuration
    pub fn run(&self, input: &ProjectionInput) -> Result<Vec<YearProjection>, ProjectionError> {
        ProjectionEngine::new(self.base_config).project(input)
    }

    /// Run many properties in parallel, each with its own resolved configuration
    /// (the base configuration is not consulted). Results keep the order of
    /// `cases`; a failing case does not stop the others.
    pub fn run_batch(cases: &[PropertyCase]) -> Vec<Result<ProjectionResult, ProjectionError>> {
        cases
            .par_iter()
            .map(|case| {
                let engine = ProjectionEngine::new(case.config);
                let result = engine.project_property(&case.property_id, &case.input);
                if let Err(e) = &result {
                    log::warn!("Skipping property {}: {}", case.property_id, e);
                }
                result
            })
            .collect()
    }

    /// Run one input against several complete configuration variants
    pub fn run_scenarios(
        input: &ProjectionInput,
        configs: &[FinancialConfig],
    ) -> Result<Vec<Vec<YearProjection>>, ProjectionError> {
        configs
            .iter()
            .map(|config| ProjectionEngine::new(*config).project(input))
            .collect()
    }

    /// Vary one input parameter over `values`, projecting each point
    pub fn sweep(
        &self,
        input: &ProjectionInput,
        parameter: SweepParameter,
        values: &[f64],
    ) -> Result<Vec<SweepPoint>, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_config);
        values
            .iter()
            .map(|&value| {
                let years = engine.project(&parameter.apply(input, value))?;
                Ok(SweepPoint { value, years })
            })
            .collect()
    }

    /// Get reference to base configuration
    pub fn config(&self) -> &FinancialConfig {
        &self.base_config
    }

    /// Get mutable reference to base configuration for customization
    pub fn config_mut(&mut self) -> &mut FinancialConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigKey, FinancialConfigOverride, InMemoryConfigStore};

    fn test_input() -> ProjectionInput {
        ProjectionInput::new(3_500_000.0, 1800.0, 74.0, 5.0, 10)
    }

    #[test]
    fn test_scenario_runner_batch_keeps_order() {
        let cases: Vec<_> = (1..=8)
            .map(|i| PropertyCase {
                property_id: format!("p{}", i),
                input: ProjectionInput::new(1_000_000.0 * i as f64, 1800.0, 74.0, 5.0, i),
                config: FinancialConfig::default(),
            })
            .collect();

        let results = ScenarioRunner::run_batch(&cases);
        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            let result = result.as_ref().unwrap();
            assert_eq!(result.property_id, format!("p{}", i + 1));
            assert_eq!(result.years.len(), i + 1);
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut bad = test_input();
        bad.horizon_years = 0;
        let cases = vec![
            PropertyCase { property_id: "bad".into(), input: bad, config: FinancialConfig::default() },
            PropertyCase { property_id: "good".into(), input: test_input(), config: FinancialConfig::default() },
        ];

        let results = ScenarioRunner::run_batch(&cases);
        assert!(matches!(results[0], Err(ProjectionError::InvalidHorizon(0))));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_higher_alternative_rate_narrows_difference() {
        let configs: Vec<_> = [5.0, 7.0, 9.0]
            .iter()
            .map(|&rate| FinancialConfig {
                alternative_interest_pct: rate,
                ..FinancialConfig::default()
            })
            .collect();

        let results = ScenarioRunner::run_scenarios(&test_input(), &configs).unwrap();
        assert_eq!(results.len(), 3);
        let final_diff = |i: usize| results[i].last().unwrap().value_difference;
        assert!(final_diff(0) > final_diff(1));
        assert!(final_diff(1) > final_diff(2));
    }

    #[test]
    fn test_batch_uses_case_config_not_runner_config() {
        let mut runner = ScenarioRunner::new();
        runner.config_mut().alternative_interest_pct = 20.0;

        let case = PropertyCase {
            property_id: "own-config".into(),
            input: test_input(),
            config: FinancialConfig::default(),
        };
        let batch = ScenarioRunner::run_batch(std::slice::from_ref(&case));
        let batch = batch[0].as_ref().unwrap();

        let own = ScenarioRunner::with_config(case.config).run(&case.input).unwrap();
        let base = runner.run(&case.input).unwrap();
        assert_eq!(batch.years, own);
        assert_ne!(batch.years, base);
    }

    #[test]
    fn test_occupancy_sweep() {
        let runner = ScenarioRunner::new();
        let points = runner
            .sweep(&test_input(), SweepParameter::OccupancyRate, &[50.0, 74.0, 90.0])
            .unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[1].value, 74.0);
        assert!(points[0].years[0].net_profit_this_year < points[2].years[0].net_profit_this_year);
    }

    #[test]
    fn test_from_records() {
        let mut store = InMemoryConfigStore::new();
        store.insert(
            ConfigKey::Company("acme".into()),
            FinancialConfigOverride {
                occupancy_rate: Some(60.0),
                ..Default::default()
            },
        );
        let resolver = ConfigResolver::new(store);
        let records = vec![PropertyRecord {
            property_id: "a".into(),
            company_id: Some("acme".into()),
            property_value: 2_000_000.0,
            unit_price: None,
            nightly_rate: None,
            occupancy_rate: None,
            annual_growth_rate: 3.0,
            horizon_years: 5,
        }];

        let cases = PropertyCase::from_records(&resolver, &records).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].input.occupancy_rate, 60.0);
        assert_eq!(cases[0].input.nightly_rate, 1800.0);
    }
}
