//! AWS Lambda handler for property projections
//!
//! Accepts a property and optional configuration overrides as JSON and returns
//! the yearly projection, its summary, and the rental IRR.

use chrono::{DateTime, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use rental_projection::{
    config::{build_input, FinancialConfig, FinancialConfigOverride},
    projection::{rental_irr, ProjectionEngine, ProjectionSummary, YearProjection},
    property::{ProjectionInput, PropertyRecord},
    scenario::{ScenarioRunner, SweepParameter, SweepPoint},
};

/// Input for the projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    #[serde(default = "default_property_id")]
    pub property_id: String,

    pub property_value: f64,

    /// Known unit/prototype price, replaces `property_value`
    #[serde(default)]
    pub unit_price: Option<f64>,

    /// Falls back to the configured baseline when absent
    #[serde(default)]
    pub nightly_rate: Option<f64>,

    /// Falls back to the configured baseline when absent
    #[serde(default)]
    pub occupancy_rate: Option<f64>,

    #[serde(default = "default_growth_rate")]
    pub annual_growth_rate: f64,

    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Stored configuration for the property (already fetched by the caller)
    #[serde(default)]
    pub property_config: FinancialConfigOverride,

    /// Company-level defaults (already fetched by the caller)
    #[serde(default)]
    pub company_config: FinancialConfigOverride,

    /// Clamp inputs to the simulator control bounds
    #[serde(default)]
    pub clamp: bool,

    /// Optional sensitivity sweep
    #[serde(default)]
    pub sweep: Option<SweepRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SweepRequest {
    pub parameter: SweepParameter,
    pub values: Vec<f64>,
}

impl ProjectionRequest {
    /// Layer the property config over the company config, then build the
    /// projection input from the request and the resolved baseline
    fn resolve(&self) -> (ProjectionInput, FinancialConfig) {
        let (config, baseline) = self.property_config.or(&self.company_config).finalize();

        let record = PropertyRecord {
            property_id: self.property_id.clone(),
            company_id: None,
            property_value: self.property_value,
            unit_price: self.unit_price,
            nightly_rate: self.nightly_rate,
            occupancy_rate: self.occupancy_rate,
            annual_growth_rate: self.annual_growth_rate,
            horizon_years: self.horizon_years,
        };
        let mut input = build_input(&record, &baseline);
        if self.clamp {
            input = input.clamp_to_ui_bounds();
        }
        (input, config)
    }
}

fn default_property_id() -> String { "request".to_string() }
fn default_growth_rate() -> f64 { 5.0 }
fn default_horizon_years() -> u32 { 10 }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub property_id: String,
    pub input: ProjectionInput,
    pub config: FinancialConfig,
    pub years: Vec<YearProjection>,
    pub summary: ProjectionSummary,
    pub rental_irr_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Vec<SweepPoint>>,
    pub generated_at: DateTime<Utc>,
    pub execution_time_ms: u64,
}

async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let (input, config) = request.resolve();

    log::info!("Projecting {} over {} years", request.property_id, input.horizon_years);

    let engine = ProjectionEngine::new(config);
    let years = engine.project(&input)?;
    let summary = ProjectionSummary::from_years(&years);
    let rental_irr_pct = rental_irr(input.property_value, &years).map(|r| r * 100.0);

    let sweep = match &request.sweep {
        Some(sweep) => Some(
            ScenarioRunner::with_config(config).sweep(&input, sweep.parameter, &sweep.values)?,
        ),
        None => None,
    };

    Ok(ProjectionResponse {
        property_id: request.property_id,
        input,
        config,
        years,
        summary,
        rental_irr_pct,
        sweep,
        generated_at: Utc::now(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
