//! Run projections for an entire portfolio of properties
//!
//! Resolves each property's configuration from a CSV store, projects all
//! properties in parallel, and writes one row per property and year.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use rental_projection::{
    config::{ConfigResolver, CsvConfigStore},
    projection::{rental_irr, ProjectionResult},
    property::{load_properties, DEFAULT_PROPERTIES_PATH},
    scenario::{PropertyCase, ScenarioRunner},
};

#[derive(Debug, Parser)]
#[command(name = "run_portfolio", about = "Project every property in a portfolio CSV")]
struct Args {
    /// Portfolio file (PropertyID,CompanyID,PropertyValue,UnitPrice,NightlyRate,OccupancyRate,GrowthRate,HorizonYears)
    #[arg(long, default_value = DEFAULT_PROPERTIES_PATH)]
    properties: PathBuf,

    /// Configuration file (Scope,Key,Field,Value,IsPercentage); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "portfolio_projection_output.csv")]
    output: PathBuf,
}

fn write_output(path: &Path, results: &[ProjectionResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "PropertyID", "Year", "PropertyValue", "GrossRevenue", "NetProfit",
        "CumulativeNetProfit", "RentalValue", "AlternativeValue", "Difference", "ROI",
    ])?;

    for result in results {
        for row in &result.years {
            writer.write_record(&[
                result.property_id.clone(),
                row.year.to_string(),
                format!("{:.2}", result.property_value),
                format!("{:.2}", row.gross_revenue),
                format!("{:.2}", row.net_profit_this_year),
                format!("{:.2}", row.cumulative_net_profit),
                format!("{:.2}", row.cumulative_rental_value),
                format!("{:.2}", row.alternative_investment_value),
                format!("{:.2}", row.value_difference),
                format!("{:.1}", row.yearly_roi),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading properties from {}...", args.properties.display());
    let records = load_properties(&args.properties)
        .with_context(|| format!("Failed to load {}", args.properties.display()))?;
    println!("Loaded {} properties in {:?}", records.len(), start.elapsed());

    let store = match &args.config {
        Some(path) => CsvConfigStore::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => CsvConfigStore::default(),
    };
    let resolver = ConfigResolver::new(store);
    let cases = PropertyCase::from_records(&resolver, &records)?;

    println!("Running projections...");
    let proj_start = Instant::now();
    let (results, failures): (Vec<_>, Vec<_>) = ScenarioRunner::run_batch(&cases)
        .into_iter()
        .partition(|r| r.is_ok());
    let results: Vec<ProjectionResult> = results.into_iter().filter_map(|r| r.ok()).collect();
    println!("Projections complete in {:?}", proj_start.elapsed());

    if !failures.is_empty() {
        println!("  {} properties skipped (invalid input)", failures.len());
    }

    write_output(&args.output, &results)?;
    println!("Output written to {}", args.output.display());

    println!("\nPortfolio Summary:");
    for result in &results {
        let summary = result.summary();
        let irr = rental_irr(result.property_value, &result.years)
            .map(|r| format!("{:.2}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {:<16} years={:>2} net=${:>14.2} diff=${:>14.2} break-even={:<5} irr={}",
            result.property_id,
            summary.total_years,
            summary.total_net_profit,
            summary.final_value_difference,
            summary.break_even_year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            irr,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
