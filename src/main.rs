//! Rental Projection CLI
//!
//! Command-line interface for projecting a single property

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use rental_projection::{
    config::{ExpenseSetting, FinancialConfig, DEFAULT_NIGHTLY_RATE, DEFAULT_OCCUPANCY_RATE},
    projection::{rental_irr, ProjectionEngine, YearProjection},
    ProjectionInput,
};

/// Project rental profitability against an alternative investment
#[derive(Debug, Parser)]
#[command(name = "rental_projection", version, about)]
struct Args {
    /// Property acquisition price
    #[arg(long, default_value_t = 3_500_000.0)]
    property_value: f64,

    /// Average nightly rate
    #[arg(long, default_value_t = DEFAULT_NIGHTLY_RATE)]
    nightly_rate: f64,

    /// Annual occupancy (%)
    #[arg(long, default_value_t = DEFAULT_OCCUPANCY_RATE)]
    occupancy: f64,

    /// Annual growth of revenue and nightly rate (%)
    #[arg(long, default_value_t = 5.0)]
    growth: f64,

    /// Years to project
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Clamp inputs to the simulator control bounds before projecting
    #[arg(long)]
    clamp: bool,

    /// Operator commission (% of revenue)
    #[arg(long)]
    commission: Option<f64>,

    /// Maintenance as a flat yearly amount instead of % of property value
    #[arg(long)]
    maintenance_flat: Option<f64>,

    /// Taxes (% of taxable base)
    #[arg(long)]
    tax_pct: Option<f64>,

    /// Property appreciation (%/yr)
    #[arg(long)]
    appreciation: Option<f64>,

    /// Alternative investment interest (%/yr)
    #[arg(long)]
    alternative: Option<f64>,

    /// Load a full configuration from a JSON file
    #[arg(long)]
    config_json: Option<PathBuf>,

    /// Write the yearly rows to a CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<FinancialConfig> {
    let mut config: FinancialConfig = match &args.config_json {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Unable to open config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Invalid config JSON in {}", path.display()))?
        }
        None => FinancialConfig::default_pricing(),
    };

    if let Some(pct) = args.commission {
        config.operator_commission_pct = pct;
    }
    if let Some(amount) = args.maintenance_flat {
        config.maintenance = ExpenseSetting::flat(amount);
    }
    if let Some(pct) = args.tax_pct {
        config.taxes = ExpenseSetting::percentage(pct);
    }
    if let Some(pct) = args.appreciation {
        config.annual_appreciation_pct = pct;
    }
    if let Some(pct) = args.alternative {
        config.alternative_interest_pct = pct;
    }

    Ok(config)
}

fn write_csv(path: &Path, years: &[YearProjection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;

    writer.write_record([
        "Year", "GrossRevenue", "Commission", "Maintenance", "VariableExpenses",
        "FixedExpenses", "TaxableBase", "Tax", "NetProfit", "CumulativeNetProfit",
        "Appreciation", "RentalValue", "AlternativeValue", "Difference", "ROI",
        "EffectiveOccupancy", "EffectiveNightlyRate",
    ])?;

    for row in years {
        writer.write_record(&[
            row.year.to_string(),
            format!("{:.2}", row.gross_revenue),
            format!("{:.2}", row.commission),
            format!("{:.2}", row.maintenance_cost),
            format!("{:.2}", row.variable_expenses_cost),
            format!("{:.2}", row.fixed_expenses_cost),
            format!("{:.2}", row.taxable_base),
            format!("{:.2}", row.tax_amount),
            format!("{:.2}", row.net_profit_this_year),
            format!("{:.2}", row.cumulative_net_profit),
            format!("{:.2}", row.property_appreciation),
            format!("{:.2}", row.cumulative_rental_value),
            format!("{:.2}", row.alternative_investment_value),
            format!("{:.2}", row.value_difference),
            format!("{:.1}", row.yearly_roi),
            format!("{:.1}", row.effective_occupancy_rate),
            format!("{:.2}", row.effective_nightly_rate),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn print_table(years: &[YearProjection]) {
    println!("{:>4} {:>14} {:>14} {:>16} {:>16} {:>14} {:>6} {:>6} {:>10}",
        "Year", "Revenue", "NetProfit", "RentalValue", "AltValue", "Difference", "ROI", "Occ", "Nightly");
    println!("{}", "-".repeat(110));

    for row in years {
        println!("{:>4} {:>14.2} {:>14.2} {:>16.2} {:>16.2} {:>14.2} {:>6.1} {:>6.1} {:>10.2}",
            row.year,
            row.gross_revenue,
            row.net_profit_this_year,
            row.cumulative_rental_value,
            row.alternative_investment_value,
            row.value_difference,
            row.yearly_roi,
            row.effective_occupancy_rate,
            row.effective_nightly_rate,
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut input = ProjectionInput::new(
        args.property_value,
        args.nightly_rate,
        args.occupancy,
        args.growth,
        args.years,
    );
    if args.clamp {
        input = input.clamp_to_ui_bounds();
    }

    let config = build_config(&args)?;
    log::info!("Projecting {:?} with {:?}", input, config);

    let engine = ProjectionEngine::new(config);
    let result = engine
        .project_property("cli", &input)
        .context("Projection failed")?;
    let years = &result.years;

    if args.json {
        println!("{}", serde_json::to_string_pretty(years)?);
    } else {
        print_table(years);

        let summary = result.summary();
        println!("\nSummary:");
        println!("  Years: {}", summary.total_years);
        println!("  Total Net Profit: ${:.2}", summary.total_net_profit);
        println!("  Average ROI: {:.2}%", summary.average_roi);
        println!("  Final Difference: ${:.2}", summary.final_value_difference);
        match summary.break_even_year {
            Some(year) => println!("  Break-even Year: {}", year),
            None => println!("  Break-even Year: never within horizon"),
        }
        match rental_irr(input.property_value, years) {
            Some(irr) => println!("  Rental IRR: {:.2}% (alternative {:.2}%)",
                irr * 100.0, config.alternative_interest_pct),
            None => println!("  Rental IRR: n/a"),
        }
    }

    if let Some(path) = &args.output {
        write_csv(path, years)?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
