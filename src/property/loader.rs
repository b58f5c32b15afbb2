//! Load property records from a portfolio CSV file

use super::PropertyRecord;
use crate::error::InputError;
use csv::{Reader, ReaderBuilder, Trim};
use std::path::Path;

/// Default path to the portfolio file
pub const DEFAULT_PROPERTIES_PATH: &str = "data/properties.csv";

/// Raw CSV row matching the portfolio file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyID")]
    property_id: String,
    #[serde(rename = "CompanyID", default)]
    company_id: Option<String>,
    #[serde(rename = "PropertyValue")]
    property_value: f64,
    #[serde(rename = "UnitPrice", default)]
    unit_price: Option<f64>,
    #[serde(rename = "NightlyRate", default)]
    nightly_rate: Option<f64>,
    #[serde(rename = "OccupancyRate", default)]
    occupancy_rate: Option<f64>,
    #[serde(rename = "GrowthRate")]
    growth_rate: f64,
    #[serde(rename = "HorizonYears")]
    horizon_years: u32,
}

impl CsvRow {
    fn into_record(self) -> PropertyRecord {
        PropertyRecord {
            property_id: self.property_id,
            company_id: self.company_id.filter(|c| !c.is_empty()),
            property_value: self.property_value,
            unit_price: self.unit_price,
            nightly_rate: self.nightly_rate,
            occupancy_rate: self.occupancy_rate,
            annual_growth_rate: self.growth_rate,
            horizon_years: self.horizon_years,
        }
    }
}

fn read_records<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<PropertyRecord>, InputError> {
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into_record());
    }

    log::debug!("Loaded {} property records", records.len());
    Ok(records)
}

/// Load all property records from a CSV file
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>, InputError> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    read_records(reader)
}

/// Load property records from any reader (e.g., string buffer, request body)
pub fn load_properties_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PropertyRecord>, InputError> {
    read_records(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

/// Load property records from the default portfolio location
pub fn load_default_portfolio() -> Result<Vec<PropertyRecord>, InputError> {
    load_properties(DEFAULT_PROPERTIES_PATH)
}
