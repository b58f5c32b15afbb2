//! Property inputs and portfolio loading

mod data;
pub mod loader;

pub use data::{
    ProjectionInput, PropertyRecord, GROWTH_RANGE, GROWTH_STEP, HORIZON_RANGE, MAX_HORIZON_YEARS,
    OCCUPANCY_RANGE, PROPERTY_VALUE_RANGE,
};
pub use loader::{
    load_default_portfolio, load_properties, load_properties_from_reader, DEFAULT_PROPERTIES_PATH,
};
