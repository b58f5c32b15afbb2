//! Rental Projection - Year-by-year investment projection for short-term-rental properties
//!
//! This library provides:
//! - Rental profitability projection with appreciation (the projection engine)
//! - Comparison against a passive alternative investment of the same principal
//! - Layered financial configuration (property override, company default, built-in defaults)
//! - Batch portfolio runs and sensitivity sweeps
//! - Return metrics (summary, break-even year, IRR)

pub mod error;
pub mod property;
pub mod config;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, InputError, ProjectionError};
pub use property::{ProjectionInput, PropertyRecord};
pub use config::{ConfigResolver, ExpenseSetting, FinancialConfig, FinancialConfigOverride};
pub use projection::{project, ProjectionEngine, ProjectionResult, ProjectionSummary, YearProjection};
pub use scenario::{PropertyCase, ScenarioRunner, SweepParameter};
