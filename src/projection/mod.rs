//! Projection engine for rental investment properties

mod state;
mod engine;
mod year;
mod irr;

pub use state::ProjectionState;
pub use engine::{effective_occupancy, project, round_one_decimal, ProjectionEngine};
pub use year::{ProjectionResult, ProjectionSummary, YearProjection};
pub use irr::{calculate_irr, npv_at_rate, rental_cashflows, rental_irr};
