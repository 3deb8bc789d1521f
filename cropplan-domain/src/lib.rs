//! Domain logic: turn a crop catalog and a player's situation into a planting plan.
//!
//! This crate owns *what* gets planted and why. Loading the catalog is `cropplan-catalog`'s job;
//! presenting the plan is `cropplan-render`'s.

pub mod budget;
mod error;
mod planner;
mod ports;
pub mod rank;

pub use error::{InvalidInput, PlanError};
pub use planner::{DEFAULT_RESET_CEILING, Planner, PlannerConfig};
pub use ports::CatalogView;
