//! Route cost evaluation and solution checking.
//!
//! - [`RouteEvaluator`]: Costs routes from the derived matrix and checks
//!   that a solution serves every request exactly once
//! - [`Schedule`]: Per-truck working-time timeline

mod evaluator;
mod schedule;

pub use evaluator::{insertion_delta, removal_delta, route_cost, RouteEvaluator};
pub use schedule::{Schedule, TruckSchedule, Visit};
