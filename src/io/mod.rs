//! Text input and JSON-ready output.
//!
//! - [`parse_problem`]: Token-stream instance parser
//! - [`Report`], [`MatrixReport`]: Serializable results

mod parser;
mod report;

pub use parser::parse_problem;
pub use report::{MatrixReport, NodeLabel, Report, TruckReport, VisitReport};
