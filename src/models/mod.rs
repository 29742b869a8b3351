//! Domain model types for drayage problems.
//!
//! Provides the core abstractions: container requests with trailer flags,
//! the truck fleet and trailer depot, the validated problem that ties them
//! together, and routes and solutions produced by optimizers.

mod fleet;
mod node;
mod problem;
mod request;
mod route;
mod solution;

pub use fleet::Fleet;
pub use node::VirtualNode;
pub use problem::Problem;
pub use request::{ContainerSize, Request};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
