//! # u-drayage
//!
//! Container drayage with trailer coupling, reduced to a multi-depot vehicle
//! routing problem (MDVRP).
//!
//! Trucks must carry a trailer for some pickups and drops and may hook or
//! unhook one only at a shared trailer depot. The reduction folds every
//! such detour, and the handling time it costs, into the edge weights of a
//! derived matrix over *virtual nodes*: requests first, then one depot node
//! per truck. Any MDVRP optimizer can then route trucks without knowing
//! that trailers exist.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Request, Fleet, Problem, Route, Solution)
//! - [`distance`]: Travel-time matrix
//! - [`reduction`]: Reduction engine producing the derived matrix
//! - [`evaluation`]: Route costing, solution checking and timelines
//! - [`constructive`]: Constructive heuristics (Nearest Neighbor, Cheapest Insertion)
//! - [`local_search`]: Local search operators (2-opt, Or-opt, Relocate)
//! - [`optimizer`]: Interchangeable route optimizers
//! - [`config`]: Solver configuration
//! - [`io`]: Instance parser and reports
//!
//! ## Example
//!
//! ```
//! use u_drayage::distance::TravelTimeMatrix;
//! use u_drayage::models::{ContainerSize, Fleet, Problem, Request};
//! use u_drayage::optimizer::{LocalSearchOptimizer, RouteOptimizer};
//! use u_drayage::reduction::ReducedProblem;
//!
//! // trailer depot 0, handling time 5, one truck at location 2
//! let mut distances = TravelTimeMatrix::new(3);
//! distances.set(1, 0, 3);
//! distances.set(0, 2, 4);
//! distances.set(2, 1, 7);
//! let fleet = Fleet::new(0, 5).with_truck(2);
//! let request = Request::new(1, ContainerSize::TwentyFt, 1, 1).with_drop_trailer(true);
//!
//! let reduced = ReducedProblem::new(Problem::new(distances, fleet, vec![request]).unwrap());
//! let derived = reduced.derived();
//! assert_eq!(derived.get(1, 0), 7); // depot → request
//! assert_eq!(derived.get(0, 1), 12); // request → trailer depot → depot
//!
//! let solution = LocalSearchOptimizer.solve(derived).unwrap();
//! assert_eq!(solution.total_cost(), 19);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod optimizer;
pub mod reduction;

pub use error::{DrayageError, Result};
