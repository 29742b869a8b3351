//! Reduction of trailer-constrained drayage to a plain multi-depot VRP.
//!
//! - [`reduce`]: Builds the [`DerivedMatrix`] over request and depot nodes
//! - [`ReducedProblem`]: A shared problem together with its derived matrix

mod derived;
mod engine;

use std::sync::Arc;

pub use derived::DerivedMatrix;
pub use engine::reduce;

use crate::models::Problem;

/// A problem paired with its derived matrix.
///
/// The matrix is computed once, eagerly, and both live exactly as long as
/// this value. Cloning shares the underlying data, so optimizer workers on
/// other threads can read it without synchronization.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::models::{ContainerSize, Fleet, Problem, Request};
/// use u_drayage::reduction::ReducedProblem;
///
/// let problem = Problem::new(
///     TravelTimeMatrix::new(2),
///     Fleet::new(0, 1).with_truck(1),
///     vec![Request::new(1, ContainerSize::TwentyFt, 0, 1)],
/// )
/// .unwrap();
/// let reduced = ReducedProblem::new(problem);
/// assert_eq!(reduced.derived().dimension(), 2);
/// assert_eq!(reduced.problem().num_requests(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReducedProblem {
    problem: Arc<Problem>,
    derived: Arc<DerivedMatrix>,
}

impl ReducedProblem {
    /// Reduces an owned problem.
    pub fn new(problem: Problem) -> Self {
        Self::from_shared(Arc::new(problem))
    }

    /// Reduces a problem that is already shared.
    pub fn from_shared(problem: Arc<Problem>) -> Self {
        let derived = Arc::new(reduce(&problem));
        Self { problem, derived }
    }

    /// The reduced problem.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Shared handle to the reduced problem.
    pub fn shared_problem(&self) -> Arc<Problem> {
        Arc::clone(&self.problem)
    }

    /// The derived matrix.
    pub fn derived(&self) -> &DerivedMatrix {
        &self.derived
    }

    /// Shared handle to the derived matrix.
    pub fn shared_derived(&self) -> Arc<DerivedMatrix> {
        Arc::clone(&self.derived)
    }
}
