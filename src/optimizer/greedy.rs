//! Constructive optimizers.

use crate::constructive::{cheapest_insertion, nearest_neighbor};
use crate::error::Result;
use crate::models::Solution;
use crate::reduction::DerivedMatrix;

use super::{ensure_trucks, finished, RouteOptimizer};

/// Greedy multi-depot nearest neighbor.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::optimizer::{NearestNeighborOptimizer, RouteOptimizer};
/// use u_drayage::reduction::DerivedMatrix;
///
/// let costs = TravelTimeMatrix::from_rows(&[vec![0, 2], vec![3, 0]]).unwrap();
/// let derived = DerivedMatrix::from_costs(costs, 1, 1).unwrap();
///
/// let solution = NearestNeighborOptimizer.solve(&derived).unwrap();
/// assert_eq!(solution.sequences(), vec![vec![0]]);
/// assert_eq!(solution.total_cost(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborOptimizer;

impl RouteOptimizer for NearestNeighborOptimizer {
    fn name(&self) -> &str {
        "nearest-neighbor"
    }

    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution> {
        ensure_trucks(derived)?;
        Ok(finished(self.name(), nearest_neighbor(derived)))
    }
}

/// Cheapest insertion over every truck and position.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestInsertionOptimizer;

impl RouteOptimizer for CheapestInsertionOptimizer {
    fn name(&self) -> &str {
        "cheapest-insertion"
    }

    fn solve(&self, derived: &DerivedMatrix) -> Result<Solution> {
        ensure_trucks(derived)?;
        Ok(finished(self.name(), cheapest_insertion(derived)))
    }
}
