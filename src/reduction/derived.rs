//! Travel-time matrix over virtual nodes.

use serde::Serialize;

use crate::distance::{Time, TravelTimeMatrix};
use crate::models::VirtualNode;

/// Square cost matrix over requests followed by truck depots.
///
/// `get(a, b)` is the time from finishing node `a`'s job (or leaving its
/// depot) to beginning node `b`'s job (or reaching its depot), trailer
/// detours included. Request self-pairs hold 0 and are never part of a
/// route.
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::models::{ContainerSize, Fleet, Problem, Request, VirtualNode};
/// use u_drayage::reduction::reduce;
///
/// let problem = Problem::new(
///     TravelTimeMatrix::new(2),
///     Fleet::new(0, 0).with_trucks([1, 1]),
///     vec![Request::new(1, ContainerSize::TwentyFt, 0, 1)],
/// )
/// .unwrap();
/// let derived = reduce(&problem);
/// assert_eq!(derived.dimension(), 3);
/// assert_eq!(derived.node(0), VirtualNode::Request(0));
/// assert_eq!(derived.node(2), VirtualNode::Depot(1));
/// assert_eq!(derived.depot_node(1), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedMatrix {
    costs: TravelTimeMatrix,
    num_requests: usize,
    num_trucks: usize,
}

impl DerivedMatrix {
    pub(crate) fn new(costs: TravelTimeMatrix, num_requests: usize, num_trucks: usize) -> Self {
        debug_assert_eq!(costs.size(), num_requests + num_trucks);
        Self {
            costs,
            num_requests,
            num_trucks,
        }
    }

    /// Builds a derived matrix from explicit costs, e.g. one produced
    /// outside this crate.
    ///
    /// Returns `None` if `costs` is not `(num_requests + num_trucks)` square.
    pub fn from_costs(costs: TravelTimeMatrix, num_requests: usize, num_trucks: usize) -> Option<Self> {
        if costs.size() != num_requests + num_trucks {
            return None;
        }
        Some(Self::new(costs, num_requests, num_trucks))
    }

    /// Cost of going from virtual node `from` to virtual node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Time {
        self.costs.get(from, to)
    }

    /// Number of virtual nodes (requests + trucks).
    pub fn dimension(&self) -> usize {
        self.costs.size()
    }

    /// Number of request nodes.
    pub fn num_requests(&self) -> usize {
        self.num_requests
    }

    /// Number of depot nodes, one per truck.
    pub fn num_trucks(&self) -> usize {
        self.num_trucks
    }

    /// Node index of request `request`.
    pub fn request_node(&self, request: usize) -> usize {
        request
    }

    /// Node index of truck `truck`'s depot.
    pub fn depot_node(&self, truck: usize) -> usize {
        self.num_requests + truck
    }

    /// Classifies a node index.
    pub fn node(&self, index: usize) -> VirtualNode {
        if index < self.num_requests {
            VirtualNode::Request(index)
        } else {
            VirtualNode::Depot(index - self.num_requests)
        }
    }

    /// Node index of a virtual node.
    pub fn index_of(&self, node: VirtualNode) -> usize {
        match node {
            VirtualNode::Request(r) => self.request_node(r),
            VirtualNode::Depot(t) => self.depot_node(t),
        }
    }

    /// Underlying cost matrix.
    pub fn costs(&self) -> &TravelTimeMatrix {
        &self.costs
    }

    /// Iterates over the matrix rows, requests first.
    pub fn rows(&self) -> impl Iterator<Item = &[Time]> {
        self.costs.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_costs_checks_dimension() {
        assert!(DerivedMatrix::from_costs(TravelTimeMatrix::new(3), 2, 1).is_some());
        assert!(DerivedMatrix::from_costs(TravelTimeMatrix::new(3), 2, 2).is_none());
    }

    #[test]
    fn test_node_mapping() {
        let dm = DerivedMatrix::from_costs(TravelTimeMatrix::new(5), 3, 2).expect("square");
        assert_eq!(dm.node(2), VirtualNode::Request(2));
        assert_eq!(dm.node(3), VirtualNode::Depot(0));
        assert_eq!(dm.index_of(VirtualNode::Depot(1)), 4);
        assert_eq!(dm.index_of(VirtualNode::Request(1)), 1);
        assert!(dm.node(4).is_depot());
    }
}
