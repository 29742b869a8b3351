//! Virtual nodes of the reduced routing graph.

use serde::{Deserialize, Serialize};

/// A row/column of the derived matrix: either a request or a truck depot.
///
/// Requests come first (`0..R`), truck depots after them (`R..R+D`), both
/// in input order. Co-located trucks still get one node each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualNode {
    /// The request at this position of the request list.
    Request(usize),
    /// The depot of the truck at this position of the fleet.
    Depot(usize),
}

impl VirtualNode {
    /// Returns `true` for a depot node.
    pub fn is_depot(&self) -> bool {
        matches!(self, Self::Depot(_))
    }
}
