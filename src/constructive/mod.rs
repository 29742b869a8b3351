//! Constructive heuristics for building initial solutions.
//!
//! - [`nearest_neighbor`]: Multi-depot greedy nearest-neighbor, O(R²D)
//! - [`cheapest_insertion`]: Cheapest insertion over all trucks, O(R³)

mod cheapest_insertion;
mod nearest_neighbor;

pub(crate) use cheapest_insertion::insert_all;
pub use cheapest_insertion::cheapest_insertion;
pub use nearest_neighbor::nearest_neighbor;
