//! Constructive heuristics for closed single-depot tours.
//!
//! - [`cheapest_arc`] — Global cheapest-arc selection with chain tracking, O(n² log n)
//! - [`path_cheapest_arc`] — Path extension from the depot to the cheapest unvisited node, O(n²)
//!
//! Both are first-solution heuristics; neither guarantees a minimal tour.

mod chain;
mod cheapest_arc;
mod path_cheapest_arc;

pub use cheapest_arc::cheapest_arc;
pub use path_cheapest_arc::path_cheapest_arc;

use crate::config::Strategy;
use crate::distance::CostMatrix;
use crate::error::SolveError;

/// Builds a tour with the given strategy.
///
/// Returns the node sequence (depot first and last) and its total cost.
pub fn build_tour(matrix: &CostMatrix, strategy: Strategy) -> Result<(Vec<usize>, f64), SolveError> {
    match strategy {
        Strategy::GlobalCheapestArc => cheapest_arc(matrix),
        Strategy::PathCheapestArc => Ok(path_cheapest_arc(matrix)),
    }
}
