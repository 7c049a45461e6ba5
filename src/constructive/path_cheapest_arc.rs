//! Path cheapest-arc tour construction.
//!
//! Builds the tour greedily from the depot: always extend the path to the
//! cheapest unvisited node, then return to the depot once every node is on
//! the path. Ties go to the lowest node index.
//!
//! # Complexity
//!
//! O(n²).

use crate::distance::CostMatrix;
use crate::evaluation::tour_cost;
use crate::models::DEPOT;

/// Builds a closed tour by extending a path from the depot.
///
/// Returns the node sequence (depot first and last) and its total cost.
///
/// # Examples
///
/// ```
/// use u_tour::distance::CostMatrix;
/// use u_tour::constructive::path_cheapest_arc;
///
/// let labels = ["A", "B", "C"].map(String::from).to_vec();
/// let dm = CostMatrix::new(
///     vec![
///         vec![0.0, 8.0, 1.0],
///         vec![2.0, 0.0, 3.0],
///         vec![4.0, 1.0, 0.0],
///     ],
///     labels,
/// )
/// .unwrap();
///
/// let (tour, cost) = path_cheapest_arc(&dm);
/// assert_eq!(tour, vec![0, 2, 1, 0]);
/// assert_eq!(cost, 4.0);
/// ```
pub fn path_cheapest_arc(matrix: &CostMatrix) -> (Vec<usize>, f64) {
    let n = matrix.size();
    let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != DEPOT).collect();
    let mut tour = Vec::with_capacity(n + 1);
    let mut current = DEPOT;
    tour.push(current);

    while let Some(next) = matrix.nearest_neighbor(current, &unvisited) {
        unvisited.retain(|&i| i != next);
        tour.push(next);
        current = next;
    }
    tour.push(DEPOT);

    let cost = tour_cost(matrix, &tour);
    log::debug!("path_cheapest_arc: n={n} cost={cost}");
    (tour, cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> CostMatrix {
        let labels = (0..rows.len()).map(|i| format!("N{i}")).collect();
        CostMatrix::new(rows, labels).expect("valid matrix")
    }

    #[test]
    fn test_line() {
        // Points on a line at 0, 1, 2, 3.
        let pos = [0.0f64, 1.0, 2.0, 3.0];
        let rows = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let (tour, cost) = path_cheapest_arc(&matrix(rows));
        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
        assert!((cost - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_worked_example_matches_global() {
        let dm = matrix(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ]);
        let (tour, cost) = path_cheapest_arc(&dm);
        assert_eq!(tour, vec![0, 1, 3, 2, 0]);
        assert_eq!(cost, 80.0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let dm = matrix(vec![vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 1.0], vec![1.0, 1.0, 0.0]]);
        assert_eq!(path_cheapest_arc(&dm).0, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_two_nodes() {
        let (tour, cost) = path_cheapest_arc(&matrix(vec![vec![0.0, 2.0], vec![5.0, 0.0]]));
        assert_eq!(tour, vec![0, 1, 0]);
        assert_eq!(cost, 7.0);
    }
}
