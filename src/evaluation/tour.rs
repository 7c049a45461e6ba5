//! Closed-tour checks.

use thiserror::Error;

use crate::distance::CostMatrix;
use crate::models::DEPOT;

/// The first defect found in a candidate tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourViolation {
    /// The tour does not have n+1 stops.
    #[error("tour has {actual} stops, expected {expected}")]
    WrongLength {
        /// n + 1.
        expected: usize,
        /// Stops found.
        actual: usize,
    },
    /// The tour does not start and end at the depot.
    #[error("tour must start and end at the depot")]
    NotClosedAtDepot,
    /// A stop index is not a node of the matrix.
    #[error("node {node} is out of range")]
    OutOfRange {
        /// The bad index.
        node: usize,
    },
    /// A node appears more than once between the depot stops.
    #[error("node {node} is visited more than once")]
    Revisit {
        /// The repeated node.
        node: usize,
    },
}

/// Sum of `matrix.cost(tour[k], tour[k + 1])` over consecutive stops.
///
/// # Examples
///
/// ```
/// use u_tour::distance::CostMatrix;
/// use u_tour::evaluation::tour_cost;
///
/// let dm = CostMatrix::new(
///     vec![vec![0.0, 3.0], vec![4.0, 0.0]],
///     vec!["A".to_string(), "B".to_string()],
/// )
/// .unwrap();
/// assert_eq!(tour_cost(&dm, &[0, 1, 0]), 7.0);
/// ```
pub fn tour_cost(matrix: &CostMatrix, tour: &[usize]) -> f64 {
    tour.windows(2).map(|w| matrix.cost(w[0], w[1])).sum()
}

/// Checks that `tour` is a Hamiltonian circuit over `n` nodes rooted at the
/// depot: n+1 stops, depot first and last, every other node exactly once.
pub fn validate_tour(n: usize, tour: &[usize]) -> Result<(), TourViolation> {
    if tour.len() != n + 1 {
        return Err(TourViolation::WrongLength {
            expected: n + 1,
            actual: tour.len(),
        });
    }
    if tour.first() != Some(&DEPOT) || tour.last() != Some(&DEPOT) {
        return Err(TourViolation::NotClosedAtDepot);
    }
    if n == 0 {
        return Err(TourViolation::OutOfRange { node: DEPOT });
    }

    // Since the length is n+1 and the ends are fixed, no repeats among the
    // n-1 inner stops (and no depot among them) means every node appears.
    let mut seen = vec![false; n];
    seen[DEPOT] = true;
    for &node in &tour[1..n] {
        if node >= n {
            return Err(TourViolation::OutOfRange { node });
        }
        if seen[node] {
            return Err(TourViolation::Revisit { node });
        }
        seen[node] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        assert_eq!(validate_tour(4, &[0, 2, 3, 1, 0]), Ok(()));
        assert_eq!(validate_tour(2, &[0, 1, 0]), Ok(()));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            validate_tour(3, &[0, 1, 0]),
            Err(TourViolation::WrongLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_not_closed() {
        assert_eq!(
            validate_tour(3, &[1, 0, 2, 1]),
            Err(TourViolation::NotClosedAtDepot)
        );
        assert_eq!(
            validate_tour(3, &[0, 1, 2, 2]),
            Err(TourViolation::NotClosedAtDepot)
        );
    }

    #[test]
    fn test_revisit_and_range() {
        assert_eq!(
            validate_tour(4, &[0, 1, 1, 2, 0]),
            Err(TourViolation::Revisit { node: 1 })
        );
        assert_eq!(
            validate_tour(3, &[0, 0, 1, 0]),
            Err(TourViolation::Revisit { node: 0 })
        );
        assert_eq!(
            validate_tour(3, &[0, 1, 7, 0]),
            Err(TourViolation::OutOfRange { node: 7 })
        );
    }

    #[test]
    fn test_tour_cost_asymmetric() {
        let dm = CostMatrix::new(
            vec![
                vec![0.0, 1.0, 9.0],
                vec![9.0, 0.0, 2.0],
                vec![3.0, 9.0, 0.0],
            ],
            vec!["A".into(), "B".into(), "C".into()],
        )
        .expect("valid");
        assert_eq!(tour_cost(&dm, &[0, 1, 2, 0]), 6.0);
        assert_eq!(tour_cost(&dm, &[0, 2, 1, 0]), 27.0);
        assert_eq!(tour_cost(&dm, &[0]), 0.0);
    }
}
