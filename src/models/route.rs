//! Closed tour result type.

use std::fmt;

use serde::Serialize;

use super::Node;
use crate::distance::CostMatrix;

/// A closed tour over every node of a cost matrix.
///
/// Holds n+1 stops (the depot first and last) and the total cost of the n
/// arcs travelled. The tour comes from a first-solution heuristic; it is a
/// good tour, not a proven minimum.
///
/// # Examples
///
/// ```
/// use u_tour::distance::CostMatrix;
/// use u_tour::models::RouteResult;
///
/// let dm = CostMatrix::new(
///     vec![vec![0.0, 4.0], vec![6.0, 0.0]],
///     vec!["X".to_string(), "Y".to_string()],
/// )
/// .unwrap();
/// let route = RouteResult::from_tour(&dm, &[0, 1, 0], 10.0);
/// assert_eq!(route.to_string(), "X -> Y -> X");
/// assert_eq!(route.format_cost(), "10");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    stops: Vec<Node>,
    total_cost: f64,
}

impl RouteResult {
    /// Creates a result from ordered stops and their total cost.
    pub fn new(stops: Vec<Node>, total_cost: f64) -> Self {
        Self { stops, total_cost }
    }

    /// Labels the index sequence `tour` using the matrix's node labels.
    pub fn from_tour(matrix: &CostMatrix, tour: &[usize], total_cost: f64) -> Self {
        let stops = tour
            .iter()
            .map(|&i| Node::new(i, matrix.label(i)))
            .collect();
        Self::new(stops, total_cost)
    }

    /// Ordered stops, depot first and last.
    pub fn stops(&self) -> &[Node] {
        &self.stops
    }

    /// Ordered stop labels.
    pub fn labels(&self) -> Vec<&str> {
        self.stops.iter().map(Node::label).collect()
    }

    /// Ordered stop indices.
    pub fn indices(&self) -> Vec<usize> {
        self.stops.iter().map(Node::index).collect()
    }

    /// Number of stops including the repeated depot.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Sum of the travelled arc costs.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Cost in shortest round-trip form (`80`, `14.5`).
    pub fn format_cost(&self) -> String {
        self.total_cost.to_string()
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, stop) in self.stops.iter().enumerate() {
            if k > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(stop.label())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteResult {
        RouteResult::new(
            vec![
                Node::new(0, "A"),
                Node::new(1, "B"),
                Node::new(3, "D"),
                Node::new(2, "C"),
                Node::new(0, "A"),
            ],
            80.0,
        )
    }

    #[test]
    fn test_accessors() {
        let r = sample();
        assert_eq!(r.len(), 5);
        assert!(!r.is_empty());
        assert_eq!(r.labels(), vec!["A", "B", "D", "C", "A"]);
        assert_eq!(r.indices(), vec![0, 1, 3, 2, 0]);
        assert_eq!(r.total_cost(), 80.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "A -> B -> D -> C -> A");
        assert_eq!(sample().format_cost(), "80");
        assert_eq!(RouteResult::new(vec![], 14.5).format_cost(), "14.5");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(sample()).expect("json");
        assert_eq!(json["total_cost"], serde_json::json!(80.0));
        assert_eq!(json["stops"][2]["label"], serde_json::json!("D"));
    }
}
