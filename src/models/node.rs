//! Node and arc types.

use serde::{Deserialize, Serialize};

/// Index of the depot node in every matrix.
pub const DEPOT: usize = 0;

/// A labelled location in a cost matrix.
///
/// # Examples
///
/// ```
/// use u_tour::models::Node;
///
/// let depot = Node::new(0, "A1");
/// assert!(depot.is_depot());
/// assert_eq!(depot.label(), "A1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    index: usize,
    label: String,
}

impl Node {
    /// Creates a node.
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    /// Matrix index of this node.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` for the start/end node.
    pub fn is_depot(&self) -> bool {
        self.index == DEPOT
    }
}

/// A directed arc `tail → head` with its cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Node the arc leaves.
    pub tail: usize,
    /// Node the arc enters.
    pub head: usize,
    /// Travel cost.
    pub cost: f64,
}

impl Arc {
    /// Creates an arc.
    pub fn new(tail: usize, head: usize, cost: f64) -> Self {
        Self { tail, head, cost }
    }
}
