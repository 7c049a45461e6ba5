//! Dense, labelled cost matrix.

use std::fmt;

use serde::Serialize;

use crate::error::{DimensionError, SolveError};

/// Default upper bound on the number of nodes a matrix may hold.
pub const DEFAULT_MAX_NODES: usize = 64;

/// An immutable n×n matrix of travel costs stored in row-major order.
///
/// `cost(i, j)` is the cost of the directed arc i→j; the matrix need not be
/// symmetric. Node 0 is the depot. Off-diagonal costs are finite and
/// non-negative. Diagonal entries are never travelled; non-zero ones are
/// kept but flagged through [`has_diagonal_warning`](Self::has_diagonal_warning).
///
/// # Examples
///
/// ```
/// use u_tour::distance::CostMatrix;
///
/// let dm = CostMatrix::new(
///     vec![vec![0.0, 5.0], vec![7.0, 1.0]],
///     vec!["A".to_string(), "B".to_string()],
/// )
/// .unwrap();
/// assert_eq!(dm.cost(1, 0), 7.0);
/// assert_eq!(dm.size(), 2);
/// assert!(dm.has_diagonal_warning());
/// assert_eq!(dm.diagonal_anomalies(), &[1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "MatrixView")]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
    labels: Vec<String>,
    diagonal_anomalies: Vec<usize>,
}

impl CostMatrix {
    /// Builds a matrix from evaluated rows, allowing up to
    /// [`DEFAULT_MAX_NODES`] nodes.
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<String>) -> Result<Self, SolveError> {
        Self::with_max_nodes(rows, labels, DEFAULT_MAX_NODES)
    }

    /// Builds a matrix from evaluated rows with an explicit node limit.
    pub fn with_max_nodes(
        rows: Vec<Vec<f64>>,
        labels: Vec<String>,
        max_nodes: usize,
    ) -> Result<Self, SolveError> {
        let size = rows.len();
        check_dimensions(size, max_nodes)?;
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(DimensionError::NotSquare {
                row,
                len: r.len(),
                expected: size,
            }
            .into());
        }
        check_labels(&labels, size)?;

        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Self::from_parts(data, size, labels)
    }

    /// Builds a matrix from a flat row-major buffer of `size * size` costs.
    pub fn from_flat(size: usize, data: Vec<f64>, labels: Vec<String>) -> Result<Self, SolveError> {
        check_dimensions(size, DEFAULT_MAX_NODES)?;
        if data.len() != size * size {
            return Err(DimensionError::NotSquare {
                row: data.len() / size,
                len: data.len() % size,
                expected: size,
            }
            .into());
        }
        check_labels(&labels, size)?;
        Self::from_parts(data, size, labels)
    }

    fn from_parts(mut data: Vec<f64>, size: usize, labels: Vec<String>) -> Result<Self, SolveError> {
        let mut diagonal_anomalies = Vec::new();
        for (k, slot) in data.iter_mut().enumerate() {
            // Fold `-0.0` into `0.0` so costs never print as `-0`.
            *slot += 0.0;
            let value = *slot;
            let (row, col) = (k / size, k % size);
            if row == col {
                if !value.is_finite() {
                    return Err(SolveError::Range { row, col, value });
                }
                if value != 0.0 {
                    diagonal_anomalies.push(row);
                }
            } else if !value.is_finite() || value < 0.0 {
                return Err(SolveError::Range { row, col, value });
            }
        }

        if !diagonal_anomalies.is_empty() {
            log::warn!(
                "cost matrix has non-zero self costs at {:?}; they are ignored",
                diagonal_anomalies
                    .iter()
                    .map(|&i| labels[i].as_str())
                    .collect::<Vec<_>>()
            );
        }

        Ok(Self {
            data,
            size,
            labels,
            diagonal_anomalies,
        })
    }

    /// Returns the cost of the arc `from` → `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Node labels, depot first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of node `index`.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// Returns the matrix as nested rows.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size).map(<[f64]>::to_vec).collect()
    }

    /// `true` if any self cost is non-zero.
    pub fn has_diagonal_warning(&self) -> bool {
        !self.diagonal_anomalies.is_empty()
    }

    /// Indices of nodes whose self cost is non-zero.
    pub fn diagonal_anomalies(&self) -> &[usize] {
        &self.diagonal_anomalies
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.cost(i, j) - self.cost(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the cheapest successor of `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.cost(from, a).total_cmp(&self.cost(from, b)))
    }
}

pub(crate) fn check_dimensions(size: usize, max_nodes: usize) -> Result<(), DimensionError> {
    if size < 2 {
        return Err(DimensionError::TooFewNodes { n: size });
    }
    if size > max_nodes {
        return Err(DimensionError::TooManyNodes {
            n: size,
            max: max_nodes,
        });
    }
    Ok(())
}

/// Checks label count, emptiness and uniqueness.
pub(crate) fn check_labels(labels: &[String], size: usize) -> Result<(), DimensionError> {
    if labels.len() != size {
        return Err(DimensionError::LabelCountMismatch {
            labels: labels.len(),
            size,
        });
    }
    for (index, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(DimensionError::EmptyLabel { index });
        }
        if let Some(first) = labels[..index].iter().position(|l| l == label) {
            return Err(DimensionError::DuplicateLabel {
                label: label.clone(),
                first,
                second: index,
            });
        }
    }
    Ok(())
}

impl fmt::Display for CostMatrix {
    /// Renders a right-aligned table with labels on both axes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(|v| v.to_string()).collect();
        let width = cells
            .iter()
            .map(String::len)
            .chain(self.labels.iter().map(|l| l.chars().count()))
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        for (i, row) in cells.chunks(self.size).enumerate() {
            write!(f, "\n{:>width$}", self.labels[i])?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

/// Serialized form of a [`CostMatrix`].
#[derive(Debug, Clone, Serialize)]
struct MatrixView {
    labels: Vec<String>,
    costs: Vec<Vec<f64>>,
    diagonal_warning: bool,
}

impl From<CostMatrix> for MatrixView {
    fn from(m: CostMatrix) -> Self {
        Self {
            costs: m.rows(),
            diagonal_warning: m.has_diagonal_warning(),
            labels: m.labels,
        }
    }
}
