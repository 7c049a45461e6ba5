//! Error taxonomy for tour solving.
//!
//! Every failure is returned as a [`SolveError`]; nothing is thrown across the
//! caller boundary and no partial result accompanies an error.

use serde::Serialize;
use thiserror::Error;

use crate::expr::ParseError;

/// Shape and labelling problems detected before any cost is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// A row does not have as many entries as there are rows.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of entries found in that row.
        len: usize,
        /// Number of rows in the grid.
        expected: usize,
    },
    /// Fewer than two nodes.
    #[error("a tour needs at least 2 nodes, got {n}")]
    TooFewNodes {
        /// Number of nodes supplied.
        n: usize,
    },
    /// More nodes than the configured limit.
    #[error("{n} nodes exceeds the configured maximum of {max}")]
    TooManyNodes {
        /// Number of nodes supplied.
        n: usize,
        /// Configured maximum.
        max: usize,
    },
    /// Label count does not match the matrix size.
    #[error("{labels} labels supplied for a {size}x{size} matrix")]
    LabelCountMismatch {
        /// Number of labels.
        labels: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// Two nodes share a label.
    #[error("label `{label}` is used by nodes {first} and {second}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
        /// First node carrying it.
        first: usize,
        /// Second node carrying it.
        second: usize,
    },
    /// A label is empty or whitespace only.
    #[error("node {index} has an empty label")]
    EmptyLabel {
        /// Node index.
        index: usize,
    },
}

/// Stable, machine-readable category of a [`SolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Cell text does not parse.
    Expression,
    /// Cell value negative or non-finite.
    Range,
    /// Matrix shape or labels invalid.
    Dimension,
    /// No Hamiltonian circuit could be completed.
    Infeasible,
    /// Solver configuration invalid.
    Config,
}

impl ErrorKind {
    /// Lower-case name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Expression => "expression",
            ErrorKind::Range => "range",
            ErrorKind::Dimension => "dimension",
            ErrorKind::Infeasible => "infeasible",
            ErrorKind::Config => "config",
        }
    }
}

/// Error returned by [`solve`](crate::solver::solve) and its building blocks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A cell's text is not a valid formula.
    #[error("cell ({row}, {col}) `{text}`: {source}")]
    Expression {
        /// Row index of the cell.
        row: usize,
        /// Column index of the cell.
        col: usize,
        /// Raw cell text.
        text: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
    /// A cell evaluated to a value that cannot be a cost.
    #[error("cell ({row}, {col}) evaluates to {value}, expected a finite non-negative cost")]
    Range {
        /// Row index of the cell.
        row: usize,
        /// Column index of the cell.
        col: usize,
        /// Computed value.
        value: f64,
    },
    /// Matrix shape or labels are invalid.
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    /// Construction ran out of candidate arcs.
    #[error("no closed tour found: accepted {accepted} of {required} arcs")]
    Infeasible {
        /// Arcs accepted before the candidates ran out.
        accepted: usize,
        /// Arcs a closed tour needs.
        required: usize,
    },
    /// The solver configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SolveError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::Expression { .. } => ErrorKind::Expression,
            SolveError::Range { .. } => ErrorKind::Range,
            SolveError::Dimension(_) => ErrorKind::Dimension,
            SolveError::Infeasible { .. } => ErrorKind::Infeasible,
            SolveError::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// Human-readable location of the failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour::error::SolveError;
    ///
    /// let err = SolveError::Range { row: 1, col: 2, value: -3.0 };
    /// assert_eq!(err.location(), "cell (row 1, column 2)");
    /// ```
    pub fn location(&self) -> String {
        match self {
            SolveError::Expression { row, col, .. } | SolveError::Range { row, col, .. } => {
                format!("cell (row {row}, column {col})")
            }
            SolveError::Dimension(DimensionError::NotSquare { row, .. }) => {
                format!("matrix shape (row {row})")
            }
            SolveError::Dimension(
                DimensionError::DuplicateLabel { second: index, .. }
                | DimensionError::EmptyLabel { index },
            ) => format!("label {index}"),
            SolveError::Dimension(_) => "matrix shape".to_string(),
            SolveError::Infeasible { .. } => "infeasible overall".to_string(),
            SolveError::InvalidConfig(_) => "configuration".to_string(),
        }
    }

    /// Serializable summary for callers outside Rust.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            location: self.location(),
            message: self.to_string(),
        }
    }
}

/// Flattened error description handed to non-Rust callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Error category.
    pub kind: ErrorKind,
    /// Where the failure occurred.
    pub location: String,
    /// Full message.
    pub message: String,
}
