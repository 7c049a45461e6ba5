//! Solve entry point.
//!
//! Ties the pipeline together: configuration check → shape check → cell
//! evaluation → cost matrix → tour construction → audit. Every call owns
//! its working state; nothing is kept between calls.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::SolverConfig;
use crate::constructive::build_tour;
use crate::distance::{check_dimensions, check_labels, CostMatrix};
use crate::error::{DimensionError, SolveError};
use crate::evaluation::validate_tour;
use crate::expr::{parse_variable_input, CellValue, ExpressionEvaluator};
use crate::models::RouteResult;

/// Caller-owned input for one solve: the raw grid, node labels and the
/// variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// n×n raw cells, row `i` column `j` holding the cost of i→j.
    pub cells: Vec<Vec<CellValue>>,
    /// n node labels; the first is the depot.
    pub labels: Vec<String>,
    /// Value of the formula variable; absent means 0. In serialized form
    /// this may also be the raw input text, read by [`parse_variable_input`].
    #[serde(default, deserialize_with = "variable_value")]
    pub variable: Option<f64>,
}

/// Accepts the variable as a number, as input text, or as `null`.
fn variable_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => Some(v),
        Some(Raw::Text(text)) => Some(parse_variable_input(&text)),
        None => None,
    })
}

impl SolveRequest {
    /// Creates a request.
    pub fn new(cells: Vec<Vec<CellValue>>, labels: Vec<String>, variable: Option<f64>) -> Self {
        Self {
            cells,
            labels,
            variable,
        }
    }
}

/// A request bundled with the configuration to solve it under, as received
/// from non-Rust callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredRequest {
    /// The request itself.
    #[serde(flatten)]
    pub request: SolveRequest,
    /// Solver configuration; defaults apply when omitted.
    #[serde(default)]
    pub config: SolverConfig,
}

impl ConfiguredRequest {
    /// Solves the request under its configuration.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        RouteSolver::new(self.config.clone()).solve(&self.request)
    }
}

/// Successful outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    route: RouteResult,
    matrix: CostMatrix,
    diagonal_warning: bool,
}

impl Solution {
    /// The constructed tour.
    pub fn route(&self) -> &RouteResult {
        &self.route
    }

    /// The resolved cost matrix the tour was built on.
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// `true` if some self cost was non-zero (the solve still went ahead).
    pub fn diagonal_warning(&self) -> bool {
        self.diagonal_warning
    }

    /// Splits the solution into its tour and matrix.
    pub fn into_parts(self) -> (RouteResult, CostMatrix) {
        (self.route, self.matrix)
    }
}

/// Tour solver with a fixed configuration.
///
/// Holds no per-solve state, so one solver can serve many independent
/// requests, including from several threads.
///
/// # Examples
///
/// ```
/// use u_tour::config::SolverConfig;
/// use u_tour::solver::{RouteSolver, SolveRequest};
///
/// let request = SolveRequest::new(
///     vec![
///         vec![0.into(), "m".into()],
///         vec!["m + 1".into(), 0.into()],
///     ],
///     vec!["Depot".into(), "Site".into()],
///     Some(4.0),
/// );
/// let solution = RouteSolver::new(SolverConfig::default()).solve(&request).unwrap();
/// assert_eq!(solution.route().to_string(), "Depot -> Site -> Depot");
/// assert_eq!(solution.route().total_cost(), 9.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSolver {
    config: SolverConfig,
}

impl RouteSolver {
    /// Creates a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves one request. All-or-nothing: either a full tour or an error.
    pub fn solve(&self, request: &SolveRequest) -> Result<Solution, SolveError> {
        self.config.validate()?;
        check_grid(&request.cells, &request.labels, self.config.max_nodes)?;

        let evaluator = ExpressionEvaluator::new(self.config.variable_name.as_str(), request.variable);
        let rows = evaluator.evaluate_grid(&request.cells)?;
        let matrix = CostMatrix::with_max_nodes(rows, request.labels.clone(), self.config.max_nodes)?;
        let n = matrix.size();

        let (tour, total_cost) = build_tour(&matrix, self.config.strategy)?;
        if let Err(violation) = validate_tour(n, &tour) {
            log::error!("solve: constructed tour failed audit: {violation}");
            return Err(SolveError::Infeasible {
                accepted: tour.len().saturating_sub(1),
                required: n,
            });
        }

        let route = RouteResult::from_tour(&matrix, &tour, total_cost);
        log::info!(
            "solve: n={n} strategy={:?} {}={} cost={} route={route}",
            self.config.strategy,
            evaluator.variable_name(),
            evaluator.value(),
            route.format_cost(),
        );

        let diagonal_warning = matrix.has_diagonal_warning();
        Ok(Solution {
            route,
            matrix,
            diagonal_warning,
        })
    }
}

/// Solves with the default configuration.
///
/// # Examples
///
/// ```
/// use u_tour::expr::CellValue;
/// use u_tour::solver::solve;
///
/// let cells: Vec<Vec<CellValue>> = vec![
///     vec![0.into(), 10.into(), 15.into(), 20.into()],
///     vec![10.into(), 0.into(), 35.into(), 25.into()],
///     vec![15.into(), 35.into(), 0.into(), 30.into()],
///     vec![20.into(), 25.into(), 30.into(), 0.into()],
/// ];
/// let labels = ["A", "B", "C", "D"].map(String::from).to_vec();
///
/// let solution = solve(&cells, &labels, None).unwrap();
/// assert_eq!(solution.route().to_string(), "A -> B -> D -> C -> A");
/// assert_eq!(solution.route().format_cost(), "80");
/// ```
pub fn solve(
    cells: &[Vec<CellValue>],
    labels: &[String],
    variable: Option<f64>,
) -> Result<Solution, SolveError> {
    let request = SolveRequest::new(cells.to_vec(), labels.to_vec(), variable);
    RouteSolver::default().solve(&request)
}

/// Shape and label checks, done before any cell is evaluated.
fn check_grid(cells: &[Vec<CellValue>], labels: &[String], max_nodes: usize) -> Result<(), SolveError> {
    let n = cells.len();
    check_dimensions(n, max_nodes)?;
    if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(DimensionError::NotSquare {
            row,
            len: r.len(),
            expected: n,
        }
        .into());
    }
    check_labels(labels, n)?;
    Ok(())
}
