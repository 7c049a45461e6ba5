//! Resolution of raw grid cells into numeric costs.

use serde::{Deserialize, Serialize};

use super::Formula;
use crate::error::SolveError;

/// A raw matrix cell as delivered by the grid editor.
///
/// Deserializes from either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// An already numeric cell.
    Number(f64),
    /// Cell text: a literal or a formula.
    Text(String),
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Number(f64::from(v))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Evaluates cells with a single named variable bound to a fixed value.
///
/// Off-diagonal cells must resolve to finite, non-negative costs. Diagonal
/// cells only need to be finite: they are never travelled and are reported
/// as a warning by [`CostMatrix`](crate::distance::CostMatrix) when non-zero.
///
/// # Examples
///
/// ```
/// use u_tour::expr::{CellValue, ExpressionEvaluator};
///
/// let evaluator = ExpressionEvaluator::new("m", Some(2.0));
/// let grid = vec![
///     vec![CellValue::from(0), CellValue::from("m * 5")],
///     vec![CellValue::from("sqrt(16)"), CellValue::from("0")],
/// ];
/// let costs = evaluator.evaluate_grid(&grid).unwrap();
/// assert_eq!(costs, vec![vec![0.0, 10.0], vec![4.0, 0.0]]);
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    variable_name: String,
    value: f64,
}

impl ExpressionEvaluator {
    /// Creates an evaluator; an absent value binds the variable to 0.
    pub fn new(variable_name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            variable_name: variable_name.into(),
            value: value.unwrap_or(0.0),
        }
    }

    /// Name of the bound variable.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Value the variable is bound to.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Resolves the cell at (`row`, `col`) to a cost.
    pub fn evaluate_cell(&self, row: usize, col: usize, cell: &CellValue) -> Result<f64, SolveError> {
        let value = match cell {
            CellValue::Number(v) => *v,
            CellValue::Text(text) => Formula::parse(text, &self.variable_name)
                .map_err(|source| SolveError::Expression {
                    row,
                    col,
                    text: text.clone(),
                    source,
                })?
                .eval(self.value),
        };

        let in_range = if row == col {
            value.is_finite()
        } else {
            value.is_finite() && value >= 0.0
        };
        if !in_range {
            return Err(SolveError::Range { row, col, value });
        }
        Ok(value)
    }

    /// Resolves every cell of `cells`, row-major.
    ///
    /// Stops at the first failing cell. Ragged rows are evaluated as given;
    /// shape checking is left to the cost matrix.
    pub fn evaluate_grid(&self, cells: &[Vec<CellValue>]) -> Result<Vec<Vec<f64>>, SolveError> {
        cells
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, cell)| self.evaluate_cell(r, c, cell))
                    .collect()
            })
            .collect()
    }
}

/// Converts the free-text variable input into a value.
///
/// Blank input means 0. Input that is not a finite number is also treated as
/// 0, with a logged warning, so a typo in the variable box never blocks a
/// solve.
///
/// # Examples
///
/// ```
/// use u_tour::expr::parse_variable_input;
///
/// assert_eq!(parse_variable_input(""), 0.0);
/// assert_eq!(parse_variable_input(" 2.5 "), 2.5);
/// assert_eq!(parse_variable_input("abc"), 0.0);
/// ```
pub fn parse_variable_input(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("variable input `{trimmed}` is not a finite number; using 0");
            0.0
        }
    }
}
