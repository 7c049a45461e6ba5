//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::distance::DEFAULT_MAX_NODES;
use crate::error::SolveError;
use crate::expr::SQRT_NAMES;

/// Tour construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Scan all arcs in ascending cost order, keeping degrees at most one
    /// and refusing premature cycles.
    #[default]
    GlobalCheapestArc,
    /// Extend a path from the depot to the cheapest unvisited node.
    PathCheapestArc,
}

/// Configuration for [`RouteSolver`](crate::solver::RouteSolver).
///
/// # Examples
///
/// ```
/// use u_tour::config::{SolverConfig, Strategy};
///
/// let config = SolverConfig::default()
///     .with_variable_name("k")
///     .with_max_nodes(16)
///     .with_strategy(Strategy::PathCheapestArc);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.variable_name, "k");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest accepted node count (default: 64).
    pub max_nodes: usize,
    /// Name of the free variable in cell formulas (default: `m`).
    pub variable_name: String,
    /// Construction strategy (default: global cheapest arc).
    pub strategy: Strategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            variable_name: "m".to_string(),
            strategy: Strategy::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the node limit.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the formula variable name.
    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = name.into();
        self
    }

    /// Sets the construction strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that the configuration can be used.
    ///
    /// The variable name must be a plain identifier (ASCII letter or `_`,
    /// then letters, digits or `_`) that does not shadow `sqrt`, and the
    /// node limit must allow at least two nodes.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.max_nodes < 2 {
            return Err(SolveError::InvalidConfig(format!(
                "max_nodes must be at least 2, got {}",
                self.max_nodes
            )));
        }
        let mut chars = self.variable_name.chars();
        let plain = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !plain {
            return Err(SolveError::InvalidConfig(format!(
                "variable name `{}` is not a plain identifier",
                self.variable_name
            )));
        }
        if SQRT_NAMES.contains(&self.variable_name.as_str()) {
            return Err(SolveError::InvalidConfig(format!(
                "variable name `{}` is reserved",
                self.variable_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.max_nodes, 64);
        assert_eq!(c.variable_name, "m");
        assert_eq!(c.strategy, Strategy::GlobalCheapestArc);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_variable_names() {
        for name in ["", "2x", "a.b", "m n", "sqrt"] {
            let c = SolverConfig::default().with_variable_name(name);
            assert!(
                matches!(c.validate(), Err(SolveError::InvalidConfig(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(SolverConfig::default()
            .with_variable_name("_dist2")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_tiny_limit() {
        let c = SolverConfig::default().with_max_nodes(1);
        assert!(matches!(c.validate(), Err(SolveError::InvalidConfig(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let c: SolverConfig =
            serde_json::from_str(r#"{"strategy": "path_cheapest_arc"}"#).expect("json");
        assert_eq!(c.strategy, Strategy::PathCheapestArc);
        assert_eq!(c.max_nodes, 64);
        assert_eq!(c.variable_name, "m");
    }
}
