//! # u-tour
//!
//! Single-depot tour construction over labelled cost matrices whose cells
//! may be numbers or small formulas over one variable.
//!
//! ## Modules
//!
//! - [`expr`] — Cell formula parsing and evaluation (literals, `+ - * /`, parentheses, `sqrt`, one variable)
//! - [`distance`] — Labelled cost matrix with shape and diagonal checks
//! - [`models`] — Domain model types (Node, Arc, RouteResult)
//! - [`constructive`] — Constructive heuristics (global and path cheapest arc)
//! - [`evaluation`] — Tour validation and cost recomputation
//! - [`solver`] — The `solve` entry point and request/solution types
//! - [`config`] — Solver configuration
//! - [`error`] — Error taxonomy
//!
//! The constructed tours come from first-solution heuristics. They are
//! usually good but are not guaranteed to be minimal.

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod expr;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod models;
pub mod solver;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::SolveError;
pub use solver::{solve, RouteSolver, Solution, SolveRequest};
