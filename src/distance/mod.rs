//! Cost matrices.
//!
//! Provides the dense, labelled matrix of resolved travel costs the tour
//! builders run on.

mod matrix;

pub(crate) use matrix::{check_dimensions, check_labels};
pub use matrix::{CostMatrix, DEFAULT_MAX_NODES};
