//! Domain model types for single-depot tours.
//!
//! Provides labelled nodes, directed arcs, and the closed tour handed back
//! to callers.

mod node;
mod route;

pub use node::{Arc, Node, DEPOT};
pub use route::RouteResult;
