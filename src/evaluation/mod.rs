//! Tour validation and cost recomputation.
//!
//! Independent of the builders, so results can be audited against the
//! matrix they came from.

mod tour;

pub use tour::{tour_cost, validate_tour, TourViolation};
