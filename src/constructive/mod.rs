//! Constructive heuristics for building an initial feasible assignment.
//!
//! - [`path_cheapest_arc`] — Cheapest-arc route extension with candidate
//!   backtracking, O(n³) per vehicle

mod cheapest_arc;

pub use cheapest_arc::path_cheapest_arc;
