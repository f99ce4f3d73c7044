//! Constraint-based routing engine.
//!
//! - [`RoutingIndexManager`] — site ↔ routing position mapping
//! - [`TransitEvaluator`] / [`DwellTransit`] — per-arc transit values
//! - [`CumulativeDimension`] — bounded cumulative quantities with path propagation
//! - [`RoutingModel`] — transit registry, arc costs, dimensions, solving
//! - [`Assignment`] — frozen routes and bounds

mod assignment;
mod dimension;
mod index_manager;
mod model;
mod parameters;
mod transit;

pub use assignment::Assignment;
pub use dimension::{CumulVar, CumulativeDimension, UNBOUNDED};
pub use index_manager::{RoutingIndexManager, RoutingPosition};
pub use model::{RoutingModel, TransitId};
pub use parameters::{FirstSolutionStrategy, SearchParameters};
pub use transit::{DwellTransit, TransitEvaluator};
pub(crate) use transit::check_site_count;
