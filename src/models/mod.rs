//! Domain model types for routing with time windows.
//!
//! Provides the static problem description: sites with opening windows and
//! dwell times, vehicles with start/end sites and availability windows, the
//! immutable location graph tying them to a travel matrix, and the raw
//! serde-facing input that builds it.

mod graph;
mod input;
mod site;
mod vehicle;

pub use graph::LocationGraph;
pub use input::{ProblemInput, SiteInput, VehicleInput};
pub use site::{Site, TimeWindow};
pub use vehicle::Vehicle;
