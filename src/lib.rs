//! # u-vrptw
//!
//! Vehicle routing with time windows: a small constraint-based routing
//! engine with cheapest-arc construction and chain-local bound propagation.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Site, TimeWindow, Vehicle, LocationGraph, ProblemInput)
//! - [`distance`] — Integer-minute travel time matrix
//! - [`routing`] — Index manager, transit evaluators, cumulative dimensions, routing model
//! - [`constructive`] — Path-cheapest-arc construction with candidate backtracking
//! - [`local_search`] — Window-preserving 2-opt
//! - [`solution`] — Itinerary read-back from an assignment
//! - [`solver`] — End-to-end VRPTW solve with a `TotalTime` dimension
//! - [`report`] — `HH:MM hs` rendering
//! - [`error`] — Configuration and infeasibility errors
//!
//! ## Example
//!
//! ```
//! use u_vrptw::models::ProblemInput;
//! use u_vrptw::solver::solve_vrptw;
//!
//! let input = ProblemInput::from_json(r#"{
//!     "sites": [
//!         {"name": "DEPOT", "open": 0, "close": 0},
//!         {"name": "A", "open": 540, "close": 1080}
//!     ],
//!     "travel_matrix": [[0, 10], [12, 0]],
//!     "dwell": [0, 30],
//!     "vehicles": [
//!         {"start": 0, "end": 0, "earliest_departure": 660, "latest_return": 1020}
//!     ]
//! }"#).unwrap();
//! let (graph, fleet) = input.build().unwrap();
//!
//! let schedule = solve_vrptw(&graph, &fleet).unwrap();
//! assert_eq!(schedule.objective(), 10 + 42);
//! println!("{}", u_vrptw::report::render(schedule.itineraries()));
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;
pub mod report;
pub mod routing;
pub mod solution;
pub mod solver;

pub use error::{ConfigurationError, RoutingError, UnfeasibleCause};
pub use solver::{solve_vrptw, solve_vrptw_with_parameters, Schedule, TOTAL_TIME};
