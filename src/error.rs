//! Error types for model building and solving.
//!
//! Three layers, from the outside in:
//!
//! - [`ConfigurationError`] — malformed input, detected eagerly while the
//!   graph, index manager or routing model are built.
//! - [`Infeasible`] — one cumul variable's bounds collapsed during
//!   propagation. The construction heuristic uses it to reject a candidate
//!   and never lets it escape a solve.
//! - [`RoutingError::UnfeasibleProblem`] — no complete itinerary exists for
//!   the given windows and travel times.

use thiserror::Error;

/// Malformed problem input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A site index outside the location graph.
    #[error("unknown site index {index} (graph has {count} sites)")]
    UnknownSite {
        /// Offending index.
        index: usize,
        /// Number of sites in the graph.
        count: usize,
    },
    /// Two inputs that must be aligned have different lengths.
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Which input was misaligned.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A travel matrix row whose width differs from the row count.
    #[error("travel matrix row {row} has {actual} columns, expected {expected}")]
    NonSquareMatrix {
        /// Row index.
        row: usize,
        /// Required width.
        expected: usize,
        /// Supplied width.
        actual: usize,
    },
    /// A window whose opening lies after its closing.
    #[error("invalid window [{open}, {close}] for {owner}")]
    InvalidWindow {
        /// Site name or vehicle label.
        owner: String,
        /// Opening minute.
        open: i64,
        /// Closing minute.
        close: i64,
    },
    /// A negative travel or dwell duration.
    #[error("negative duration {value} for {what}")]
    NegativeDuration {
        /// Where the value came from.
        what: String,
        /// Supplied value.
        value: i64,
    },
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// A dimension name registered twice.
    #[error("dimension `{0}` is already registered")]
    DuplicateDimension(String),
    /// Lookup of a dimension name that was never registered.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),
    /// A transit id that does not belong to the model.
    #[error("unknown transit callback {0}")]
    UnknownTransit(usize),
    /// Solving without an arc cost evaluator.
    #[error("no arc cost evaluator has been set")]
    MissingArcCost,
    /// A routing position outside the index manager's range.
    #[error("unknown routing position {0}")]
    UnknownPosition(usize),
    /// JSON input that could not be decoded.
    #[error("malformed input: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Bounds of one cumul variable collapsed (`min > max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cumul bounds at position {position} collapsed to [{min}, {max}]")]
pub struct Infeasible {
    /// Routing position whose bounds collapsed.
    pub position: usize,
    /// Tightened minimum.
    pub min: i64,
    /// Tightened maximum.
    pub max: i64,
}

/// Why no itinerary exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnfeasibleCause {
    /// A declared window is already empty before any routing happens.
    #[error("declared window at position {position} is empty")]
    EmptyWindow {
        /// Routing position with the empty window.
        position: usize,
    },
    /// A vehicle cannot travel from its start to its end within its window.
    #[error("vehicle {vehicle} cannot return to its end site in time")]
    VehicleWindow {
        /// Vehicle index.
        vehicle: usize,
    },
    /// Sites left over after every vehicle closed its route.
    #[error("{} site(s) cannot be served: {}", .sites.len(), .sites.join(", "))]
    Unserved {
        /// Names of the unserved sites.
        sites: Vec<String>,
    },
    /// The configured construction step cap was reached.
    #[error("construction gave up after {limit} candidate evaluations on vehicle {vehicle}")]
    StepLimit {
        /// Vehicle being built when the cap was hit.
        vehicle: usize,
        /// Configured cap.
        limit: usize,
    },
}

/// Errors surfaced to the caller of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Input rejected while building the model.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// No feasible itinerary exists.
    #[error("unfeasible problem: {0}")]
    UnfeasibleProblem(#[from] UnfeasibleCause),
}
