//! Search parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Strategy used to build the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstSolutionStrategy {
    /// Extend each route from its endpoint along the cheapest feasible arc.
    #[default]
    PathCheapestArc,
}

/// Parameters for [`solve_with_parameters`](super::RoutingModel::solve_with_parameters).
///
/// # Examples
///
/// ```
/// use u_vrptw::routing::{FirstSolutionStrategy, SearchParameters};
///
/// let params = SearchParameters::from_json(r#"{"local_search": true}"#).unwrap();
/// assert!(params.local_search);
/// assert_eq!(params.first_solution_strategy, FirstSolutionStrategy::PathCheapestArc);
/// assert_eq!(params.max_construction_steps, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParameters {
    /// Construction heuristic.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Run window-preserving 2-opt on each route after construction.
    pub local_search: bool,
    /// Cap on candidate evaluations during construction; `None` is unlimited.
    pub max_construction_steps: Option<usize>,
}

impl SearchParameters {
    /// Decodes parameters from JSON text; missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the first solution strategy.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Enables or disables the 2-opt refinement.
    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    /// Caps the number of candidate evaluations during construction.
    pub fn with_max_construction_steps(mut self, limit: usize) -> Self {
        self.max_construction_steps = Some(limit);
        self
    }
}
