//! Transit evaluators: the quantity consumed moving between positions.

use super::{RoutingIndexManager, RoutingPosition};
use crate::error::ConfigurationError;
use crate::models::LocationGraph;

/// Time (or cost) consumed moving from one routing position to the next.
///
/// Implementations must be pure: the routing model calls them for arbitrary
/// pairs, repeatedly, during construction and propagation.
///
/// Any `Fn(RoutingPosition, RoutingPosition) -> i64` is a transit evaluator.
pub trait TransitEvaluator {
    /// Transit value of the arc `from -> to`.
    fn transit(&self, from: RoutingPosition, to: RoutingPosition) -> i64;
}

impl<F> TransitEvaluator for F
where
    F: Fn(RoutingPosition, RoutingPosition) -> i64,
{
    fn transit(&self, from: RoutingPosition, to: RoutingPosition) -> i64 {
        self(from, to)
    }
}

/// `dwell(site(from)) + travel(site(from), site(to))`.
///
/// Departing a vehicle's start charges the start site's dwell like any other
/// site; a depot contributes nothing only because its dwell is zero in the
/// data.
///
/// # Examples
///
/// ```
/// use u_vrptw::distance::TravelMatrix;
/// use u_vrptw::models::{LocationGraph, Site, TimeWindow};
/// use u_vrptw::routing::{DwellTransit, RoutingIndexManager, TransitEvaluator};
///
/// let tw = TimeWindow::new(0, 600).unwrap();
/// let sites = vec![Site::depot("D"), Site::new("A", tw, 30), Site::new("B", tw, 20)];
/// let travel = TravelMatrix::from_rows(vec![
///     vec![0, 5, 6],
///     vec![5, 0, 9],
///     vec![6, 7, 0],
/// ]).unwrap();
/// let graph = LocationGraph::new(sites, travel).unwrap();
/// let manager = RoutingIndexManager::new(3, &[0], &[0]).unwrap();
/// let transit = DwellTransit::new(&graph, &manager).unwrap();
///
/// let a = manager.position_of(1).unwrap();
/// let b = manager.position_of(2).unwrap();
/// assert_eq!(transit.transit(a, b), 30 + 9);
/// assert_eq!(transit.transit(manager.start(0), a), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DwellTransit<'a> {
    graph: &'a LocationGraph,
    manager: &'a RoutingIndexManager,
}

impl<'a> DwellTransit<'a> {
    /// Creates the evaluator over a graph and its index manager.
    ///
    /// Fails with [`ConfigurationError::LengthMismatch`] if the manager was
    /// built for a different number of sites than the graph holds.
    pub fn new(
        graph: &'a LocationGraph,
        manager: &'a RoutingIndexManager,
    ) -> Result<Self, ConfigurationError> {
        check_site_count(graph, manager)?;
        Ok(Self { graph, manager })
    }
}

/// Fails unless `manager` covers exactly the sites of `graph`.
pub(crate) fn check_site_count(
    graph: &LocationGraph,
    manager: &RoutingIndexManager,
) -> Result<(), ConfigurationError> {
    if graph.num_sites() == manager.num_sites() {
        Ok(())
    } else {
        Err(ConfigurationError::LengthMismatch {
            what: "location graph",
            expected: manager.num_sites(),
            actual: graph.num_sites(),
        })
    }
}

impl TransitEvaluator for DwellTransit<'_> {
    fn transit(&self, from: RoutingPosition, to: RoutingPosition) -> i64 {
        let from_site = self.manager.site_of(from);
        let to_site = self.manager.site_of(to);
        self.graph
            .dwell(from_site)
            .saturating_add(self.graph.travel(from_site, to_site))
    }
}
