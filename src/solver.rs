//! End-to-end VRPTW solve: graph and fleet in, itineraries out.
//!
//! Wires the pieces together the same way every time:
//!
//! 1. [`RoutingIndexManager`] over the graph's sites and the fleet's depots
//! 2. [`RoutingModel`] with a [`DwellTransit`] registered as arc cost
//! 3. A [`TOTAL_TIME`] dimension with unbounded slack and capacity
//! 4. Site and vehicle windows via [`apply_time_windows`]
//! 5. Construction (plus optional 2-opt), then [`extract_itineraries`]
//!
//! Bound propagation only follows each vehicle's chain. Vehicles never
//! constrain one another, so this is not general arc consistency.

use log::debug;

use crate::error::{ConfigurationError, RoutingError, UnfeasibleCause};
use crate::models::{LocationGraph, Vehicle};
use crate::routing::{
    check_site_count, CumulativeDimension, DwellTransit, RoutingIndexManager, RoutingModel,
    SearchParameters, UNBOUNDED,
};
use crate::solution::{extract_itineraries, Itinerary};

/// Name of the arrival-time dimension.
pub const TOTAL_TIME: &str = "TotalTime";

/// Itineraries of a solved instance and their total travel cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    itineraries: Vec<Itinerary>,
    objective: i64,
}

impl Schedule {
    /// One itinerary per vehicle, unused vehicles included.
    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    /// Total arc cost over used vehicles.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    /// Consumes the schedule, returning its itineraries.
    pub fn into_itineraries(self) -> Vec<Itinerary> {
        self.itineraries
    }
}

/// Declares site and vehicle windows on an arrival-time dimension.
///
/// Every visit position gets `[open, close - dwell]` of its site, so the
/// dwell still ends before the site closes. Each vehicle's start gets
/// `min >= earliest_departure` and its end `max <= latest_return`. Sites used
/// as a start or end keep no site window.
///
/// # Errors
///
/// [`ConfigurationError::LengthMismatch`] if `graph` or `vehicles` does not
/// match the manager's sites or fleet, [`UnfeasibleCause::EmptyWindow`] if a declared window
/// leaves a position with `min > max`.
pub fn apply_time_windows(
    dimension: &mut CumulativeDimension,
    manager: &RoutingIndexManager,
    graph: &LocationGraph,
    vehicles: &[Vehicle],
) -> Result<(), RoutingError> {
    if vehicles.len() != manager.num_vehicles() {
        return Err(ConfigurationError::LengthMismatch {
            what: "vehicle list",
            expected: manager.num_vehicles(),
            actual: vehicles.len(),
        }
        .into());
    }
    check_site_count(graph, manager)?;
    let empty = |position: usize| UnfeasibleCause::EmptyWindow { position };

    for position in manager.visits() {
        let index = manager.site_of(position);
        let site = graph.site(index).ok_or(ConfigurationError::UnknownSite {
            index,
            count: graph.num_sites(),
        })?;
        dimension
            .set_range(position, site.window().open(), site.latest_arrival())
            .map_err(|e| empty(e.position))?;
    }
    for (index, vehicle) in vehicles.iter().enumerate() {
        dimension
            .set_min(manager.start(index), vehicle.earliest_departure())
            .map_err(|e| empty(e.position))?;
        dimension
            .set_max(manager.end(index), vehicle.latest_return())
            .map_err(|e| empty(e.position))?;
    }
    Ok(())
}

/// Solves a VRPTW instance with default [`SearchParameters`].
///
/// # Examples
///
/// ```
/// use u_vrptw::distance::TravelMatrix;
/// use u_vrptw::models::{LocationGraph, Site, TimeWindow, Vehicle};
/// use u_vrptw::solver::solve_vrptw;
///
/// let tw = TimeWindow::new(540, 1080).unwrap();
/// let sites = vec![Site::depot("DEPOT"), Site::new("A", tw, 30), Site::new("B", tw, 20)];
/// let travel = TravelMatrix::from_rows(vec![
///     vec![0, 10, 15],
///     vec![10, 0, 5],
///     vec![15, 5, 0],
/// ]).unwrap();
/// let graph = LocationGraph::new(sites, travel).unwrap();
/// let fleet = [Vehicle::round_trip(0, TimeWindow::new(600, 900).unwrap())];
///
/// let schedule = solve_vrptw(&graph, &fleet).unwrap();
/// let stops = schedule.itineraries()[0].stops();
/// assert_eq!(stops.len(), 4);
/// assert_eq!(stops[1].name, "A");
/// assert_eq!(stops[1].earliest, 610);
/// ```
pub fn solve_vrptw(graph: &LocationGraph, vehicles: &[Vehicle]) -> Result<Schedule, RoutingError> {
    solve_vrptw_with_parameters(graph, vehicles, &SearchParameters::default())
}

/// Solves a VRPTW instance.
///
/// # Errors
///
/// [`RoutingError::Configuration`] for a fleet referring to unknown sites,
/// [`RoutingError::UnfeasibleProblem`] when no itinerary satisfies the
/// windows.
pub fn solve_vrptw_with_parameters(
    graph: &LocationGraph,
    vehicles: &[Vehicle],
    params: &SearchParameters,
) -> Result<Schedule, RoutingError> {
    graph.check_fleet(vehicles)?;
    let starts: Vec<usize> = vehicles.iter().map(Vehicle::start).collect();
    let ends: Vec<usize> = vehicles.iter().map(Vehicle::end).collect();
    let manager = RoutingIndexManager::new(graph.num_sites(), &starts, &ends)?;

    let mut model = RoutingModel::new(&manager);
    model.set_site_names(graph.sites().iter().map(|s| s.name()))?;
    let transit = model.register_transit(DwellTransit::new(graph, &manager)?);
    model.set_arc_cost_evaluator_of_all_vehicles(transit)?;
    model.add_dimension(transit, UNBOUNDED, UNBOUNDED, false, TOTAL_TIME)?;
    apply_time_windows(model.dimension_mut(TOTAL_TIME)?, &manager, graph, vehicles)?;
    debug!(
        "model ready: {} site(s), {} vehicle(s), {} position(s)",
        graph.num_sites(),
        vehicles.len(),
        manager.num_positions()
    );

    let assignment = model.solve_with_parameters(params)?;
    let itineraries = extract_itineraries(&assignment, &manager, graph, TOTAL_TIME)?;
    Ok(Schedule {
        itineraries,
        objective: assignment.objective_value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelMatrix;
    use crate::models::{ProblemInput, Site, TimeWindow};
    use crate::routing::TransitId;

    fn window(open: i64, close: i64) -> TimeWindow {
        TimeWindow::new(open, close).expect("window")
    }

    fn two_sites(close_b: i64) -> LocationGraph {
        let sites = vec![
            Site::depot("DEPOT"),
            Site::new("A", window(0, 200), 10),
            Site::new("B", window(0, close_b), 10),
        ];
        let travel = TravelMatrix::from_rows(vec![
            vec![0, 20, 30],
            vec![20, 0, 15],
            vec![30, 15, 0],
        ])
        .expect("matrix");
        LocationGraph::new(sites, travel).expect("graph")
    }

    #[test]
    fn test_windows_applied() {
        let graph = two_sites(200);
        let fleet = [Vehicle::round_trip(0, window(50, 180))];
        let manager = RoutingIndexManager::new(3, &[0], &[0]).expect("manager");
        let mut dim = CumulativeDimension::new(
            TOTAL_TIME,
            TransitId::new(0),
            manager.num_positions(),
            UNBOUNDED,
            UNBOUNDED,
        );
        apply_time_windows(&mut dim, &manager, &graph, &fleet).expect("windows");

        let a = manager.position_of(1).expect("visit");
        assert_eq!(dim.cumul(a).min(), 0);
        assert_eq!(dim.cumul(a).max(), 190);
        assert_eq!(dim.cumul(manager.start(0)).min(), 50);
        assert_eq!(dim.cumul(manager.start(0)).max(), UNBOUNDED);
        assert_eq!(dim.cumul(manager.end(0)).max(), 180);
    }

    #[test]
    fn test_dwell_longer_than_window_is_empty() {
        let sites = vec![Site::depot("DEPOT"), Site::new("A", window(100, 105), 10)];
        let travel = TravelMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).expect("matrix");
        let graph = LocationGraph::new(sites, travel).expect("graph");
        let fleet = [Vehicle::round_trip(0, window(0, 500))];
        assert_eq!(
            solve_vrptw(&graph, &fleet),
            Err(RoutingError::UnfeasibleProblem(UnfeasibleCause::EmptyWindow {
                position: 0
            }))
        );
    }

    #[test]
    fn test_solves_small_instance() {
        let graph = two_sites(200);
        let fleet = [Vehicle::round_trip(0, window(0, 200))];
        let schedule = solve_vrptw(&graph, &fleet).expect("feasible");
        let names: Vec<&str> = schedule.itineraries()[0]
            .stops()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["DEPOT", "A", "B", "DEPOT"]);
        assert_eq!(schedule.objective(), 20 + 25 + 40);
    }

    #[test]
    fn test_greedy_does_not_reorder_for_later_windows() {
        // B must be reached by 35 (close 45, dwell 10). A is cheaper from the
        // depot and gets committed first, after which B is out of reach.
        let graph = two_sites(45);
        let fleet = [Vehicle::round_trip(0, window(0, 200))];
        assert_eq!(
            solve_vrptw(&graph, &fleet),
            Err(RoutingError::UnfeasibleProblem(UnfeasibleCause::Unserved {
                sites: vec!["B".to_string()]
            }))
        );
    }

    #[test]
    fn test_unknown_fleet_site() {
        let graph = two_sites(200);
        let fleet = [Vehicle::round_trip(9, window(0, 200))];
        assert_eq!(
            solve_vrptw(&graph, &fleet),
            Err(RoutingError::Configuration(ConfigurationError::UnknownSite {
                index: 9,
                count: 3
            }))
        );
    }

    #[test]
    fn test_return_too_early() {
        let graph = two_sites(200);
        let fleet = [Vehicle::round_trip(0, window(0, 60))];
        assert!(matches!(
            solve_vrptw(&graph, &fleet),
            Err(RoutingError::UnfeasibleProblem(_))
        ));
    }

    fn time_dimension(manager: &RoutingIndexManager) -> CumulativeDimension {
        CumulativeDimension::new(
            TOTAL_TIME,
            TransitId::new(0),
            manager.num_positions(),
            UNBOUNDED,
            UNBOUNDED,
        )
    }

    #[test]
    fn test_window_fleet_mismatch() {
        let graph = two_sites(200);
        let manager = RoutingIndexManager::new(3, &[0, 0], &[0, 0]).expect("manager");
        let mut dim = time_dimension(&manager);
        let fleet = [Vehicle::round_trip(0, window(0, 200))];
        assert!(matches!(
            apply_time_windows(&mut dim, &manager, &graph, &fleet),
            Err(RoutingError::Configuration(ConfigurationError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_window_site_count_mismatch() {
        let sites = vec![Site::depot("DEPOT"), Site::new("A", window(0, 200), 10)];
        let travel = TravelMatrix::from_rows(vec![vec![0, 5], vec![5, 0]]).expect("matrix");
        let graph = LocationGraph::new(sites, travel).expect("graph");
        let manager = RoutingIndexManager::new(5, &[0], &[0]).expect("manager");
        let mut dim = time_dimension(&manager);
        let fleet = [Vehicle::round_trip(0, window(0, 200))];
        assert_eq!(
            apply_time_windows(&mut dim, &manager, &graph, &fleet),
            Err(RoutingError::Configuration(
                ConfigurationError::LengthMismatch {
                    what: "location graph",
                    expected: 5,
                    actual: 2
                }
            ))
        );
    }

    #[test]
    fn test_overflowing_travel_is_unserved_not_a_panic() {
        let input = ProblemInput::from_json(
            r#"{
                "sites": [
                    {"name": "DEPOT", "open": 0, "close": 0},
                    {"name": "A", "open": 0, "close": 500}
                ],
                "travel_matrix": [[0, 5], [9223372036854775807, 0]],
                "dwell": [0, 10],
                "vehicles": [
                    {"start": 0, "end": 0, "earliest_departure": 0, "latest_return": 500}
                ]
            }"#,
        )
        .expect("json");
        let (graph, fleet) = input.build().expect("valid input");
        assert_eq!(
            solve_vrptw(&graph, &fleet),
            Err(RoutingError::UnfeasibleProblem(UnfeasibleCause::Unserved {
                sites: vec!["A".to_string()]
            }))
        );
    }
}
