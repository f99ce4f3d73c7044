//! Reads a frozen [`Assignment`] back into itineraries.

use super::{Itinerary, Stop};
use crate::error::{ConfigurationError, RoutingError};
use crate::models::LocationGraph;
use crate::routing::{Assignment, CumulVar, RoutingIndexManager, RoutingPosition};

/// Walks each vehicle's successor chain and records `[min, max]` of
/// `dimension` at every stop.
///
/// Starting from the vehicle's start position, the chain is followed exactly
/// `visited + 1` steps, which lands on the vehicle's end. The assignment is
/// only read.
///
/// # Errors
///
/// [`ConfigurationError::UnknownDimension`] if `dimension` was never
/// registered, [`ConfigurationError::UnknownPosition`] if the chain is broken
/// or refers to a position outside `manager`.
pub fn extract_itineraries(
    assignment: &Assignment,
    manager: &RoutingIndexManager,
    graph: &LocationGraph,
    dimension: &str,
) -> Result<Vec<Itinerary>, RoutingError> {
    let bounds = assignment.dimension(dimension)?;

    let mut itineraries = Vec::with_capacity(assignment.num_vehicles());
    for vehicle in 0..assignment.num_vehicles() {
        let steps = assignment.route(vehicle).len().saturating_sub(1);
        let mut position = manager.start(vehicle);
        let mut stops = Vec::with_capacity(steps + 1);
        stops.push(stop_at(position, manager, graph, bounds.cumuls())?);
        for _ in 0..steps {
            position = assignment
                .next(position)
                .ok_or(ConfigurationError::UnknownPosition(position.index()))?;
            stops.push(stop_at(position, manager, graph, bounds.cumuls())?);
        }
        if position != manager.end(vehicle) {
            return Err(ConfigurationError::UnknownPosition(position.index()).into());
        }
        itineraries.push(Itinerary::new(vehicle, stops));
    }
    Ok(itineraries)
}

fn stop_at(
    position: RoutingPosition,
    manager: &RoutingIndexManager,
    graph: &LocationGraph,
    cumuls: &[CumulVar],
) -> Result<Stop, ConfigurationError> {
    manager.check_position(position)?;
    let site = manager.site_of(position);
    let name = graph
        .site(site)
        .ok_or(ConfigurationError::UnknownSite {
            index: site,
            count: graph.num_sites(),
        })?
        .name()
        .to_string();
    let cumul = cumuls
        .get(position.index())
        .ok_or(ConfigurationError::UnknownPosition(position.index()))?;
    Ok(Stop {
        site,
        name,
        earliest: cumul.min(),
        latest: cumul.max(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelMatrix;
    use crate::models::{Site, TimeWindow};
    use crate::routing::{CumulativeDimension, TransitId, UNBOUNDED};

    fn p(i: usize) -> RoutingPosition {
        RoutingPosition::new(i)
    }

    fn graph() -> LocationGraph {
        let tw = TimeWindow::new(0, 100).expect("window");
        let sites = vec![Site::depot("D"), Site::new("A", tw, 5), Site::new("B", tw, 5)];
        let travel = TravelMatrix::from_rows(vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]])
            .expect("matrix");
        LocationGraph::new(sites, travel).expect("graph")
    }

    fn assignment(routes: Vec<Vec<RoutingPosition>>) -> Assignment {
        // positions: 0 = A, 1 = B, 2/3 = starts, 4/5 = ends
        let mut dim = CumulativeDimension::new("T", TransitId::new(0), 6, UNBOUNDED, UNBOUNDED);
        for (i, lo) in [(0, 10), (1, 20), (2, 0), (3, 0), (4, 30), (5, 0)] {
            dim.set_range(p(i), lo, lo + 7).expect("tighten");
        }
        Assignment::new(routes, vec![dim], 0, 6)
    }

    #[test]
    fn test_extracts_each_vehicle() {
        let g = graph();
        let manager = RoutingIndexManager::new(3, &[0, 0], &[0, 0]).expect("manager");
        let a = assignment(vec![vec![p(2), p(1), p(0), p(4)], vec![p(3), p(5)]]);

        let its = extract_itineraries(&a, &manager, &g, "T").expect("extract");
        assert_eq!(its.len(), 2);

        let names: Vec<&str> = its[0].stops().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "A", "D"]);
        assert_eq!(its[0].stops()[1].earliest, 20);
        assert_eq!(its[0].stops()[1].latest, 27);
        assert_eq!(its[0].end().map(|s| s.earliest), Some(30));

        assert_eq!(its[1].vehicle(), 1);
        assert_eq!(its[1].len(), 2);
        assert!(!its[1].is_used());
    }

    #[test]
    fn test_unknown_dimension() {
        let g = graph();
        let manager = RoutingIndexManager::new(3, &[0, 0], &[0, 0]).expect("manager");
        let a = assignment(vec![vec![p(2), p(4)], vec![p(3), p(5)]]);
        assert_eq!(
            extract_itineraries(&a, &manager, &g, "Distance"),
            Err(RoutingError::Configuration(
                ConfigurationError::UnknownDimension("Distance".into())
            ))
        );
    }

    #[test]
    fn test_assignment_untouched() {
        let g = graph();
        let manager = RoutingIndexManager::new(3, &[0, 0], &[0, 0]).expect("manager");
        let a = assignment(vec![vec![p(2), p(0), p(4)], vec![p(3), p(1), p(5)]]);
        let before = a.clone();
        extract_itineraries(&a, &manager, &g, "T").expect("extract");
        assert_eq!(a, before);
    }
}
