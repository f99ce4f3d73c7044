//! Frozen solver output.

use super::{CumulVar, CumulativeDimension, RoutingPosition};
use crate::error::ConfigurationError;

/// The successor relation and final cumul bounds produced by a solve.
///
/// Immutable once built. Each vehicle's route runs from its start position
/// to its end position; an unused vehicle's route is just `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    routes: Vec<Vec<RoutingPosition>>,
    next: Vec<Option<RoutingPosition>>,
    dimensions: Vec<CumulativeDimension>,
    objective: i64,
}

impl Assignment {
    pub(crate) fn new(
        routes: Vec<Vec<RoutingPosition>>,
        dimensions: Vec<CumulativeDimension>,
        objective: i64,
        num_positions: usize,
    ) -> Self {
        let mut next = vec![None; num_positions];
        for route in &routes {
            for arc in route.windows(2) {
                next[arc[0].index()] = Some(arc[1]);
            }
        }
        Self {
            routes,
            next,
            dimensions,
            objective,
        }
    }

    /// Successor of `position`; `None` for end positions and positions on no
    /// route.
    pub fn next(&self, position: RoutingPosition) -> Option<RoutingPosition> {
        self.next.get(position.index()).copied().flatten()
    }

    /// Route of `vehicle`, start and end included.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is out of range.
    pub fn route(&self, vehicle: usize) -> &[RoutingPosition] {
        &self.routes[vehicle]
    }

    /// All routes, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<RoutingPosition>] {
        &self.routes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if `vehicle` visits at least one site.
    pub fn is_vehicle_used(&self, vehicle: usize) -> bool {
        self.routes.get(vehicle).is_some_and(|r| r.len() > 2)
    }

    /// Total arc cost over the routes of used vehicles.
    pub fn objective_value(&self) -> i64 {
        self.objective
    }

    /// Final bounds of the dimension registered under `name`.
    pub fn dimension(&self, name: &str) -> Result<&CumulativeDimension, ConfigurationError> {
        self.dimensions
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownDimension(name.to_string()))
    }

    /// Final `[min, max]` at `position` in dimension `name`.
    pub fn cumul(
        &self,
        name: &str,
        position: RoutingPosition,
    ) -> Result<CumulVar, ConfigurationError> {
        let dimension = self.dimension(name)?;
        dimension
            .cumuls()
            .get(position.index())
            .copied()
            .ok_or(ConfigurationError::UnknownPosition(position.index()))
    }

    /// Final minimum at `position` in dimension `name`.
    pub fn min(&self, name: &str, position: RoutingPosition) -> Result<i64, ConfigurationError> {
        self.cumul(name, position).map(|c| c.min())
    }

    /// Final maximum at `position` in dimension `name`.
    pub fn max(&self, name: &str, position: RoutingPosition) -> Result<i64, ConfigurationError> {
        self.cumul(name, position).map(|c| c.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{TransitId, UNBOUNDED};

    fn p(i: usize) -> RoutingPosition {
        RoutingPosition::new(i)
    }

    fn sample() -> Assignment {
        // visits 0, 1; vehicle 0: start 2, end 4; vehicle 1: start 3, end 5
        let dim = CumulativeDimension::new("T", TransitId::new(0), 6, UNBOUNDED, UNBOUNDED);
        Assignment::new(
            vec![vec![p(2), p(1), p(0), p(4)], vec![p(3), p(5)]],
            vec![dim],
            42,
            6,
        )
    }

    #[test]
    fn test_next_follows_routes() {
        let a = sample();
        assert_eq!(a.next(p(2)), Some(p(1)));
        assert_eq!(a.next(p(1)), Some(p(0)));
        assert_eq!(a.next(p(0)), Some(p(4)));
        assert_eq!(a.next(p(4)), None);
        assert_eq!(a.next(p(3)), Some(p(5)));
        assert_eq!(a.next(p(99)), None);
    }

    #[test]
    fn test_vehicle_usage() {
        let a = sample();
        assert_eq!(a.num_vehicles(), 2);
        assert!(a.is_vehicle_used(0));
        assert!(!a.is_vehicle_used(1));
        assert!(!a.is_vehicle_used(2));
        assert_eq!(a.objective_value(), 42);
    }

    #[test]
    fn test_cumul_lookup() {
        let a = sample();
        assert_eq!(a.min("T", p(0)), Ok(0));
        assert_eq!(a.max("T", p(0)), Ok(UNBOUNDED));
        assert_eq!(
            a.min("Distance", p(0)),
            Err(ConfigurationError::UnknownDimension("Distance".into()))
        );
        assert_eq!(
            a.cumul("T", p(6)),
            Err(ConfigurationError::UnknownPosition(6))
        );
    }
}
