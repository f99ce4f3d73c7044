//! The routing model: transits, arc costs, dimensions and solving.

use log::info;

use super::{
    Assignment, CumulativeDimension, FirstSolutionStrategy, RoutingIndexManager, RoutingPosition,
    SearchParameters, TransitEvaluator,
};
use crate::constructive::path_cheapest_arc;
use crate::error::{ConfigurationError, Infeasible, RoutingError, UnfeasibleCause};
use crate::local_search::two_opt_tw;

/// Handle to a transit evaluator registered with a [`RoutingModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitId(usize);

impl TransitId {
    /// Wraps a raw registry index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw registry index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A routing problem over the positions of a [`RoutingIndexManager`].
///
/// The model holds registered transit evaluators, the arc cost evaluator
/// shared by all vehicles, and any number of named cumulative dimensions
/// whose declared bounds the caller tightens before solving. Solving never
/// mutates the model; the result is a frozen [`Assignment`].
///
/// # Examples
///
/// ```
/// use u_vrptw::routing::{RoutingIndexManager, RoutingModel, RoutingPosition, UNBOUNDED};
///
/// let manager = RoutingIndexManager::new(3, &[0], &[0]).unwrap();
/// let mut model = RoutingModel::new(&manager);
/// let transit = model.register_transit(|_: RoutingPosition, _: RoutingPosition| 10_i64);
/// model.set_arc_cost_evaluator_of_all_vehicles(transit).unwrap();
/// model.add_dimension(transit, UNBOUNDED, UNBOUNDED, true, "TotalTime").unwrap();
///
/// let assignment = model.solve().unwrap();
/// assert_eq!(assignment.route(0).len(), 4);
/// assert_eq!(assignment.objective_value(), 30);
/// assert_eq!(assignment.min("TotalTime", manager.end(0)).unwrap(), 30);
/// ```
pub struct RoutingModel<'a> {
    manager: &'a RoutingIndexManager,
    transits: Vec<Box<dyn TransitEvaluator + 'a>>,
    arc_cost: Option<TransitId>,
    dimensions: Vec<CumulativeDimension>,
    site_names: Vec<String>,
}

impl<'a> RoutingModel<'a> {
    /// Creates an empty model over `manager`'s positions.
    pub fn new(manager: &'a RoutingIndexManager) -> Self {
        Self {
            manager,
            transits: Vec::new(),
            arc_cost: None,
            dimensions: Vec::new(),
            site_names: Vec::new(),
        }
    }

    /// The index manager this model is built on.
    pub fn manager(&self) -> &'a RoutingIndexManager {
        self.manager
    }

    /// Names sites so that equal-cost candidates are ordered by name.
    ///
    /// Without names, ties fall back to ascending site index.
    pub fn set_site_names<I, S>(&mut self, names: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.manager.num_sites() {
            return Err(ConfigurationError::LengthMismatch {
                what: "site name list",
                expected: self.manager.num_sites(),
                actual: names.len(),
            });
        }
        self.site_names = names;
        Ok(())
    }

    /// Name of `site`, or an empty string if no names were set.
    pub fn site_name(&self, site: usize) -> &str {
        self.site_names.get(site).map_or("", String::as_str)
    }

    /// Registers a transit evaluator and returns its handle.
    pub fn register_transit(&mut self, evaluator: impl TransitEvaluator + 'a) -> TransitId {
        self.transits.push(Box::new(evaluator));
        TransitId(self.transits.len() - 1)
    }

    /// Uses `transit` as the arc cost of every vehicle.
    pub fn set_arc_cost_evaluator_of_all_vehicles(
        &mut self,
        transit: TransitId,
    ) -> Result<(), ConfigurationError> {
        self.check_transit(transit)?;
        self.arc_cost = Some(transit);
        Ok(())
    }

    /// Adds a cumulative dimension accumulating `transit`.
    ///
    /// `slack_max` bounds the wait between consecutive positions, `capacity`
    /// bounds every cumul, and `fix_start_cumul_to_zero` pins each vehicle's
    /// start cumul to zero.
    pub fn add_dimension(
        &mut self,
        transit: TransitId,
        slack_max: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> Result<(), ConfigurationError> {
        self.check_transit(transit)?;
        if self.dimensions.iter().any(|d| d.name() == name) {
            return Err(ConfigurationError::DuplicateDimension(name.to_string()));
        }
        for (what, value) in [("slack", slack_max), ("capacity", capacity)] {
            if value < 0 {
                return Err(ConfigurationError::NegativeDuration {
                    what: format!("{what} of dimension `{name}`"),
                    value,
                });
            }
        }

        let mut dimension = CumulativeDimension::new(
            name,
            transit,
            self.manager.num_positions(),
            slack_max,
            capacity,
        );
        if fix_start_cumul_to_zero {
            for vehicle in 0..self.manager.num_vehicles() {
                dimension.pin_to_zero(self.manager.start(vehicle));
            }
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    /// The dimension registered under `name`.
    pub fn dimension(&self, name: &str) -> Result<&CumulativeDimension, ConfigurationError> {
        self.dimensions
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownDimension(name.to_string()))
    }

    /// Mutable access to the dimension registered under `name`, for
    /// declaring bounds.
    pub fn dimension_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut CumulativeDimension, ConfigurationError> {
        self.dimensions
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownDimension(name.to_string()))
    }

    /// All registered dimensions.
    pub fn dimensions(&self) -> &[CumulativeDimension] {
        &self.dimensions
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.manager.num_vehicles()
    }

    /// Start position of `vehicle`.
    pub fn start(&self, vehicle: usize) -> RoutingPosition {
        self.manager.start(vehicle)
    }

    /// End position of `vehicle`.
    pub fn end(&self, vehicle: usize) -> RoutingPosition {
        self.manager.end(vehicle)
    }

    /// Evaluates a registered transit on the arc `from -> to`.
    pub fn transit_value(
        &self,
        transit: TransitId,
        from: RoutingPosition,
        to: RoutingPosition,
    ) -> Result<i64, ConfigurationError> {
        self.check_transit(transit)?;
        self.manager.check_position(from)?;
        self.manager.check_position(to)?;
        Ok(self.transits[transit.0].transit(from, to))
    }

    /// Arc cost of `from -> to`; zero until an arc cost evaluator is set.
    pub fn arc_cost(&self, from: RoutingPosition, to: RoutingPosition) -> i64 {
        self.arc_cost
            .map_or(0, |id| self.transits[id.0].transit(from, to))
    }

    /// Sum of arc costs along `route`, saturating at `i64::MAX`.
    pub fn route_cost(&self, route: &[RoutingPosition]) -> i64 {
        route
            .windows(2)
            .fold(0_i64, |acc, arc| acc.saturating_add(self.arc_cost(arc[0], arc[1])))
    }

    /// Propagates `route` through every dimension in `dimensions`.
    pub(crate) fn propagate_route(
        &self,
        dimensions: &mut [CumulativeDimension],
        route: &[RoutingPosition],
    ) -> Result<(), Infeasible> {
        for dimension in dimensions {
            let transit = &*self.transits[dimension.transit().0];
            dimension.propagate_path(route, transit)?;
        }
        Ok(())
    }

    /// Checks `route` against the declared bounds, without touching them.
    pub(crate) fn check_route(&self, route: &[RoutingPosition]) -> Result<(), Infeasible> {
        let mut trial = self.dimensions.clone();
        self.propagate_route(&mut trial, route)
    }

    /// Solves with default [`SearchParameters`].
    pub fn solve(&self) -> Result<Assignment, RoutingError> {
        self.solve_with_parameters(&SearchParameters::default())
    }

    /// Builds a feasible assignment or reports why none exists.
    pub fn solve_with_parameters(
        &self,
        params: &SearchParameters,
    ) -> Result<Assignment, RoutingError> {
        if self.arc_cost.is_none() {
            return Err(ConfigurationError::MissingArcCost.into());
        }

        let mut routes = match params.first_solution_strategy {
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(self, params)?,
        };

        if params.local_search {
            for route in &mut routes {
                let (improved, _) = two_opt_tw(
                    route,
                    |from, to| self.arc_cost(from, to),
                    |candidate| self.check_route(candidate).is_ok(),
                );
                *route = improved;
            }
        }

        let mut dimensions = self.dimensions.clone();
        for (vehicle, route) in routes.iter().enumerate() {
            self.propagate_route(&mut dimensions, route)
                .map_err(|_| UnfeasibleCause::VehicleWindow { vehicle })?;
        }

        let objective = routes
            .iter()
            .filter(|route| route.len() > 2)
            .fold(0_i64, |acc, route| acc.saturating_add(self.route_cost(route)));
        info!(
            "solved {} vehicle(s), {} visit(s), objective {}",
            routes.len(),
            self.manager.num_visits(),
            objective
        );

        Ok(Assignment::new(
            routes,
            dimensions,
            objective,
            self.manager.num_positions(),
        ))
    }

    fn check_transit(&self, transit: TransitId) -> Result<(), ConfigurationError> {
        if transit.0 < self.transits.len() {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownTransit(transit.0))
        }
    }
}

impl std::fmt::Debug for RoutingModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingModel")
            .field("manager", &self.manager)
            .field("transits", &self.transits.len())
            .field("arc_cost", &self.arc_cost)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::UNBOUNDED;

    fn unit(_: RoutingPosition, _: RoutingPosition) -> i64 {
        1
    }

    #[test]
    fn test_register_and_evaluate() {
        let manager = RoutingIndexManager::new(3, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        assert_eq!(id.index(), 0);
        let a = manager.position_of(1).expect("visit");
        assert_eq!(model.transit_value(id, a, manager.end(0)), Ok(1));
        assert_eq!(
            model.transit_value(TransitId::new(4), a, a),
            Err(ConfigurationError::UnknownTransit(4))
        );
        assert_eq!(
            model.transit_value(id, a, RoutingPosition::new(40)),
            Err(ConfigurationError::UnknownPosition(40))
        );
    }

    #[test]
    fn test_arc_cost_requires_registered_transit() {
        let manager = RoutingIndexManager::new(2, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        assert_eq!(
            model.set_arc_cost_evaluator_of_all_vehicles(TransitId::new(0)),
            Err(ConfigurationError::UnknownTransit(0))
        );
    }

    #[test]
    fn test_solve_without_arc_cost() {
        let manager = RoutingIndexManager::new(2, &[0], &[0]).expect("valid");
        let model = RoutingModel::new(&manager);
        assert_eq!(
            model.solve().expect_err("missing"),
            RoutingError::Configuration(ConfigurationError::MissingArcCost)
        );
    }

    #[test]
    fn test_duplicate_and_unknown_dimension() {
        let manager = RoutingIndexManager::new(2, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        model
            .add_dimension(id, UNBOUNDED, UNBOUNDED, false, "TotalTime")
            .expect("first");
        assert_eq!(
            model.add_dimension(id, UNBOUNDED, UNBOUNDED, false, "TotalTime"),
            Err(ConfigurationError::DuplicateDimension("TotalTime".into()))
        );
        assert_eq!(
            model.dimension("Distance").map(|d| d.name().to_string()),
            Err(ConfigurationError::UnknownDimension("Distance".into()))
        );
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let manager = RoutingIndexManager::new(2, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        assert!(matches!(
            model.add_dimension(id, UNBOUNDED, -1, false, "T"),
            Err(ConfigurationError::NegativeDuration { value: -1, .. })
        ));
    }

    #[test]
    fn test_fix_start_cumul_to_zero() {
        let manager = RoutingIndexManager::new(2, &[0, 0], &[0, 0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        model
            .add_dimension(id, UNBOUNDED, 100, true, "T")
            .expect("valid");
        let dim = model.dimension("T").expect("registered");
        for vehicle in 0..2 {
            assert_eq!(dim.cumul(manager.start(vehicle)).max(), 0);
            assert_eq!(dim.cumul(manager.end(vehicle)).max(), 100);
        }
    }

    #[test]
    fn test_fix_start_with_zero_capacity() {
        let manager = RoutingIndexManager::new(2, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        model
            .add_dimension(id, UNBOUNDED, 0, true, "T")
            .expect("zero capacity still admits a zero start");
        let start = model.dimension("T").expect("registered").cumul(manager.start(0));
        assert_eq!((start.min(), start.max()), (0, 0));
    }

    #[test]
    fn test_site_names_length_checked() {
        let manager = RoutingIndexManager::new(3, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        assert!(model.set_site_names(["D", "A"]).is_err());
        model.set_site_names(["D", "A", "B"]).expect("aligned");
        assert_eq!(model.site_name(2), "B");
    }

    #[test]
    fn test_solve_does_not_touch_declared_bounds() {
        let manager = RoutingIndexManager::new(3, &[0], &[0]).expect("valid");
        let mut model = RoutingModel::new(&manager);
        let id = model.register_transit(unit);
        model.set_arc_cost_evaluator_of_all_vehicles(id).expect("set");
        model
            .add_dimension(id, UNBOUNDED, UNBOUNDED, false, "T")
            .expect("valid");
        let declared = model.dimension("T").expect("registered").clone();
        let assignment = model.solve().expect("feasible");
        assert_eq!(model.dimension("T").expect("registered"), &declared);
        assert_eq!(assignment.min("T", manager.end(0)), Ok(3));
    }

    /// Sites 1, 2, 3 sit at positions 0, 1, 2; the start is 3 and the end 4.
    /// Construction yields `start, 1, 2, 3, end` (cost 103) while the full
    /// reversal `start, 3, 2, 1, end` costs 5.
    fn reversal_favoured(from: RoutingPosition, to: RoutingPosition) -> i64 {
        match (from.index(), to.index()) {
            (3, 0) | (0, 1) | (1, 2) | (2, 1) | (1, 0) | (0, 4) => 1,
            (3, 2) => 2,
            _ => 100,
        }
    }

    fn ten(_: RoutingPosition, _: RoutingPosition) -> i64 {
        10
    }

    fn two_opt_model(manager: &RoutingIndexManager, site_one_due: Option<i64>) -> RoutingModel<'_> {
        let mut model = RoutingModel::new(manager);
        let cost = model.register_transit(reversal_favoured);
        let time = model.register_transit(ten);
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("set");
        model
            .add_dimension(time, UNBOUNDED, UNBOUNDED, true, "T")
            .expect("valid");
        if let Some(due) = site_one_due {
            model
                .dimension_mut("T")
                .expect("registered")
                .set_max(RoutingPosition::new(0), due)
                .expect("non-empty");
        }
        model
    }

    #[test]
    fn test_local_search_applies_cheaper_reversal() {
        let manager = RoutingIndexManager::new(4, &[0], &[0]).expect("valid");
        let model = two_opt_model(&manager, None);
        let params = SearchParameters::default().with_local_search(true);

        assert_eq!(model.solve().expect("feasible").objective_value(), 103);
        let assignment = model.solve_with_parameters(&params).expect("feasible");
        let sites: Vec<usize> = assignment.route(0).iter().map(|&p| manager.site_of(p)).collect();
        assert_eq!(sites, vec![0, 3, 2, 1, 0]);
        assert_eq!(assignment.objective_value(), 5);
    }

    #[test]
    fn test_local_search_rejects_reversal_breaking_window() {
        // Site 1 must be reached by 15, i.e. first.
        let manager = RoutingIndexManager::new(4, &[0], &[0]).expect("valid");
        let model = two_opt_model(&manager, Some(15));
        let params = SearchParameters::default().with_local_search(true);

        let assignment = model.solve_with_parameters(&params).expect("feasible");
        let sites: Vec<usize> = assignment.route(0).iter().map(|&p| manager.site_of(p)).collect();
        assert_eq!(sites, vec![0, 1, 2, 3, 0]);
        assert_eq!(assignment.objective_value(), 103);
        assert_eq!(assignment.max("T", RoutingPosition::new(0)), Ok(15));
    }
}
