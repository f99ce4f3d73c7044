//! Path cheapest-arc construction with explicit backtracking.
//!
//! # Algorithm
//!
//! Vehicles are processed in ascending index order. Each route starts as
//! `start -> end`. While unvisited sites remain, the candidates are ranked
//! by arc cost from the route's current endpoint (ties: site name, then site
//! index). The cheapest candidate is tentatively spliced in before `end`
//! and the whole route is propagated from the declared bounds. If any
//! cumul collapses, that candidate is dropped and the next cheapest is
//! tried. When none fits, the vehicle closes its route and the remaining
//! sites pass to the next vehicle.
//!
//! Checking the closed route at every step means the return to `end`
//! (and the vehicle's latest return) is validated for each accepted
//! candidate, not only after the last one.
//!
//! There is no improvement phase here: the result is feasible, not optimal.
//!
//! # Complexity
//!
//! O(n² · (n + log n)) per vehicle: each of n steps ranks up to n candidates
//! and may propagate a route of length n for each of them.

use log::{debug, warn};

use crate::error::{RoutingError, UnfeasibleCause};
use crate::routing::{RoutingModel, RoutingPosition, SearchParameters};

/// Builds one route per vehicle with the path cheapest-arc strategy.
///
/// Returns the routes, start and end included, indexed by vehicle.
///
/// Fails with [`RoutingError::UnfeasibleProblem`] if a vehicle cannot even
/// travel from its start to its end, if sites are left once every vehicle
/// has closed its route, or if `params.max_construction_steps` is exceeded.
///
/// # Examples
///
/// ```
/// use u_vrptw::constructive::path_cheapest_arc;
/// use u_vrptw::routing::{RoutingIndexManager, RoutingModel, RoutingPosition, SearchParameters};
///
/// let manager = RoutingIndexManager::new(4, &[0], &[0]).unwrap();
/// let mut model = RoutingModel::new(&manager);
/// // Cost grows with the target site, so visits come out in site order.
/// let by_site = move |_: RoutingPosition, to: RoutingPosition| to.index() as i64;
/// let transit = model.register_transit(by_site);
/// model.set_arc_cost_evaluator_of_all_vehicles(transit).unwrap();
///
/// let routes = path_cheapest_arc(&model, &SearchParameters::default()).unwrap();
/// let sites: Vec<usize> = routes[0].iter().map(|&p| manager.site_of(p)).collect();
/// assert_eq!(sites, vec![0, 1, 2, 3, 0]);
/// ```
pub fn path_cheapest_arc(
    model: &RoutingModel<'_>,
    params: &SearchParameters,
) -> Result<Vec<Vec<RoutingPosition>>, RoutingError> {
    let manager = model.manager();
    let mut unvisited: Vec<RoutingPosition> = manager.visits().collect();
    let mut routes = Vec::with_capacity(manager.num_vehicles());
    let mut steps = 0usize;

    for vehicle in 0..manager.num_vehicles() {
        let mut route = vec![manager.start(vehicle), manager.end(vehicle)];
        if let Err(infeasible) = model.check_route(&route) {
            warn!("vehicle {vehicle} cannot reach its end: {infeasible}");
            return Err(UnfeasibleCause::VehicleWindow { vehicle }.into());
        }

        while !unvisited.is_empty() {
            let tail = route[route.len() - 2];
            let mut accepted = None;

            for candidate in rank_candidates(model, tail, &unvisited) {
                steps += 1;
                if let Some(limit) = params.max_construction_steps {
                    if steps > limit {
                        warn!("construction step limit {limit} reached on vehicle {vehicle}");
                        return Err(UnfeasibleCause::StepLimit { vehicle, limit }.into());
                    }
                }

                let slot = route.len() - 1;
                route.insert(slot, candidate);
                match model.check_route(&route) {
                    Ok(()) => {
                        debug!("vehicle {vehicle}: {tail} -> {candidate} accepted");
                        accepted = Some(candidate);
                        break;
                    }
                    Err(infeasible) => {
                        debug!("vehicle {vehicle}: {tail} -> {candidate} rejected, {infeasible}");
                        route.remove(slot);
                    }
                }
            }

            match accepted {
                Some(position) => unvisited.retain(|&p| p != position),
                None => {
                    debug!(
                        "vehicle {vehicle} closes after {} visit(s), {} left",
                        route.len() - 2,
                        unvisited.len()
                    );
                    break;
                }
            }
        }

        routes.push(route);
    }

    if !unvisited.is_empty() {
        let sites: Vec<String> = unvisited
            .iter()
            .map(|&p| site_label(model, manager.site_of(p)))
            .collect();
        warn!("{} site(s) left unserved", sites.len());
        return Err(UnfeasibleCause::Unserved { sites }.into());
    }

    Ok(routes)
}

/// Orders candidates by arc cost from `tail`, then name, then site index.
fn rank_candidates(
    model: &RoutingModel<'_>,
    tail: RoutingPosition,
    unvisited: &[RoutingPosition],
) -> Vec<RoutingPosition> {
    let manager = model.manager();
    let mut ranked: Vec<(i64, &str, usize, RoutingPosition)> = unvisited
        .iter()
        .map(|&p| {
            let site = manager.site_of(p);
            (model.arc_cost(tail, p), model.site_name(site), site, p)
        })
        .collect();
    ranked.sort_unstable();
    ranked.into_iter().map(|(.., p)| p).collect()
}

fn site_label(model: &RoutingModel<'_>, site: usize) -> String {
    match model.site_name(site) {
        "" => format!("site {site}"),
        name => name.to_string(),
    }
}
