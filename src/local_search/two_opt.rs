//! Intra-route 2-opt that keeps time windows satisfied.
//!
//! # Algorithm
//!
//! For each pair of interior positions `i < j`, reverse the segment
//! `route[i..=j]`. Because arc costs may be asymmetric, the reversed
//! segment's internal arcs change too, so the candidate route is costed in
//! full rather than by the classic four-arc delta. A reversal is kept when
//! it strictly lowers the cost *and* the caller's feasibility check accepts
//! the new route. Repeat until no reversal helps (first improvement).
//!
//! The route's first and last positions (vehicle start and end) never move.
//!
//! # Complexity
//!
//! O(n³) per pass with full re-costing, plus one feasibility check per
//! improving candidate.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::routing::RoutingPosition;

/// Applies window-preserving 2-opt to one route, start and end included.
///
/// `cost` gives the arc cost; `feasible` decides whether a candidate route
/// still satisfies every cumul bound. Returns the improved route and its
/// cost. The input route is assumed feasible and is returned unchanged if
/// no reversal helps.
///
/// # Examples
///
/// ```
/// use u_vrptw::local_search::two_opt_tw;
/// use u_vrptw::routing::RoutingPosition;
///
/// let p = RoutingPosition::new;
/// // Positions on a line; cost is the distance between indices.
/// let cost = |a: RoutingPosition, b: RoutingPosition| (a.index() as i64 - b.index() as i64).abs();
/// let (route, total) = two_opt_tw(&[p(0), p(3), p(2), p(1), p(4)], cost, |_| true);
/// assert_eq!(route, vec![p(0), p(1), p(2), p(3), p(4)]);
/// assert_eq!(total, 4);
/// ```
pub fn two_opt_tw<C, F>(
    route: &[RoutingPosition],
    cost: C,
    mut feasible: F,
) -> (Vec<RoutingPosition>, i64)
where
    C: Fn(RoutingPosition, RoutingPosition) -> i64,
    F: FnMut(&[RoutingPosition]) -> bool,
{
    let mut current = route.to_vec();
    let mut current_cost = route_cost(&current, &cost);
    if current.len() < 4 {
        return (current, current_cost);
    }

    let last_interior = current.len() - 2;
    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..last_interior {
            for j in i + 1..=last_interior {
                let mut candidate = current.clone();
                candidate[i..=j].reverse();
                let candidate_cost = route_cost(&candidate, &cost);
                if candidate_cost < current_cost && feasible(&candidate) {
                    current = candidate;
                    current_cost = candidate_cost;
                    improved = true;
                }
            }
        }
    }

    (current, current_cost)
}

/// Sum of arc costs along `route`, saturating at `i64::MAX`.
pub fn route_cost<C>(route: &[RoutingPosition], cost: C) -> i64
where
    C: Fn(RoutingPosition, RoutingPosition) -> i64,
{
    route
        .windows(2)
        .fold(0_i64, |acc, arc| acc.saturating_add(cost(arc[0], arc[1])))
}
