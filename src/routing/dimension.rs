//! Cumulative dimensions: bounded quantities accumulated along routes.
//!
//! # Propagation
//!
//! For every arc `u -> v` of a route with transit `t` and slack bound `s`:
//!
//! ```text
//! cumul(v) >= cumul(u) + t
//! cumul(v) <= cumul(u) + t + s
//! ```
//!
//! [`CumulativeDimension::propagate_path`] enforces these on the `[min, max]`
//! bounds with a forward sweep (tightening `min` downstream, and `max` when
//! slack is bounded) followed by a backward sweep (tightening `max`
//! upstream, and `min` when slack is bounded), repeated until nothing
//! changes or some position's bounds collapse.
//!
//! This is arc consistency over a single path only. Routes of different
//! vehicles share no cumul coupling in this model, so each route is swept
//! independently; it is not a general constraint network.

use super::{RoutingPosition, TransitEvaluator, TransitId};
use crate::error::Infeasible;

/// Bound value meaning "no limit".
pub const UNBOUNDED: i64 = i64::MAX;

/// The `[min, max]` bounds of one position in one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulVar {
    min: i64,
    max: i64,
}

impl CumulVar {
    /// Smallest admissible value.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Largest admissible value ([`UNBOUNDED`] if unconstrained).
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns `true` if `value` lies within the bounds.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns `true` if `other` is at least as tight as `self`.
    pub fn encloses(&self, other: &CumulVar) -> bool {
        other.min >= self.min && other.max <= self.max
    }
}

/// A named cumulative quantity (e.g. elapsed time) with one [`CumulVar`]
/// per routing position.
///
/// Bounds only ever tighten: `min` never decreases and `max` never
/// increases. A request that would leave `min > max` fails with
/// [`Infeasible`]; the dimension is then in a collapsed state and must be
/// discarded by the caller.
///
/// # Examples
///
/// ```
/// use u_vrptw::routing::{RoutingPosition, TransitId, CumulativeDimension, UNBOUNDED};
///
/// let p = |i| RoutingPosition::new(i);
/// let mut dim = CumulativeDimension::new("TotalTime", TransitId::new(0), 3, UNBOUNDED, UNBOUNDED);
/// dim.set_min(p(0), 100).unwrap();
/// dim.set_max(p(2), 150).unwrap();
///
/// let ten = |_: RoutingPosition, _: RoutingPosition| 10_i64;
/// dim.propagate_path(&[p(0), p(1), p(2)], &ten).unwrap();
/// assert_eq!(dim.cumul(p(1)).min(), 110);
/// assert_eq!(dim.cumul(p(1)).max(), 140);
/// assert_eq!(dim.cumul(p(2)).min(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeDimension {
    name: String,
    transit: TransitId,
    slack_max: i64,
    capacity: i64,
    cumuls: Vec<CumulVar>,
}

impl CumulativeDimension {
    /// Creates a dimension whose every position starts at `[0, capacity]`.
    pub fn new(
        name: impl Into<String>,
        transit: TransitId,
        num_positions: usize,
        slack_max: i64,
        capacity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            transit,
            slack_max,
            capacity,
            cumuls: vec![
                CumulVar {
                    min: 0,
                    max: capacity
                };
                num_positions
            ],
        }
    }

    /// Dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transit evaluator accumulated by this dimension.
    pub fn transit(&self) -> TransitId {
        self.transit
    }

    /// Largest wait allowed between consecutive positions.
    pub fn slack_max(&self) -> i64 {
        self.slack_max
    }

    /// Global upper bound on every cumul.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Bounds at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn cumul(&self, position: RoutingPosition) -> CumulVar {
        self.cumuls[position.index()]
    }

    /// Bounds of every position, indexed by [`RoutingPosition::index`].
    pub fn cumuls(&self) -> &[CumulVar] {
        &self.cumuls
    }

    /// Raises the minimum at `position` to `value`.
    ///
    /// Returns whether the bound changed. A value below the current minimum
    /// is a no-op.
    pub fn set_min(&mut self, position: RoutingPosition, value: i64) -> Result<bool, Infeasible> {
        let var = &mut self.cumuls[position.index()];
        if value <= var.min {
            return Ok(false);
        }
        var.min = value;
        check(position, *var)?;
        Ok(true)
    }

    /// Lowers the maximum at `position` to `value`.
    ///
    /// Returns whether the bound changed. A value above the current maximum
    /// is a no-op.
    pub fn set_max(&mut self, position: RoutingPosition, value: i64) -> Result<bool, Infeasible> {
        let var = &mut self.cumuls[position.index()];
        if value >= var.max {
            return Ok(false);
        }
        var.max = value;
        check(position, *var)?;
        Ok(true)
    }

    /// Pins `position` to `[0, 0]`.
    ///
    /// Only for a freshly built dimension, where every minimum is still 0
    /// and the capacity is non-negative, so the bounds cannot collapse.
    pub(crate) fn pin_to_zero(&mut self, position: RoutingPosition) {
        let var = &mut self.cumuls[position.index()];
        debug_assert_eq!(var.min, 0);
        var.max = 0;
    }

    /// Intersects the bounds at `position` with `[min, max]`.
    pub fn set_range(
        &mut self,
        position: RoutingPosition,
        min: i64,
        max: i64,
    ) -> Result<(), Infeasible> {
        self.set_min(position, min)?;
        self.set_max(position, max)?;
        Ok(())
    }

    /// Sweeps `path` forward and backward until a fixed point.
    ///
    /// Returns the number of passes made. Fails as soon as any position's
    /// bounds collapse.
    pub fn propagate_path(
        &mut self,
        path: &[RoutingPosition],
        transit: &dyn TransitEvaluator,
    ) -> Result<usize, Infeasible> {
        let transits: Vec<i64> = path
            .windows(2)
            .map(|arc| transit.transit(arc[0], arc[1]))
            .collect();

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;
            for (arc, &t) in path.windows(2).zip(&transits) {
                changed |= self.tighten_forward(arc[0], arc[1], t)?;
            }
            for (arc, &t) in path.windows(2).zip(&transits).rev() {
                changed |= self.tighten_backward(arc[0], arc[1], t)?;
            }
            if !changed {
                return Ok(passes);
            }
        }
    }

    fn tighten_forward(
        &mut self,
        from: RoutingPosition,
        to: RoutingPosition,
        transit: i64,
    ) -> Result<bool, Infeasible> {
        let source = self.cumul(from);
        let mut changed = self.set_min(to, shift(source.min, transit))?;
        if self.slack_max != UNBOUNDED {
            let latest = shift(shift(source.max, transit), self.slack_max);
            changed |= self.set_max(to, latest)?;
        }
        Ok(changed)
    }

    fn tighten_backward(
        &mut self,
        from: RoutingPosition,
        to: RoutingPosition,
        transit: i64,
    ) -> Result<bool, Infeasible> {
        let target = self.cumul(to);
        let mut changed = self.set_max(from, shift(target.max, transit.saturating_neg()))?;
        if self.slack_max != UNBOUNDED {
            let earliest = target.min.saturating_sub(transit).saturating_sub(self.slack_max);
            changed |= self.set_min(from, earliest)?;
        }
        Ok(changed)
    }
}

/// Adds `delta` to a bound, keeping [`UNBOUNDED`] unbounded.
fn shift(value: i64, delta: i64) -> i64 {
    if value == UNBOUNDED {
        UNBOUNDED
    } else {
        value.saturating_add(delta)
    }
}

fn check(position: RoutingPosition, var: CumulVar) -> Result<(), Infeasible> {
    if var.min > var.max {
        return Err(Infeasible {
            position: position.index(),
            min: var.min,
            max: var.max,
        });
    }
    Ok(())
}
