//! Per-vehicle itinerary read back from an assignment.

use serde::{Deserialize, Serialize};

/// One stop of an itinerary: a site and its feasible arrival interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Site index in the location graph.
    pub site: usize,
    /// Site name.
    pub name: String,
    /// Earliest feasible arrival (minutes).
    pub earliest: i64,
    /// Latest feasible arrival (minutes).
    pub latest: i64,
}

/// Ordered stops of one vehicle, from its start to its end.
///
/// The first stop is the vehicle's start and the last its end; everything in
/// between is a visited site.
///
/// # Examples
///
/// ```
/// use u_vrptw::solution::{Itinerary, Stop};
///
/// let stop = |site, name: &str, earliest, latest| Stop {
///     site,
///     name: name.to_string(),
///     earliest,
///     latest,
/// };
/// let itinerary = Itinerary::new(0, vec![
///     stop(0, "DEPOT", 660, 700),
///     stop(1, "A", 670, 710),
///     stop(0, "DEPOT", 720, 760),
/// ]);
/// assert_eq!(itinerary.visits().len(), 1);
/// assert_eq!(itinerary.start().map(|s| s.earliest), Some(660));
/// assert_eq!(itinerary.end().map(|s| s.latest), Some(760));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    vehicle: usize,
    stops: Vec<Stop>,
}

impl Itinerary {
    /// Creates an itinerary for `vehicle` from its ordered stops.
    pub fn new(vehicle: usize, stops: Vec<Stop>) -> Self {
        Self { vehicle, stops }
    }

    /// Vehicle index.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// All stops, start and end included.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The vehicle's start stop.
    pub fn start(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// The vehicle's end stop.
    pub fn end(&self) -> Option<&Stop> {
        if self.stops.len() < 2 {
            return None;
        }
        self.stops.last()
    }

    /// Visited sites, start and end excluded.
    pub fn visits(&self) -> &[Stop] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of stops, start and end included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if there are no stops at all.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns `true` if the vehicle visits at least one site.
    pub fn is_used(&self) -> bool {
        !self.visits().is_empty()
    }
}
