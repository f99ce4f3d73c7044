//! Vehicle type with start/end sites and an availability window.

use super::TimeWindow;

/// A visitor that leaves its start site and must reach its end site.
///
/// The availability window bounds the departure from the start
/// (`earliest_departure`) and the arrival at the end (`latest_return`).
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{TimeWindow, Vehicle};
///
/// let v = Vehicle::round_trip(0, TimeWindow::new(660, 1020).unwrap());
/// assert_eq!(v.start(), 0);
/// assert_eq!(v.end(), 0);
/// assert_eq!(v.earliest_departure(), 660);
/// assert_eq!(v.latest_return(), 1020);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    start: usize,
    end: usize,
    window: TimeWindow,
}

impl Vehicle {
    /// Creates a vehicle travelling from `start` to `end`.
    pub fn new(start: usize, end: usize, window: TimeWindow) -> Self {
        Self { start, end, window }
    }

    /// Creates a vehicle that starts and ends at the same site.
    pub fn round_trip(depot: usize, window: TimeWindow) -> Self {
        Self::new(depot, depot, window)
    }

    /// Start site index.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End site index.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Availability window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Earliest minute the vehicle may leave its start.
    pub fn earliest_departure(&self) -> i64 {
        self.window.open()
    }

    /// Latest minute the vehicle may reach its end.
    pub fn latest_return(&self) -> i64 {
        self.window.close()
    }
}
