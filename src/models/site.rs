//! Site and time window types.

use serde::{Deserialize, Serialize};

/// An opening window in minutes from a shared epoch.
///
/// Both ends are inclusive. A depot conventionally carries the zero-width
/// window `[0, 0]`.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(9 * 60, 18 * 60).unwrap();
/// assert!(tw.contains(12 * 60));
/// assert!(!tw.contains(19 * 60));
/// assert!(TimeWindow::new(600, 540).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    open: i64,
    close: i64,
}

impl TimeWindow {
    /// Creates a new window.
    ///
    /// Returns `None` if `open > close`.
    pub fn new(open: i64, close: i64) -> Option<Self> {
        if open > close {
            return None;
        }
        Some(Self { open, close })
    }

    /// The zero-width window `[0, 0]`.
    pub fn zero() -> Self {
        Self { open: 0, close: 0 }
    }

    /// Opening minute.
    pub fn open(&self) -> i64 {
        self.open
    }

    /// Closing minute.
    pub fn close(&self) -> i64 {
        self.close
    }

    /// Returns `true` if `minute` lies inside the window.
    pub fn contains(&self, minute: i64) -> bool {
        minute >= self.open && minute <= self.close
    }

    /// Width of the window in minutes.
    pub fn width(&self) -> i64 {
        self.close.saturating_sub(self.open)
    }
}

/// A fixed location to visit.
///
/// The dwell is the mandatory time spent on site. Because routing bounds
/// describe *arrival* times, the latest admissible arrival is
/// `close - dwell`.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Site, TimeWindow};
///
/// let site = Site::new("Obelisco", TimeWindow::new(540, 1080).unwrap(), 65);
/// assert_eq!(site.latest_arrival(), 1015);
///
/// let depot = Site::depot("DEPOT");
/// assert_eq!(depot.dwell(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    name: String,
    window: TimeWindow,
    dwell: i64,
}

impl Site {
    /// Creates a site with the given opening window and dwell.
    pub fn new(name: impl Into<String>, window: TimeWindow, dwell: i64) -> Self {
        Self {
            name: name.into(),
            window,
            dwell,
        }
    }

    /// Creates a depot: zero-width window and zero dwell.
    pub fn depot(name: impl Into<String>) -> Self {
        Self::new(name, TimeWindow::zero(), 0)
    }

    /// Site identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opening window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Mandatory on-site time.
    pub fn dwell(&self) -> i64 {
        self.dwell
    }

    /// Latest arrival that still lets the dwell finish before closing.
    pub fn latest_arrival(&self) -> i64 {
        self.window.close.saturating_sub(self.dwell)
    }
}
