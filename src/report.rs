//! Plain-text rendering of itineraries.
//!
//! ```text
//! Start: 11:00 hs
//! [Bombonera, 11:00 hs, 13:02 hs]
//! End: 14:58 hs
//! ```
//!
//! Start and end lines show the earliest bound; intermediate stops show both.

use std::fmt;

use crate::routing::UNBOUNDED;
use crate::solution::{Itinerary, Stop};

/// Formats minutes since the epoch as `HH:MM hs`.
///
/// Hours are not wrapped at 24. [`UNBOUNDED`] renders as `--:-- hs`.
///
/// # Examples
///
/// ```
/// use u_vrptw::report::format_clock;
///
/// assert_eq!(format_clock(660), "11:00 hs");
/// assert_eq!(format_clock(782), "13:02 hs");
/// assert_eq!(format_clock(5), "00:05 hs");
/// ```
pub fn format_clock(minutes: i64) -> String {
    if minutes == UNBOUNDED {
        return "--:-- hs".to_string();
    }
    let sign = if minutes < 0 { "-" } else { "" };
    let m = minutes.unsigned_abs();
    format!("{sign}{:02}:{:02} hs", m / 60, m % 60)
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.name,
            format_clock(self.earliest),
            format_clock(self.latest)
        )
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(start), Some(end)) = (self.start(), self.end()) else {
            return Ok(());
        };
        writeln!(f, "Start: {}", format_clock(start.earliest))?;
        for stop in self.visits() {
            writeln!(f, "{stop}")?;
        }
        write!(f, "End: {}", format_clock(end.earliest))
    }
}

/// Renders every used itinerary, one block per vehicle.
///
/// Blocks are separated by a blank line and headed by `Vehicle <n>` when
/// more than one vehicle is used.
pub fn render(itineraries: &[Itinerary]) -> String {
    let used: Vec<&Itinerary> = itineraries.iter().filter(|it| it.is_used()).collect();
    let blocks: Vec<String> = used
        .iter()
        .map(|it| {
            if used.len() > 1 {
                format!("Vehicle {}\n{it}", it.vehicle())
            } else {
                it.to_string()
            }
        })
        .collect();
    blocks.join("\n\n")
}
