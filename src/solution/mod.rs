//! Solution read-back.
//!
//! - [`extract_itineraries`] — successor-chain walk producing one [`Itinerary`] per vehicle

mod extract;
mod itinerary;

pub use extract::extract_itineraries;
pub use itinerary::{Itinerary, Stop};
