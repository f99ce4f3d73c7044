//! Local search for improving constructed routes.
//!
//! - [`two_opt_tw`] — Intra-route 2-opt that rejects window-violating reversals

mod two_opt;

pub use two_opt::{route_cost, two_opt_tw};
