//! Travel time matrices.
//!
//! Provides a dense, possibly asymmetric, integer-minute matrix.

mod matrix;

pub use matrix::TravelMatrix;
