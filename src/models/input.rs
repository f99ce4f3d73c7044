//! Raw problem input as supplied by an outer layer.

use serde::{Deserialize, Serialize};

use super::{LocationGraph, Site, TimeWindow, Vehicle};
use crate::distance::TravelMatrix;
use crate::error::ConfigurationError;

/// One entry of the site list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInput {
    /// Site identifier.
    pub name: String,
    /// Opening minute.
    pub open: i64,
    /// Closing minute.
    pub close: i64,
}

/// One entry of the vehicle list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInput {
    /// Start site index.
    pub start: usize,
    /// End site index.
    pub end: usize,
    /// Earliest departure minute.
    pub earliest_departure: i64,
    /// Latest return minute.
    pub latest_return: i64,
}

/// Unvalidated problem description: site list, travel matrix, dwell list
/// aligned with the sites, and the fleet.
///
/// [`build`](Self::build) checks everything eagerly and turns the input into
/// a [`LocationGraph`] plus vehicles.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::ProblemInput;
///
/// let input = ProblemInput::from_json(r#"{
///     "sites": [
///         {"name": "DEPOT", "open": 0, "close": 0},
///         {"name": "A", "open": 540, "close": 1080}
///     ],
///     "travel_matrix": [[0, 10], [10, 0]],
///     "dwell": [0, 30],
///     "vehicles": [
///         {"start": 0, "end": 0, "earliest_departure": 600, "latest_return": 900}
///     ]
/// }"#).unwrap();
///
/// let (graph, vehicles) = input.build().unwrap();
/// assert_eq!(graph.num_sites(), 2);
/// assert_eq!(vehicles[0].latest_return(), 900);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInput {
    /// Ordered site list.
    pub sites: Vec<SiteInput>,
    /// n×n travel durations in minutes.
    pub travel_matrix: Vec<Vec<i64>>,
    /// Dwell durations aligned with `sites`.
    pub dwell: Vec<i64>,
    /// Fleet.
    pub vehicles: Vec<VehicleInput>,
}

impl ProblemInput {
    /// Decodes an input from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates the input and builds the immutable graph and fleet.
    pub fn build(&self) -> Result<(LocationGraph, Vec<Vehicle>), ConfigurationError> {
        if self.dwell.len() != self.sites.len() {
            return Err(ConfigurationError::LengthMismatch {
                what: "dwell list",
                expected: self.sites.len(),
                actual: self.dwell.len(),
            });
        }

        let sites = self
            .sites
            .iter()
            .zip(&self.dwell)
            .map(|(site, &dwell)| {
                let window = TimeWindow::new(site.open, site.close).ok_or_else(|| {
                    ConfigurationError::InvalidWindow {
                        owner: site.name.clone(),
                        open: site.open,
                        close: site.close,
                    }
                })?;
                Ok(Site::new(site.name.clone(), window, dwell))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        let travel = TravelMatrix::from_rows(self.travel_matrix.clone())?;
        let graph = LocationGraph::new(sites, travel)?;

        let vehicles = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let window = TimeWindow::new(v.earliest_departure, v.latest_return).ok_or_else(
                    || ConfigurationError::InvalidWindow {
                        owner: format!("vehicle {idx}"),
                        open: v.earliest_departure,
                        close: v.latest_return,
                    },
                )?;
                Ok(Vehicle::new(v.start, v.end, window))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;
        graph.check_fleet(&vehicles)?;

        Ok((graph, vehicles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProblemInput {
        ProblemInput {
            sites: vec![
                SiteInput {
                    name: "DEPOT".into(),
                    open: 0,
                    close: 0,
                },
                SiteInput {
                    name: "A".into(),
                    open: 540,
                    close: 1080,
                },
            ],
            travel_matrix: vec![vec![0, 4], vec![6, 0]],
            dwell: vec![0, 20],
            vehicles: vec![VehicleInput {
                start: 0,
                end: 0,
                earliest_departure: 600,
                latest_return: 700,
            }],
        }
    }

    #[test]
    fn test_build_valid() {
        let (graph, vehicles) = input().build().expect("valid");
        assert_eq!(graph.num_sites(), 2);
        assert_eq!(graph.dwell(1), 20);
        assert_eq!(graph.travel(1, 0), 6);
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].earliest_departure(), 600);
    }

    #[test]
    fn test_build_dwell_mismatch() {
        let mut bad = input();
        bad.dwell.push(5);
        assert_eq!(
            bad.build().expect_err("mismatch"),
            ConfigurationError::LengthMismatch {
                what: "dwell list",
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_build_negative_travel() {
        let mut bad = input();
        bad.travel_matrix[1][0] = -500;
        assert!(matches!(
            bad.build().expect_err("negative"),
            ConfigurationError::NegativeDuration { value: -500, .. }
        ));
    }

    #[test]
    fn test_build_unknown_vehicle_site() {
        let mut bad = input();
        bad.vehicles[0].end = 9;
        assert_eq!(
            bad.build().expect_err("unknown"),
            ConfigurationError::UnknownSite { index: 9, count: 2 }
        );
    }

    #[test]
    fn test_build_inverted_site_window() {
        let mut bad = input();
        bad.sites[1].close = 100;
        assert!(matches!(
            bad.build().expect_err("inverted"),
            ConfigurationError::InvalidWindow { ref owner, .. } if owner == "A"
        ));
    }

    #[test]
    fn test_build_inverted_vehicle_window() {
        let mut bad = input();
        bad.vehicles[0].latest_return = 10;
        assert!(matches!(
            bad.build().expect_err("inverted"),
            ConfigurationError::InvalidWindow { ref owner, .. } if owner == "vehicle 0"
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ProblemInput::from_json("{\"sites\": 3}").expect_err("malformed");
        assert!(matches!(err, ConfigurationError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let text = serde_json::to_string(&input()).expect("serialize");
        assert_eq!(ProblemInput::from_json(&text).expect("parse"), input());
    }
}
