//! Immutable location graph.

use super::{Site, Vehicle};
use crate::distance::TravelMatrix;
use crate::error::ConfigurationError;

/// Sites, pairwise travel times and dwell times for one problem instance.
///
/// Built once from validated input and never mutated. Index `i` in
/// [`sites`](Self::sites) is row and column `i` of the travel matrix.
///
/// # Examples
///
/// ```
/// use u_vrptw::distance::TravelMatrix;
/// use u_vrptw::models::{LocationGraph, Site, TimeWindow};
///
/// let tw = TimeWindow::new(540, 1080).unwrap();
/// let sites = vec![Site::depot("DEPOT"), Site::new("A", tw, 30)];
/// let travel = TravelMatrix::from_rows(vec![vec![0, 10], vec![12, 0]]).unwrap();
///
/// let graph = LocationGraph::new(sites, travel).unwrap();
/// assert_eq!(graph.num_sites(), 2);
/// assert_eq!(graph.dwell(1), 30);
/// assert_eq!(graph.travel(1, 0), 12);
/// ```
#[derive(Debug, Clone)]
pub struct LocationGraph {
    sites: Vec<Site>,
    travel: TravelMatrix,
}

impl LocationGraph {
    /// Creates a graph, checking that the matrix covers every site and that
    /// no dwell is negative.
    pub fn new(sites: Vec<Site>, travel: TravelMatrix) -> Result<Self, ConfigurationError> {
        if travel.size() != sites.len() {
            return Err(ConfigurationError::LengthMismatch {
                what: "travel matrix",
                expected: sites.len(),
                actual: travel.size(),
            });
        }
        if let Some(site) = sites.iter().find(|s| s.dwell() < 0) {
            return Err(ConfigurationError::NegativeDuration {
                what: format!("dwell at {}", site.name()),
                value: site.dwell(),
            });
        }
        Ok(Self { sites, travel })
    }

    /// All sites in index order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The site at `index`, if it exists.
    pub fn site(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Number of sites.
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Site name at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn name(&self, index: usize) -> &str {
        self.sites[index].name()
    }

    /// Dwell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn dwell(&self, index: usize) -> i64 {
        self.sites[index].dwell()
    }

    /// Travel time between two sites.
    pub fn travel(&self, from: usize, to: usize) -> i64 {
        self.travel.get(from, to)
    }

    /// The underlying travel matrix.
    pub fn travel_matrix(&self) -> &TravelMatrix {
        &self.travel
    }

    /// Fails with [`ConfigurationError::UnknownSite`] if `index` is not a site.
    pub fn check_site(&self, index: usize) -> Result<(), ConfigurationError> {
        if index < self.sites.len() {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownSite {
                index,
                count: self.sites.len(),
            })
        }
    }

    /// Checks that every vehicle starts and ends at a known site.
    pub fn check_fleet(&self, vehicles: &[Vehicle]) -> Result<(), ConfigurationError> {
        if vehicles.is_empty() {
            return Err(ConfigurationError::NoVehicles);
        }
        for vehicle in vehicles {
            self.check_site(vehicle.start())?;
            self.check_site(vehicle.end())?;
        }
        Ok(())
    }
}
