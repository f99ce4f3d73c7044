//! Mapping between sites and routing positions.

use std::fmt;

use crate::error::ConfigurationError;

/// An internal node of the successor graph.
///
/// Positions are dense indices: first one per visitable site, then one
/// start and one end position per vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutingPosition(usize);

impl RoutingPosition {
    /// Wraps a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into per-position arenas.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoutingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional mapping between site indices and routing positions.
///
/// Every site that is neither a start nor an end of some vehicle is a
/// *visit* and gets exactly one position, shared by the whole fleet. Each
/// vehicle additionally owns a private start and end position, so vehicles
/// sharing a depot never alias each other's positions.
///
/// A visit site therefore has a single position for the whole fleet and can
/// be served by at most one vehicle, once. Serving the same site from
/// several vehicles means listing it as several sites in the graph.
///
/// # Layout
///
/// ```text
/// 0 .. k            visits, in ascending site order
/// k .. k+m          vehicle starts
/// k+m .. k+2m       vehicle ends
/// ```
///
/// # Examples
///
/// ```
/// use u_vrptw::routing::RoutingIndexManager;
///
/// // 5 sites, 2 vehicles both based at site 0.
/// let manager = RoutingIndexManager::new(5, &[0, 0], &[0, 0]).unwrap();
/// assert_eq!(manager.num_positions(), 4 + 2 + 2);
/// assert_ne!(manager.start(0), manager.start(1));
/// assert_eq!(manager.site_of(manager.end(1)), 0);
/// assert!(manager.position_of(0).is_none());
/// assert_eq!(manager.site_of(manager.position_of(3).unwrap()), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingIndexManager {
    num_sites: usize,
    position_to_site: Vec<usize>,
    site_to_position: Vec<Option<RoutingPosition>>,
    num_visits: usize,
    num_vehicles: usize,
}

impl RoutingIndexManager {
    /// Creates the mapping for `num_sites` sites and a fleet given by its
    /// start and end site indices.
    pub fn new(
        num_sites: usize,
        starts: &[usize],
        ends: &[usize],
    ) -> Result<Self, ConfigurationError> {
        if starts.len() != ends.len() {
            return Err(ConfigurationError::LengthMismatch {
                what: "vehicle end list",
                expected: starts.len(),
                actual: ends.len(),
            });
        }
        if starts.is_empty() {
            return Err(ConfigurationError::NoVehicles);
        }
        if let Some(&index) = starts.iter().chain(ends).find(|&&s| s >= num_sites) {
            return Err(ConfigurationError::UnknownSite {
                index,
                count: num_sites,
            });
        }

        let mut is_boundary = vec![false; num_sites];
        for &site in starts.iter().chain(ends) {
            is_boundary[site] = true;
        }

        let mut position_to_site = Vec::with_capacity(num_sites + 2 * starts.len());
        let mut site_to_position = vec![None; num_sites];
        for site in (0..num_sites).filter(|&s| !is_boundary[s]) {
            site_to_position[site] = Some(RoutingPosition(position_to_site.len()));
            position_to_site.push(site);
        }
        let num_visits = position_to_site.len();
        position_to_site.extend_from_slice(starts);
        position_to_site.extend_from_slice(ends);

        Ok(Self {
            num_sites,
            position_to_site,
            site_to_position,
            num_visits,
            num_vehicles: starts.len(),
        })
    }

    /// Number of sites in the graph.
    pub fn num_sites(&self) -> usize {
        self.num_sites
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Total number of routing positions.
    pub fn num_positions(&self) -> usize {
        self.position_to_site.len()
    }

    /// Number of visit positions (excluding starts and ends).
    pub fn num_visits(&self) -> usize {
        self.num_visits
    }

    /// Site represented by `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` was not produced by this manager.
    pub fn site_of(&self, position: RoutingPosition) -> usize {
        self.position_to_site[position.0]
    }

    /// Visit position of `site`, or `None` for start/end sites and unknown
    /// indices.
    pub fn position_of(&self, site: usize) -> Option<RoutingPosition> {
        self.site_to_position.get(site).copied().flatten()
    }

    /// Start position of `vehicle`.
    pub fn start(&self, vehicle: usize) -> RoutingPosition {
        RoutingPosition(self.num_visits + vehicle)
    }

    /// End position of `vehicle`.
    pub fn end(&self, vehicle: usize) -> RoutingPosition {
        RoutingPosition(self.num_visits + self.num_vehicles + vehicle)
    }

    /// Returns `true` if `position` is some vehicle's start.
    pub fn is_start(&self, position: RoutingPosition) -> bool {
        (self.num_visits..self.num_visits + self.num_vehicles).contains(&position.0)
    }

    /// Returns `true` if `position` is some vehicle's end.
    pub fn is_end(&self, position: RoutingPosition) -> bool {
        position.0 >= self.num_visits + self.num_vehicles && position.0 < self.num_positions()
    }

    /// Visit positions in ascending order.
    pub fn visits(&self) -> impl Iterator<Item = RoutingPosition> + '_ {
        (0..self.num_visits).map(RoutingPosition)
    }

    /// Fails if `position` is outside this manager's range.
    pub fn check_position(&self, position: RoutingPosition) -> Result<(), ConfigurationError> {
        if position.0 < self.num_positions() {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownPosition(position.0))
        }
    }
}
