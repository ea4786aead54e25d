//! Domain data structures for geocoded places and recycling centers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distance assigned to centers whose position is unknown, so they rank last.
pub const UNKNOWN_DISTANCE_KM: f64 = 999.0;

/// Address shown when a facility carries no address tags.
pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";

/// Name shown when a facility carries no `name` tag.
pub const UNNAMED_CENTER: &str = "Unnamed Recycling Center";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A WGS84 position in decimal degrees.
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Region spanned by a geocoded place, in Nominatim's `[south, north, west, east]` order.
pub struct BoundingBox {
    /// Southern latitude edge.
    pub south: f64,
    /// Northern latitude edge.
    pub north: f64,
    /// Western longitude edge.
    pub west: f64,
    /// Eastern longitude edge.
    pub east: f64,
}

impl BoundingBox {
    /// Build a box from its four edges.
    #[must_use]
    pub const fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of resolving a free-text place name.
pub struct GeocodedLocation {
    /// Latitude of the matched place.
    pub latitude: f64,
    /// Longitude of the matched place.
    pub longitude: f64,
    /// Human-readable name reported by the geocoder.
    pub display_name: String,
    /// Extent of the matched place, when the geocoder reports one.
    pub bounding_box: Option<BoundingBox>,
}

impl GeocodedLocation {
    /// Position of the matched place.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Stable external identifier of a recycling facility.
pub struct CenterId(pub String);

impl fmt::Display for CenterId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Recycling facility found near a search origin.
pub struct RecyclingCenter {
    /// External identifier of the facility.
    pub id: CenterId,
    /// Facility name.
    pub name: String,
    /// Comma-separated address, or [`ADDRESS_UNAVAILABLE`].
    pub address: String,
    /// Distance from the search origin, rounded to one decimal.
    pub distance_km: f64,
    /// Representative position; `None` when the provider returned no geometry.
    pub coordinate: Option<Coordinate>,
    /// Human-formatted accepted materials; `None` when unknown.
    pub materials: Option<Vec<String>>,
    /// Opening hours as published by the facility.
    pub hours: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Default search radius around a point, in metres.
pub const DEFAULT_RADIUS_METERS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Parameters for a recycling center search.
pub struct CenterSearch {
    /// Point distances are measured from.
    pub origin: Coordinate,
    /// Radius used when no bounding box is given.
    pub radius_meters: u32,
    /// Region to search instead of a radius.
    pub bounding_box: Option<BoundingBox>,
}

impl CenterSearch {
    /// Search around `(latitude, longitude)` with the default radius.
    #[must_use]
    pub const fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            origin: Coordinate::new(latitude, longitude),
            radius_meters: DEFAULT_RADIUS_METERS,
            bounding_box: None,
        }
    }

    /// Search around a geocoded place, using its bounding box when present.
    #[must_use]
    pub fn for_location(location: &GeocodedLocation, radius_meters: u32) -> Self {
        Self {
            origin: location.coordinate(),
            radius_meters,
            bounding_box: location.bounding_box,
        }
    }

    /// Replace the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Restrict the search to a bounding box.
    #[must_use]
    pub const fn within(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of searching by place name.
pub enum LocatorOutcome {
    /// The geocoder had no match for the place name.
    NotFound,
    /// The place was resolved; `centers` may still be empty.
    Found {
        /// Resolved place.
        location: GeocodedLocation,
        /// Matching centers, nearest first.
        centers: Vec<RecyclingCenter>,
    },
}
