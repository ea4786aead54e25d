//! Traits describing provider capabilities and shared error types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{CenterSearch, GeocodedLocation, RecyclingCenter};

#[derive(thiserror::Error, Debug)]
/// What went wrong while talking to a remote service.
pub enum FetchError {
    /// Transport failure, non-2xx status, or undecodable body.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The body decoded but did not contain usable data.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to provider backends.
pub enum PortError {
    /// The geocoding service could not be queried.
    #[error("Geocoding failed: {0}")]
    GeocodingFailure(#[source] FetchError),
    /// The recycling center service could not be queried.
    #[error("Recycling center lookup failed: {0}")]
    CenterLookupFailure(#[source] FetchError),
}

#[async_trait]
/// Trait for backends that resolve place names to coordinates.
pub trait GeocodePort: Send + Sync {
    /// Resolve `place` to its best match.
    ///
    /// Returns `Ok(None)` when the service knows no such place.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::GeocodingFailure`] when the request fails.
    async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, PortError>;
}

#[async_trait]
/// Trait for backends that list recycling facilities around a point.
pub trait CenterPort: Send + Sync {
    /// Find centers for `search`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CenterLookupFailure`] when the request fails.
    async fn find_nearby(&self, search: &CenterSearch) -> Result<Vec<RecyclingCenter>, PortError>;
}
