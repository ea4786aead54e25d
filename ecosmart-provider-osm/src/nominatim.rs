//! Geocoder backed by the Nominatim `/search` endpoint.

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use ecosmart_core::{
    model::{BoundingBox, GeocodedLocation},
    ports::{FetchError, GeocodePort, PortError},
};

use crate::fetch_json;

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Single match from /search?format=json
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,

    // [south, north, west, east] as decimal strings
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
}

/// Geocoder implementation for Nominatim.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    /// Create a geocoder that queries `endpoint` with the given HTTP client.
    #[must_use]
    pub fn new(client: Client, endpoint: Url, user_agent: String) -> Self {
        Self {
            client,
            endpoint,
            user_agent,
        }
    }
}

#[async_trait]
impl GeocodePort for NominatimGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<GeocodedLocation>, PortError> {
        let place = place.trim();
        if place.is_empty() {
            return Ok(None);
        }

        debug!(place, "querying nominatim");

        let req = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .header(USER_AGENT, self.user_agent.as_str());

        let places = fetch_json::<Vec<Place>>(req)
            .await
            .map_err(PortError::GeocodingFailure)?;

        let Some(first) = places.into_iter().next() else {
            return Ok(None);
        };

        into_location(first)
            .map(Some)
            .map_err(PortError::GeocodingFailure)
    }
}

fn into_location(place: Place) -> Result<GeocodedLocation, FetchError> {
    let latitude = parse_degrees("lat", &place.lat)?;
    let longitude = parse_degrees("lon", &place.lon)?;

    let bounding_box = place.boundingbox.as_deref().and_then(|raw| {
        let parsed = parse_bounding_box(raw);
        if parsed.is_none() {
            warn!(?raw, "ignoring malformed bounding box");
        }
        parsed
    });

    Ok(GeocodedLocation {
        latitude,
        longitude,
        display_name: place.display_name,
        bounding_box,
    })
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, FetchError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FetchError::Malformed(format!("{field} is not a number: {raw:?}")))
}

fn parse_bounding_box(raw: &[String]) -> Option<BoundingBox> {
    let edges = raw
        .iter()
        .map(|edge| edge.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    match edges.as_slice() {
        &[south, north, west, east] => Some(BoundingBox::new(south, north, west, east)),
        _ => None,
    }
}
