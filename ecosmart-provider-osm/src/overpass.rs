//! Recycling center finder backed by the Overpass interpreter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use ecosmart_core::{
    config::FinderPolicy,
    geo::round_to_tenth,
    materials::format_material_name,
    model::{
        ADDRESS_UNAVAILABLE, CenterId, CenterSearch, Coordinate, RecyclingCenter,
        UNKNOWN_DISTANCE_KM, UNNAMED_CENTER,
    },
    ports::{CenterPort, PortError},
};

use crate::fetch_json;

const MATERIAL_PREFIX: &str = "recycling:";

// Each address part is looked up under its `addr:*` key first.
const ADDRESS_KEYS: [[&str; 2]; 4] = [
    ["addr:housenumber", "housenumber"],
    ["addr:street", "street"],
    ["addr:city", "city"],
    ["addr:postcode", "postcode"],
];

/// Response from /api/interpreter with `[out:json]`
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
    // "version", "generator" and "osm3s" are not needed
}

/// Single OSM element
#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: ElementKind,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,

    // computed by `out center` for ways and relations
    center: Option<Center>,

    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

/// Center search implementation for Overpass.
pub struct OverpassFinder {
    client: Client,
    endpoint: Url,
    user_agent: String,
    policy: FinderPolicy,
}

impl OverpassFinder {
    /// Create a finder that posts queries to `endpoint`.
    #[must_use]
    pub fn new(client: Client, endpoint: Url, user_agent: String, policy: FinderPolicy) -> Self {
        Self {
            client,
            endpoint,
            user_agent,
            policy,
        }
    }
}

#[async_trait]
impl CenterPort for OverpassFinder {
    async fn find_nearby(&self, search: &CenterSearch) -> Result<Vec<RecyclingCenter>, PortError> {
        let query = build_query(search, &self.policy);
        debug!(%query, "querying overpass");

        let req = self
            .client
            .post(self.endpoint.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .form(&[("data", query.as_str())]);

        let response = fetch_json::<OverpassResponse>(req)
            .await
            .map_err(PortError::CenterLookupFailure)?;

        let total = response.elements.len();
        let max_results = self.policy.max_results(search.bounding_box.is_some());
        let centers = rank(response.elements, search.origin, max_results);

        debug!(total, returned = centers.len(), "overpass elements ranked");
        Ok(centers)
    }
}

/// Overpass QL for recycling amenities in the search area.
fn build_query(search: &CenterSearch, policy: &FinderPolicy) -> String {
    let area = match search.bounding_box {
        Some(bbox) => format!("({},{},{},{})", bbox.south, bbox.west, bbox.north, bbox.east),
        None => format!(
            "(around:{},{},{})",
            policy.effective_radius(search.radius_meters),
            search.origin.latitude,
            search.origin.longitude
        ),
    };

    format!(
        "[out:json];\n\
         (\n\
         \x20 node[\"amenity\"=\"recycling\"]{area};\n\
         \x20 way[\"amenity\"=\"recycling\"]{area};\n\
         \x20 relation[\"amenity\"=\"recycling\"]{area};\n\
         );\n\
         out body center;\n"
    )
}

/// Turn raw elements into centers, nearest first, at most `max_results`.
fn rank(elements: Vec<Element>, origin: Coordinate, max_results: usize) -> Vec<RecyclingCenter> {
    let mut centers: Vec<RecyclingCenter> = elements
        .into_iter()
        .filter(|element| matches!(element.kind, ElementKind::Node | ElementKind::Way))
        .map(|element| to_center(element, origin))
        .collect();

    centers.sort_by(|left, right| left.distance_km.total_cmp(&right.distance_km));
    centers.truncate(max_results);
    centers
}

fn to_center(element: Element, origin: Coordinate) -> RecyclingCenter {
    let coordinate = match (element.lat, element.lon, element.center.as_ref()) {
        (Some(lat), Some(lon), _) => Some(Coordinate::new(lat, lon)),
        (_, _, Some(center)) => Some(Coordinate::new(center.lat, center.lon)),
        _ => None,
    };

    let distance_km = coordinate.map_or(UNKNOWN_DISTANCE_KM, |position| {
        round_to_tenth(origin.distance_km_to(&position))
    });

    let tags = element.tags;

    RecyclingCenter {
        id: CenterId(element.id.to_string()),
        name: tag(&tags, "name").unwrap_or_else(|| UNNAMED_CENTER.to_owned()),
        address: address(&tags),
        distance_km,
        coordinate,
        materials: materials(&tags),
        hours: tag(&tags, "opening_hours"),
        phone: tag(&tags, "phone").or_else(|| tag(&tags, "contact:phone")),
    }
}

fn tag(tags: &BTreeMap<String, String>, key: &str) -> Option<String> {
    tags.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn address(tags: &BTreeMap<String, String>) -> String {
    let parts: Vec<String> = ADDRESS_KEYS
        .iter()
        .filter_map(|keys| keys.iter().find_map(|key| tag(tags, key)))
        .collect();

    if parts.is_empty() {
        ADDRESS_UNAVAILABLE.to_owned()
    } else {
        parts.join(", ")
    }
}

fn materials(tags: &BTreeMap<String, String>) -> Option<Vec<String>> {
    let accepted: Vec<String> = tags
        .iter()
        .filter(|&(_, value)| value == "yes")
        .filter_map(|(key, _)| key.strip_prefix(MATERIAL_PREFIX))
        .map(format_material_name)
        .collect();

    (!accepted.is_empty()).then_some(accepted)
}
