//! Provider implementation backed by OpenStreetMap's Nominatim and Overpass APIs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use ecosmart_core::{
    config::LocatorConfig,
    plugin::{LocatorPlugin, ProviderMeta},
    ports::FetchError,
};

/// Place name lookups through Nominatim.
pub mod nominatim;
/// Recycling amenity queries through Overpass.
pub mod overpass;

pub use nominatim::NominatimGeocoder;
pub use overpass::OverpassFinder;

/// Build the HTTP client shared by both ports.
///
/// # Errors
///
/// Returns a [`reqwest::Error`] if the TLS backend cannot be initialised.
pub fn client(config: &LocatorConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Build the plugin bundle for the OpenStreetMap provider.
#[must_use]
pub fn plugin(client: Client, config: &LocatorConfig) -> LocatorPlugin {
    let geocoder = Arc::new(NominatimGeocoder::new(
        client.clone(),
        config.nominatim_url.clone(),
        config.user_agent.clone(),
    ));
    let finder = Arc::new(OverpassFinder::new(
        client,
        config.overpass_url.clone(),
        config.user_agent.clone(),
        config.finder,
    ));

    LocatorPlugin {
        meta: provider_meta(),
        geocoder,
        finder,
    }
}

fn provider_meta() -> ProviderMeta {
    ProviderMeta {
        id: String::from("osm"),
        name: String::from("OpenStreetMap (Nominatim + Overpass)"),
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, FetchError> {
    req.send()
        .await
        .map_err(FetchError::from)?
        .error_for_status()
        .map_err(FetchError::from)?
        .json()
        .await
        .map_err(FetchError::from)
}
