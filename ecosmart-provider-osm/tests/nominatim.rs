//! Integration tests for `NominatimGeocoder` using wiremock HTTP mocks.

use std::collections::HashMap;
use std::env::VarError;

use ecosmart_core::{BoundingBox, GeocodePort, LocatorConfig, PortError, build_config};
use ecosmart_provider_osm::NominatimGeocoder;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "ecosmart-tests/0.1";

fn test_config(server: &MockServer) -> LocatorConfig {
    let vars = HashMap::from([
        ("ECOSMART_NOMINATIM_URL", format!("{}/search", server.uri())),
        ("ECOSMART_USER_AGENT", TEST_AGENT.to_owned()),
    ]);
    build_config(|key| vars.get(key).cloned().ok_or(VarError::NotPresent))
        .expect("test config should be valid")
}

fn test_geocoder(server: &MockServer) -> NominatimGeocoder {
    let config = test_config(server);
    let client = ecosmart_provider_osm::client(&config).expect("client construction should not fail");
    NominatimGeocoder::new(client, config.nominatim_url, config.user_agent)
}

#[tokio::test]
async fn geocode_returns_first_match_with_bounding_box() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "place_id": 2_997_563,
            "lat": "39.7990175",
            "lon": "-89.6439575",
            "display_name": "Springfield, Sangamon County, Illinois, United States",
            "boundingbox": ["39.6563587", "39.8733376", "-89.7730637", "-89.5637280"]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Springfield"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header_exists("accept-language"))
        .and(header("user-agent", TEST_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let location = test_geocoder(&server)
        .geocode("Springfield")
        .await
        .expect("geocode should succeed")
        .expect("place should be found");

    assert!((location.latitude - 39.799_017_5).abs() < 1e-9);
    assert!((location.longitude + 89.643_957_5).abs() < 1e-9);
    assert_eq!(
        location.display_name,
        "Springfield, Sangamon County, Illinois, United States"
    );
    assert_eq!(
        location.bounding_box,
        Some(BoundingBox::new(
            39.656_358_7,
            39.873_337_6,
            -89.773_063_7,
            -89.563_728
        ))
    );
}

#[tokio::test]
async fn geocode_without_bounding_box_still_matches() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "lat": "39.8", "lon": "-89.6", "display_name": "Springfield, IL, USA" }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let location = test_geocoder(&server)
        .geocode("Springfield")
        .await
        .expect("geocode should succeed")
        .expect("place should be found");

    assert_eq!(location.display_name, "Springfield, IL, USA");
    assert_eq!(location.bounding_box, None);
}

#[tokio::test]
async fn geocode_with_no_matches_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = test_geocoder(&server)
        .geocode("nowhere")
        .await
        .expect("zero matches is not an error");

    assert_eq!(result, None);
}

#[tokio::test]
async fn blank_place_skips_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_geocoder(&server)
        .geocode("   ")
        .await
        .expect("blank input is not an error");

    assert_eq!(result, None);
}

#[tokio::test]
async fn server_error_is_geocoding_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_geocoder(&server).geocode("Springfield").await;

    assert!(
        matches!(result, Err(PortError::GeocodingFailure(_))),
        "expected GeocodingFailure, got {result:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_geocoding_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let result = test_geocoder(&server).geocode("Springfield").await;

    assert!(
        matches!(result, Err(PortError::GeocodingFailure(_))),
        "expected GeocodingFailure, got {result:?}"
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_geocoding_failure() {
    let vars = HashMap::from([("ECOSMART_NOMINATIM_URL", "http://127.0.0.1:1/search".to_owned())]);
    let config = build_config(|key| vars.get(key).cloned().ok_or(VarError::NotPresent))
        .expect("test config should be valid");
    let client =
        ecosmart_provider_osm::client(&config).expect("client construction should not fail");
    let geocoder = NominatimGeocoder::new(client, config.nominatim_url, config.user_agent);

    let result = geocoder.geocode("Springfield").await;

    assert!(
        matches!(result, Err(PortError::GeocodingFailure(_))),
        "expected GeocodingFailure, got {result:?}"
    );
}
