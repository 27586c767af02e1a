//! Store finder: geocodes a free-text location and lists nearby supermarkets
//! through the Google Maps web services.

pub mod handlers;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const SEARCH_RADIUS_METERS: u32 = 5000;
const PLACE_TYPE: &str = "supermarket";
const MAX_STORES: usize = 5;

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Maps API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("Location not found: {0}")]
    LocationNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStore {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct NearbyStores {
    pub location: LatLng,
    pub stores: Vec<NearbyStore>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: Option<String>,
    vicinity: Option<String>,
}

impl From<PlaceResult> for NearbyStore {
    fn from(place: PlaceResult) -> Self {
        Self {
            name: place.name.unwrap_or_else(|| "Unknown Store".to_string()),
            address: place
                .vicinity
                .unwrap_or_else(|| "Address not available".to_string()),
        }
    }
}

/// `OK` and `ZERO_RESULTS` are both successful answers.
fn check_status(status: String, error_message: Option<String>) -> Result<(), MapsError> {
    match status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(()),
        _ => Err(MapsError::Api {
            status,
            message: error_message.unwrap_or_default(),
        }),
    }
}

#[derive(Clone)]
pub struct MapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MapsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: DEFAULT_MAPS_BASE_URL.to_string(),
        }
    }

    /// Points the client at another Maps API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Coordinates of the best match for `address`, or `None` if there is none.
    pub async fn geocode(&self, address: &str) -> Result<Option<LatLng>, MapsError> {
        let response: GeocodeResponse = self
            .client
            .get(format!("{}/geocode/json", self.base_url))
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_status(response.status, response.error_message)?;
        Ok(response.results.into_iter().next().map(|r| r.geometry.location))
    }

    /// Up to five supermarkets within 5 km of `location`.
    pub async fn nearby_supermarkets(&self, location: LatLng) -> Result<Vec<NearbyStore>, MapsError> {
        let response: PlacesResponse = self
            .client
            .get(format!("{}/place/nearbysearch/json", self.base_url))
            .query(&[
                ("location", format!("{},{}", location.lat, location.lng)),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("type", PLACE_TYPE.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_status(response.status, response.error_message)?;
        debug!("Places search returned {} results", response.results.len());

        Ok(response
            .results
            .into_iter()
            .take(MAX_STORES)
            .map(NearbyStore::from)
            .collect())
    }

    /// Geocodes `address` and searches around it.
    pub async fn find_nearby_stores(&self, address: &str) -> Result<NearbyStores, MapsError> {
        let location = self
            .geocode(address)
            .await?
            .ok_or_else(|| MapsError::LocationNotFound(address.to_string()))?;
        info!("Geocoded '{}' to {},{}", address, location.lat, location.lng);

        let stores = self.nearby_supermarkets(location).await?;
        Ok(NearbyStores { location, stores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer) -> MapsClient {
        MapsClient::new("maps-key".to_string()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_find_nearby_stores_truncates_to_five() {
        let server = MockServer::start().await;
        mount_geocode(
            &server,
            json!({
                "status": "OK",
                "results": [{ "geometry": { "location": { "lat": 40.5, "lng": -74.25 } } }]
            }),
        )
        .await;

        let places: Vec<_> = (1..=7)
            .map(|i| json!({ "name": format!("Market {i}"), "vicinity": format!("{i} Main St") }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .and(query_param("location", "40.5,-74.25"))
            .and(query_param("radius", "5000"))
            .and(query_param("type", "supermarket"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "results": places })),
            )
            .mount(&server)
            .await;

        let found = client_for(&server).find_nearby_stores("Edison, NJ").await.unwrap();
        assert_eq!(found.location, LatLng { lat: 40.5, lng: -74.25 });
        assert_eq!(found.stores.len(), 5);
        assert_eq!(found.stores[0].name, "Market 1");
        assert_eq!(found.stores[4].address, "5 Main St");
    }

    #[tokio::test]
    async fn test_missing_place_fields_get_placeholders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "OK", "results": [{}] })),
            )
            .mount(&server)
            .await;

        let stores = client_for(&server)
            .nearby_supermarkets(LatLng { lat: 1.0, lng: 2.0 })
            .await
            .unwrap();
        assert_eq!(
            stores,
            vec![NearbyStore {
                name: "Unknown Store".to_string(),
                address: "Address not available".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let server = MockServer::start().await;
        mount_geocode(&server, json!({ "status": "ZERO_RESULTS", "results": [] })).await;

        let err = client_for(&server).find_nearby_stores("nowhere").await.unwrap_err();
        assert!(matches!(err, MapsError::LocationNotFound(ref l) if l == "nowhere"));
    }

    #[tokio::test]
    async fn test_denied_request_is_an_api_error() {
        let server = MockServer::start().await;
        mount_geocode(
            &server,
            json!({ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }),
        )
        .await;

        let err = client_for(&server).geocode("Paris").await.unwrap_err();
        match err {
            MapsError::Api { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
