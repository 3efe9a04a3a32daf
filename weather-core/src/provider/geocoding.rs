use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::UpstreamError, model::Coordinate};

use super::{Geocoder, get_json};

/// Open-Meteo place search, reduced to "first match wins".
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    results: Option<Vec<GeoMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn locate(&self, city: &str) -> Result<Option<Coordinate>, UpstreamError> {
        let request = self
            .http
            .get(&self.base_url)
            .query(&[("name", city), ("count", "1"), ("format", "json")]);

        let parsed: GeoSearchResponse = get_json(request).await?;

        let first = parsed.results.and_then(|r| r.into_iter().next());
        let coordinate = first.map(|m| Coordinate { latitude: m.latitude, longitude: m.longitude });

        tracing::debug!(city, ?coordinate, "geocoding lookup finished");
        Ok(coordinate)
    }
}
