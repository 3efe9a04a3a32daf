use crate::{
    config::ProvidersConfig,
    error::UpstreamError,
    model::Coordinate,
    provider::forecast::ForecastPayload,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

const USER_AGENT: &str = concat!("weather-server/", env!("CARGO_PKG_VERSION"));

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the provider answered but knows no such place.
    async fn locate(&self, city: &str) -> Result<Option<Coordinate>, UpstreamError>;
}

/// Fetches current conditions and the daily forecast for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, at: Coordinate) -> Result<ForecastPayload, UpstreamError>;
}

/// Build the shared HTTP client used by both Open-Meteo endpoints.
pub fn http_client(config: &ProvidersConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Send `request` and decode a successful JSON body.
async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, UpstreamError> {
    let res = request.send().await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
