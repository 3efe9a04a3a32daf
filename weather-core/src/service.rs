use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::Config,
    error::WeatherError,
    model::WeatherReport,
    normalize::build_report,
    profile::Profile,
    provider::{ForecastSource, Geocoder, OpenMeteoForecast, OpenMeteoGeocoder, http_client},
};

/// The geocode -> forecast -> normalize pipeline shared by every route.
#[derive(Debug, Clone)]
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastSource>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastSource>) -> Self {
        Self { geocoder, forecast }
    }

    /// Wire the Open-Meteo clients described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client(&config.providers).context("Failed to build HTTP client")?;

        Ok(Self::new(
            Arc::new(OpenMeteoGeocoder::new(&config.providers.geocoding_url, http.clone())),
            Arc::new(OpenMeteoForecast::new(&config.providers.forecast_url, http)),
        ))
    }

    pub async fn report(&self, city: &str, profile: Profile) -> Result<WeatherReport, WeatherError> {
        let coordinate = match self.geocoder.locate(city).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                tracing::warn!(city, "city not found in geocoding API");
                return Err(WeatherError::CityNotFound(city.to_string()));
            }
            Err(e) => {
                tracing::error!(city, error = %e, "geocoding error");
                return Err(WeatherError::Geocoding(e));
            }
        };

        let payload = self.forecast.fetch(coordinate).await.map_err(|e| {
            tracing::error!(city, error = %e, "weather API error");
            WeatherError::Forecast(e)
        })?;

        let report = build_report(city, payload, profile.humidity_sentinel()).inspect_err(|e| {
            tracing::error!(city, error = %e, "invalid weather data received from API");
        })?;

        if !report.current.humidity.is_available() {
            tracing::debug!(city, "no hourly humidity sample in forecast");
        }
        Ok(report)
    }
}
