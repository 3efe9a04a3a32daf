use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;

use crate::{error::UpstreamError, model::Coordinate};

use super::{ForecastSource, get_json};

/// Daily series requested from the forecast endpoint, in response order.
pub const DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "uv_index_max",
    "sunrise",
    "sunset",
];

pub const HOURLY_FIELDS: &[&str] = &["relative_humidity_2m"];

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }
}

/// Raw forecast body. Sections are optional so that their absence can be
/// reported as incomplete data instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<Number>,
    pub windspeed: Option<Number>,
    pub weathercode: Option<Number>,
    pub time: Option<String>,
    pub pressure: Option<Number>,
}

/// Parallel arrays; index `i` of each one describes `time[i]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailySeries {
    pub time: Option<Vec<String>>,
    pub temperature_2m_max: Vec<Option<Number>>,
    pub temperature_2m_min: Vec<Option<Number>>,
    pub precipitation_sum: Vec<Option<Number>>,
    pub uv_index_max: Vec<Option<Number>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub relative_humidity_2m: Option<Vec<Option<Number>>>,
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn fetch(&self, at: Coordinate) -> Result<ForecastPayload, UpstreamError> {
        let request = self.http.get(&self.base_url).query(&[
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("daily", DAILY_FIELDS.join(",")),
            ("hourly", HOURLY_FIELDS.join(",")),
            ("timezone", "auto".to_string()),
        ]);

        let payload: ForecastPayload = get_json(request).await?;

        tracing::debug!(
            latitude = at.latitude,
            longitude = at.longitude,
            days = payload.daily.as_ref().and_then(|d| d.time.as_ref()).map(Vec::len),
            "forecast fetched"
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keeps_number_representation() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{
                "current_weather": {"temperature": 17.4, "windspeed": 9.0, "weathercode": 3, "time": "2024-05-01T12:00"},
                "daily": {"time": ["2024-05-01"], "precipitation_sum": [null]}
            }"#,
        )
        .unwrap();

        let current = payload.current_weather.unwrap();
        assert_eq!(current.temperature.unwrap().to_string(), "17.4");
        assert_eq!(current.weathercode.unwrap().to_string(), "3");
        assert!(current.pressure.is_none());

        let daily = payload.daily.unwrap();
        assert_eq!(daily.time.as_deref(), Some(&["2024-05-01".to_string()][..]));
        assert_eq!(daily.precipitation_sum, vec![None]);
        assert!(daily.sunrise.is_empty());
        assert!(payload.hourly.is_none());
    }

    #[test]
    fn null_sections_count_as_absent() {
        let payload: ForecastPayload =
            serde_json::from_str(r#"{"current_weather": null, "daily": null}"#).unwrap();
        assert!(payload.current_weather.is_none());
        assert!(payload.daily.is_none());
    }
}
