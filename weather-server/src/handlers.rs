use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::Deserialize;
use weather_core::{Profile, WeatherError, WeatherReport};

use crate::{app::AppState, error::ApiError};

/// City used by `/weather` when the query string has none.
pub const DEFAULT_CITY: &str = "London";

/// Raw query pairs; repeated keys are allowed and the first `city` wins.
pub type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Deserialize)]
struct CityBody {
    city: Option<String>,
}

/// `/api/fetchWeather`, any method.
pub async fn fetch_weather(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
    body: Bytes,
) -> Result<Json<WeatherReport>, ApiError> {
    tracing::info!("Processing /api/fetchWeather request.");
    let profile = Profile::Function;

    let city = first_city(params)
        .filter(|c| !c.is_empty())
        .or_else(|| city_from_body(&body))
        .ok_or_else(|| ApiError::new(profile, WeatherError::MissingCity))?;

    let report = state
        .service
        .report(&city, profile)
        .await
        .map_err(|e| ApiError::new(profile, e))?;

    Ok(Json(report))
}

/// `/weather`, GET only.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<WeatherReport>, ApiError> {
    let profile = Profile::Server;
    let city = first_city(params).unwrap_or_else(|| DEFAULT_CITY.to_string());
    tracing::info!("Fetching weather data for: {city}");

    let report = state
        .service
        .report(&city, profile)
        .await
        .map_err(|e| ApiError::new(profile, e))?;

    tracing::info!("Weather data successfully fetched for {city}");
    Ok(Json(report))
}

fn first_city(params: QueryPairs) -> Option<String> {
    params.into_iter().find(|(key, _)| key == "city").map(|(_, value)| value)
}

fn city_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<CityBody>(body) {
        Ok(parsed) => parsed.city.filter(|c| !c.is_empty()),
        Err(e) => {
            tracing::debug!("request body is not a city object: {e}");
            None
        }
    }
}
