use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use weather_core::{Profile, WeatherError};

/// A pipeline failure, worded for the route it happened on.
#[derive(Debug)]
pub struct ApiError {
    profile: Profile,
    error: WeatherError,
}

impl ApiError {
    pub fn new(profile: Profile, error: WeatherError) -> Self {
        Self { profile, error }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.profile.client_message(&self.error) });
        (self.status(), Json(body)).into_response()
    }
}
