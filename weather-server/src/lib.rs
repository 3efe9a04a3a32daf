//! HTTP surface of the weather lookup service.
//!
//! Two routes share one [`weather_core::WeatherService`]:
//! - `/api/fetchWeather`: city from the query string or a JSON body
//! - `/weather`: city from the query string, defaulting to London

pub mod app;
pub mod error;
pub mod handlers;

pub use app::{AppState, router, serve};
pub use error::ApiError;
