//! Core library for the `weather-server` service.
//!
//! This crate defines:
//! - Configuration handling
//! - Open-Meteo geocoding and forecast clients behind small traits
//! - The normalized report model and its error taxonomy
//! - [`WeatherService`], the request pipeline used by every route
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod profile;
pub mod provider;
pub mod service;

pub use config::{Config, ProvidersConfig, ServerConfig};
pub use error::{ErrorKind, UpstreamError, WeatherError};
pub use model::{Coordinate, CurrentConditions, DailyForecastEntry, Reading, WeatherReport};
pub use profile::Profile;
pub use provider::{ForecastSource, Geocoder};
pub use service::WeatherService;
