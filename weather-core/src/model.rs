use serde::Serialize;
use serde_json::Number;

/// Placeholder used for any current-conditions field the provider omitted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Resolved position of a city. Only lives for the duration of one lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A provider value, or the sentinel text shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading<T> {
    Value(T),
    Unavailable(&'static str),
}

impl<T> Reading<T> {
    pub fn or_sentinel(value: Option<T>, sentinel: &'static str) -> Self {
        match value {
            Some(v) => Reading::Value(v),
            None => Reading::Unavailable(sentinel),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: Reading<Number>,
    pub windspeed: Reading<Number>,
    pub weathercode: Reading<Number>,
    pub time: Reading<String>,
    pub humidity: Reading<Number>,
    pub pressure: Reading<Number>,
}

/// One forecast day. Values the provider reported as `null` stay `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastEntry {
    pub date: String,
    pub max_temp: Option<Number>,
    pub min_temp: Option<Number>,
    pub precipitation: Option<Number>,
    pub uv_index: Option<Number>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// The normalized answer returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecastEntry>,
}
