use crate::{error::WeatherError, model::NOT_AVAILABLE};
use std::convert::TryFrom;

/// Which public surface a request came through. Each one words its errors
/// and its missing-humidity placeholder a little differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// `/api/fetchWeather`: city from query or JSON body.
    Function,
    /// `/weather`: city from query, defaulting to London.
    Server,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Function => "function",
            Profile::Server => "server",
        }
    }

    pub const fn all() -> &'static [Profile] {
        &[Profile::Function, Profile::Server]
    }

    pub fn humidity_sentinel(&self) -> &'static str {
        match self {
            Profile::Function => NOT_AVAILABLE,
            Profile::Server => "Data not available",
        }
    }

    /// Text placed in the `{"error": ...}` body sent back to the client.
    pub fn client_message(&self, err: &WeatherError) -> String {
        let text = match (self, err) {
            (_, WeatherError::MissingCity | WeatherError::CityNotFound(_)) => {
                return err.to_string();
            }
            (Profile::Function, WeatherError::Geocoding(_)) => "Failed to get coordinates",
            (Profile::Server, WeatherError::Geocoding(_)) => "Failed to fetch city coordinates",
            (Profile::Function, WeatherError::Forecast(_)) => "Failed to fetch weather",
            (Profile::Server, WeatherError::Forecast(_)) => "Weather API request failed",
            (
                Profile::Function,
                WeatherError::IncompleteForecast(_) | WeatherError::MisalignedForecast { .. },
            ) => "Incomplete weather data",
            (
                Profile::Server,
                WeatherError::IncompleteForecast(_) | WeatherError::MisalignedForecast { .. },
            ) => "Failed to fetch weather data",
        };
        text.to_string()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Profile {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Profile::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                let supported: Vec<_> = Profile::all().iter().map(Profile::as_str).collect();
                anyhow::anyhow!(
                    "Unknown profile '{value}'. Supported profiles: {}.",
                    supported.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;

    #[test]
    fn profile_as_str_roundtrip() {
        for p in Profile::all() {
            let parsed = Profile::try_from(p.as_str()).expect("roundtrip should succeed");
            assert_eq!(*p, parsed);
        }
        assert_eq!(Profile::try_from("SERVER").unwrap(), Profile::Server);
    }

    #[test]
    fn unknown_profile_error() {
        let err = Profile::try_from("lambda").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown profile 'lambda'. Supported profiles: function, server."
        );
    }

    #[test]
    fn humidity_sentinels_differ() {
        assert_eq!(Profile::Function.humidity_sentinel(), "N/A");
        assert_eq!(Profile::Server.humidity_sentinel(), "Data not available");
    }

    #[test]
    fn messages_follow_profile() {
        let status = || UpstreamError::Status { status: 502, body: String::new() };

        let geo = WeatherError::Geocoding(status());
        assert_eq!(Profile::Function.client_message(&geo), "Failed to get coordinates");
        assert_eq!(Profile::Server.client_message(&geo), "Failed to fetch city coordinates");

        let fc = WeatherError::Forecast(status());
        assert_eq!(Profile::Function.client_message(&fc), "Failed to fetch weather");
        assert_eq!(Profile::Server.client_message(&fc), "Weather API request failed");

        let incomplete = WeatherError::IncompleteForecast("daily");
        assert_eq!(Profile::Function.client_message(&incomplete), "Incomplete weather data");
        assert_eq!(Profile::Server.client_message(&incomplete), "Failed to fetch weather data");
    }

    #[test]
    fn shared_messages_are_identical() {
        for p in Profile::all() {
            assert_eq!(
                p.client_message(&WeatherError::MissingCity),
                "Missing 'city' parameter"
            );
            assert_eq!(
                p.client_message(&WeatherError::CityNotFound("Nowhere".into())),
                "City 'Nowhere' not found"
            );
        }
    }
}
