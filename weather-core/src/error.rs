use thiserror::Error;

/// Failure talking to one of the Open-Meteo endpoints.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl UpstreamError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, UpstreamError::Malformed(_))
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Missing 'city' parameter")]
    MissingCity,

    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("geocoding failed: {0}")]
    Geocoding(#[source] UpstreamError),

    #[error("forecast failed: {0}")]
    Forecast(#[source] UpstreamError),

    #[error("incomplete weather data: `{0}` section missing")]
    IncompleteForecast(&'static str),

    #[error("daily `{field}` has {actual} values, expected {expected}")]
    MisalignedForecast {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Coarse classification used to pick an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    NotFound,
    UpstreamUnavailable,
    UpstreamMalformed,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::MissingInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::UpstreamUnavailable | ErrorKind::UpstreamMalformed => 500,
        }
    }
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::MissingCity => ErrorKind::MissingInput,
            WeatherError::CityNotFound(_) => ErrorKind::NotFound,
            WeatherError::Geocoding(e) | WeatherError::Forecast(e) if e.is_malformed() => {
                ErrorKind::UpstreamMalformed
            }
            WeatherError::Geocoding(_) | WeatherError::Forecast(_) => {
                ErrorKind::UpstreamUnavailable
            }
            WeatherError::IncompleteForecast(_) | WeatherError::MisalignedForecast { .. } => {
                ErrorKind::UpstreamMalformed
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
