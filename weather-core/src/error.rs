use thiserror::Error;

/// Failures of the current-conditions and forecast requests.
///
/// The `Display` text is what the user sees, so keep it short.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found")]
    CityNotFound,

    #[error("Unable to fetch weather")]
    Unavailable,

    #[error("Forecast request failed with status {status}: {body}")]
    ForecastStatus { status: u16, body: String },

    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response from weather service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Weather service response is missing {0}")]
    MissingField(&'static str),
}

/// Failures of the "use my location" action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation not supported on this system.")]
    Unavailable,

    #[error("Unable to get location: {0}")]
    Failed(String),
}
