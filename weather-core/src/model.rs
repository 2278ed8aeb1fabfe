use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// What the user asked to look up.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

/// Coarse weather category reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Rain,
    Snow,
    Clouds,
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::Clear => "Clear",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Clouds => "Clouds",
            Condition::Other(keyword) => keyword,
        }
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        match value {
            "Clear" => Condition::Clear,
            "Rain" => Condition::Rain,
            "Snow" => Condition::Snow,
            "Clouds" => Condition::Clouds,
            other => Condition::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::from(value.as_str())
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub condition: Condition,
    pub icon: String,
    pub place: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl CurrentConditions {
    /// Temperature as shown to the user.
    pub fn display_temperature(&self) -> i64 {
        round_celsius(self.temperature_c)
    }
}

/// One day sampled from the 3-hour forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: Condition,
    pub icon: String,
}

/// Rounds half-way values toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_celsius(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
