use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    forecast::{ForecastSlot, daily_at_noon},
    model::{Condition, Coordinates, CurrentConditions, ForecastDay, Query},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Icon image for a provider icon id, e.g. `04d`.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sends a metric GET to `endpoint` and returns the status and body text.
    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<(reqwest::StatusCode, String), WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, ?params, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        Ok((status, body))
    }

    async fn fetch_current(&self, query: &Query) -> Result<CurrentConditions, WeatherError> {
        let params = match query {
            Query::City(name) => vec![("q", name.clone())],
            Query::Coordinates(c) => coordinate_params(*c),
        };

        let (status, body) = self.get("weather", &params).await?;

        if !status.is_success() {
            tracing::debug!(
                %status,
                body = %truncate_body(&body),
                "OpenWeather current request failed"
            );
            return Err(match query {
                Query::City(_) => WeatherError::CityNotFound,
                Query::Coordinates(_) => WeatherError::Unavailable,
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.into_conditions()
    }

    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastDay>, WeatherError> {
        let (status, body) = self.get("forecast", &coordinate_params(coordinates)).await?;

        if !status.is_success() {
            return Err(WeatherError::ForecastStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        tracing::debug!(slots = parsed.list.len(), "OpenWeather forecast received");

        let slots = parsed.list.into_iter().map(|entry| {
            let (condition, icon) = entry
                .weather
                .into_iter()
                .next()
                .map(|w| (Condition::from(w.main), w.icon))
                .unwrap_or_else(|| (Condition::Other("Unknown".to_string()), String::new()));

            ForecastSlot {
                dt: entry.dt,
                label: entry.dt_txt,
                temp_min_c: entry.main.temp_min,
                temp_max_c: entry.main.temp_max,
                condition,
                icon,
            }
        });

        Ok(daily_at_noon(slots))
    }
}

fn coordinate_params(c: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: Option<OwCoord>,
    #[serde(default)]
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_conditions(self) -> Result<CurrentConditions, WeatherError> {
        let coord = self.coord.ok_or(WeatherError::MissingField("coord"))?;
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingField("weather"))?;

        Ok(CurrentConditions {
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            description: weather.description,
            condition: Condition::from(weather.main),
            icon: weather.icon,
            place: self.name,
            country: self.sys.country.unwrap_or_default(),
            coordinates: Coordinates::new(coord.lat, coord.lon),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(query).await
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastDay>, WeatherError> {
        self.fetch_forecast(coordinates).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
