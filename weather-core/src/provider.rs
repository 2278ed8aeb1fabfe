use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, CurrentConditions, ForecastDay, Query},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the daily forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<CurrentConditions, WeatherError>;

    /// Noon samples of the multi-day forecast, at most one per calendar day.
    async fn forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastDay>, WeatherError>;
}

/// Construct the OpenWeatherMap client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeatherMap API key configured.\n\
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned()).with_base_url(&config.base_url);

    Ok(Box::new(provider))
}
