//! Glue between user actions, the provider and the state snapshot.

use std::fmt;

use crate::{
    error::LocationError,
    location::LocationResolver,
    model::{Coordinates, Query},
    provider::WeatherProvider,
    state::AppState,
};

type Observer = Box<dyn FnMut(&AppState) + Send>;

/// Drives weather lookups and keeps the latest [`AppState`].
///
/// Lookups are never cancelled; each one runs to completion.
pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    state: AppState,
    observer: Option<Observer>,
}

impl fmt::Debug for WeatherApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApp")
            .field("provider", &self.provider)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl WeatherApp {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: AppState::default(),
            observer: None,
        }
    }

    /// Called with the new snapshot after every transition.
    pub fn on_change(mut self, observer: impl FnMut(&AppState) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        let city = city.into();
        self.apply(|s| s.with_city(city));
    }

    /// Looks up the city currently entered. Returns `false` without touching
    /// anything when the city is blank.
    pub async fn search(&mut self) -> bool {
        let city = self.state.city().trim().to_string();
        if city.is_empty() {
            return false;
        }

        self.fetch(Query::City(city)).await;
        true
    }

    /// Looks up the position reported by `resolver`.
    pub async fn use_location(
        &mut self,
        resolver: &dyn LocationResolver,
    ) -> Result<(), LocationError> {
        if !resolver.is_available() {
            return Err(LocationError::Unavailable);
        }

        let coordinates = resolver.current_position().await?;
        tracing::debug!(%coordinates, "position resolved");

        self.fetch(Query::Coordinates(coordinates)).await;
        Ok(())
    }

    /// Current conditions, then the forecast for the same place.
    pub async fn fetch(&mut self, query: Query) {
        self.apply(AppState::loading);

        match self.provider.current(&query).await {
            Ok(current) => {
                let coordinates = match &query {
                    Query::Coordinates(c) => *c,
                    Query::City(_) => current.coordinates,
                };
                tracing::info!(place = %current.place, country = %current.country, "current conditions loaded");

                self.apply(|s| s.current_loaded(current));
                self.refresh_forecast(coordinates).await;
            }
            Err(err) => {
                tracing::info!(?query, %err, "current conditions request failed");
                self.apply(|s| s.current_failed(err.to_string()));
            }
        }
    }

    async fn refresh_forecast(&mut self, coordinates: Coordinates) {
        match self.provider.forecast(coordinates).await {
            Ok(days) => {
                tracing::debug!(days = days.len(), "forecast loaded");
                self.apply(|s| s.forecast_loaded(days));
            }
            Err(err) => {
                tracing::error!(%coordinates, %err, "forecast error");
                self.apply(AppState::forecast_failed);
            }
        }
    }

    fn apply(&mut self, transition: impl FnOnce(AppState) -> AppState) {
        let previous = std::mem::take(&mut self.state);
        self.state = transition(previous);

        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}
