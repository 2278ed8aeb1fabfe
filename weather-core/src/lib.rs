//! Core library for the `weather` lookup app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client (current conditions, noon-sampled forecast)
//! - Location resolution for "use my location"
//! - The UI state snapshot, its transitions and a plain-text renderer
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod palette;
pub mod provider;
pub mod state;
pub mod view;

pub use app::WeatherApp;
pub use config::{Config, GeolocationConfig};
pub use error::{LocationError, WeatherError};
pub use location::{LocationResolver, resolver_from_config};
pub use model::{Condition, Coordinates, CurrentConditions, ForecastDay, Query};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{AppState, Status};
