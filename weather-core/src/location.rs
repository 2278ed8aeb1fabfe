//! "Use my location": where the current position comes from.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{config::GeolocationConfig, error::LocationError, model::Coordinates};

pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json";

#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    /// Whether this system can provide a position at all.
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Geolocation switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl LocationResolver for Unsupported {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Position pinned in the config file.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationResolver for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address, ip-api.com style.
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    endpoint: String,
    http: Client,
}

impl IpGeolocation {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }
}

impl Default for IpGeolocation {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[async_trait]
impl LocationResolver for IpGeolocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(endpoint = %self.endpoint, "resolving position from IP");

        let res = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| LocationError::Failed(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::Failed(format!("lookup returned status {status}")));
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Failed(e.to_string()))?;

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Failed(
                parsed
                    .message
                    .unwrap_or_else(|| "position unknown".to_string()),
            )),
        }
    }
}

/// Picks the resolver described by the `[geolocation]` config section.
pub fn resolver_from_config(config: &GeolocationConfig) -> Box<dyn LocationResolver> {
    if !config.enabled {
        return Box::new(Unsupported);
    }

    match config.pinned() {
        Some(coordinates) => Box::new(FixedLocation(coordinates)),
        None => Box::new(IpGeolocation::new(config.endpoint.clone())),
    }
}
