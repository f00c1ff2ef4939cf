//! Where "use my location" gets its coordinates from.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::model::Coordinates;

pub const DEFAULT_IP_LOCATOR_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location access denied")]
    Denied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    /// Whether this platform can produce a position at all.
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position the user typed in.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Platform without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable("geolocation is disabled".into()))
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_IP_LOCATOR_URL)
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        debug!(url = %self.url, "resolving position from IP");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if !res.status().is_success() {
            warn!(status = res.status().as_u16(), "IP locator refused the request");
            return Err(LocationError::Denied);
        }

        let body: IpApiResponse =
            res.json().await.map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match body {
            IpApiResponse { error: false, latitude: Some(lat), longitude: Some(lon), .. } => {
                Ok(Coordinates { lat, lon })
            }
            IpApiResponse { reason, .. } => {
                warn!(?reason, "IP locator returned no position");
                Err(LocationError::Denied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_position_returns_itself() {
        let at = Coordinates { lat: 40.7128, lon: -74.006 };
        let pos = FixedPosition(at).current_position().await.unwrap();
        assert_eq!(pos, at);
        assert!(FixedPosition(at).is_supported());
    }

    #[tokio::test]
    async fn no_geolocation_is_unsupported() {
        assert!(!NoGeolocation.is_supported());
        assert!(NoGeolocation.current_position().await.is_err());
    }
}
