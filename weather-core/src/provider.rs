use crate::{
    error::ProviderError,
    model::{Coordinates, Query},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::{CurrentResponse, ForecastResponse, OpenWeatherProvider};

/// Source of raw current-weather and forecast responses.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<CurrentResponse, ProviderError>;

    /// 5-day / 3-hour series for a position.
    async fn forecast(&self, at: Coordinates) -> Result<ForecastResponse, ProviderError>;
}

