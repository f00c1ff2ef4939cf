use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{background::Background, icons::IconAsset};

/// Geographic position, in the same shape the provider echoes back as `coord`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What a single lookup asks for: exactly one of a city name or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(city) => f.write_str(city),
            Query::Coordinates(c) => write!(f, "{:.4},{:.4}", c.lat, c.lon),
        }
    }
}

/// Display-ready snapshot of the weather "now" at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub feels_like: Option<i32>,
    pub humidity: u8,
    /// Passed through from the provider unchanged.
    pub wind_speed: f64,
    pub pressure: Option<u32>,
    pub location: String,
    pub country: String,
    pub description: String,
    pub icon_code: String,
    pub icon: IconAsset,
    pub observed_at: Option<DateTime<Utc>>,
}

/// One predicted reading for a future day, sampled at local noon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub local_time: NaiveDateTime,
    pub temperature: i32,
    pub icon_code: String,
    pub icon: IconAsset,
}

/// Everything one successful lookup produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub conditions: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
    pub background: Background,
    pub coordinates: Coordinates,
}
