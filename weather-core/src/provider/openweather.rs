use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::ProviderError,
    model::{Coordinates, Query},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);
        debug!(%url, ?params, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // An unreadable error body is a transport failure, not a miss.
            let message = serde_json::from_str::<OwErrorBody>(&body)?.message;
            debug!(status = status.as_u16(), ?message, "OpenWeather request rejected");
            return Err(ProviderError::Status { status: status.as_u16(), message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn query_params(query: &Query) -> Vec<(&'static str, String)> {
    match query {
        Query::City(city) => vec![("q", city.clone())],
        Query::Coordinates(c) => coordinate_params(*c),
    }
}

fn coordinate_params(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", at.lat.to_string()), ("lon", at.lon.to_string())]
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<CurrentResponse, ProviderError> {
        self.get("weather", &query_params(query)).await
    }

    async fn forecast(&self, at: Coordinates) -> Result<ForecastResponse, ProviderError> {
        self.get("forecast", &coordinate_params(at)).await
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub humidity: u8,
    pub pressure: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwSys {
    pub country: Option<String>,
}

/// `GET /data/2.5/weather` body.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub coord: Coordinates,
    pub weather: Vec<OwWeather>,
    pub main: OwMain,
    pub wind: OwWind,
    #[serde(default)]
    pub sys: OwSys,
    pub name: String,
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub dt_txt: Option<String>,
    pub main: OwForecastMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
}

/// `GET /data/2.5/forecast` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<OwForecastEntry>,
}
