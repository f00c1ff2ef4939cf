use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::warn;

use crate::{
    location::{DEFAULT_IP_LOCATOR_URL, Geolocator, IpGeolocator, NoGeolocation},
    provider::{OpenWeatherProvider, openweather::DEFAULT_BASE_URL},
    widget::DEFAULT_CITY,
};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// How "use my location" resolves a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationMode {
    #[default]
    Ip,
    Off,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "London"
/// geolocation = "ip"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_city: String,
    pub base_url: String,
    pub geolocation: GeolocationMode,
    pub ip_locator_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            geolocation: GeolocationMode::default(),
            ip_locator_url: DEFAULT_IP_LOCATOR_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let api_key = api_key.trim().to_string();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
    }

    /// The key to send, preferring `env_value` (normally `$OPENWEATHER_API_KEY`)
    /// over the stored one. Empty when neither is set.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .unwrap_or_default()
    }

    /// Build the provider, reading the API key from the environment now.
    pub fn provider(&self) -> OpenWeatherProvider {
        let api_key = self.resolve_api_key(std::env::var(API_KEY_ENV).ok());
        if api_key.is_empty() {
            warn!("no OpenWeather API key configured; set {API_KEY_ENV} or run `weather configure`");
        }
        OpenWeatherProvider::with_base_url(api_key, self.base_url.clone())
    }

    pub fn geolocator(&self) -> Box<dyn Geolocator> {
        match self.geolocation {
            GeolocationMode::Ip => Box::new(IpGeolocator::new(self.ip_locator_url.clone())),
            GeolocationMode::Off => Box::new(NoGeolocation),
        }
    }
}
