//! Core library for the `weather` widget.
//!
//! This crate defines:
//! - The OpenWeather client and its response shapes
//! - Normalisation of responses into display-ready records
//! - The view state, its reducer and the widget that drives it
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but has no terminal-specific code and can back
//! any other front-end.

pub mod background;
pub mod config;
pub mod error;
pub mod icons;
pub mod location;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod state;
pub mod widget;

pub use background::Background;
pub use config::{Config, GeolocationMode};
pub use error::{LookupError, ProviderError};
pub use icons::IconAsset;
pub use location::{FixedPosition, Geolocator, IpGeolocator, LocationError, NoGeolocation};
pub use lookup::lookup;
pub use model::{Coordinates, CurrentConditions, ForecastEntry, Query, WeatherReport};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use state::{Event, RequestId, UiState, reduce};
pub use widget::{PendingLookup, WeatherWidget};
