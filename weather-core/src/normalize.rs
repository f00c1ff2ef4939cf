//! Pure mapping from provider responses to display-ready records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::{
    error::ProviderError,
    icons::IconAsset,
    model::{CurrentConditions, ForecastEntry},
    provider::{CurrentResponse, ForecastResponse, openweather::OwForecastEntry},
};

/// Number of daily entries kept from the forecast series.
pub const FORECAST_DAYS: usize = 5;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn is_noon(t: &NaiveDateTime) -> bool {
    t.hour() == 12 && t.minute() == 0 && t.second() == 0
}

/// Round toward negative infinity to a whole degree.
pub fn floor_degrees(celsius: f64) -> i32 {
    celsius.floor() as i32
}

pub fn current_conditions(res: &CurrentResponse) -> Result<CurrentConditions, ProviderError> {
    let weather = res.weather.first().ok_or(ProviderError::Malformed("weather[0]"))?;

    Ok(CurrentConditions {
        temperature: floor_degrees(res.main.temp),
        feels_like: res.main.feels_like.map(floor_degrees),
        humidity: res.main.humidity,
        wind_speed: res.wind.speed,
        pressure: res.main.pressure,
        location: res.name.clone(),
        country: res.sys.country.clone().unwrap_or_default(),
        description: weather.description.clone(),
        icon_code: weather.icon.clone(),
        icon: IconAsset::for_code(&weather.icon),
        observed_at: res.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}

/// Primary condition text (`weather[0].main`), used for background selection.
pub fn primary_condition(res: &CurrentResponse) -> &str {
    res.weather.first().map(|w| w.main.as_str()).unwrap_or_default()
}

/// One noon reading per calendar day, in series order, at most [`FORECAST_DAYS`].
pub fn daily_forecast(res: &ForecastResponse) -> Vec<ForecastEntry> {
    let mut seen: Vec<NaiveDate> = Vec::with_capacity(FORECAST_DAYS);
    let mut days = Vec::with_capacity(FORECAST_DAYS);

    for reading in &res.list {
        if days.len() == FORECAST_DAYS {
            break;
        }
        let Some(entry) = forecast_entry(reading) else {
            continue;
        };
        if !is_noon(&entry.local_time) || seen.contains(&entry.local_time.date()) {
            continue;
        }
        seen.push(entry.local_time.date());
        days.push(entry);
    }

    days
}

fn forecast_entry(reading: &OwForecastEntry) -> Option<ForecastEntry> {
    let timestamp = DateTime::<Utc>::from_timestamp(reading.dt, 0)?;
    let local_time = reading
        .dt_txt
        .as_deref()
        .and_then(|txt| NaiveDateTime::parse_from_str(txt, DT_TXT_FORMAT).ok())
        .unwrap_or_else(|| timestamp.naive_utc());
    let icon_code = reading.weather.first().map(|w| w.icon.clone()).unwrap_or_default();

    Some(ForecastEntry {
        timestamp,
        local_time,
        temperature: floor_degrees(reading.main.temp),
        icon: IconAsset::for_code(&icon_code),
        icon_code,
    })
}
