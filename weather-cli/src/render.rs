use chrono::NaiveDate;
use std::fmt;
use weather_core::{CurrentConditions, ForecastEntry, UiState};

pub const LOADING_TEXT: &str = "Updating forecast...";
pub const EMPTY_TEXT: &str = "Search for a city to see weather information";

/// Text view of the widget: error banner, then spinner, card or empty prompt.
pub struct View<'a> {
    pub state: &'a UiState,
    pub today: NaiveDate,
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.state.error {
            writeln!(f, "! {err}")?;
        }

        if self.state.loading {
            writeln!(f, "{LOADING_TEXT}")
        } else if let Some(conditions) = &self.state.conditions {
            write_card(f, conditions, self.today)?;
            write_forecast(f, &self.state.forecast)
        } else {
            writeln!(f, "{EMPTY_TEXT}")
        }
    }
}

pub fn render(state: &UiState, today: NaiveDate) -> String {
    View { state, today }.to_string()
}

/// en-US long form, e.g. "Monday, October 19".
pub fn date_label(day: NaiveDate) -> String {
    day.format("%A, %B %-d").to_string()
}

fn write_card(f: &mut fmt::Formatter<'_>, c: &CurrentConditions, today: NaiveDate) -> fmt::Result {
    writeln!(f, "{}", date_label(today))?;
    writeln!(f, "{}, {}", c.location, c.country)?;
    writeln!(f)?;
    writeln!(f, "  {}  {}°  {}", c.icon.glyph(), c.temperature, c.description)?;
    writeln!(f)?;
    writeln!(f, "  {:<11}{}%", "Humidity", c.humidity)?;
    writeln!(f, "  {:<11}{} km/h", "Wind", c.wind_speed)?;
    if let Some(feels_like) = c.feels_like {
        writeln!(f, "  {:<11}{}°C", "Feels Like", feels_like)?;
    }
    if let Some(pressure) = c.pressure {
        writeln!(f, "  {:<11}{} hPa", "Pressure", pressure)?;
    }
    Ok(())
}

fn write_forecast(f: &mut fmt::Formatter<'_>, forecast: &[ForecastEntry]) -> fmt::Result {
    if forecast.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "5-Day Forecast")?;
    let strip: Vec<String> = forecast
        .iter()
        .map(|day| format!("{} {} {}°", day.local_time.format("%a"), day.icon.glyph(), day.temperature))
        .collect();
    writeln!(f, "  {}", strip.join("   "))
}
