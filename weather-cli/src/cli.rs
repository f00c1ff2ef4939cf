use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{
    Config, Coordinates, FixedPosition, Geolocator, OpenWeatherProvider, WeatherWidget,
};

use crate::render::render;

/// Input that triggers "use my location" in interactive mode.
const LOCATE_COMMAND: &str = "@";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and a 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city (the configured default city if omitted).
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for the current position.
    Locate {
        /// Latitude; skips automatic detection when given with --lon.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude; skips automatic detection when given with --lat.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search repeatedly; enter `@` to use your location.
    Interactive,

    /// Store the API key and default city.
    Configure,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the widget state as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show { city: None, output: OutputArgs { json: false } }) {
            Command::Show { city, output } => {
                let mut widget = widget(&Config::load()?);
                match city {
                    Some(city) => widget.search(&city).await,
                    None => widget.mount().await,
                }
                print_state(&widget, &output)
            }
            Command::Locate { lat, lon, output } => {
                let config = Config::load()?;
                let geo: Box<dyn Geolocator> = match (lat, lon) {
                    (Some(lat), Some(lon)) => Box::new(FixedPosition(Coordinates { lat, lon })),
                    _ => config.geolocator(),
                };
                let mut widget = widget(&config);
                widget.search_by_location(geo.as_ref()).await;
                print_state(&widget, &output)
            }
            Command::Interactive => interactive(&Config::load()?).await,
            Command::Configure => configure(),
        }
    }
}

fn widget(config: &Config) -> WeatherWidget<OpenWeatherProvider> {
    debug!(base_url = %config.base_url, default_city = %config.default_city, "building widget");
    WeatherWidget::with_default_city(config.provider(), config.default_city.clone())
}

fn print_state(widget: &WeatherWidget<OpenWeatherProvider>, output: &OutputArgs) -> anyhow::Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(widget.state())
            .context("Failed to serialize weather state")?;
        println!("{json}");
    } else {
        print!("{}", render(widget.state(), Local::now().date_naive()));
    }
    Ok(())
}

fn show(widget: &WeatherWidget<OpenWeatherProvider>) {
    println!();
    print!("{}", render(widget.state(), Local::now().date_naive()));
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let geo = config.geolocator();
    let mut widget = widget(config);

    let city = widget.default_city().to_string();
    search(&mut widget, &city).await;

    loop {
        let input = match Text::new("Search city:")
            .with_help_message("Enter to search, `@` for your location, Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        };

        if input.trim() == LOCATE_COMMAND {
            locate(&mut widget, geo.as_ref()).await;
        } else {
            search(&mut widget, &input).await;
        }
    }

    Ok(())
}

/// Search and draw both the loading frame and the result.
async fn search(widget: &mut WeatherWidget<OpenWeatherProvider>, city: &str) {
    if let Some(pending) = widget.begin_search(city) {
        show(widget);
        let outcome = widget.resolve(&pending).await;
        widget.complete(pending, outcome);
    }
    show(widget);
}

/// Same frames as `search`: loading while the position resolves, then the result.
async fn locate(widget: &mut WeatherWidget<OpenWeatherProvider>, geo: &dyn Geolocator) {
    if let Some(id) = widget.begin_locate(geo) {
        show(widget);
        widget.finish_locate(geo, id).await;
    }
    show(widget);
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to rely on $OPENWEATHER_API_KEY")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_optional_city() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--json"]).unwrap();
        match cli.command {
            Some(Command::Show { city, output }) => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert!(output.json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn locate_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["weather", "locate", "--lat", "-33.86", "--lon", "151.2"]).unwrap();
        match cli.command {
            Some(Command::Locate { lat, lon, .. }) => {
                assert_eq!(lat, Some(-33.86));
                assert_eq!(lon, Some(151.2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn locate_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["weather", "locate", "--lat", "1.0"]).is_err());
    }
}
