use tracing::{debug, warn};

use crate::{
    background::Background,
    error::LookupError,
    model::{Query, WeatherReport},
    normalize,
    provider::WeatherProvider,
};

/// Fetch current conditions, then the forecast for the coordinates the
/// provider resolved. A failed forecast leaves the report without one.
pub async fn lookup<P>(provider: &P, query: &Query) -> Result<WeatherReport, LookupError>
where
    P: WeatherProvider + ?Sized,
{
    let current = provider.current(query).await?;
    let conditions = normalize::current_conditions(&current)?;
    let background = Background::classify(normalize::primary_condition(&current));
    let coordinates = current.coord;

    debug!(%query, location = %conditions.location, "current conditions fetched");

    let forecast = match provider.forecast(coordinates).await {
        Ok(series) => normalize::daily_forecast(&series),
        Err(err) => {
            warn!(error = %err, "forecast unavailable, showing current conditions only");
            Vec::new()
        }
    };

    Ok(WeatherReport { conditions, forecast, background, coordinates })
}
