use serde::{Serialize, Serializer};
use tracing::error;

/// Fallback text when a non-2xx response carries no `message`.
pub const NOT_FOUND_FALLBACK: &str = "City not found";

/// Low-level failure talking to the weather provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider returned status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider response is missing {0}")]
    Malformed(&'static str),
}

/// User-visible outcome of a failed lookup. The `Display` text is what the
/// widget shows verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyQuery,
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to fetch weather data")]
    Transport,
    #[error("Location access denied. Please search manually.")]
    PermissionDenied,
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
}

impl From<ProviderError> for LookupError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { message, .. } => LookupError::NotFound(
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string()),
            ),
            other => {
                error!(error = %other, "weather lookup failed");
                LookupError::Transport
            }
        }
    }
}

impl Serialize for LookupError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
