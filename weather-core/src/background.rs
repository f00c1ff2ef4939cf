use serde::{Deserialize, Serialize};

/// Coarse backdrop category derived from the primary condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Clear,
    Clouds,
    Rain,
    Snow,
    #[default]
    Default,
}

impl Background {
    /// Case-insensitive keyword match; first group that hits wins.
    pub fn classify(main: &str) -> Self {
        let text = main.to_lowercase();

        if text.contains("clear") {
            Background::Clear
        } else if text.contains("cloud") {
            Background::Clouds
        } else if text.contains("rain") || text.contains("drizzle") {
            Background::Rain
        } else if text.contains("snow") {
            Background::Snow
        } else {
            Background::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Clear => "clear",
            Background::Clouds => "clouds",
            Background::Rain => "rain",
            Background::Snow => "snow",
            Background::Default => "default",
        }
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
