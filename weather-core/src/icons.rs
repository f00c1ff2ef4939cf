//! Provider condition codes to the five visual icon categories.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::LazyLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconAsset {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

const ICON_CODES: [(&str, IconAsset); 14] = [
    ("01d", IconAsset::Clear),
    ("01n", IconAsset::Clear),
    ("02d", IconAsset::Cloud),
    ("02n", IconAsset::Cloud),
    ("03d", IconAsset::Cloud),
    ("03n", IconAsset::Cloud),
    ("04d", IconAsset::Drizzle),
    ("04n", IconAsset::Drizzle),
    ("09d", IconAsset::Rain),
    ("09n", IconAsset::Rain),
    ("10d", IconAsset::Rain),
    ("10n", IconAsset::Rain),
    ("13d", IconAsset::Snow),
    ("13n", IconAsset::Snow),
];

static ICON_TABLE: LazyLock<HashMap<&'static str, IconAsset>> =
    LazyLock::new(|| ICON_CODES.into_iter().collect());

impl IconAsset {
    /// Resolve a provider code. Unknown codes fall back to [`IconAsset::Clear`].
    pub fn for_code(code: &str) -> Self {
        ICON_TABLE.get(code).copied().unwrap_or_default()
    }

    /// Every code the table knows about.
    pub fn known_codes() -> impl Iterator<Item = &'static str> {
        ICON_CODES.iter().map(|(code, _)| *code)
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            IconAsset::Clear => "clear.png",
            IconAsset::Cloud => "cloud.png",
            IconAsset::Drizzle => "drizzle.png",
            IconAsset::Rain => "rain.png",
            IconAsset::Snow => "snow.png",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconAsset::Clear => "☀",
            IconAsset::Cloud => "☁",
            IconAsset::Drizzle => "🌦",
            IconAsset::Rain => "🌧",
            IconAsset::Snow => "❄",
        }
    }
}
