use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// The color scheme applied to the whole app shell.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIs, strum::EnumIter, strum::EnumString, strum::IntoStaticStr)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// The `data-theme` attribute value pico.css understands.
    pub fn attribute(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

/// Represents the library-wide preferences served to every client.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LibraryPreference {
    /// Default color scheme; the client may override it per device.
    pub theme: ThemeMode,

    /// ISO country code used for region-scoped trending.
    pub region: String,

    /// How many entries a free account may hold.
    pub free_limit: usize,
}

impl LibraryPreference {
    /// Creates a LibraryPreference instance from environment variables,
    /// with a conservative in-code default.
    ///
    /// # Environment Variables (case-insensitive where textual):
    /// - `BINGE_THEME`: "dark" or "light".
    /// - `BINGE_REGION`: ISO country code, e.g. "US" or "DE".
    /// - `BINGE_FREE_LIMIT`: entry cap for free accounts.
    pub fn from_env() -> Self {
        /// Entry cap applied when the environment does not say otherwise.
        const FREE_LIMIT: usize = 10;

        let theme = env::var("BINGE_THEME")
            .ok()
            .and_then(|raw| ThemeMode::from_str(&raw).ok())
            .unwrap_or_default();

        let region = env::var("BINGE_REGION")
            .ok()
            .filter(|raw| raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|raw| raw.to_ascii_uppercase())
            .unwrap_or_else(|| "US".to_string());

        let free_limit = env::var("BINGE_FREE_LIMIT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(FREE_LIMIT);

        Self {
            theme,
            region,
            free_limit,
        }
    }
}

impl Default for LibraryPreference {
    fn default() -> Self {
        Self::from_env()
    }
}
