//! Defines the closed vocabularies shared by the watchlist and the catalog.

use serde::Deserialize;
use serde::Serialize;

/// Whether a tracked title is a feature film or an episodic series.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIs, strum::EnumIter, strum::EnumString, strum::IntoStaticStr)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    /// Display name shown in tabs and badges.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Series => "Series",
        }
    }

    /// The path segment the upstream catalog uses for this kind.
    pub fn api_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

/// Where a title sits in the user's viewing lifecycle.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIs, strum::EnumIter, strum::EnumString, strum::IntoStaticStr)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watching,
    #[default]
    Planned,
    Finished,
}

impl WatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "Watching",
            WatchStatus::Planned => "Plan to Watch",
            WatchStatus::Finished => "Finished",
        }
    }
}

/// The lookback window for trending listings.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIs, strum::EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum TrendWindow {
    Day,
    #[default]
    Week,
}

impl TrendWindow {
    pub fn label(&self) -> &'static str {
        match self {
            TrendWindow::Day => "Today",
            TrendWindow::Week => "This Week",
        }
    }

    pub fn api_path(&self) -> &'static str {
        match self {
            TrendWindow::Day => "day",
            TrendWindow::Week => "week",
        }
    }
}

/// Sort orders offered by the genre browser.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    #[default]
    Popularity,
    Rating,
    ReleaseDate,
}

impl CatalogSort {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSort::Popularity => "Most Popular",
            CatalogSort::Rating => "Highest Rated",
            CatalogSort::ReleaseDate => "Newest First",
        }
    }

    /// The `sort_by` query parameter understood by the upstream catalog.
    /// Release dates are keyed differently for movies and series.
    pub fn api_param(&self, kind: MediaKind) -> &'static str {
        match (self, kind) {
            (CatalogSort::Popularity, _) => "popularity.desc",
            (CatalogSort::Rating, _) => "vote_average.desc",
            (CatalogSort::ReleaseDate, MediaKind::Movie) => "primary_release_date.desc",
            (CatalogSort::ReleaseDate, MediaKind::Series) => "first_air_date.desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn media_kind_round_trips_through_json() {
        for kind in [MediaKind::Movie, MediaKind::Series] {
            let encoded = serde_json::to_string(&kind).unwrap();
            let decoded: MediaKind = serde_json::from_str(&encoded).unwrap();
            assert_eq!(kind, decoded);
        }
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"series\"");
    }

    #[test]
    fn watch_status_parses_case_insensitively() {
        assert_eq!(WatchStatus::from_str("FINISHED").unwrap(), WatchStatus::Finished);
        assert!(WatchStatus::from_str("abandoned").is_err());
    }

    #[test]
    fn release_date_sort_differs_by_kind() {
        assert_eq!(
            CatalogSort::ReleaseDate.api_param(MediaKind::Movie),
            "primary_release_date.desc"
        );
        assert_eq!(
            CatalogSort::ReleaseDate.api_param(MediaKind::Series),
            "first_air_date.desc"
        );
    }
}
