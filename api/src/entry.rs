//! A single tracked title in the user's collection.

use crate::genres;
use crate::media::MediaKind;
use crate::media::WatchStatus;
use crate::metadata_providers::CatalogTitle;
use crate::rating::Rating;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One watchlist entry: identity, the title's metadata, and the user's
/// viewing state for it.
///
/// Identifiers are caller-generated and must be unique within a
/// [`Watchlist`](crate::watchlist::Watchlist); the collection enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: String,
    pub title: String,
    pub kind: MediaKind,
    pub status: WatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WatchlistEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: MediaKind,
        status: WatchStatus,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            status,
            rating: None,
            genres: Vec::new(),
            year: None,
            poster: None,
            added_at,
            finished_at: None,
            note: None,
        }
    }

    /// Builds an entry from a catalog listing, carrying over title, year,
    /// poster, and resolved genre labels. The id is derived from the
    /// catalog's numeric id so the same title cannot be added twice.
    pub fn from_catalog(title: &CatalogTitle, status: WatchStatus, added_at: DateTime<Utc>) -> Self {
        Self {
            id: catalog_entry_id(title.kind, title.id),
            title: title.title.clone(),
            kind: title.kind,
            status,
            rating: None,
            genres: genres::labels_for(&title.genre_ids),
            year: title.year,
            poster: title.poster_path.clone(),
            added_at,
            finished_at: None,
            note: None,
        }
    }

    /// Case-insensitive match against the title or any genre label,
    /// mirroring the library search box.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.genres.iter().any(|g| g.to_lowercase().contains(&query))
    }
}

/// The deterministic entry id for a title sourced from the catalog.
pub fn catalog_entry_id(kind: MediaKind, catalog_id: u64) -> String {
    format!("catalog-{}-{}", kind.api_path(), catalog_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> WatchlistEntry {
        let mut entry = WatchlistEntry::new(
            "1",
            "The Thing",
            MediaKind::Movie,
            WatchStatus::Finished,
            Utc.with_ymd_and_hms(2026, 1, 15, 20, 0, 0).unwrap(),
        );
        entry.rating = Rating::new(9).ok();
        entry.genres = vec!["Horror".into(), "Sci-Fi".into()];
        entry.year = Some(1982);
        entry.finished_at = Some(Utc.with_ymd_and_hms(2026, 1, 16, 22, 30, 0).unwrap());
        entry.note = Some("rewatch".into());
        entry
    }

    #[test]
    fn round_trips_through_json() {
        let entry = sample();
        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: WatchlistEntry = serde_json::from_str(&encoded).unwrap();
        assert_eq!(entry, decoded);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let raw = r#"{
            "id": "2",
            "title": "Severance",
            "kind": "series",
            "status": "watching",
            "added_at": "2026-02-01T10:00:00Z"
        }"#;
        let decoded: WatchlistEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.rating, None);
        assert!(decoded.genres.is_empty());
        assert_eq!(decoded.finished_at, None);
    }

    #[test]
    fn query_matches_title_and_genres() {
        let entry = sample();
        assert!(entry.matches_query("thing"));
        assert!(entry.matches_query("sci"));
        assert!(entry.matches_query("  "));
        assert!(!entry.matches_query("comedy"));
    }
}
