//! Filter-and-score recommendation logic over catalog listings.
//!
//! Nothing here talks to the network: callers hand in the user's
//! watchlist-derived profile and a pool of candidate listings, and get
//! back an ordered, annotated selection.

use crate::media::MediaKind;
use crate::metadata_providers::CatalogTitle;
use crate::watchlist::Watchlist;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::HashSet;

/// What the watchlist says about the user's taste.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    /// Up to three genre labels, most frequent first.
    pub top_genres: Vec<String>,
    pub average_rating: f64,
    seen_titles: HashSet<String>,
}

impl TasteProfile {
    pub fn from_watchlist(list: &Watchlist) -> Self {
        let mut genre_counts: HashMap<&str, usize> = HashMap::new();
        for entry in list {
            for genre in &entry.genres {
                *genre_counts.entry(genre.as_str()).or_default() += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = genre_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let ratings: Vec<u8> = list.iter().filter_map(|e| e.rating.map(|r| r.get())).collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            f64::from(ratings.iter().map(|&r| u32::from(r)).sum::<u32>()) / ratings.len() as f64
        };

        Self {
            top_genres: ranked.iter().take(3).map(|(g, _)| g.to_string()).collect(),
            average_rating,
            seen_titles: list.iter().map(|e| e.title.to_lowercase()).collect(),
        }
    }

    pub fn has_seen(&self, title: &str) -> bool {
        self.seen_titles.contains(&title.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.seen_titles.is_empty()
    }
}

/// A suggested title together with the reason it was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: CatalogTitle,
    pub reason: String,
}

/// Per-genre contribution caps, so one dominant genre does not flood the
/// whole selection.
const MOVIES_PER_GENRE: usize = 3;
const SERIES_PER_GENRE: usize = 2;
const MAX_RESULTS: usize = 8;

/// Selects recommendations from a candidate pool.
///
/// Seen titles are dropped first. Candidates matching one of the profile's
/// top genres are preferred, best-rated first and capped per genre; any
/// remaining room is filled with the highest-rated unseen leftovers.
pub fn recommend(profile: &TasteProfile, pool: &[CatalogTitle]) -> Vec<Recommendation> {
    let mut unseen: Vec<&CatalogTitle> = pool
        .iter()
        .filter(|candidate| !profile.has_seen(&candidate.title))
        .collect();
    unseen.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));

    let mut picked_ids: HashSet<u64> = HashSet::new();
    let mut picks: Vec<Recommendation> = Vec::new();

    for genre in &profile.top_genres {
        let mut movies = 0usize;
        let mut series = 0usize;
        for candidate in &unseen {
            if picks.len() >= MAX_RESULTS {
                break;
            }
            if picked_ids.contains(&candidate.id) {
                continue;
            }
            if !candidate.genre_labels().iter().any(|label| label == genre) {
                continue;
            }
            let quota = match candidate.kind {
                MediaKind::Movie => {
                    if movies >= MOVIES_PER_GENRE {
                        continue;
                    }
                    movies += 1;
                    "movies"
                }
                MediaKind::Series => {
                    if series >= SERIES_PER_GENRE {
                        continue;
                    }
                    series += 1;
                    "series"
                }
            };
            picked_ids.insert(candidate.id);
            picks.push(Recommendation {
                title: (*candidate).clone(),
                reason: format!("Because you enjoy {genre} {quota}"),
            });
        }
    }

    // Top up from whatever is left, best-rated first.
    for candidate in &unseen {
        if picks.len() >= MAX_RESULTS {
            break;
        }
        if picked_ids.insert(candidate.id) {
            picks.push(Recommendation {
                title: (*candidate).clone(),
                reason: "Trending now and highly rated".to_string(),
            });
        }
    }

    picks
}

/// A uniform random unseen pick, for the "surprise me" button.
pub fn surprise_pick<'a>(profile: &TasteProfile, pool: &'a [CatalogTitle]) -> Option<&'a CatalogTitle> {
    use rand::seq::IteratorRandom;

    pool.iter()
        .filter(|candidate| !profile.has_seen(&candidate.title))
        .choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::WatchlistEntry;
    use crate::media::WatchStatus;
    use crate::rating::Rating;
    use chrono::TimeZone;
    use chrono::Utc;

    fn catalog(id: u64, title: &str, kind: MediaKind, vote: f64, genre_ids: &[u32]) -> CatalogTitle {
        CatalogTitle {
            id,
            title: title.to_string(),
            kind,
            overview: String::new(),
            poster_path: None,
            vote_average: vote,
            year: Some(2024),
            genre_ids: genre_ids.to_vec(),
        }
    }

    fn profile_with(genres: &[&str], seen: &[&str]) -> TasteProfile {
        let mut list = Watchlist::new();
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        for (index, title) in seen.iter().enumerate() {
            let mut entry = WatchlistEntry::new(
                format!("{index}"),
                *title,
                MediaKind::Movie,
                WatchStatus::Finished,
                now,
            );
            // Repeat earlier genres more often so ordering is deterministic.
            entry.genres = genres
                .iter()
                .take(genres.len() - (index % genres.len().max(1)))
                .map(|g| g.to_string())
                .collect();
            entry.rating = Rating::new(8).ok();
            list.add(entry, now).unwrap();
        }
        TasteProfile::from_watchlist(&list)
    }

    #[test]
    fn profile_ranks_genres_by_frequency() {
        let profile = profile_with(&["Horror", "Drama", "Comedy"], &["A", "B", "C", "D"]);
        assert_eq!(profile.top_genres[0], "Horror");
        assert_eq!(profile.average_rating, 8.0);
        assert!(profile.has_seen("a"));
        assert!(!profile.has_seen("Z"));
    }

    #[test]
    fn seen_titles_are_never_recommended() {
        let profile = profile_with(&["Horror"], &["Alien"]);
        let pool = vec![
            catalog(1, "Alien", MediaKind::Movie, 8.5, &[27]),
            catalog(2, "The Thing", MediaKind::Movie, 8.2, &[27]),
        ];
        let picks = recommend(&profile, &pool);
        assert!(picks.iter().all(|p| p.title.title != "Alien"));
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn genre_matches_come_first_with_reasons() {
        let profile = profile_with(&["Horror"], &["Seed"]);
        let pool = vec![
            catalog(1, "Rom", MediaKind::Movie, 9.9, &[10749]),
            catalog(2, "The Thing", MediaKind::Movie, 8.2, &[27]),
        ];
        let picks = recommend(&profile, &pool);
        assert_eq!(picks[0].title.title, "The Thing");
        assert_eq!(picks[0].reason, "Because you enjoy Horror movies");
        assert_eq!(picks[1].reason, "Trending now and highly rated");
    }

    #[test]
    fn per_genre_caps_limit_each_kind() {
        let profile = profile_with(&["Horror"], &["Seed"]);
        let mut pool: Vec<CatalogTitle> = (0..6)
            .map(|i| catalog(i, &format!("M{i}"), MediaKind::Movie, 8.0, &[27]))
            .collect();
        pool.extend((10..16).map(|i| catalog(i, &format!("S{i}"), MediaKind::Series, 8.0, &[27])));

        let picks = recommend(&profile, &pool);
        let movie_reason_count = picks
            .iter()
            .filter(|p| p.reason.ends_with("movies"))
            .count();
        let series_reason_count = picks
            .iter()
            .filter(|p| p.reason.ends_with("series"))
            .count();
        assert_eq!(movie_reason_count, MOVIES_PER_GENRE);
        assert_eq!(series_reason_count, SERIES_PER_GENRE);
    }

    #[test]
    fn results_are_capped_and_unique() {
        let profile = profile_with(&["Horror"], &["Seed"]);
        let pool: Vec<CatalogTitle> = (0..30)
            .map(|i| catalog(i, &format!("M{i}"), MediaKind::Movie, 7.0, &[27]))
            .collect();
        let picks = recommend(&profile, &pool);
        assert_eq!(picks.len(), MAX_RESULTS);
        let ids: HashSet<u64> = picks.iter().map(|p| p.title.id).collect();
        assert_eq!(ids.len(), MAX_RESULTS);
    }

    #[test]
    fn surprise_pick_skips_seen_titles() {
        let profile = profile_with(&["Horror"], &["Alien"]);
        let pool = vec![
            catalog(1, "Alien", MediaKind::Movie, 8.5, &[27]),
            catalog(2, "The Thing", MediaKind::Movie, 8.2, &[27]),
        ];
        for _ in 0..10 {
            let pick = surprise_pick(&profile, &pool).unwrap();
            assert_eq!(pick.title, "The Thing");
        }
        assert!(surprise_pick(&profile, &pool[..1]).is_none());
    }
}
