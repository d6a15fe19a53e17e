//! Provides the ordered collection of tracked titles, newest first.

use crate::entry::WatchlistEntry;
use crate::media::WatchStatus;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// The user's collection of tracked titles.
///
/// This struct wraps a `Vec` to provide a type-safe API for list management:
/// entry ids stay unique, new entries are prepended, and the
/// finished-timestamp invariant is applied on every mutation. It serializes
/// transparently as a plain JSON array, so it round-trips through a store
/// slot unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist(Vec<WatchlistEntry>);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WatchlistError {
    #[error("an entry with id `{0}` already exists")]
    DuplicateId(String),
    #[error("no entry with id `{0}`")]
    UnknownId(String),
}

/// Aggregate counters shown on the library header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_watched: usize,
    pub total_watching: usize,
    pub total_planned: usize,
    /// Mean of the ratings on finished entries, one decimal. Zero when no
    /// finished entry carries a rating.
    pub average_rating: f64,
}

impl Watchlist {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.0
    }

    pub fn find(&self, id: &str) -> Option<&WatchlistEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Case-insensitive title lookup, used to filter catalog suggestions
    /// the user already tracks.
    pub fn contains_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.0.iter().any(|entry| entry.title.to_lowercase() == title)
    }

    /// Prepends a new entry. Rejects an id already present in the
    /// collection; stamps `finished_at` if the entry arrives finished
    /// without one.
    pub fn add(&mut self, mut entry: WatchlistEntry, now: DateTime<Utc>) -> Result<(), WatchlistError> {
        if self.contains_id(&entry.id) {
            return Err(WatchlistError::DuplicateId(entry.id));
        }
        apply_finish_invariant(&mut entry, now);
        self.0.insert(0, entry);
        Ok(())
    }

    /// Replaces the entry with the same id, keeping its position and its
    /// original `added_at`. A transition into `Finished` stamps
    /// `finished_at` when absent; leaving `Finished` clears it.
    pub fn update(&mut self, mut entry: WatchlistEntry, now: DateTime<Utc>) -> Result<(), WatchlistError> {
        let Some(slot) = self.0.iter_mut().find(|existing| existing.id == entry.id) else {
            return Err(WatchlistError::UnknownId(entry.id));
        };
        entry.added_at = slot.added_at;
        apply_finish_invariant(&mut entry, now);
        *slot = entry;
        Ok(())
    }

    /// Removes and returns the entry with the given id, if present.
    pub fn remove(&mut self, id: &str) -> Option<WatchlistEntry> {
        let index = self.0.iter().position(|entry| entry.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn stats(&self) -> UserStats {
        let finished: Vec<&WatchlistEntry> = self
            .0
            .iter()
            .filter(|entry| entry.status.is_finished())
            .collect();
        let ratings: Vec<u8> = finished
            .iter()
            .filter_map(|entry| entry.rating.map(|r| r.get()))
            .collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
            (f64::from(sum) / ratings.len() as f64 * 10.0).round() / 10.0
        };

        UserStats {
            total_watched: finished.len(),
            total_watching: self.count_status(WatchStatus::Watching),
            total_planned: self.count_status(WatchStatus::Planned),
            average_rating,
        }
    }

    fn count_status(&self, status: WatchStatus) -> usize {
        self.0.iter().filter(|entry| entry.status == status).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchlistEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a WatchlistEntry;
    type IntoIter = std::slice::Iter<'a, WatchlistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn apply_finish_invariant(entry: &mut WatchlistEntry, now: DateTime<Utc>) {
    if entry.status.is_finished() {
        if entry.finished_at.is_none() {
            entry.finished_at = Some(now);
        }
    } else {
        entry.finished_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use crate::rating::Rating;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    fn entry(id: &str, status: WatchStatus) -> WatchlistEntry {
        WatchlistEntry::new(id, format!("Title {id}"), MediaKind::Movie, status, at(1))
    }

    #[test]
    fn add_prepends_and_rejects_duplicate_ids() {
        let mut list = Watchlist::new();
        list.add(entry("a", WatchStatus::Planned), at(1)).unwrap();
        list.add(entry("b", WatchStatus::Planned), at(2)).unwrap();
        assert_eq!(list.entries()[0].id, "b");

        let result = list.add(entry("a", WatchStatus::Watching), at(3));
        assert_eq!(result, Err(WatchlistError::DuplicateId("a".into())));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn finishing_stamps_a_completion_timestamp() {
        let mut list = Watchlist::new();
        list.add(entry("a", WatchStatus::Watching), at(1)).unwrap();
        assert_eq!(list.find("a").unwrap().finished_at, None);

        let mut updated = list.find("a").unwrap().clone();
        updated.status = WatchStatus::Finished;
        list.update(updated, at(5)).unwrap();
        assert_eq!(list.find("a").unwrap().finished_at, Some(at(5)));
    }

    #[test]
    fn an_existing_completion_timestamp_is_preserved() {
        let mut list = Watchlist::new();
        let mut done = entry("a", WatchStatus::Finished);
        done.finished_at = Some(at(2));
        list.add(done, at(9)).unwrap();
        assert_eq!(list.find("a").unwrap().finished_at, Some(at(2)));
    }

    #[test]
    fn leaving_finished_clears_the_timestamp() {
        let mut list = Watchlist::new();
        list.add(entry("a", WatchStatus::Finished), at(3)).unwrap();
        assert!(list.find("a").unwrap().finished_at.is_some());

        let mut updated = list.find("a").unwrap().clone();
        updated.status = WatchStatus::Watching;
        list.update(updated, at(4)).unwrap();
        assert_eq!(list.find("a").unwrap().finished_at, None);
    }

    #[test]
    fn update_preserves_position_and_added_at() {
        let mut list = Watchlist::new();
        list.add(entry("a", WatchStatus::Planned), at(1)).unwrap();
        list.add(entry("b", WatchStatus::Planned), at(2)).unwrap();

        let mut updated = list.find("a").unwrap().clone();
        updated.title = "Renamed".into();
        updated.added_at = at(28); // callers cannot rewrite history
        list.update(updated, at(28)).unwrap();

        assert_eq!(list.entries()[1].title, "Renamed");
        assert_eq!(list.entries()[1].added_at, at(1));
    }

    #[test]
    fn update_unknown_id_is_an_error() {
        let mut list = Watchlist::new();
        let result = list.update(entry("ghost", WatchStatus::Planned), at(1));
        assert_eq!(result, Err(WatchlistError::UnknownId("ghost".into())));
    }

    #[test]
    fn stats_average_only_rated_finished_entries() {
        let mut list = Watchlist::new();
        let mut a = entry("a", WatchStatus::Finished);
        a.rating = Rating::new(8).ok();
        let mut b = entry("b", WatchStatus::Finished);
        b.rating = Rating::new(9).ok();
        let c = entry("c", WatchStatus::Finished); // unrated
        let mut d = entry("d", WatchStatus::Watching);
        d.rating = Rating::new(1).ok(); // not finished, ignored

        for e in [a, b, c, d] {
            list.add(e, at(1)).unwrap();
        }

        let stats = list.stats();
        assert_eq!(stats.total_watched, 3);
        assert_eq!(stats.total_watching, 1);
        assert_eq!(stats.total_planned, 0);
        assert_eq!(stats.average_rating, 8.5);
    }

    #[test]
    fn empty_list_has_zero_average() {
        assert_eq!(Watchlist::new().stats().average_rating, 0.0);
    }
}
