//! Derived viewing statistics for the insights screen.
//!
//! Everything here is a pure function of the watchlist and an injected
//! "now", so the numbers are reproducible in tests and across tabs.

use crate::media::MediaKind;
use crate::watchlist::Watchlist;
use chrono::DateTime;
use chrono::Datelike;
use chrono::TimeZone;
use chrono::Utc;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Finishes recorded in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// Short month label, e.g. "Mar".
    pub label: String,
    pub movies: usize,
    pub series: usize,
    pub total: usize,
}

/// Viewing streaks over the finish history.
///
/// Policy: finishes whose gap to the previous finish is at most seven days
/// belong to the same streak. The current streak is the run containing the
/// most recent finish, and counts as zero once that finish is more than
/// fourteen days old.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: usize,
    pub longest: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub watched_this_month: usize,
    /// Every finished genre with its count, most frequent first.
    pub genre_tally: Vec<(String, usize)>,
    pub favorite_genre: Option<String>,
    /// Six calendar months of finish activity, oldest first.
    pub monthly: Vec<MonthlyActivity>,
    pub movie_count: usize,
    pub series_count: usize,
    pub streaks: StreakSummary,
}

impl InsightsReport {
    /// The top slice of the genre tally for compact display.
    pub fn top_genres(&self, limit: usize) -> &[(String, usize)] {
        &self.genre_tally[..self.genre_tally.len().min(limit)]
    }
}

const STREAK_GAP_DAYS: i64 = 7;
const STREAK_STALE_DAYS: i64 = 14;

/// Builds the full report for the insights screen.
pub fn report(list: &Watchlist, now: DateTime<Utc>) -> InsightsReport {
    let finished: Vec<_> = list
        .iter()
        .filter(|entry| entry.status.is_finished())
        .collect();

    let mut genre_counts: HashMap<&str, usize> = HashMap::new();
    for entry in &finished {
        for genre in &entry.genres {
            *genre_counts.entry(genre.as_str()).or_default() += 1;
        }
    }
    let genre_tally: Vec<(String, usize)> = genre_counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(genre, count)| (genre.to_owned(), count))
        .collect();
    let favorite_genre = genre_tally.first().map(|(genre, _)| genre.clone());

    let month_start = start_of_month(now.year(), now.month());
    let watched_this_month = finished
        .iter()
        .filter(|entry| entry.finished_at.is_some_and(|at| at >= month_start))
        .count();

    let monthly = monthly_activity(&finished, now);

    let mut finish_dates: Vec<DateTime<Utc>> =
        finished.iter().filter_map(|entry| entry.finished_at).collect();
    finish_dates.sort_unstable_by(|a, b| b.cmp(a));
    let streaks = streaks(&finish_dates, now);

    InsightsReport {
        watched_this_month,
        genre_tally,
        favorite_genre,
        monthly,
        movie_count: finished.iter().filter(|e| e.kind.is_movie()).count(),
        series_count: finished.iter().filter(|e| e.kind.is_series()).count(),
        streaks,
    }
}

/// Computes streaks over finish dates sorted newest first.
fn streaks(finish_dates_desc: &[DateTime<Utc>], now: DateTime<Utc>) -> StreakSummary {
    let mut longest = 0usize;
    let mut first_run = 0usize;
    let mut run = 0usize;

    for (index, date) in finish_dates_desc.iter().enumerate() {
        let continues = index
            .checked_sub(1)
            .map(|prev| (finish_dates_desc[prev] - *date).num_days() <= STREAK_GAP_DAYS)
            .unwrap_or(true);
        if continues {
            run += 1;
        } else {
            if first_run == 0 {
                first_run = run;
            }
            longest = longest.max(run);
            run = 1;
        }
    }
    if first_run == 0 {
        first_run = run;
    }
    longest = longest.max(run);

    let current = match finish_dates_desc.first() {
        Some(latest) if (now - *latest).num_days() <= STREAK_STALE_DAYS => first_run,
        _ => 0,
    };

    StreakSummary { current, longest }
}

fn monthly_activity(
    finished: &[&crate::entry::WatchlistEntry],
    now: DateTime<Utc>,
) -> Vec<MonthlyActivity> {
    (0..6)
        .rev()
        .map(|back| {
            let (year, month) = months_back(now.year(), now.month(), back);
            let start = start_of_month(year, month);
            let (next_year, next_month) = months_forward(year, month);
            let end = start_of_month(next_year, next_month);

            let in_month = |e: &&crate::entry::WatchlistEntry| {
                e.finished_at.is_some_and(|at| at >= start && at < end)
            };
            let movies = finished
                .iter()
                .copied()
                .filter(|e| e.kind == MediaKind::Movie)
                .filter(in_month)
                .count();
            let series = finished
                .iter()
                .copied()
                .filter(|e| e.kind == MediaKind::Series)
                .filter(in_month)
                .count();

            MonthlyActivity {
                label: start.format("%b").to_string(),
                movies,
                series,
                total: movies + series,
            }
        })
        .collect()
}

fn start_of_month(year: i32, month: u32) -> DateTime<Utc> {
    // The first of any month exists, so this cannot fail.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap()
}

fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

fn months_forward(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::WatchlistEntry;
    use crate::media::WatchStatus;

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 18, 0, 0).unwrap()
    }

    fn finished_on(id: &str, kind: MediaKind, genres: &[&str], at: DateTime<Utc>) -> WatchlistEntry {
        let mut entry = WatchlistEntry::new(id, format!("Title {id}"), kind, WatchStatus::Finished, at);
        entry.genres = genres.iter().map(|g| g.to_string()).collect();
        entry.finished_at = Some(at);
        entry
    }

    fn list_of(entries: Vec<WatchlistEntry>) -> Watchlist {
        let mut list = Watchlist::new();
        for entry in entries {
            let at = entry.added_at;
            list.add(entry, at).unwrap();
        }
        list
    }

    #[test]
    fn genre_tally_counts_finished_entries_only() {
        let now = day(2026, 8, 1);
        let mut unfinished = WatchlistEntry::new("w", "W", MediaKind::Movie, WatchStatus::Watching, now);
        unfinished.genres = vec!["Drama".into()];
        let list = list_of(vec![
            finished_on("a", MediaKind::Movie, &["Horror", "Sci-Fi"], day(2026, 7, 1)),
            finished_on("b", MediaKind::Movie, &["Horror"], day(2026, 7, 2)),
            unfinished,
        ]);

        let report = report(&list, now);
        assert_eq!(report.genre_tally[0], ("Horror".to_string(), 2));
        assert_eq!(report.favorite_genre.as_deref(), Some("Horror"));
        assert!(!report.genre_tally.iter().any(|(g, _)| g == "Drama"));
    }

    #[test]
    fn monthly_buckets_cover_six_months_oldest_first() {
        let now = day(2026, 8, 7);
        let list = list_of(vec![
            finished_on("a", MediaKind::Movie, &[], day(2026, 8, 2)),
            finished_on("b", MediaKind::Series, &[], day(2026, 6, 15)),
            finished_on("c", MediaKind::Movie, &[], day(2026, 1, 15)), // outside the window
        ]);

        let report = report(&list, now);
        assert_eq!(report.monthly.len(), 6);
        assert_eq!(report.monthly[0].label, "Mar");
        assert_eq!(report.monthly[5].label, "Aug");
        assert_eq!(report.monthly[5].movies, 1);
        assert_eq!(report.monthly[3].series, 1);
        assert_eq!(report.monthly.iter().map(|m| m.total).sum::<usize>(), 2);
        assert_eq!(report.watched_this_month, 1);
    }

    #[test]
    fn monthly_buckets_wrap_across_a_year_boundary() {
        let now = day(2026, 2, 10);
        let list = list_of(vec![finished_on(
            "a",
            MediaKind::Movie,
            &[],
            day(2025, 11, 20),
        )]);

        let report = report(&list, now);
        assert_eq!(report.monthly[0].label, "Sep");
        assert_eq!(report.monthly[2].label, "Nov");
        assert_eq!(report.monthly[2].movies, 1);
    }

    #[test]
    fn consecutive_finishes_within_a_week_form_a_streak() {
        let now = day(2026, 8, 7);
        let dates = vec![day(2026, 8, 5), day(2026, 8, 1), day(2026, 7, 27)];
        let summary = streaks(&dates, now);
        assert_eq!(summary.current, 3);
        assert_eq!(summary.longest, 3);
    }

    #[test]
    fn a_wide_gap_splits_streaks_and_longest_survives() {
        let now = day(2026, 8, 7);
        // Recent pair, then a month of silence, then an older run of three.
        let dates = vec![
            day(2026, 8, 5),
            day(2026, 8, 2),
            day(2026, 6, 20),
            day(2026, 6, 15),
            day(2026, 6, 10),
        ];
        let summary = streaks(&dates, now);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.longest, 3);
    }

    #[test]
    fn a_stale_streak_counts_as_zero_but_keeps_longest() {
        let now = day(2026, 8, 30);
        let dates = vec![day(2026, 8, 5), day(2026, 8, 1)];
        let summary = streaks(&dates, now);
        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 2);
    }

    #[test]
    fn no_finishes_means_no_streaks() {
        assert_eq!(streaks(&[], day(2026, 8, 7)), StreakSummary::default());
    }
}
