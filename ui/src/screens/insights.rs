//=============================================================================
// File: src/screens/insights.rs
//=============================================================================
//! Viewing statistics derived from the persisted watchlist: headline
//! counters, genre tallies, monthly activity, and streaks. Pure
//! presentation; the numbers come from `api::insights`.

use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Meter;
use crate::components::stats_card::StatsCard;
use crate::hooks::use_slot::use_slot;
use crate::WATCHLIST_SLOT;
use api::insights;
use api::watchlist::Watchlist;
use chrono::Utc;
use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn InsightsScreen() -> Element {
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let current = list.get();
    let stats = current.stats();
    let report = insights::report(&current, Utc::now());

    let max_monthly = report.monthly.iter().map(|m| m.total).max().unwrap_or(0);
    let max_genre = report.genre_tally.first().map(|(_, n)| *n).unwrap_or(0);

    rsx! {
        div {
            class: "screen-header",
            h2 { "Insights" }
        }

        Grid {
            StatsCard { title: "Watched".to_string(), value: stats.total_watched.to_string() }
            StatsCard { title: "This Month".to_string(), value: report.watched_this_month.to_string() }
            StatsCard {
                title: "Current Streak".to_string(),
                value: report.streaks.current.to_string(),
                subtitle: format!("longest: {}", report.streaks.longest),
            }
            StatsCard {
                title: "Favorite Genre".to_string(),
                value: report.favorite_genre.clone().unwrap_or_else(|| "—".to_string()),
            }
        }

        Grid {
            Card {
                h3 { "Top Genres" }
                if report.genre_tally.is_empty() {
                    p { class: "muted", "Finish a few titles to see where your taste leans." }
                } else {
                    for (genre, count) in report.top_genres(5).iter().cloned() {
                        Meter { label: genre, value: count, max: max_genre }
                    }
                }
            }
            Card {
                h3 { "Movies vs. Series" }
                Meter {
                    label: "Movies".to_string(),
                    value: report.movie_count,
                    max: report.movie_count + report.series_count,
                }
                Meter {
                    label: "Series".to_string(),
                    value: report.series_count,
                    max: report.movie_count + report.series_count,
                }
                if stats.average_rating > 0.0 {
                    p { small { class: "muted", "Average rating {stats.average_rating:.1}/10" } }
                }
            }
        }

        Card {
            h3 { "Last Six Months" }
            if max_monthly == 0 {
                p { class: "muted", "No finishes recorded yet." }
            } else {
                for month in report.monthly.iter().cloned() {
                    Meter { label: month.label.clone(), value: month.total, max: max_monthly }
                }
            }
        }
    }
}
