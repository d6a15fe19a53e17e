//=============================================================================
// File: src/screens/library.rs
//=============================================================================
//! The main screen: the tracked collection with search, filters, status
//! tabs, headline stats, and the add/edit dialog.

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::Notice;
use crate::collection::add_from_catalog;
use crate::collection::AddOutcome;
use crate::components::add_media_dialog::AddMediaDialog;
use crate::components::add_media_dialog::EntryDraft;
use crate::components::media_card::MediaCard;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::random_pick::RandomPick;
use crate::components::recommendations::SmartRecommendations;
use crate::components::stats_card::StatsCard;
use crate::components::upsell_modal::PremiumUpsellModal;
use crate::hooks::use_slot::use_slot;
use crate::Screen;
use crate::WATCHLIST_SLOT;
use api::entry::WatchlistEntry;
use api::media::MediaKind;
use api::media::WatchStatus;
use api::metadata_providers::CatalogTitle;
use api::watchlist::Watchlist;
use chrono::Utc;
use dioxus::prelude::*;
use std::str::FromStr;

/// Caller-generated entry id for manually added titles.
fn new_entry_id(now: chrono::DateTime<Utc>) -> String {
    format!("manual-{}", now.timestamp_millis())
}

#[allow(non_snake_case)]
#[component]
pub fn LibraryScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut active_screen = use_context::<Signal<Screen>>();
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let mut search = use_signal(String::new);
    let mut kind_filter = use_signal(|| None::<MediaKind>);
    let mut active_tab = use_signal(|| WatchStatus::Watching);
    let mut dialog_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<WatchlistEntry>);
    let mut upsell_open = use_signal(|| false);

    let free_limit = app_state.free_limit();
    let is_premium = app_state_mut.is_premium();
    let current = list.get();
    let stats = current.stats();
    let remaining = free_limit.saturating_sub(current.len());

    let filtered: Vec<WatchlistEntry> = current
        .iter()
        .filter(|entry| entry.matches_query(&search.read()))
        .filter(|entry| kind_filter().is_none_or(|kind| entry.kind == kind))
        .cloned()
        .collect();
    let tab_count = |status: WatchStatus| filtered.iter().filter(|e| e.status == status).count();
    let visible: Vec<WatchlistEntry> = filtered
        .iter()
        .filter(|entry| entry.status == active_tab())
        .cloned()
        .collect();

    let save_list = list.clone();
    let on_save = use_callback(move |draft: EntryDraft| {
        let mut next = save_list.get();
        let now = Utc::now();
        let premium_now = app_state_mut.subscription.peek().is_active();

        let result = match editing.peek().as_ref().cloned() {
            Some(mut entry) => {
                entry.title = draft.title;
                entry.kind = draft.kind;
                entry.status = draft.status;
                entry.rating = draft.rating;
                entry.year = draft.year;
                entry.genres = draft.genres;
                entry.note = draft.note;
                next.update(entry, now).map(|_| "Updated")
            }
            None => {
                if !premium_now && next.len() >= free_limit {
                    upsell_open.set(true);
                    return;
                }
                let mut entry =
                    WatchlistEntry::new(new_entry_id(now), draft.title, draft.kind, draft.status, now);
                entry.rating = draft.rating;
                entry.year = draft.year;
                entry.genres = draft.genres;
                entry.note = draft.note;
                next.add(entry, now).map(|_| "Added to your list")
            }
        };
        editing.set(None);

        match result {
            Ok(headline) => match save_list.set(&next) {
                Ok(()) => app_state_mut
                    .push_notice(Notice::info(headline, "Every open view is up to date.")),
                Err(err) => app_state_mut
                    .push_notice(Notice::error("Could not save your list", err.to_string())),
            },
            Err(err) => {
                app_state_mut.push_notice(Notice::error("Could not change your list", err.to_string()))
            }
        }
    });

    let delete_list = list.clone();
    let on_delete = use_callback(move |id: String| {
        let mut next = delete_list.get();
        let Some(removed) = next.remove(&id) else {
            return;
        };
        match delete_list.set(&next) {
            Ok(()) => app_state_mut.push_notice(Notice::info(
                "Removed",
                format!("\"{}\" is no longer tracked.", removed.title),
            )),
            Err(err) => {
                app_state_mut.push_notice(Notice::error("Could not save your list", err.to_string()))
            }
        }
    });

    let add_list = list.clone();
    let on_catalog_add = use_callback(move |title: CatalogTitle| {
        let is_active = app_state_mut.subscription.peek().is_active();
        match add_from_catalog(&add_list, &title, free_limit, is_active) {
            Ok(AddOutcome::Added) => app_state_mut.push_notice(Notice::info(
                "Added to your list",
                format!("\"{}\" landed in Plan to Watch.", title.title),
            )),
            Ok(AddOutcome::AlreadyTracked) => app_state_mut.push_notice(Notice::info(
                "Already tracked",
                format!("\"{}\" is on your list.", title.title),
            )),
            Ok(AddOutcome::LimitReached) => upsell_open.set(true),
            Err(err) => {
                app_state_mut.push_notice(Notice::error("Could not save your list", err.to_string()))
            }
        }
    });

    let empty_hint = match active_tab() {
        WatchStatus::Watching => "Start tracking what you're currently watching.",
        WatchStatus::Planned => "Add titles you want to watch later.",
        WatchStatus::Finished => "Mark items as finished to see them here.",
    };

    rsx! {
        div {
            class: "screen-header",
            h2 { "My List" }
            div {
                class: "screen-actions",
                RandomPick { on_add: on_catalog_add }
                Button {
                    on_click: move |_| {
                        editing.set(None);
                        dialog_open.set(true);
                    },
                    if is_premium {
                        "+ Add Media"
                    } else {
                        "+ Add Media ({remaining} left)"
                    }
                }
            }
        }

        div {
            class: "grid",
            StatsCard { title: "Total Watched".to_string(), value: stats.total_watched.to_string() }
            StatsCard { title: "Currently Watching".to_string(), value: stats.total_watching.to_string() }
            StatsCard { title: "Plan to Watch".to_string(), value: stats.total_planned.to_string() }
            StatsCard {
                title: "Average Rating".to_string(),
                value: if stats.average_rating > 0.0 { format!("{:.1}", stats.average_rating) } else { "—".to_string() },
                subtitle: if stats.average_rating > 0.0 { "/10".to_string() } else { "No ratings yet".to_string() },
            }
        }

        div {
            class: "grid",
            input {
                r#type: "search",
                placeholder: "Search titles or genres...",
                value: "{search}",
                oninput: move |evt| search.set(evt.value()),
            }
            select {
                onchange: move |evt| {
                    kind_filter.set(MediaKind::from_str(&evt.value()).ok());
                },
                option { value: "all", "All Types" }
                option { value: "movie", "Movies Only" }
                option { value: "series", "Series Only" }
            }
        }

        nav {
            class: "status-tabs",
            ul {
                for status in [WatchStatus::Watching, WatchStatus::Planned, WatchStatus::Finished] {
                    li {
                        a {
                            href: "#",
                            class: if active_tab() == status { "active-tab" } else { "" },
                            onclick: move |evt| {
                                evt.prevent_default();
                                active_tab.set(status);
                            },
                            "{status.label()} ({tab_count(status)})"
                        }
                    }
                }
            }
        }

        if visible.is_empty() {
            Card {
                div {
                    class: "empty-state",
                    h3 { "No items in {active_tab().label()}" }
                    p { class: "muted", "{empty_hint}" }
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: move |_| dialog_open.set(true),
                        "+ Add First Item"
                    }
                }
            }
        } else {
            div {
                class: "card-row",
                for entry in visible {
                    MediaCard {
                        key: "{entry.id}",
                        entry: entry.clone(),
                        on_edit: move |entry: WatchlistEntry| {
                            editing.set(Some(entry));
                            dialog_open.set(true);
                        },
                        on_delete: on_delete,
                    }
                }
            }
        }

        SmartRecommendations { on_add: on_catalog_add }

        AddMediaDialog {
            is_open: dialog_open,
            edit: editing,
            on_save: on_save,
        }
        PremiumUpsellModal {
            is_open: upsell_open,
            free_limit,
            on_upgrade: move |_| {
                upsell_open.set(false);
                active_screen.set(Screen::Premium);
            },
        }
    }
}
