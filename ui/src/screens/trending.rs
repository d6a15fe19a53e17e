//=============================================================================
// File: src/screens/trending.rs
//=============================================================================
//! Trending movies and series, with one-click adds into the shared
//! watchlist slot. This screen mounts its own slot binding; an add here
//! is visible on the library screen without a reload, and vice versa.

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::Notice;
use crate::collection::add_from_catalog;
use crate::collection::AddOutcome;
use crate::components::catalog_card::CatalogCard;
use crate::components::pico::Card;
use crate::hooks::use_slot::use_slot;
use crate::Screen;
use crate::WATCHLIST_SLOT;
use api::media::TrendWindow;
use api::metadata_providers::CatalogTitle;
use api::watchlist::Watchlist;
use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn TrendingScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut active_screen = use_context::<Signal<Screen>>();
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let mut window = use_signal(TrendWindow::default);
    let mut lists = use_resource(move || async move { api::trending(window()).await });

    let free_limit = app_state.free_limit();
    let add_list = list.clone();
    let on_add = use_callback(move |title: CatalogTitle| {
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
            Ok(AddOutcome::LimitReached) => {
                app_state_mut.push_notice(Notice::info(
                    "Your list is full",
                    "Upgrade to premium to keep adding.",
                ));
                active_screen.set(Screen::Premium);
            }
            Err(err) => {
                app_state_mut.push_notice(Notice::error("Could not save your list", err.to_string()))
            }
        }
    });

    let tracked = list.get();
    let region = app_state.prefs.library_preference().region.clone();

    rsx! {
        div {
            class: "screen-header",
            div {
                h2 { "Trending" }
                small { class: "muted", "Region: {region}" }
            }
            nav {
                class: "status-tabs",
                ul {
                    for option in [TrendWindow::Day, TrendWindow::Week] {
                        li {
                            a {
                                href: "#",
                                class: if window() == option { "active-tab" } else { "" },
                                onclick: move |evt| {
                                    evt.prevent_default();
                                    window.set(option);
                                },
                                "{option.label()}"
                            }
                        }
                    }
                }
            }
        }

        match &*lists.read() {
            None => rsx! {
                Card {
                    p { "Loading what everyone is watching..." }
                    progress {}
                }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Error" }
                    p { "Failed to load trending titles: {e}" }
                    button { onclick: move |_| lists.restart(), "Retry" }
                }
            },
            Some(Ok(trending)) => rsx! {
                Card {
                    h3 { "Movies" }
                    div {
                        class: "card-row",
                        for title in trending.movies.iter().cloned() {
                            CatalogCard {
                                key: "movie-{title.id}",
                                title: title.clone(),
                                in_collection: tracked.contains_title(&title.title),
                                on_add: on_add,
                            }
                        }
                    }
                }
                Card {
                    h3 { "Series" }
                    div {
                        class: "card-row",
                        for title in trending.series.iter().cloned() {
                            CatalogCard {
                                key: "series-{title.id}",
                                title: title.clone(),
                                in_collection: tracked.contains_title(&title.title),
                                on_add: on_add,
                            }
                        }
                    }
                }
            },
        }
    }
}
