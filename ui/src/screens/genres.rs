//=============================================================================
// File: src/screens/genres.rs
//=============================================================================
//! Genre browser: pick a kind and a genre, sort the results, or search the
//! whole catalog instead; adds go straight into the shared watchlist slot.

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::Notice;
use crate::collection::add_from_catalog;
use crate::collection::AddOutcome;
use crate::components::catalog_card::CatalogCard;
use crate::components::pico::Card;
use crate::components::pico::SelectInput;
use crate::hooks::use_slot::use_slot;
use crate::Screen;
use crate::WATCHLIST_SLOT;
use api::genres;
use api::media::CatalogSort;
use api::media::MediaKind;
use api::metadata_providers::CatalogTitle;
use api::watchlist::Watchlist;
use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn GenresScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut active_screen = use_context::<Signal<Screen>>();
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let mut kind = use_signal(|| MediaKind::Movie);
    let mut genre_id = use_signal(|| genres::MOVIE_GENRES[0].0);
    let mut sort = use_signal(CatalogSort::default);
    let mut search = use_signal(String::new);
    // The query the resource actually runs; set on submit, cleared when the
    // kind or genre changes.
    let mut submitted = use_signal(String::new);

    let mut results = use_resource(move || async move {
        let query = submitted();
        if query.trim().is_empty() {
            api::discover(kind(), genre_id(), sort(), 1).await
        } else {
            api::search_catalog(kind(), query).await
        }
    });

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

    let genre_table = match kind() {
        MediaKind::Movie => genres::MOVIE_GENRES,
        MediaKind::Series => genres::TV_GENRES,
    };
    let tracked = list.get();

    rsx! {
        div {
            class: "screen-header",
            h2 { "Browse by Genre" }
            nav {
                class: "status-tabs",
                ul {
                    for option in [MediaKind::Movie, MediaKind::Series] {
                        li {
                            a {
                                href: "#",
                                class: if kind() == option { "active-tab" } else { "" },
                                onclick: move |evt| {
                                    evt.prevent_default();
                                    kind.set(option);
                                    search.set(String::new());
                                    submitted.set(String::new());
                                    // Keep the selection valid for the new kind.
                                    let table = match option {
                                        MediaKind::Movie => genres::MOVIE_GENRES,
                                        MediaKind::Series => genres::TV_GENRES,
                                    };
                                    if !table.iter().any(|(id, _)| *id == genre_id()) {
                                        genre_id.set(table[0].0);
                                    }
                                },
                                "{option.label()}s"
                            }
                        }
                    }
                }
            }
        }

        div {
            class: "grid",
            SelectInput {
                label: "Genre".to_string(),
                options: genre_table
                    .iter()
                    .map(|(id, label)| (id.to_string(), label.to_string()))
                    .collect::<Vec<_>>(),
                selected: genre_id().to_string(),
                on_change: move |value: String| {
                    if let Ok(id) = value.parse() {
                        genre_id.set(id);
                        search.set(String::new());
                        submitted.set(String::new());
                    }
                },
            }
            SelectInput {
                label: "Sort".to_string(),
                options: vec![
                    ("popularity".to_string(), CatalogSort::Popularity.label().to_string()),
                    ("rating".to_string(), CatalogSort::Rating.label().to_string()),
                    ("release_date".to_string(), CatalogSort::ReleaseDate.label().to_string()),
                ],
                selected: match sort() {
                    CatalogSort::Popularity => "popularity".to_string(),
                    CatalogSort::Rating => "rating".to_string(),
                    CatalogSort::ReleaseDate => "release_date".to_string(),
                },
                on_change: move |value: String| {
                    sort.set(match value.as_str() {
                        "rating" => CatalogSort::Rating,
                        "release_date" => CatalogSort::ReleaseDate,
                        _ => CatalogSort::Popularity,
                    });
                },
            }
            // Submitting searches the whole catalog; an empty submit goes
            // back to browsing the selected genre.
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submitted.set(search.read().trim().to_string());
                },
                input {
                    r#type: "search",
                    placeholder: "Search the whole catalog...",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }
        }

        match &*results.read() {
            None => rsx! {
                Card {
                    p { "Fetching titles..." }
                    progress {}
                }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Error" }
                    p { "Failed to load these titles: {e}" }
                    button { onclick: move |_| results.restart(), "Retry" }
                }
            },
            Some(Ok(titles)) => rsx! {
                if !submitted.read().is_empty() {
                    p {
                        class: "muted",
                        "Results for \"{submitted}\". "
                        a {
                            href: "#",
                            onclick: move |evt| {
                                evt.prevent_default();
                                search.set(String::new());
                                submitted.set(String::new());
                            },
                            "back to browsing"
                        }
                    }
                }
                if titles.is_empty() {
                    Card { p { class: "muted", "Nothing here matches." } }
                } else {
                    div {
                        class: "card-row",
                        for title in titles.iter().cloned() {
                            CatalogCard {
                                key: "{title.id}",
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
