use crate::components::pico::Badge;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Modal;
use crate::components::pico::SelectInput;
use crate::components::pico::StarRating;
use crate::components::pico::TextArea;
use crate::components::pico::TextInput;
use api::media::MediaKind;
use api::media::WatchStatus;
use api::rating::Rating;
use dioxus::prelude::*;
use std::str::FromStr;

/// What the add/edit form produces; the screen owning the watchlist turns
/// it into a full entry (ids and timestamps are not the form's business).
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub kind: MediaKind,
    pub status: WatchStatus,
    pub rating: Option<Rating>,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub note: Option<String>,
}

/// Genres offered as one-click chips; anything else goes in the free-text
/// field.
const COMMON_GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Documentary",
    "Drama", "Fantasy", "Horror", "Mystery", "Romance", "Sci-Fi",
    "Thriller", "War", "Western", "Biography", "Family", "Musical",
];

/// The add/edit form for a tracked title.
///
/// When `edit` holds an entry the form opens pre-filled; otherwise it is
/// a blank "add" form. The caller decides what happens with the draft.
#[component]
pub fn AddMediaDialog(
    is_open: Signal<bool>,
    edit: ReadOnlySignal<Option<api::entry::WatchlistEntry>>,
    on_save: EventHandler<EntryDraft>,
) -> Element {
    let mut title = use_signal(String::new);
    let mut kind = use_signal(MediaKind::default);
    let mut status = use_signal(WatchStatus::default);
    let mut rating = use_signal(|| 0u8);
    let mut year = use_signal(String::new);
    let mut note = use_signal(String::new);
    let mut selected_genres = use_signal(Vec::<String>::new);
    let mut custom_genre = use_signal(String::new);

    // Re-seed the form whenever the edit target changes.
    use_effect(move || {
        let target = edit.read().as_ref().cloned();
        match target {
            Some(entry) => {
                title.set(entry.title);
                kind.set(entry.kind);
                status.set(entry.status);
                rating.set(entry.rating.map(|r| r.get()).unwrap_or(0));
                year.set(entry.year.map(|y| y.to_string()).unwrap_or_default());
                note.set(entry.note.unwrap_or_default());
                selected_genres.set(entry.genres);
            }
            None => {
                title.set(String::new());
                kind.set(MediaKind::default());
                status.set(WatchStatus::default());
                rating.set(0);
                year.set(String::new());
                note.set(String::new());
                selected_genres.set(Vec::new());
            }
        }
        custom_genre.set(String::new());
    });

    let mut add_genre = move |genre: String| {
        let genre = genre.trim().to_string();
        if genre.is_empty() || selected_genres.read().contains(&genre) {
            return;
        }
        selected_genres.write().push(genre);
    };

    let submit = move |_| {
        let trimmed = title.read().trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        let note_text = note.read().trim().to_string();
        on_save.call(EntryDraft {
            title: trimmed,
            kind: kind(),
            status: status(),
            rating: Rating::new(rating()).ok(),
            year: year.read().trim().parse().ok(),
            genres: selected_genres.read().clone(),
            note: (!note_text.is_empty()).then_some(note_text),
        });
        is_open.set(false);
    };

    let dialog_title = if edit.read().is_some() { "Edit Title" } else { "Add to Your List" };

    rsx! {
        Modal {
            is_open,
            title: "{dialog_title}",
            TextInput {
                label: "Title".to_string(),
                value: title(),
                placeholder: "e.g. The Thing".to_string(),
                on_input: move |value| title.set(value),
            }
            div {
                class: "grid",
                SelectInput {
                    label: "Kind".to_string(),
                    options: vec![
                        ("movie".to_string(), "Movie".to_string()),
                        ("series".to_string(), "Series".to_string()),
                    ],
                    selected: <&'static str>::from(kind()).to_lowercase(),
                    on_change: move |value: String| {
                        if let Ok(parsed) = MediaKind::from_str(&value) {
                            kind.set(parsed);
                        }
                    },
                }
                SelectInput {
                    label: "Status".to_string(),
                    options: vec![
                        ("watching".to_string(), "Watching".to_string()),
                        ("planned".to_string(), "Plan to Watch".to_string()),
                        ("finished".to_string(), "Finished".to_string()),
                    ],
                    selected: <&'static str>::from(status()).to_lowercase(),
                    on_change: move |value: String| {
                        if let Ok(parsed) = WatchStatus::from_str(&value) {
                            status.set(parsed);
                        }
                    },
                }
            }
            div {
                class: "grid",
                TextInput {
                    label: "Year".to_string(),
                    value: year(),
                    input_type: "number".to_string(),
                    placeholder: "1982".to_string(),
                    on_input: move |value| year.set(value),
                }
                label {
                    "Rating",
                    div {
                        StarRating {
                            value: rating(),
                            on_select: move |star| rating.set(star),
                        }
                        if rating() > 0 {
                            a {
                                href: "#",
                                onclick: move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    rating.set(0);
                                },
                                small { "clear" }
                            }
                        }
                    }
                }
            }
            label {
                "Genres",
                div {
                    class: "genre-chips",
                    for genre in selected_genres.read().iter().cloned() {
                        a {
                            href: "#",
                            onclick: {
                                let genre = genre.clone();
                                move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    selected_genres.write().retain(|g| g != &genre);
                                }
                            },
                            Badge { label: format!("{genre} ✕") }
                        }
                    }
                }
                div {
                    class: "genre-chips",
                    for genre in COMMON_GENRES.iter().filter(|g| !selected_genres.read().iter().any(|s| s == *g)) {
                        a {
                            href: "#",
                            onclick: {
                                let genre = genre.to_string();
                                move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    add_genre(genre.clone());
                                }
                            },
                            Badge { label: genre.to_string(), muted: true }
                        }
                    }
                }
            }
            div {
                class: "grid",
                TextInput {
                    label: "Custom genre".to_string(),
                    value: custom_genre(),
                    placeholder: "Giallo".to_string(),
                    on_input: move |value| custom_genre.set(value),
                }
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| {
                        let genre = custom_genre.read().clone();
                        add_genre(genre);
                        custom_genre.set(String::new());
                    },
                    "Add genre"
                }
            }
            TextArea {
                label: "Notes".to_string(),
                value: note(),
                placeholder: "Anything worth remembering".to_string(),
                on_input: move |value| note.set(value),
            }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| is_open.set(false),
                    "Cancel"
                }
                Button {
                    on_click: submit,
                    if edit.read().is_some() { "Save Changes" } else { "Add Title" }
                }
            }
        }
    }
}
