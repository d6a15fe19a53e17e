use crate::components::pico::Badge;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::StarRating;
use api::entry::WatchlistEntry;
use dioxus::prelude::*;

/// A new, self-contained component for rendering a single tracked title.
#[component]
pub fn MediaCard(
    entry: WatchlistEntry,
    on_edit: EventHandler<WatchlistEntry>,
    on_delete: EventHandler<String>,
) -> Element {
    let mut is_hovered = use_signal(|| false);

    let year = entry.year.map(|y| y.to_string()).unwrap_or_default();
    let poster = entry
        .poster
        .as_deref()
        .map(|path| format!("https://image.tmdb.org/t/p/w500{path}"));

    rsx! {
        article {
            class: "media-card",
            onmouseenter: move |_| is_hovered.set(true),
            onmouseleave: move |_| is_hovered.set(false),

            div {
                class: "media-card-poster",
                match &poster {
                    Some(url) => rsx! { img { src: "{url}", alt: "{entry.title}", loading: "lazy" } },
                    None => rsx! { div { class: "poster-placeholder", "🎬" } },
                }
            }
            div {
                class: "media-card-body",
                strong { title: "{entry.title}", "{entry.title}" }
                div {
                    class: "media-card-meta",
                    Badge { label: entry.kind.label().to_string() }
                    if !year.is_empty() {
                        small { class: "muted", "{year}" }
                    }
                }
                if let Some(rating) = entry.rating {
                    StarRating { value: rating.get() }
                }
                div {
                    class: "media-card-genres",
                    for genre in entry.genres.iter().take(3) {
                        Badge { label: genre.clone(), muted: true }
                    }
                }
                if let Some(note) = &entry.note {
                    small { class: "muted media-card-note", "{note}" }
                }
            }
            if is_hovered() {
                div {
                    class: "media-card-actions",
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: {
                            let entry = entry.clone();
                            move |_| on_edit.call(entry.clone())
                        },
                        "Edit"
                    }
                    Button {
                        button_type: ButtonType::Contrast,
                        outline: true,
                        on_click: {
                            let id = entry.id.clone();
                            move |_| on_delete.call(id.clone())
                        },
                        "Remove"
                    }
                }
            }
        }
    }
}
