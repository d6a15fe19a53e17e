use crate::components::pico::Badge;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use api::metadata_providers::CatalogTitle;
use dioxus::prelude::*;

/// One catalog listing on the trending, browse, or recommendation rows,
/// with an add-to-list action.
#[component]
pub fn CatalogCard(
    title: CatalogTitle,
    in_collection: bool,
    #[props(optional)] reason: Option<String>,
    on_add: EventHandler<CatalogTitle>,
) -> Element {
    let year = title.year.map(|y| y.to_string()).unwrap_or_default();
    let vote = format!("{:.1}", title.vote_average);
    let poster = title.poster_url();

    rsx! {
        article {
            class: "media-card",
            div {
                class: "media-card-poster",
                match &poster {
                    Some(url) => rsx! { img { src: "{url}", alt: "{title.title}", loading: "lazy" } },
                    None => rsx! { div { class: "poster-placeholder", "🎬" } },
                }
            }
            div {
                class: "media-card-body",
                strong { title: "{title.title}", "{title.title}" }
                div {
                    class: "media-card-meta",
                    Badge { label: title.kind.label().to_string() }
                    if !year.is_empty() {
                        small { class: "muted", "{year}" }
                    }
                    small { class: "muted", "★ {vote}" }
                }
                div {
                    class: "media-card-genres",
                    for genre in title.genre_labels().iter().take(3) {
                        Badge { label: genre.clone(), muted: true }
                    }
                }
                if let Some(reason) = &reason {
                    small { class: "muted media-card-note", "{reason}" }
                }
                if in_collection {
                    small { class: "muted", "✓ In your list" }
                } else {
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: {
                            let title = title.clone();
                            move |_| on_add.call(title.clone())
                        },
                        "+ Add"
                    }
                }
            }
        }
    }
}
