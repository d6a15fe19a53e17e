use crate::components::pico::Card;
use dioxus::prelude::*;

/// One headline number on the library header or the insights screen.
#[component]
pub fn StatsCard(title: String, value: String, #[props(optional)] subtitle: Option<String>) -> Element {
    rsx! {
        Card {
            div {
                class: "stats-card",
                small { "{title}" }
                h3 { "{value}" }
                if let Some(subtitle) = subtitle {
                    small { class: "muted", "{subtitle}" }
                }
            }
        }
    }
}
