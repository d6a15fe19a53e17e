use crate::components::catalog_card::CatalogCard;
use crate::components::pico::Card;
use crate::hooks::use_slot::use_slot;
use crate::WATCHLIST_SLOT;
use api::recommend::TasteProfile;
use api::watchlist::Watchlist;
use dioxus::prelude::*;

/// Personalized picks, driven by the same persisted watchlist slot the
/// library renders from. Mounting this anywhere yields the same data; a
/// write from any other component refreshes the profile here too.
#[component]
pub fn SmartRecommendations(on_add: EventHandler<api::metadata_providers::CatalogTitle>) -> Element {
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let list_for_profile = list.clone();
    let profile = use_memo(move || TasteProfile::from_watchlist(&list_for_profile.signal().read()));
    let mut recommendations = use_resource(move || {
        let profile = profile();
        async move { api::recommendations(profile).await }
    });

    let list_for_filter = list.clone();

    rsx! {
        Card {
            h3 { "Picked For You" }
            match &*recommendations.read() {
                None => rsx! {
                    p { "Looking for something you'd like..." }
                    progress {}
                },
                Some(Err(e)) => rsx! {
                    p { "Could not load recommendations: {e}" }
                    button { onclick: move |_| recommendations.restart(), "Retry" }
                },
                Some(Ok(picks)) if picks.is_empty() => rsx! {
                    p { class: "muted", "Add a few titles with genres and the picks will appear here." }
                },
                Some(Ok(picks)) => rsx! {
                    div {
                        class: "card-row",
                        for pick in picks.iter().cloned() {
                            CatalogCard {
                                key: "{pick.title.id}",
                                title: pick.title.clone(),
                                in_collection: list_for_filter.get().contains_title(&pick.title.title),
                                reason: pick.reason.clone(),
                                on_add: move |title| on_add.call(title),
                            }
                        }
                    }
                },
            }
        }
    }
}
