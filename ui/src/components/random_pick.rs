use crate::components::catalog_card::CatalogCard;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Modal;
use crate::hooks::use_slot::use_slot;
use crate::WATCHLIST_SLOT;
use api::recommend::TasteProfile;
use api::watchlist::Watchlist;
use dioxus::prelude::*;

/// The "surprise me" button and its result dialog. Every press asks the
/// server for one random title the user has not tracked yet.
#[component]
pub fn RandomPick(on_add: EventHandler<api::metadata_providers::CatalogTitle>) -> Element {
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);
    let mut is_open = use_signal(|| false);

    let list_for_profile = list.clone();
    let mut pick = use_resource(move || {
        let profile = TasteProfile::from_watchlist(&list_for_profile.signal().read());
        async move { api::surprise(profile).await }
    });

    let list_for_filter = list.clone();

    rsx! {
        Button {
            button_type: ButtonType::Secondary,
            outline: true,
            on_click: move |_| {
                pick.restart();
                is_open.set(true);
            },
            "🎲 Surprise Me"
        }
        Modal {
            is_open,
            title: "Tonight's Pick",
            match &*pick.read() {
                None => rsx! {
                    p { "Rolling the dice..." }
                    progress {}
                },
                Some(Err(e)) => rsx! {
                    p { "The catalog is not answering: {e}" }
                },
                Some(Ok(None)) => rsx! {
                    p { "Nothing new found this time. Roll again!" }
                },
                Some(Ok(Some(title))) => rsx! {
                    CatalogCard {
                        title: title.clone(),
                        in_collection: list_for_filter.get().contains_title(&title.title),
                        on_add: move |title| {
                            on_add.call(title);
                            is_open.set(false);
                        },
                    }
                },
            }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| pick.restart(),
                    "Roll again"
                }
            }
        }
    }
}
