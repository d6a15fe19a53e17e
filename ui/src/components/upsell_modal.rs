use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Modal;
use dioxus::prelude::*;

/// Shown when a free account hits its entry limit.
#[component]
pub fn PremiumUpsellModal(is_open: Signal<bool>, free_limit: usize, on_upgrade: EventHandler<()>) -> Element {
    rsx! {
        Modal {
            is_open,
            title: "Your list is full",
            p {
                "Free accounts can track up to {free_limit} titles. "
                "Premium removes the limit."
            }
            ul {
                li { "Unlimited watchlist entries" }
                li { "Keep every rating, note, and streak" }
                li { "Cancel any time from the billing portal" }
            }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| is_open.set(false),
                    "Maybe later"
                }
                Button {
                    on_click: move |_| on_upgrade.call(()),
                    "Upgrade to Premium"
                }
            }
        }
    }
}
