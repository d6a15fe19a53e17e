//=============================================================================
// File: src/screens/premium.rs
//=============================================================================
//! The premium pitch and the checkout entry point. The actual payment
//! happens on the provider's hosted page; we only fetch the redirect URL.

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::Notice;
use crate::compat;
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::hooks::use_slot::use_slot;
use crate::hooks::use_subscription_checker::use_subscription_checker;
use crate::SESSION_SLOT;
use dioxus::prelude::*;

#[allow(non_snake_case)]
#[component]
pub fn PremiumScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let checker = use_subscription_checker();
    let session = use_slot::<String>(SESSION_SLOT, String::new);

    let free_limit = app_state.free_limit();
    let is_premium = checker.is_premium();
    let mut in_flight = use_signal(|| false);

    let session_for_upgrade = session.clone();
    let start_checkout = move |_| {
        let token = session_for_upgrade.get();
        if token.trim().is_empty() {
            app_state_mut.push_notice(Notice::error(
                "Sign in first",
                "Connect your account under Settings before upgrading.",
            ));
            return;
        }
        in_flight.set(true);
        spawn(async move {
            match api::create_checkout(token).await {
                Ok(target) => {
                    if !compat::navigate_to(&target.url) {
                        app_state_mut.push_notice(Notice::info(
                            "Open this link to finish checkout",
                            target.url,
                        ));
                    }
                }
                Err(err) => {
                    app_state_mut.push_notice(Notice::error("Checkout failed", err.to_string()));
                }
            }
            in_flight.set(false);
        });
    };

    rsx! {
        div {
            class: "screen-header",
            h2 { "Premium" }
        }

        if is_premium {
            Card {
                h3 { "You're premium 🎉" }
                p { "Your list has no size limit. Manage the subscription from Settings." }
            }
        } else {
            Card {
                h3 { "Track without limits" }
                p {
                    "Free accounts hold up to {free_limit} titles. "
                    "Premium removes the cap for a small monthly fee."
                }
                Grid {
                    div {
                        h5 { "Unlimited list" }
                        p { class: "muted", "Every movie and series you'll ever watch, in one place." }
                    }
                    div {
                        h5 { "Keep your history" }
                        p { class: "muted", "Ratings, notes, and streaks stay with your collection." }
                    }
                    div {
                        h5 { "Cancel anytime" }
                        p { class: "muted", "The billing portal is one click away in Settings." }
                    }
                }
                Button {
                    disabled: in_flight(),
                    on_click: start_checkout,
                    if in_flight() { "Contacting the payment provider..." } else { "Upgrade now" }
                }
            }
        }
    }
}
