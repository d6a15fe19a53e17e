//=============================================================================
// File: src/screens/settings.rs
//=============================================================================
//! Account and device settings: theme, the identity-provider session
//! token, subscription management, and the local data controls.

use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::Notice;
use crate::compat;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::SelectInput;
use crate::components::pico::TextInput;
use crate::hooks::use_slot::use_slot;
use crate::hooks::use_subscription_checker::use_subscription_checker;
use crate::SESSION_SLOT;
use crate::THEME_SLOT;
use crate::WATCHLIST_SLOT;
use api::prefs::library_preference::ThemeMode;
use api::watchlist::Watchlist;
use dioxus::prelude::*;
use std::str::FromStr;

#[allow(non_snake_case)]
#[component]
pub fn SettingsScreen() -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let checker = use_subscription_checker();
    let theme = use_slot::<ThemeMode>(THEME_SLOT, ThemeMode::default);
    let session = use_slot::<String>(SESSION_SLOT, String::new);
    let list = use_slot::<Watchlist>(WATCHLIST_SLOT, Watchlist::new);

    let mut confirm_clear = use_signal(|| false);
    let mut portal_in_flight = use_signal(|| false);

    let theme_for_select = theme.clone();
    let session_for_input = session.clone();
    let session_for_refresh = session.clone();
    let session_for_portal = session.clone();
    let list_for_clear = list.clone();

    let open_portal = move |_| {
        let token = session_for_portal.get();
        if token.trim().is_empty() {
            app_state_mut.push_notice(Notice::error(
                "Sign in first",
                "Paste your session token below to manage billing.",
            ));
            return;
        }
        portal_in_flight.set(true);
        spawn(async move {
            match api::customer_portal(token).await {
                Ok(target) => {
                    if !compat::navigate_to(&target.url) {
                        app_state_mut
                            .push_notice(Notice::info("Open this link to manage billing", target.url));
                    }
                }
                Err(err) => {
                    app_state_mut.push_notice(Notice::error("Billing portal failed", err.to_string()));
                }
            }
            portal_in_flight.set(false);
        });
    };

    let entry_count = list.get().len();
    let subscription_label = checker.status().label();

    rsx! {
        div {
            class: "screen-header",
            h2 { "Settings" }
        }

        Card {
            h3 { "Appearance" }
            SelectInput {
                label: "Theme".to_string(),
                options: vec![
                    ("dark".to_string(), "Dark".to_string()),
                    ("light".to_string(), "Light".to_string()),
                ],
                selected: theme.get().attribute().to_string(),
                on_change: move |value: String| {
                    let Ok(mode) = ThemeMode::from_str(&value) else {
                        return;
                    };
                    // Persisting also flips the live theme signal through
                    // the slot subscription in LoadedApp.
                    if let Err(err) = theme_for_select.set(&mode) {
                        app_state_mut
                            .push_notice(Notice::error("Could not save the theme", err.to_string()));
                    }
                },
            }
        }

        Card {
            h3 { "Account" }
            p {
                class: "muted",
                "Sign-in happens with your identity provider; paste the session's access token "
                "here so billing requests can be made on your behalf."
            }
            TextInput {
                label: "Access token".to_string(),
                value: session.get(),
                input_type: "password".to_string(),
                on_input: move |value: String| {
                    if let Err(err) = session_for_input.set(&value) {
                        app_state_mut
                            .push_notice(Notice::error("Could not save the token", err.to_string()));
                    }
                },
            }
        }

        Card {
            h3 { "Subscription" }
            p { "Current plan: " strong { "{subscription_label}" } }
            div {
                class: "screen-actions",
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| {
                        let token = session_for_refresh.get();
                        spawn(async move {
                            checker.refresh(Some(token)).await;
                        });
                    },
                    "Refresh status"
                }
                Button {
                    disabled: portal_in_flight(),
                    on_click: open_portal,
                    "Manage subscription"
                }
            }
        }

        Card {
            h3 { "Your Data" }
            p { class: "muted", "{entry_count} titles stored in this browser's local storage." }
            if confirm_clear() {
                p { strong { "This wipes the whole list on this device. Sure?" } }
                div {
                    class: "screen-actions",
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: move |_| confirm_clear.set(false),
                        "Keep my list"
                    }
                    Button {
                        button_type: ButtonType::Contrast,
                        on_click: move |_| {
                            confirm_clear.set(false);
                            match list_for_clear.set(&Watchlist::new()) {
                                Ok(()) => app_state_mut
                                    .push_notice(Notice::info("List cleared", "Every view is empty now.")),
                                Err(err) => app_state_mut.push_notice(Notice::error(
                                    "Could not clear the list",
                                    err.to_string(),
                                )),
                            }
                        },
                        "Yes, clear everything"
                    }
                }
            } else {
                Button {
                    button_type: ButtonType::Contrast,
                    outline: true,
                    on_click: move |_| confirm_clear.set(true),
                    "Clear my list"
                }
            }
        }
    }
}
