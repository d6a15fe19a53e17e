// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
mod collection;
pub mod compat;
mod components;
pub mod hooks;
mod screens;
pub mod store;

use api::prefs::user_prefs::UserPrefs;
use api::subscription::SubscriptionStatus;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::notices::NoticeBanner;
use components::pico::Button;
use components::pico::ButtonType;
use components::pico::Container;
use hooks::use_subscription_checker::use_subscription_checker;
use screens::genres::GenresScreen;
use screens::insights::InsightsScreen;
use screens::library::LibraryScreen;
use screens::premium::PremiumScreen;
use screens::settings::SettingsScreen;
use screens::trending::TrendingScreen;
use store::SlotStore;
use store::StorageEventBridge;

/// The durable slot holding the watchlist itself. Every screen binds to
/// this same key, which is what keeps them in lockstep.
pub const WATCHLIST_SLOT: &str = "binge-list-items";
/// The device-local theme override.
pub const THEME_SLOT: &str = "binge-theme";
/// The identity-provider access token used by billing calls.
pub const SESSION_SLOT: &str = "binge-session";

/// Enum to represent the different screens in our application.
#[derive(Clone, Copy, PartialEq, Default)]
pub enum Screen {
    #[default]
    Library,
    Trending,
    Genres,
    Insights,
    Premium,
    Settings,
}

impl Screen {
    /// Helper to get the display name for each screen.
    fn name(&self) -> &'static str {
        match self {
            Screen::Library => "My List",
            Screen::Trending => "Trending",
            Screen::Genres => "Browse",
            Screen::Insights => "Insights",
            Screen::Premium => "Premium",
            Screen::Settings => "Settings",
        }
    }
}

/// A list of all available screens for easy iteration.
const ALL_SCREENS: [Screen; 6] = [
    Screen::Library,
    Screen::Trending,
    Screen::Genres,
    Screen::Insights,
    Screen::Premium,
    Screen::Settings,
];

/// The desktop navigation tabs component.
#[component]
fn Tabs(active_screen: Signal<Screen>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for screen in ALL_SCREENS {
                    li {
                        a {
                            href: "#",
                            class: if *active_screen.read() == screen { "active-tab" } else { "" },
                            "aria-current": if *active_screen.read() == screen { "page" } else { "false" },
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

/// The narrow-viewport "hamburger" dropdown menu component.
#[component]
fn HamburgerMenu(active_screen: Signal<Screen>) -> Element {
    let mut is_open = use_signal(|| false);

    rsx! {
        div {
            class: "hamburger-menu-container",
            Button {
                button_type: ButtonType::Secondary,
                outline: true,
                on_click: move |_| is_open.toggle(),
                "≡"
            }
            if is_open() {
                div {
                    class: "menu-backdrop",
                    onclick: move |_| is_open.set(false),
                }
                article {
                    class: "custom-dropdown-menu",
                    for screen in ALL_SCREENS {
                        a {
                            class: if *active_screen.read() == screen { "custom-dropdown-item active-tab" } else { "custom-dropdown-item" },
                            href: "#",
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                                is_open.set(false);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    .app-main-container {
        min-height: 100vh;
        display: flex;
        flex-direction: column;
    }

    .screen-header {
        display: flex;
        align-items: center;
        justify-content: space-between;
        flex-wrap: wrap;
        gap: 0.5rem;
        margin-bottom: 1rem;
    }
    .screen-header h2 { margin: 0; }
    .screen-actions { display: flex; gap: 0.5rem; flex-wrap: wrap; }

    /* --- NAVIGATION TABS --- */
    .tab-menu ul { display: flex; gap: 0.25rem; flex-wrap: wrap; margin: 0; padding: 0; }
    .tab-menu a, .status-tabs a {
        text-decoration: none;
        color: var(--pico-muted-color);
        border-bottom: 3px solid transparent;
        padding: 0.25rem 0.75rem;
    }
    .tab-menu a.active-tab, .status-tabs a.active-tab {
        color: var(--pico-primary);
        border-bottom: 3px solid var(--pico-primary);
    }
    .status-tabs ul { display: flex; gap: 0.25rem; flex-wrap: wrap; margin: 0; padding: 0; list-style: none; }
    .status-tabs li { list-style: none; }

    /* --- CARD ROWS --- */
    .card-row {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(170px, 1fr));
        gap: 0.75rem;
    }
    .media-card { margin: 0; padding: 0.75rem; display: flex; flex-direction: column; gap: 0.35rem; }
    .media-card-poster img { width: 100%; border-radius: 0.5rem; aspect-ratio: 2 / 3; object-fit: cover; }
    .poster-placeholder {
        aspect-ratio: 2 / 3;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 2.5rem;
        background: var(--pico-muted-border-color);
        border-radius: 0.5rem;
    }
    .media-card-body { display: flex; flex-direction: column; gap: 0.25rem; }
    .media-card-meta { display: flex; align-items: center; gap: 0.4rem; }
    .media-card-genres { display: flex; flex-wrap: wrap; gap: 0.25rem; }
    .media-card-note { font-style: italic; }
    .media-card-actions { display: flex; gap: 0.35rem; }

    .badge {
        border: 1px solid var(--pico-primary);
        color: var(--pico-primary);
        border-radius: 1rem;
        padding: 0 0.5rem;
        white-space: nowrap;
    }
    .badge-muted { border-color: var(--pico-muted-border-color); color: var(--pico-muted-color); }

    .muted { color: var(--pico-muted-color); }

    .meter-row { display: grid; grid-template-columns: 7rem 1fr 2rem; align-items: center; gap: 0.5rem; }
    .meter-label { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }

    .star-rating .star { text-decoration: none; color: var(--pico-muted-color); }
    .star-rating .star.filled { color: goldenrod; }

    .stats-card { text-align: center; }
    .stats-card h3 { margin: 0.25rem 0 0 0; }

    .genre-chips { display: flex; flex-wrap: wrap; gap: 0.3rem; margin-bottom: 0.5rem; }
    .genre-chips a { text-decoration: none; }

    .empty-state { text-align: center; padding: 2rem 0; }

    .notice {
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 0.6rem 1rem;
        margin-bottom: 1rem;
        border-left: 4px solid var(--pico-primary);
    }
    .notice-error { border-left-color: #d93526; }
    .notice a { text-decoration: none; }

    /* --- MOBILE MENU --- */
    .hamburger-menu-container { position: relative; display: none; }
    .menu-backdrop { position: fixed; inset: 0; z-index: 10; }
    .custom-dropdown-menu {
        position: absolute;
        right: 0;
        z-index: 20;
        min-width: 11rem;
        padding: 0.5rem 0;
        margin: 0;
    }
    .custom-dropdown-item {
        display: block;
        padding: 0.5rem 1rem;
        text-decoration: none;
    }
    .custom-dropdown-item.active-tab {
        color: var(--pico-primary);
        font-weight: bold;
        border-left: 4px solid var(--pico-primary);
        padding-left: calc(1rem - 4px);
    }

    @media (max-width: 768px) {
        .tab-menu { display: none; }
        .hamburger-menu-container { display: block; }
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css",
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let initial_data_future =
        use_server_future(move || async move { api::get_user_prefs().await })?;

    // Read from the single future to ensure it's polled during SSR.
    let body = match &*initial_data_future.read() {
        Some(Ok(prefs)) => {
            rsx! {
                LoadedApp {
                    user_prefs: prefs.clone(),
                }
            }
        }
        Some(Err(e)) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
        _ => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(user_prefs: UserPrefs) -> Element {
    // Provide the stable, non-reactive AppState.
    let app_state = AppState::new(user_prefs.clone());
    use_context_provider(|| app_state.clone());

    // The one store instance every slot consumer shares, plus the bridge
    // feeding cross-tab storage events into it. Both live for the app's
    // whole lifetime.
    let slot_store = use_hook(|| SlotStore::new(store::default_backend()));
    use_context_provider(|| slot_store.clone());
    use_hook({
        let slot_store = slot_store.clone();
        move || std::rc::Rc::new(StorageEventBridge::bind(slot_store))
    });

    // Create signals for mutable state at the top level of the component.
    let subscription_signal = use_signal(|| SubscriptionStatus::Unknown);
    let notice_signal = use_signal(|| None::<app_state_mut::Notice>);

    // The theme slot doubles as the live theme signal: settings writes the
    // slot, the subscription updates this binding, the shell re-renders.
    let theme_slot = hooks::use_slot::use_slot(THEME_SLOT, {
        let prefs = user_prefs.clone();
        move || prefs.library_preference().theme
    });

    // Provide the mutable state by passing the already created signals.
    use_context_provider(|| subscription_signal);
    use_context_provider(|| AppStateMut {
        subscription: subscription_signal,
        theme: theme_slot.signal(),
        notice: notice_signal,
    });

    // Re-check the subscription on startup and every 30 seconds after,
    // using whatever token is currently stored.
    let checker = use_subscription_checker();
    let store_for_checker = slot_store.clone();
    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let store = store_for_checker.clone();
        async move {
            loop {
                let token = store.read(SESSION_SLOT, String::new());
                checker.refresh(Some(token)).await;
                compat::sleep(std::time::Duration::from_secs(30)).await;
            }
        }
    });

    let active_screen = use_signal(Screen::default);

    // --- Provide the active_screen signal to the context ---
    use_context_provider(|| active_screen);

    let theme_attribute = theme_slot.get().attribute();

    rsx! {
        div {
            class: "app-main-container",
            "data-theme": "{theme_attribute}",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 {
                                    style: "margin: 0; font-size: 1.5rem;",
                                    "Bingelist"
                                }
                            }
                        }
                        ul {
                            li {
                                Tabs {
                                    active_screen,
                                }
                            }
                            li {
                                HamburgerMenu {
                                    active_screen,
                                }
                            }
                        }
                    }
                }
                NoticeBanner {}
                div {
                    class: "content",
                    match active_screen() {
                        Screen::Library => rsx! {
                            LibraryScreen {}
                        },
                        Screen::Trending => rsx! {
                            TrendingScreen {}
                        },
                        Screen::Genres => rsx! {
                            GenresScreen {}
                        },
                        Screen::Insights => rsx! {
                            InsightsScreen {}
                        },
                        Screen::Premium => rsx! {
                            PremiumScreen {}
                        },
                        Screen::Settings => rsx! {
                            SettingsScreen {}
                        },
                    }
                }
            }
        }
    }
}
