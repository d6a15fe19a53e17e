use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::NoticeTone;
use dioxus::prelude::*;

/// Renders the current transient notice, if any, with a dismiss control.
/// Upstream-API failures and store write errors end up here; none of them
/// are fatal, so a banner is all they get.
#[component]
pub fn NoticeBanner() -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let Some(notice) = app_state_mut.notice.read().clone() else {
        return rsx! {};
    };

    let class = match notice.tone {
        NoticeTone::Info => "notice",
        NoticeTone::Error => "notice notice-error",
    };

    rsx! {
        article {
            class: "{class}",
            div {
                strong { "{notice.title}" }
                " "
                small { "{notice.detail}" }
            }
            a {
                href: "#",
                "aria-label": "Dismiss",
                onclick: move |evt| {
                    evt.prevent_default();
                    app_state_mut.notice.set(None);
                },
                "✕"
            }
        }
    }
}
