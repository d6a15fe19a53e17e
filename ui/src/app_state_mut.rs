//! Defines the mutable, reactive state for the application's UI.

use api::prefs::library_preference::ThemeMode;
use api::subscription::SubscriptionStatus;
use dioxus::prelude::*;

/// How a transient notice should be styled.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum NoticeTone {
    #[default]
    Info,
    Error,
}

/// A short, dismissable message shown below the header.
#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub title: String,
    pub detail: String,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            tone: NoticeTone::Info,
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            tone: NoticeTone::Error,
        }
    }
}

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// This struct holds `Signal`s for any UI-related state that needs to change
/// and trigger automatic re-renders in the view. It is separate from the
/// core, immutable `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The most recent subscription check result.
    pub subscription: Signal<SubscriptionStatus>,
    /// The color scheme currently applied to the shell.
    pub theme: Signal<ThemeMode>,
    /// The latest notice to show, if any.
    pub notice: Signal<Option<Notice>>,
}

impl AppStateMut {
    pub fn is_premium(&self) -> bool {
        self.subscription.read().is_active()
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notice.set(Some(notice));
    }
}
