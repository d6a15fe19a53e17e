use api::subscription::SubscriptionStatus;
use dioxus::prelude::*;

/// A handle on the app-wide subscription status.
///
/// The status signal lives in the context; this wrapper owns the refresh
/// logic so screens can trigger a re-check after payment flows without
/// duplicating the token plumbing.
#[derive(Clone, Copy)]
pub struct SubscriptionChecker {
    status: Signal<SubscriptionStatus>,
}

impl SubscriptionChecker {
    pub fn status(&self) -> SubscriptionStatus {
        *self.status.read()
    }

    pub fn is_premium(&self) -> bool {
        self.status.read().is_active()
    }

    /// Asks the billing endpoint for the current state.
    /// - Without a token there is nothing to check; the account is free tier.
    /// - On endpoint failure the last known status is kept, so a transient
    ///   outage never downgrades a paying user mid-session.
    pub async fn refresh(mut self, access_token: Option<String>) {
        let Some(token) = access_token.filter(|t| !t.trim().is_empty()) else {
            self.status.set(SubscriptionStatus::Inactive);
            return;
        };
        match api::check_subscription(token).await {
            Ok(status) => self.status.set(status),
            Err(err) => {
                dioxus_logger::tracing::warn!("subscription check failed: {err}");
            }
        }
    }
}

pub fn use_subscription_checker() -> SubscriptionChecker {
    let status = use_context::<Signal<SubscriptionStatus>>();
    SubscriptionChecker { status }
}
