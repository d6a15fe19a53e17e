//! Subscription state reported by the billing endpoints.

use serde::Deserialize;
use serde::Serialize;

/// Whether the account currently has a paid subscription.
///
/// `Unknown` is the client's state before the first successful check; it
/// gates nothing open and nothing closed beyond the free tier.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default, strum::EnumIs)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl SubscriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Premium",
            SubscriptionStatus::Inactive => "Free",
            SubscriptionStatus::Unknown => "Checking...",
        }
    }
}

/// A redirect URL handed back by the checkout and portal endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub url: String,
}
