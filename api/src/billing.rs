//! Server-side glue for the identity and payments providers.
//!
//! Both billing endpoints follow the same shape: verify the caller's
//! bearer token against the identity provider, then drive the payments
//! provider's REST API and hand back a redirect URL. Nothing is persisted
//! here; the payments provider is the source of truth for subscription
//! state.
#![allow(dead_code)]

use crate::subscription::SubscriptionStatus;
use crate::ApiError;
use anyhow::bail;
use anyhow::Context;
use serde::Deserialize;

/// Environment-sourced configuration for the billing endpoints.
///
/// # Environment Variables
/// - `PAYMENTS_SECRET_KEY`: payments provider API secret (required).
/// - `IDENTITY_URL`: base URL of the identity provider (required).
/// - `APP_ORIGIN`: where checkout/portal flows return to; defaults to
///   the local dev server.
/// - `PREMIUM_PRICE_CENTS`: monthly price; defaults to 999.
pub struct BillingConfig {
    secret_key: String,
    identity_url: String,
    origin: String,
    price_cents: u32,
}

impl BillingConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        let secret_key = std::env::var("PAYMENTS_SECRET_KEY")
            .context("PAYMENTS_SECRET_KEY environment variable is not set")?;
        let identity_url = std::env::var("IDENTITY_URL")
            .context("IDENTITY_URL environment variable is not set")?;
        let origin =
            std::env::var("APP_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let price_cents = std::env::var("PREMIUM_PRICE_CENTS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(999);
        Ok(Self {
            secret_key,
            identity_url,
            origin,
            price_cents,
        })
    }
}

/// The identity provider's view of the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthedUser {
    pub id: String,
    pub email: Option<String>,
}

/// Resolves a bearer token to a user, or fails with a human-readable
/// authentication error. No state is touched on failure.
pub async fn verify_bearer(config: &BillingConfig, access_token: &str) -> Result<AuthedUser, ApiError> {
    if access_token.trim().is_empty() {
        bail!("Authentication error: no access token provided");
    }

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/auth/v1/user", config.identity_url))
        .bearer_auth(access_token)
        .send()
        .await
        .context("identity provider is unreachable")?;

    if !response.status().is_success() {
        bail!(
            "Authentication error: identity provider rejected the token ({})",
            response.status()
        );
    }

    let user: AuthedUser = response
        .json()
        .await
        .context("identity provider returned an unexpected payload")?;
    if user.email.is_none() {
        bail!("Authentication error: account has no email address");
    }
    Ok(user)
}

#[derive(Debug, Deserialize)]
struct CustomerList {
    #[serde(default)]
    data: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct Customer {
    id: String,
}

/// Looks up an existing payments-provider customer by email.
async fn find_customer(config: &BillingConfig, email: &str) -> Result<Option<String>, ApiError> {
    let client = reqwest::Client::new();
    let list: CustomerList = client
        .get("https://api.stripe.com/v1/customers")
        .bearer_auth(&config.secret_key)
        .query(&[("email", email), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(list.data.into_iter().next().map(|customer| customer.id))
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: Option<String>,
}

/// Creates a subscription checkout session and returns its redirect URL.
pub async fn create_checkout_session(
    config: &BillingConfig,
    user: &AuthedUser,
) -> Result<String, ApiError> {
    let email = user.email.as_deref().unwrap_or_default();
    let customer = find_customer(config, email).await?;
    let price = config.price_cents.to_string();
    let success_url = format!("{}/?payment=success", config.origin);
    let cancel_url = format!("{}/?payment=cancelled", config.origin);

    let mut form: Vec<(&str, &str)> = vec![
        ("mode", "subscription"),
        ("line_items[0][price_data][currency]", "usd"),
        (
            "line_items[0][price_data][product_data][name]",
            "Premium Subscription",
        ),
        (
            "line_items[0][price_data][product_data][description]",
            "Unlimited watchlist and premium features",
        ),
        ("line_items[0][price_data][unit_amount]", &price),
        ("line_items[0][price_data][recurring][interval]", "month"),
        ("line_items[0][quantity]", "1"),
        ("success_url", &success_url),
        ("cancel_url", &cancel_url),
    ];
    match &customer {
        Some(id) => form.push(("customer", id)),
        None => form.push(("customer_email", email)),
    }

    let client = reqwest::Client::new();
    let session: SessionResponse = client
        .post("https://api.stripe.com/v1/checkout/sessions")
        .bearer_auth(&config.secret_key)
        .form(&form)
        .send()
        .await?
        .error_for_status()
        .context("payments provider refused to create a checkout session")?
        .json()
        .await?;

    session
        .url
        .ok_or_else(|| anyhow::anyhow!("payments provider returned no checkout URL"))
}

/// Creates a billing-portal session for an existing customer.
pub async fn create_portal_session(
    config: &BillingConfig,
    user: &AuthedUser,
) -> Result<String, ApiError> {
    let email = user.email.as_deref().unwrap_or_default();
    let Some(customer) = find_customer(config, email).await? else {
        bail!("No billing profile exists for this account yet");
    };
    let return_url = format!("{}/?screen=settings", config.origin);

    let client = reqwest::Client::new();
    let session: SessionResponse = client
        .post("https://api.stripe.com/v1/billing_portal/sessions")
        .bearer_auth(&config.secret_key)
        .form(&[("customer", customer.as_str()), ("return_url", &return_url)])
        .send()
        .await?
        .error_for_status()
        .context("payments provider refused to open the billing portal")?
        .json()
        .await?;

    session
        .url
        .ok_or_else(|| anyhow::anyhow!("payments provider returned no portal URL"))
}

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// Checks whether the user has any active subscription.
pub async fn subscription_status(
    config: &BillingConfig,
    user: &AuthedUser,
) -> Result<SubscriptionStatus, ApiError> {
    let email = user.email.as_deref().unwrap_or_default();
    let Some(customer) = find_customer(config, email).await? else {
        return Ok(SubscriptionStatus::Inactive);
    };

    let client = reqwest::Client::new();
    let list: SubscriptionList = client
        .get("https://api.stripe.com/v1/subscriptions")
        .bearer_auth(&config.secret_key)
        .query(&[
            ("customer", customer.as_str()),
            ("status", "active"),
            ("limit", "1"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(if list.data.is_empty() {
        SubscriptionStatus::Inactive
    } else {
        SubscriptionStatus::Active
    })
}
