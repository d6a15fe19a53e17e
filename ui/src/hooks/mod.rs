pub mod use_slot;
pub mod use_subscription_checker;
