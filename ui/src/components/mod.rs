//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to define common UI elements like cards, forms, and modals.
pub mod add_media_dialog;
pub mod catalog_card;
pub mod media_card;
pub mod notices;
pub mod pico;
pub mod random_pick;
pub mod recommendations;
pub mod stats_card;
pub mod upsell_modal;
