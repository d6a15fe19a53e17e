//! A set of reusable, lifetime-free Dioxus components for the Pico.css framework.
//! To use, ensure you have pico.min.css linked in your main application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::prelude::*;
use dioxus::html::input_data::keyboard_types::Key;

//=============================================================================
// Layout Components
//=============================================================================

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A responsive grid layout.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

//=============================================================================
// Content Components
//=============================================================================

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element) -> Element {
    rsx! { article { {children} } }
}

#[derive(Props, PartialEq, Clone)]
pub struct BadgeProps {
    label: String,
    #[props(default = false)]
    muted: bool,
}

/// A small inline tag, used for genres, kinds, and statuses.
pub fn Badge(props: BadgeProps) -> Element {
    let class = if props.muted { "badge badge-muted" } else { "badge" };
    rsx! {
        small { class: "{class}", "{props.label}" }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct MeterProps {
    label: String,
    value: usize,
    max: usize,
}

/// A labelled progress bar, used for genre tallies and activity charts.
pub fn Meter(props: MeterProps) -> Element {
    let max = props.max.max(1);
    rsx! {
        div {
            class: "meter-row",
            span { class: "meter-label", "{props.label}" }
            progress { value: "{props.value}", max: "{max}" }
            small { "{props.value}" }
        }
    }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
}

/// A versatile button component.
pub fn Button(props: ButtonProps) -> Element {
    let class_str = match (&props.button_type, props.outline) {
        (ButtonType::Primary, false) => "",
        (ButtonType::Primary, true) => "outline",
        (ButtonType::Secondary, false) => "secondary",
        (ButtonType::Secondary, true) => "secondary outline",
        (ButtonType::Contrast, false) => "contrast",
        (ButtonType::Contrast, true) => "contrast outline",
    };
    rsx! {
        button {
            class: "{class_str}",
            disabled: props.disabled,
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct TextInputProps {
    label: String,
    value: String,
    #[props(default = "text".to_string())]
    input_type: String,
    #[props(optional)]
    placeholder: Option<String>,
    on_input: EventHandler<String>,
}

/// A labeled form input bound to a string value.
pub fn TextInput(props: TextInputProps) -> Element {
    rsx! {
        label {
            "{props.label}",
            input {
                r#type: "{props.input_type}",
                placeholder: "{props.placeholder.as_deref().unwrap_or(\"\")}",
                value: "{props.value}",
                oninput: move |evt| props.on_input.call(evt.value()),
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct TextAreaProps {
    label: String,
    value: String,
    #[props(optional)]
    placeholder: Option<String>,
    on_input: EventHandler<String>,
}

pub fn TextArea(props: TextAreaProps) -> Element {
    rsx! {
        label {
            "{props.label}",
            textarea {
                placeholder: "{props.placeholder.as_deref().unwrap_or(\"\")}",
                value: "{props.value}",
                oninput: move |evt| props.on_input.call(evt.value()),
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct SelectInputProps {
    label: String,
    /// `(value, display)` pairs.
    options: Vec<(String, String)>,
    selected: String,
    on_change: EventHandler<String>,
}

/// A labeled `<select>` bound to a string value.
pub fn SelectInput(props: SelectInputProps) -> Element {
    rsx! {
        label {
            "{props.label}",
            select {
                onchange: move |evt| props.on_change.call(evt.value()),
                for (value, display) in props.options.iter() {
                    option {
                        value: "{value}",
                        selected: *value == props.selected,
                        "{display}"
                    }
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ModalProps {
    is_open: Signal<bool>,
    title: String,
    children: Element,
}

/// A modal dialog that closes from its corner button or the Escape key.
pub fn Modal(mut props: ModalProps) -> Element {
    rsx! {
        if (props.is_open)() {
            dialog {
                open: true,
                autofocus: true,
                onkeydown: move |evt| {
                    if evt.key() == Key::Escape {
                        props.is_open.set(false);
                    }
                },
                article {
                    header {
                        a {
                            href: "#",
                            "aria-label": "Close",
                            class: "close",
                            onclick: move |_| props.is_open.set(false)
                        }
                        h3 { style: "margin-bottom: 0;", "{props.title}" }
                    }
                    {props.children}
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct StarRatingProps {
    /// Current rating, 1-10; zero renders as unrated.
    value: u8,
    #[props(optional)]
    on_select: Option<EventHandler<u8>>,
}

/// A ten-star rating row. Read-only without an `on_select` handler.
pub fn StarRating(props: StarRatingProps) -> Element {
    rsx! {
        span {
            class: "star-rating",
            for star in 1..=10u8 {
                a {
                    href: "#",
                    class: if star <= props.value { "star filled" } else { "star" },
                    onclick: move |evt| {
                        evt.prevent_default();
                        if let Some(handler) = &props.on_select {
                            handler.call(star);
                        }
                    },
                    if star <= props.value { "★" } else { "☆" }
                }
            }
        }
    }
}
