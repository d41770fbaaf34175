//! Settings widgets: color-scheme picker, theme selector, theme toggle.

use datacore_core::Theme;
use datacore_core::palette::families;
use dioxus::prelude::*;

use crate::provider::{use_theme, use_theme_state};

/// Families in registry order; each scheme shows its five swatches and a
/// light/dark badge. Clicking a scheme selects it.
#[component]
pub fn PalettePicker() -> Element {
    let mut theme = use_theme();
    let current = use_theme_state().color_scheme;

    rsx! {
        div { class: "palette-picker",
            for family in families() {
                div { key: "{family.label}", class: "palette-family",
                    h4 { class: "palette-family-label", "{family.label}" }
                    div { class: "palette-grid",
                        for scheme in family.schemes {
                            {
                                let selected = scheme.key == current.as_str();
                                let kind = scheme.kind.as_str();
                                rsx! {
                                    button {
                                        key: "{scheme.key}",
                                        class: if selected { "palette-option selected" } else { "palette-option" },
                                        onclick: move |_| theme.store.write().set_color_scheme(scheme.key),
                                        div { class: "palette-swatches",
                                            for (i, swatch) in scheme.swatches.iter().enumerate() {
                                                span {
                                                    key: "{i}",
                                                    class: "palette-swatch",
                                                    style: "background: {swatch}",
                                                }
                                            }
                                        }
                                        span { class: "palette-name", "{scheme.display_label}" }
                                        span { class: "palette-kind {kind}", "{kind}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Explicit theme choice.
#[component]
pub fn ThemeSwitcher() -> Element {
    let mut theme = use_theme();
    let current = use_theme_state().theme;

    rsx! {
        div { class: "theme-switcher",
            for option in Theme::all().iter().copied() {
                {
                    let key = option.as_str();
                    let name = option.display_name();
                    rsx! {
                        button {
                            key: "{key}",
                            class: if option == current { "theme-option selected" } else { "theme-option" },
                            onclick: move |_| theme.store.write().set_theme(option),
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}

/// Single button cycling standard → classic → modern.
#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_theme();
    let current = use_theme_state().theme;
    let label = current.display_name();

    rsx! {
        button {
            class: "theme-toggle",
            title: "Cycle theme",
            onclick: move |_| {
                let next = theme.store.peek().get().theme.cycle();
                theme.store.write().set_theme(next);
            },
            "{label}"
        }
    }
}
