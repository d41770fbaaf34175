//! Themed root: the single writer of the root element's classes and
//! `data-color-scheme` attribute.

use datacore_core::ConsoleAssets;
use datacore_core::dom::COLOR_SCHEME_ATTR;
use dioxus::prelude::*;

use crate::dismiss::DismissContext;
use crate::provider::use_theme;
use crate::CONSOLE_CSS;

#[component]
pub fn ThemedRoot(children: Element) -> Element {
    let theme = use_theme();
    let mut dismiss = use_context::<DismissContext>();

    let store = theme.store.read();
    let root = store.root();
    let class = format!("themed-root {}", root.class_string());
    let scheme = root
        .attribute(COLOR_SCHEME_ATTR)
        .unwrap_or_default()
        .to_string();
    let console_loaded = store.console_assets() == ConsoleAssets::Active;
    drop(store);

    rsx! {
        // Loaded on first console activation, kept afterwards.
        if console_loaded {
            style { {CONSOLE_CSS} }
        }
        div {
            class: "{class.trim_end()}",
            "data-color-scheme": "{scheme}",
            onclick: move |_| dismiss.dispatch(),
            {children}
        }
    }
}
