//! Boot overlay shown while the console theme powers up.

use dioxus::prelude::*;

use crate::provider::use_theme;

/// Phase-indexed overlay. Black first, then the frame draws in, the bars
/// light, the content brightens, and the whole overlay fades. Renders
/// nothing once the sequence is terminal.
#[component]
pub fn BootOverlay() -> Element {
    let theme = use_theme();
    let store = theme.store.read();
    let Some(phase) = store.boot_phase() else {
        return rsx! {};
    };
    let class = format!("boot-overlay {}", phase.css_class());
    drop(store);

    rsx! {
        div { class: "{class}", "aria-hidden": "true",
            div { class: "boot-frame boot-frame-top" }
            div { class: "boot-frame boot-frame-left" }
            div { class: "boot-bars",
                for i in 0..6 {
                    div { key: "{i}", class: "boot-bar", style: "--bar-index: {i}" }
                }
            }
            div { class: "boot-label", "DATACORE ONLINE" }
        }
    }
}
