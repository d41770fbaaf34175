//! Centered dialog over a dimmed overlay.

use dioxus::prelude::*;

/// Closes on Escape, on a click on the overlay, and on the close button.
/// The parent decides whether it is mounted.
#[component]
pub fn Modal(
    title: String,
    on_close: EventHandler<()>,
    accent: Option<String>,
    #[props(default)] wide: bool,
    children: Element,
) -> Element {
    let accent = accent.unwrap_or_else(|| "var(--accent, var(--lcars-sunflower))".to_string());
    let dialog_class = if wide { "modal-dialog wide" } else { "modal-dialog" };

    rsx! {
        div {
            class: "modal-overlay",
            tabindex: "-1",
            onmounted: move |evt: MountedEvent| async move {
                let _ = evt.data().set_focus(true).await;
            },
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },
            onclick: move |_| on_close.call(()),
            div {
                class: "{dialog_class}",
                style: "--modal-accent: {accent}",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),

                span { class: "modal-corner corner-tl" }
                span { class: "modal-corner corner-tr" }
                span { class: "modal-corner corner-bl" }
                span { class: "modal-corner corner-br" }

                div { class: "modal-header",
                    span { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "\u{00d7}"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}
