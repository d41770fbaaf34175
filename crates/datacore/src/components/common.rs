//! Small page building blocks: status badge, loading and empty states.

use datacore_core::contract::infra::StatusColor;
use dioxus::prelude::*;

#[component]
pub fn StatusBadge(label: &'static str, color: &'static str) -> Element {
    rsx! {
        span { class: "badge", style: "--badge-color: {color}", "{label}" }
    }
}

/// Badge for anything with a status color.
pub fn status_badge(status: &impl StatusColor) -> Element {
    rsx! {
        StatusBadge { label: status.label(), color: status.color() }
    }
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        div { class: "empty-state", "Loading\u{2026}" }
    }
}

/// Back-end failure at page scope. The page stays mounted.
#[component]
pub fn LoadError(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "empty-state",
            div { class: "inline-error", "{message}" }
            if let Some(retry) = on_retry {
                button { class: "button", onclick: move |_| retry.call(()), "Retry" }
            }
        }
    }
}

/// Nothing to show yet, with the next action when there is one.
#[component]
pub fn EmptyState(
    message: String,
    action_label: Option<String>,
    on_action: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div { class: "empty-state",
            div { "{message}" }
            if let (Some(label), Some(action)) = (action_label, on_action) {
                button { class: "button primary", onclick: move |_| action.call(()), "{label}" }
            }
        }
    }
}

/// Confirmation dialog for destructive actions. Cancel does nothing.
#[component]
pub fn ConfirmDelete(
    what: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        datacore_ui::Modal {
            title: "Confirm delete",
            accent: "var(--lcars-tomato, #e5484d)".to_string(),
            on_close: move |_| on_cancel.call(()),
            p { "Delete {what}? This cannot be undone." }
            div { class: "button-row",
                button { class: "button", onclick: move |_| on_cancel.call(()), "Cancel" }
                button { class: "button danger", onclick: move |_| on_confirm.call(()), "Delete" }
            }
        }
    }
}

/// Trimmed form text, `None` when blank.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_trims_and_drops_blank() {
        assert_eq!(optional("  v1.2 "), Some("v1.2".to_string()));
        assert_eq!(optional("   "), None);
    }
}
