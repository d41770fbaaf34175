//! Notification bell and dropdown.

use std::time::Instant;

use datacore_core::poll::next_flash_edge;
use datacore_core::NotificationState;
use dioxus::prelude::*;

use crate::backend::{use_backend, use_poll_intervals};
use crate::dismiss::use_outside_click;
use crate::media::use_is_mobile;
use crate::nav::use_nav;
use crate::provider::use_reduced_motion;

/// Bell with unread badge. Polls the unread count, pulses while anything
/// is unread, and opens the feed on click.
#[component]
pub fn NotificationMenu() -> Element {
    let backend = use_backend();
    let intervals = use_poll_intervals();
    let is_mobile = use_is_mobile();
    let reduced = use_reduced_motion();
    let mut nav = use_nav();

    let mut state = use_signal(NotificationState::new);
    let mut flashing = use_signal(|| false);
    let mut open = use_signal(|| false);
    let mut action_error = use_signal(|| None::<String>);
    let dismiss = use_outside_click(open);

    let poll_backend = backend.clone();
    use_future(move || {
        let backend = poll_backend.clone();
        async move {
            loop {
                let result = backend.unread_count().await;
                state.write().apply_count(result);
                tokio::time::sleep(intervals.notifications).await;
            }
        }
    });

    // The pulse is a function of time since mount; wake only on its edges.
    use_future(move || async move {
        let mounted = Instant::now();
        loop {
            let elapsed = mounted.elapsed();
            let lit = state.peek().flashing_at(elapsed);
            if *flashing.peek() != lit {
                flashing.set(lit);
            }
            tokio::time::sleep(next_flash_edge(elapsed)).await;
        }
    });

    let feed_backend = backend.clone();
    let toggle = move |_| {
        dismiss.inside();
        let opening = !open();
        open.set(opening);
        if opening {
            let backend = feed_backend.clone();
            spawn(async move {
                let result = backend.notification_feed().await;
                state.write().apply_feed(result);
            });
        }
    };

    let read_backend = backend.clone();
    let mark_read = move |id: u64| {
        let backend = read_backend.clone();
        spawn(async move {
            match backend.mark_read(id).await {
                Ok(()) => state.write().mark_read(id),
                Err(e) => action_error.set(Some(e.message)),
            }
        });
    };

    let all_backend = backend.clone();
    let mark_all = move |_| {
        let backend = all_backend.clone();
        spawn(async move {
            match backend.mark_all_read().await {
                Ok(()) => {
                    state.write().mark_all_read();
                    flashing.set(false);
                }
                Err(e) => action_error.set(Some(e.message)),
            }
        });
    };

    let snapshot = state.read().clone();
    let bell_class = if flashing() && !reduced {
        "notification-bell flashing"
    } else {
        "notification-bell"
    };
    let panel_class = if is_mobile() {
        "notification-panel fixed"
    } else {
        "notification-panel absolute"
    };

    rsx! {
        div {
            class: "notification-menu",
            onclick: move |_| dismiss.inside(),
            button {
                class: "{bell_class}",
                title: "Notifications",
                onclick: toggle,
                "\u{1F514}"
                if let Some(badge) = snapshot.badge() {
                    span { class: "notification-badge", "{badge}" }
                }
            }
            if open() {
                div { class: "{panel_class}",
                    div { class: "notification-panel-header",
                        span { "Notifications" }
                        if snapshot.unread() > 0 {
                            button { class: "link-button", onclick: mark_all, "Mark all read" }
                        }
                    }
                    if let Some(message) = action_error() {
                        div { class: "inline-error", "{message}" }
                    }
                    if snapshot.items().is_empty() {
                        div { class: "notification-empty", "Nothing new" }
                    }
                    for item in snapshot.items().iter().cloned() {
                        {
                            let mut mark_read = mark_read.clone();
                            let link = item.link.clone();
                            let id = item.id;
                            rsx! {
                                div {
                                    key: "{item.id}",
                                    class: if item.is_read { "notification-item" } else { "notification-item unread" },
                                    onclick: move |_| {
                                        if let Some(link) = link.as_deref() {
                                            nav.navigate(link);
                                            open.set(false);
                                        }
                                    },
                                    div { class: "notification-title", "{item.title}" }
                                    if let Some(message) = item.message.as_deref() {
                                        div { class: "notification-message", "{message}" }
                                    }
                                    div { class: "notification-time", {item.created_at.format("%b %d %H:%M").to_string()} }
                                    if !item.is_read {
                                        button {
                                            class: "link-button",
                                            onclick: move |e: MouseEvent| {
                                                e.stop_propagation();
                                                dismiss.inside();
                                                mark_read(id);
                                            },
                                            "Mark read"
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
}
