//! Console header bar.

use datacore_core::{AlertCondition, DocumentEvent, FullscreenWatch};
use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::use_wry_event_handler;
use dioxus::prelude::*;

use crate::dismiss::use_outside_click;
use crate::media::use_is_mobile;
use crate::nav::{NavItem, NavLink, use_nav};
use crate::notifications::NotificationMenu;
use crate::provider::{use_theme, use_theme_state};

/// Whether the assistant drawer is open. Provided by the app shell; the
/// header toggle is hidden when nothing provides it.
#[derive(Clone, Copy)]
pub struct ChatContext {
    pub open: Signal<bool>,
}

pub fn use_chat_provider() -> ChatContext {
    use_context_provider(|| ChatContext {
        open: Signal::new(false),
    })
}

fn status_color(alert: AlertCondition) -> &'static str {
    match alert {
        AlertCondition::Nominal => "var(--lcars-green)",
        AlertCondition::Caution => "var(--lcars-gold)",
        AlertCondition::Critical => "var(--lcars-red-alert)",
    }
}

/// Track the window's fullscreen state. The icon follows `fullscreenchange`
/// on the bus, which is published for the header toggle and for changes
/// made outside the app (OS shortcut, window manager), seen as resizes.
fn use_fullscreen() -> (Signal<bool>, impl FnMut() + Copy) {
    let mut bus = use_theme().bus;
    let mut watch =
        use_signal(|| FullscreenWatch::new(dioxus::desktop::window().fullscreen().is_some()));
    let mut fullscreen = use_signal(|| watch.peek().is_fullscreen());

    let token = use_hook(move || {
        bus.write().subscribe("fullscreenchange", move |event| {
            if let DocumentEvent::FullscreenChange { fullscreen: now } = event {
                fullscreen.set(*now);
            }
        })
    });
    use_drop(move || {
        if let Ok(mut bus) = bus.try_write() {
            bus.unsubscribe(token);
        }
    });

    use_wry_event_handler(move |event, _| {
        if let Event::WindowEvent {
            event: WindowEvent::Resized(_),
            ..
        } = event
        {
            let now = dioxus::desktop::window().fullscreen().is_some();
            watch.write().observe(now, &mut bus.write());
        }
    });

    let toggle = move || {
        let next = !watch.peek().is_fullscreen();
        dioxus::desktop::window().set_fullscreen(next);
        watch.write().observe(next, &mut bus.write());
    };
    (fullscreen, toggle)
}

/// Dropdown of section shortcuts.
#[component]
fn QuickMenu(links: Vec<NavItem>) -> Element {
    let mut nav = use_nav();
    let mut open = use_signal(|| false);
    let dismiss = use_outside_click(open);

    rsx! {
        div { class: "quick-menu", onclick: move |_| dismiss.inside(),
            button {
                class: "header-button",
                title: "Quick access",
                onclick: move |_| open.toggle(),
                "\u{2630}"
            }
            if open() {
                div { class: "quick-menu-panel",
                    for item in links {
                        button {
                            key: "{item.path}",
                            class: "quick-menu-item",
                            style: "--item-color: {item.color}",
                            onclick: move |_| {
                                nav.navigate(item.path);
                                open.set(false);
                            },
                            span { class: "nav-icon", "{item.icon}" }
                            span { "{item.label}" }
                        }
                    }
                }
            }
        }
    }
}

/// Top bar: colored segments, then the end cap with status dot and controls.
#[component]
pub fn Header(title: String, quick_links: Vec<NavItem>) -> Element {
    let mut theme = use_theme();
    let state = use_theme_state();
    let is_mobile = use_is_mobile();
    let chat = try_use_context::<ChatContext>();
    let (fullscreen, mut toggle_fullscreen) = use_fullscreen();

    let next_theme = state.theme.cycle();
    let dot = status_color(state.alert_condition);
    let fullscreen_icon = if fullscreen() { "\u{2923}" } else { "\u{2922}" };
    let status_label = state.alert_condition.label();
    let theme_title = format!("Switch to {}", next_theme.display_name());

    rsx! {
        header { class: "console-header",
            div { class: "header-title", "{title}" }
            div { class: "header-segment", style: "--segment-color: var(--lcars-african-violet)" }
            div { class: "header-segment short", style: "--segment-color: var(--lcars-ice)" }
            div { class: "header-segment short", style: "--segment-color: var(--lcars-lilac)" }
            div { class: "header-cap",
                span {
                    class: "status-dot",
                    title: "{status_label}",
                    style: "background: {dot}",
                }
                NotificationMenu {}
                QuickMenu { links: quick_links }
                if !is_mobile() {
                    if let Some(mut chat) = chat {
                        button {
                            class: if *chat.open.read() { "header-button active" } else { "header-button" },
                            title: "Assistant",
                            onclick: move |_| chat.open.toggle(),
                            "\u{1F4AC}"
                        }
                    }
                    button {
                        class: "header-button",
                        title: "{theme_title}",
                        onclick: move |_| theme.store.write().set_theme(next_theme),
                        "\u{25D1}"
                    }
                    button {
                        class: "header-button",
                        title: "Toggle fullscreen",
                        onclick: move |_| toggle_fullscreen(),
                        "{fullscreen_icon}"
                    }
                }
                NavLink { to: "/settings", class: "header-button", "\u{2699}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_follows_alert() {
        assert_eq!(status_color(AlertCondition::Nominal), "var(--lcars-green)");
        assert_eq!(status_color(AlertCondition::Critical), "var(--lcars-red-alert)");
    }
}
