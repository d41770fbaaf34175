//! Page shells: the standard sidebar layout and the console frame.

use datacore_ui::{
    FrameGrid, MobileNav, NavLink, NotificationMenu, ThemeToggle, use_is_mobile, use_nav,
};
use dioxus::prelude::*;

use crate::routes::{NAV_ITEMS, nav_items, title_for};

/// Sidebar, top bar, and scrolling content.
#[component]
pub fn StandardShell(children: Element) -> Element {
    let mut nav = use_nav();
    let is_mobile = use_is_mobile();
    let current = nav.path.read().clone();
    let title = title_for(&current);

    let shell_class = if is_mobile() { "app-shell mobile" } else { "app-shell" };
    let content_class = if nav.is_page_out() {
        "app-content page-out"
    } else {
        "app-content"
    };

    rsx! {
        div { class: "{shell_class}",
            if !is_mobile() {
                nav { class: "app-sidebar",
                    div { class: "app-brand", "Datacore" }
                    for item in NAV_ITEMS.iter() {
                        {
                            let class = if item.is_active(&current) {
                                "app-sidebar-item active"
                            } else {
                                "app-sidebar-item"
                            };
                            let path = item.path;
                            rsx! {
                                button {
                                    key: "{item.path}",
                                    class: "{class}",
                                    onclick: move |_| nav.navigate(path),
                                    span { class: "nav-icon", "{item.icon}" }
                                    span { "{item.label}" }
                                }
                            }
                        }
                    }
                }
            }
            header { class: "app-topbar",
                span { class: "app-topbar-title", "{title}" }
                NotificationMenu {}
                ThemeToggle {}
                NavLink { to: "/settings", "\u{2699}" }
            }
            main { class: "{content_class}", id: "content-scroll", {children} }
            if is_mobile() {
                MobileNav { items: nav_items() }
            }
        }
    }
}

/// Console frame around the page, titled by section.
#[component]
pub fn ConsoleShell(children: Element) -> Element {
    let nav = use_nav();
    let title = title_for(&nav.path.read()).to_uppercase();

    rsx! {
        FrameGrid { title, items: nav_items(), {children} }
    }
}
