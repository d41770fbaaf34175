//! In-app navigation: current path, page-out fade, and nav links.

use datacore_core::routing::{PageTransition, section_of};
use datacore_core::{DocumentEvent, EventBus};
use dioxus::prelude::*;

use crate::media::scroll_content_to_top;
use crate::provider::use_theme;

/// A sidebar or mobile-nav entry.
#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl NavItem {
    /// Whether this entry's section is the one showing.
    pub fn is_active(&self, current: &str) -> bool {
        section_of(self.path) == section_of(current)
    }
}

#[derive(Clone, Copy)]
pub struct NavContext {
    pub path: Signal<String>,
    pub transition: Signal<PageTransition>,
    bus: Signal<EventBus>,
}

impl NavContext {
    /// Go to `path`. A pathname change starts the page-out fade and
    /// resets the content scroll.
    pub fn navigate(&mut self, path: &str) {
        if *self.path.peek() == path {
            return;
        }
        self.path.set(path.to_string());

        let Some(page_out) = self.transition.write().navigate(path) else {
            return;
        };
        self.bus.write().publish(&DocumentEvent::PageOut {
            generation: page_out.generation,
        });
        scroll_content_to_top();
    }

    pub fn is_page_out(&self) -> bool {
        self.transition.read().is_page_out()
    }
}

/// Provide navigation state starting at `initial`. Must sit below the
/// theme provider.
pub fn use_nav_provider(initial: &str) -> NavContext {
    let initial = initial.to_string();
    let bus = use_theme().bus;
    let ctx = use_context_provider(move || {
        let mut transition = PageTransition::new();
        transition.navigate(&initial);
        NavContext {
            path: Signal::new(initial),
            transition: Signal::new(transition),
            bus,
        }
    });

    // Fades end here rather than in the link that started them, which may
    // be gone by then.
    let mut transition = ctx.transition;
    use_effect(move || {
        if let Some(page_out) = transition.read().active() {
            spawn(async move {
                tokio::time::sleep(page_out.duration).await;
                transition.write().finish(page_out);
            });
        }
    });

    ctx
}

pub fn use_nav() -> NavContext {
    use_context::<NavContext>()
}

/// Button that navigates to `to`.
#[component]
pub fn NavLink(
    to: String,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    let mut nav = use_nav();
    let active = section_of(&to) == section_of(&nav.path.read());
    let class = if active {
        format!("nav-link active {}", class)
    } else {
        format!("nav-link {}", class)
    };

    rsx! {
        button {
            class: "{class.trim_end()}",
            onclick: move |_| nav.navigate(&to),
            {children}
        }
    }
}

/// Horizontal, scrollable pill strip that replaces the sidebar on narrow
/// viewports.
#[component]
pub fn MobileNav(items: Vec<NavItem>) -> Element {
    let mut nav = use_nav();
    let current = nav.path.read().clone();

    rsx! {
        nav { class: "mobile-nav",
            div { class: "mobile-nav-inner",
                for item in items {
                    {
                        let class = if item.is_active(&current) {
                            "mobile-nav-pill active"
                        } else {
                            "mobile-nav-pill"
                        };
                        rsx! {
                            button {
                                key: "{item.path}",
                                class: "{class}",
                                style: "--pill-color: {item.color}",
                                onclick: move |_| nav.navigate(item.path),
                                span { class: "nav-icon", "{item.icon}" }
                                span { class: "mobile-nav-label", "{item.label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
