//! Console frame: elbows, bars, cascade, and the grid that places them.

use datacore_core::ConsoleVariant;
use dioxus::prelude::*;

use crate::cascade::Cascade;
use crate::footer::Footer;
use crate::header::Header;
use crate::media::use_is_mobile;
use crate::nav::{MobileNav, NavItem, use_nav};
use crate::provider::use_theme_state;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElbowPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ElbowPosition {
    pub fn css_class(&self) -> &'static str {
        match self {
            ElbowPosition::TopLeft => "tl",
            ElbowPosition::TopRight => "tr",
            ElbowPosition::BottomLeft => "bl",
            ElbowPosition::BottomRight => "br",
        }
    }
}

/// L-shaped connector with a rounded inner cutout. Fills its grid cell.
#[component]
pub fn Elbow(
    position: ElbowPosition,
    color: Option<String>,
    radius: Option<u32>,
    #[props(default)] animated: bool,
) -> Element {
    let color = color.unwrap_or_else(|| "var(--lcars-sunflower)".to_string());
    let radius = radius.unwrap_or(48);
    let class = if animated {
        format!("elbow elbow-{} elbow-animated", position.css_class())
    } else {
        format!("elbow elbow-{}", position.css_class())
    };

    rsx! {
        div {
            class: "{class}",
            style: "--elbow-color: {color}; --elbow-radius: {radius}px",
            div { class: "elbow-cutout" }
        }
    }
}

/// Vertical sidebar of colored nav bars.
#[component]
pub fn SidebarBars(items: Vec<NavItem>) -> Element {
    let mut nav = use_nav();
    let current = nav.path.read().clone();

    rsx! {
        nav { class: "console-sidebar",
            for item in items {
                {
                    let class = if item.is_active(&current) {
                        "sidebar-bar active"
                    } else {
                        "sidebar-bar"
                    };
                    rsx! {
                        button {
                            key: "{item.path}",
                            class: "{class}",
                            style: "--bar-color: {item.color}",
                            onclick: move |_| nav.navigate(item.path),
                            span { class: "sidebar-bar-label", "{item.label}" }
                        }
                    }
                }
            }
            div { class: "sidebar-filler" }
        }
    }
}

/// Console page skeleton.
///
/// Classic is 3×3: elbow-TL | header; sidebar | cascade | content;
/// elbow-BL | footer. Modern is 5×3 and mirrors the left edge on the right.
/// On narrow viewports the sidebar is replaced by the mobile nav.
#[component]
pub fn FrameGrid(title: String, items: Vec<NavItem>, children: Element) -> Element {
    let state = use_theme_state();
    let nav = use_nav();
    let is_mobile = use_is_mobile();

    let variant = state.theme.variant().unwrap_or(ConsoleVariant::Classic);
    let mut class = format!("frame-grid frame-{}", variant.css_class());
    if let Some(alert) = state.alert_condition.css_class() {
        class.push(' ');
        class.push_str(alert);
    }
    if is_mobile() {
        class.push_str(" frame-mobile");
    }
    let content_class = if nav.is_page_out() {
        "frame-content page-out"
    } else {
        "frame-content"
    };
    let modern = variant == ConsoleVariant::Modern;

    rsx! {
        div { class: "{class}",
            if !is_mobile() {
                Elbow { position: ElbowPosition::TopLeft, animated: state.booting }
            }
            div { class: "frame-header",
                Header { title: title.clone(), quick_links: items.clone() }
            }
            if modern && !is_mobile() {
                Elbow {
                    position: ElbowPosition::TopRight,
                    color: "var(--lcars-african-violet)".to_string(),
                    animated: state.booting,
                }
            }

            if is_mobile() {
                MobileNav { items: items.clone() }
            } else {
                SidebarBars { items: items.clone() }
                div { class: "frame-cascade",
                    Cascade { seed: 47, variant, labels: true }
                }
            }
            div { class: "{content_class}", id: "content-scroll",
                {children}
            }
            if modern && !is_mobile() {
                div { class: "frame-cascade frame-cascade-right",
                    Cascade { seed: 1701, variant, labels: false }
                }
                div { class: "frame-right-bar" }
            }

            if !is_mobile() {
                Elbow {
                    position: ElbowPosition::BottomLeft,
                    color: "var(--lcars-butterscotch)".to_string(),
                    animated: state.booting,
                }
            }
            div { class: "frame-footer",
                Footer {}
            }
            if modern && !is_mobile() {
                Elbow {
                    position: ElbowPosition::BottomRight,
                    color: "var(--lcars-ice)".to_string(),
                    animated: state.booting,
                }
            }
        }
    }
}
