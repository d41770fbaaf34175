//! Dioxus layer for Datacore.
//!
//! Theme provider and hooks, the themed root that projects the store onto
//! the document, the console frame, and the visual primitives shared by
//! standard and console pages.

pub mod backend;
pub mod boot_overlay;
pub mod cascade;
pub mod dismiss;
pub mod footer;
pub mod frame;
pub mod header;
pub mod media;
pub mod modal;
pub mod nav;
pub mod notifications;
pub mod palette_picker;
pub mod panel;
pub mod provider;
pub mod rolling;
pub mod themed_root;

pub use backend::{BackendHandle, PollIntervals, use_backend, use_poll_intervals};
pub use boot_overlay::BootOverlay;
pub use cascade::Cascade;
pub use dismiss::{DismissContext, DismissHandle, use_outside_click};
pub use footer::Footer;
pub use frame::{Elbow, ElbowPosition, FrameGrid, SidebarBars};
pub use header::{ChatContext, Header, use_chat_provider};
pub use media::{scroll_content_to_top, use_is_mobile, use_media_query};
pub use modal::Modal;
pub use nav::{MobileNav, NavContext, NavItem, NavLink, use_nav, use_nav_provider};
pub use notifications::NotificationMenu;
pub use palette_picker::{PalettePicker, ThemeSwitcher, ThemeToggle};
pub use panel::{DataRow, Gauge, Panel, Stat, gauge_percent};
pub use provider::{ThemeContext, ThemeProvider, use_reduced_motion, use_theme, use_theme_state};
pub use rolling::RollingText;
pub use themed_root::ThemedRoot;

/// Layout and component styles for the standard theme. Colors come from
/// the `--color-*` variables set per `data-color-scheme`.
pub const STANDARD_CSS: &str = include_str!("../assets/standard.css");

/// Console frame, primitives, boot overlay, and animations. Injected by the
/// themed root on first console activation.
pub const CONSOLE_CSS: &str = include_str!("../assets/console.css");

#[cfg(test)]
mod tests {
    use super::*;

    /// Selector lists of the style rules in `css`, including those nested in
    /// `@media`. Keyframe steps are skipped.
    fn selectors(css: &str) -> Vec<String> {
        let mut clean = String::new();
        let mut rest = css;
        while let Some(start) = rest.find("/*") {
            clean.push_str(&rest[..start]);
            rest = match rest[start..].find("*/") {
                Some(end) => &rest[start + end + 2..],
                None => "",
            };
        }
        clean.push_str(rest);

        let mut out = Vec::new();
        // Whether each open block holds rules (top level and `@media`).
        let mut holds_rules: Vec<bool> = Vec::new();
        let mut prelude = String::new();
        for c in clean.chars() {
            match c {
                '{' => {
                    let p = prelude.trim().to_string();
                    prelude.clear();
                    let collecting = holds_rules.last().copied().unwrap_or(true);
                    if p.starts_with("@media") {
                        holds_rules.push(true);
                    } else {
                        if collecting && !p.starts_with('@') {
                            out.push(p);
                        }
                        holds_rules.push(false);
                    }
                }
                '}' => {
                    holds_rules.pop();
                    prelude.clear();
                }
                ';' => prelude.clear(),
                _ => prelude.push(c),
            }
        }
        out
    }

    #[test]
    fn test_console_sheet_only_styles_the_console_root() {
        let rules = selectors(CONSOLE_CSS);
        assert!(rules.iter().any(|r| r.contains("mobile-nav-pill.active")));
        for rule in rules {
            for selector in rule.split(',') {
                assert!(
                    selector.trim().starts_with(".console-theme"),
                    "unscoped console selector: {}",
                    selector.trim()
                );
            }
        }
    }

    #[test]
    fn test_selectors_skip_keyframes_and_enter_media() {
        let css = "/* c */ .a { x: 1; } @keyframes k { from { y: 0 } } @media (m) { .b, .c { z: 2 } }";
        assert_eq!(selectors(css), vec![".a".to_string(), ".b, .c".to_string()]);
    }
}
