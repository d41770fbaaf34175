//! Logical sections, their pathnames, and which page each theme mounts.

use std::sync::LazyLock;

use datacore_core::routing::RouteMatch;
use datacore_core::{RouteTable, Theme};
use datacore_ui::{NavItem, use_nav};
use dioxus::prelude::*;

use crate::pages;
use crate::pages::console;

/// Concrete page components the table can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Vehicles,
    VehicleDetail,
    Notes,
    Projects,
    ProjectDetail,
    Knowledge,
    Infrastructure,
    HostDetail,
    Printer,
    Astrometrics,
    Trek,
    Settings,
    ConsoleDashboard,
    ConsoleProjectDetail,
    ConsoleInfrastructure,
    ConsolePrinter,
}

pub static ROUTES: LazyLock<RouteTable<Page>> = LazyLock::new(|| {
    RouteTable::new()
        .route("dashboard", "/", Page::Dashboard)
        .route("vehicles", "/vehicles", Page::Vehicles)
        .route("vehicles/detail", "/vehicles/:id", Page::VehicleDetail)
        .route("notes", "/notes", Page::Notes)
        .route("projects", "/projects", Page::Projects)
        .route("projects/detail", "/projects/:id", Page::ProjectDetail)
        .route("knowledge", "/knowledge", Page::Knowledge)
        .route("infrastructure", "/infrastructure", Page::Infrastructure)
        .route("infra/printer", "/infrastructure/printer", Page::Printer)
        .route("infra/host/detail", "/infrastructure/hosts/:id", Page::HostDetail)
        .route("astrometrics", "/astrometrics", Page::Astrometrics)
        .route("trek", "/trek", Page::Trek)
        .route("settings", "/settings", Page::Settings)
        .console("dashboard", Page::ConsoleDashboard)
        .console("projects/detail", Page::ConsoleProjectDetail)
        .console("infrastructure", Page::ConsoleInfrastructure)
        .console("infra/printer", Page::ConsolePrinter)
});

/// Sidebar and mobile-nav entries, in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/", label: "Dashboard", icon: "\u{25A6}", color: "var(--lcars-sunflower)" },
    NavItem { path: "/vehicles", label: "Vehicles", icon: "\u{1F697}", color: "var(--lcars-butterscotch)" },
    NavItem { path: "/notes", label: "Notes", icon: "\u{270E}", color: "var(--lcars-african-violet)" },
    NavItem { path: "/projects", label: "Projects", icon: "\u{25C8}", color: "var(--lcars-ice)" },
    NavItem { path: "/knowledge", label: "Knowledge", icon: "\u{2630}", color: "var(--lcars-lilac)" },
    NavItem { path: "/infrastructure", label: "Infra", icon: "\u{2395}", color: "var(--lcars-sky)" },
    NavItem { path: "/astrometrics", label: "Astro", icon: "\u{2609}", color: "var(--lcars-tanoi)" },
    NavItem { path: "/trek", label: "Trek", icon: "\u{2734}", color: "var(--lcars-almond-creme)" },
    NavItem { path: "/settings", label: "Settings", icon: "\u{2699}", color: "var(--lcars-gray)" },
];

pub fn nav_items() -> Vec<NavItem> {
    NAV_ITEMS.to_vec()
}

/// Match for the current path, if any route binds it.
pub fn use_route_match() -> Option<RouteMatch> {
    let nav = use_nav();
    ROUTES.match_path(&nav.path.read())
}

/// `:id` of the current path.
pub fn use_route_id() -> Option<u64> {
    use_route_match().and_then(|m| m.id("id"))
}

/// Title shown in the header for `path`.
pub fn title_for(path: &str) -> &'static str {
    let section = datacore_core::routing::section_of(path);
    NAV_ITEMS
        .iter()
        .find(|item| datacore_core::routing::section_of(item.path) == section)
        .map(|item| item.label)
        .unwrap_or("Datacore")
}

/// Mount the page `path` resolves to under `theme`.
pub fn render(path: &str, theme: Theme) -> Element {
    let Some((_, page)) = ROUTES.resolve_path(path, theme) else {
        return rsx! { pages::NotFound { path: path.to_string() } };
    };
    match page {
        Page::Dashboard => rsx! { pages::dashboard::Dashboard {} },
        Page::Vehicles => rsx! { pages::vehicles::Vehicles {} },
        Page::VehicleDetail => rsx! { pages::vehicles::VehicleDetail {} },
        Page::Notes => rsx! { pages::library::Notes {} },
        Page::Projects => rsx! { pages::projects::Projects {} },
        Page::ProjectDetail => rsx! { pages::projects::ProjectDetail {} },
        Page::Knowledge => rsx! { pages::library::Knowledge {} },
        Page::Infrastructure => rsx! { pages::infrastructure::Infrastructure {} },
        Page::HostDetail => rsx! { pages::infrastructure::HostDetail {} },
        Page::Printer => rsx! { pages::printer::Printer {} },
        Page::Astrometrics => rsx! { pages::astrometrics::Astrometrics {} },
        Page::Trek => rsx! { pages::astrometrics::Trek {} },
        Page::Settings => rsx! { pages::settings::Settings {} },
        Page::ConsoleDashboard => rsx! { console::dashboard::ConsoleDashboard {} },
        Page::ConsoleProjectDetail => rsx! { console::projects::ConsoleProjectDetail {} },
        Page::ConsoleInfrastructure => rsx! { console::infrastructure::ConsoleInfrastructure {} },
        Page::ConsolePrinter => rsx! { console::printer::ConsolePrinter {} },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datacore_core::RouteKey;

    #[test]
    fn test_every_nav_item_resolves() {
        for item in NAV_ITEMS {
            assert!(ROUTES.match_path(item.path).is_some(), "{}", item.path);
        }
    }

    #[test]
    fn test_printer_is_not_a_host_id() {
        let m = ROUTES.match_path("/infrastructure/printer").unwrap();
        assert_eq!(m.key, RouteKey("infra/printer"));
        let m = ROUTES.match_path("/infrastructure/hosts/7").unwrap();
        assert_eq!(m.key, RouteKey("infra/host/detail"));
        assert_eq!(m.id("id"), Some(7));
    }

    #[test]
    fn test_console_pages_only_under_console() {
        let (_, page) = ROUTES.resolve_path("/", Theme::ClassicConsole).unwrap();
        assert_eq!(*page, Page::ConsoleDashboard);
        let (_, page) = ROUTES.resolve_path("/", Theme::Standard).unwrap();
        assert_eq!(*page, Page::Dashboard);
        let (_, page) = ROUTES.resolve_path("/vehicles", Theme::ModernConsole).unwrap();
        assert_eq!(*page, Page::Vehicles);
    }

    #[test]
    fn test_title_for_nested_path() {
        assert_eq!(title_for("/projects/3"), "Projects");
        assert_eq!(title_for("/"), "Dashboard");
        assert_eq!(title_for("/nowhere"), "Datacore");
    }
}
