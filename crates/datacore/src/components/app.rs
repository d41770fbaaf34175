//! Root component: providers, shell selection, and the current page.

use datacore_ui::{
    BackendHandle, BootOverlay, PollIntervals, ThemeProvider, ThemedRoot, use_chat_provider,
    use_nav_provider, use_theme_state,
};
use dioxus::prelude::*;

use crate::components::chat::ChatDrawer;
use crate::components::shell::{ConsoleShell, StandardShell};
use crate::http_backend::HttpBackend;
use crate::launch_options;
use crate::mock_backend::MockBackend;
use crate::routes;

/// The HTTP back-end when a base URL is configured and usable, otherwise
/// the seeded in-memory one.
fn connect(api_base_url: Option<&str>) -> BackendHandle {
    let Some(url) = api_base_url else {
        tracing::info!("No back-end configured, using in-memory data");
        return BackendHandle::new(MockBackend::new());
    };
    match HttpBackend::new(url) {
        Ok(backend) => {
            tracing::info!("Back-end at {}", url);
            BackendHandle::new(backend)
        }
        Err(e) => {
            tracing::warn!("Back-end {} unusable ({}), using in-memory data", url, e);
            BackendHandle::new(MockBackend::new())
        }
    }
}

#[component]
pub fn RootApp() -> Element {
    let options = use_hook(launch_options);

    rsx! {
        ThemeProvider {
            settings_path: options.settings_path.clone(),
            initial_theme: options.initial_theme.clone(),
            force_reduced_motion: options.reduced_motion,
            AppBody { api_base_url: options.api_base_url.clone(), intervals: options.intervals }
        }
    }
}

#[component]
fn AppBody(api_base_url: Option<String>, intervals: PollIntervals) -> Element {
    use_context_provider(move || connect(api_base_url.as_deref()));
    use_context_provider(move || intervals);
    use_chat_provider();
    let nav = use_nav_provider("/");
    let theme = use_theme_state().theme;

    // Keyed by path so a new id remounts the page and reloads its data.
    let path = nav.path.read().clone();
    let page = rsx! {
        for key in std::iter::once(path.clone()) {
            div { key: "{key}", class: "page", {routes::render(&key, theme)} }
        }
    };

    rsx! {
        ThemedRoot {
            if theme.is_console() {
                ConsoleShell { {page} }
            } else {
                StandardShell { {page} }
            }
            BootOverlay {}
            ChatDrawer {}
        }
    }
}
