//! Standard pages, their console counterparts, and the data hooks both share.

pub mod astrometrics;
pub mod console;
pub mod dashboard;
pub mod data;
pub mod infrastructure;
pub mod library;
pub mod printer;
pub mod projects;
pub mod settings;
pub mod vehicles;

use datacore_core::ApiResult;
use datacore_ui::NavLink;
use dioxus::prelude::*;

use crate::components::common::{LoadError, Loading};

/// Loading, error with retry, or `view` of the loaded value.
pub fn resource_view<T: Clone + 'static>(
    mut resource: Resource<ApiResult<T>>,
    view: impl FnOnce(T) -> Element,
) -> Element {
    let state = resource.read().clone();
    match state {
        None => rsx! {
            Loading {}
        },
        Some(Err(e)) => rsx! {
            LoadError { message: e.message, on_retry: move |_| resource.restart() }
        },
        Some(Ok(value)) => view(value),
    }
}

#[component]
pub fn NotFound(path: String) -> Element {
    rsx! {
        div { class: "empty-state",
            h1 { class: "page-title", "Nothing at {path}" }
            NavLink { to: "/", "Back to the dashboard" }
        }
    }
}
