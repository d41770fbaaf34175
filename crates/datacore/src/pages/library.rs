//! Notes and knowledge base sections.

use datacore_core::DashboardSummary;
use datacore_ui::{Stat, use_backend};
use dioxus::prelude::*;

use crate::components::common::EmptyState;
use crate::pages::resource_view;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Library {
    Notes,
    Knowledge,
}

impl Library {
    fn title(&self) -> &'static str {
        match self {
            Library::Notes => "Notes",
            Library::Knowledge => "Knowledge base",
        }
    }

    fn count_label(&self) -> &'static str {
        match self {
            Library::Notes => "Notes",
            Library::Knowledge => "Articles",
        }
    }

    fn count(&self, summary: &DashboardSummary) -> u32 {
        match self {
            Library::Notes => summary.notes,
            Library::Knowledge => summary.knowledge_base,
        }
    }
}

/// Documents are edited on the server; the hub shows how many there are.
#[component]
fn LibrarySection(library: Library) -> Element {
    let backend = use_backend();
    let summary = use_resource(move || {
        let backend = backend.clone();
        async move { backend.dashboard_summary().await }
    });
    let title = library.title();

    rsx! {
        h1 { class: "page-title", "{title}" }
        {resource_view(summary, move |summary| {
            let total = library.count(&summary);
            rsx! {
                div { class: "stat-grid",
                    Stat { label: library.count_label().to_string(), value: total.to_string() }
                }
                if total == 0 {
                    EmptyState { message: "Nothing here yet" }
                }
            }
        })}
    }
}

#[component]
pub fn Notes() -> Element {
    rsx! {
        LibrarySection { library: Library::Notes }
    }
}

#[component]
pub fn Knowledge() -> Element {
    rsx! {
        LibrarySection { library: Library::Knowledge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_counts_its_own_field() {
        let summary = DashboardSummary {
            notes: 12,
            knowledge_base: 40,
            ..DashboardSummary::default()
        };
        assert_eq!(Library::Notes.count(&summary), 12);
        assert_eq!(Library::Knowledge.count(&summary), 40);
    }
}
