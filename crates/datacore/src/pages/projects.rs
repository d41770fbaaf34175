//! Project list and project detail (changelog and board).

use datacore_ui::{NavLink, Panel};
use dioxus::prelude::*;

use crate::components::changelog::ChangelogTimeline;
use crate::components::common::EmptyState;
use crate::components::kanban::KanbanBoard;
use crate::pages::data::{use_project_board, use_projects};
use crate::pages::{NotFound, resource_view};
use crate::routes::use_route_id;

#[component]
pub fn Projects() -> Element {
    let projects = use_projects();

    rsx! {
        h1 { class: "page-title", "Projects" }
        {resource_view(projects, |projects| rsx! {
            if projects.is_empty() {
                EmptyState { message: "No projects yet" }
            }
            ul { class: "list",
                for project in projects {
                    {
                        let to = format!("/projects/{}", project.id);
                        let status = project.status.clone().unwrap_or_default();
                        let description = project.description.clone().unwrap_or_default();
                        rsx! {
                            li { key: "{project.id}", class: "list-item",
                                div { class: "list-item-main",
                                    NavLink { to, "{project.name}" }
                                    div { class: "list-item-sub", "{description}" }
                                }
                                if !status.is_empty() {
                                    span { class: "badge", "{status}" }
                                }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Name of project `id`, or a placeholder until the list loads.
pub fn use_project_name(id: u64) -> String {
    let projects = use_projects();
    let name = projects
        .read()
        .clone()
        .and_then(Result::ok)
        .and_then(|list| list.into_iter().find(|p| p.id == id))
        .map(|p| p.name);
    name.unwrap_or_else(|| format!("Project {}", id))
}

#[component]
pub fn ProjectDetail() -> Element {
    match use_route_id() {
        Some(id) => rsx! {
            ProjectPage { project_id: id }
        },
        None => rsx! {
            NotFound { path: "/projects" }
        },
    }
}

#[component]
fn ProjectPage(project_id: u64) -> Element {
    let name = use_project_name(project_id);
    let board = use_project_board(project_id);
    let changelog_callbacks = board.changelog_callbacks.clone();
    let column_callbacks = board.column_callbacks.clone();

    rsx! {
        div { class: "button-row",
            NavLink { to: "/projects", "\u{2190} Projects" }
        }
        h1 { class: "page-title", "{name}" }
        Panel { title: "Board",
            {resource_view(board.columns, move |columns| rsx! {
                KanbanBoard { columns, callbacks: column_callbacks.clone() }
            })}
        }
        Panel { title: "Changelog",
            {resource_view(board.changelog, move |entries| rsx! {
                ChangelogTimeline { entries, callbacks: changelog_callbacks.clone() }
            })}
        }
    }
}
