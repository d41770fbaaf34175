use datacore_ui::{NavLink, Panel};
use dioxus::prelude::*;

use crate::components::changelog::ChangelogTimeline;
use crate::components::kanban::KanbanBoard;
use crate::pages::data::use_project_board;
use crate::pages::projects::use_project_name;
use crate::pages::{NotFound, resource_view};
use crate::routes::use_route_id;

#[component]
pub fn ConsoleProjectDetail() -> Element {
    match use_route_id() {
        Some(id) => rsx! {
            ConsoleProject { project_id: id }
        },
        None => rsx! {
            NotFound { path: "/projects" }
        },
    }
}

#[component]
fn ConsoleProject(project_id: u64) -> Element {
    let name = use_project_name(project_id).to_uppercase();
    let board = use_project_board(project_id);
    let changelog_callbacks = board.changelog_callbacks.clone();
    let column_callbacks = board.column_callbacks.clone();

    rsx! {
        Panel {
            title: "PROJECT {project_id} \u{00B7} {name}",
            header_right: rsx! {
                NavLink { to: "/projects", "ALL PROJECTS" }
            },
            no_padding: true,
            {resource_view(board.columns, move |columns| rsx! {
                KanbanBoard { columns, callbacks: column_callbacks.clone() }
            })}
        }
        Panel { title: "MISSION LOG", color: "var(--lcars-african-violet)".to_string(),
            {resource_view(board.changelog, move |entries| rsx! {
                ChangelogTimeline { entries, callbacks: changelog_callbacks.clone() }
            })}
        }
    }
}
