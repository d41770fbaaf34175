//! Kanban column board with column settings.

use datacore_core::contract::kanban::{self, ColumnUpdate, KanbanColumn, guard_delete};
use datacore_core::contract::CrudCallbacks;
use dioxus::prelude::*;

use crate::components::common::{ConfirmDelete, EmptyState, optional};

/// Column strip. Columns over their WIP limit are outlined; a column that
/// still holds tasks cannot be deleted and says why.
#[component]
pub fn KanbanBoard(columns: Vec<KanbanColumn>, callbacks: CrudCallbacks<ColumnUpdate>) -> Element {
    let mut editing = use_signal(|| None::<KanbanColumn>);
    let mut deleting = use_signal(|| None::<KanbanColumn>);
    let mut notice = use_signal(|| None::<String>);

    let delete_callbacks = callbacks.clone();
    let confirm_delete = move |_| {
        let Some(column) = deleting() else { return };
        deleting.set(None);
        let callbacks = delete_callbacks.clone();
        spawn(async move {
            if let Err(e) = kanban::delete_column(&column, &callbacks).await {
                notice.set(Some(e.to_string()));
            }
        });
    };

    if columns.is_empty() {
        return rsx! {
            EmptyState { message: "This project has no board columns" }
        };
    }

    rsx! {
        if let Some(message) = notice() {
            div { class: "inline-error", "{message}" }
        }
        div { class: "kanban-board",
            for column in columns {
                {
                    let class = if column.over_wip() { "kanban-column over-wip" } else { "kanban-column" };
                    let color = column.color.clone().unwrap_or_else(|| "var(--accent)".to_string());
                    let count = column.count_label();
                    let edit_column = column.clone();
                    let delete_column = column.clone();
                    rsx! {
                        div { key: "{column.id}", class: "{class}", style: "--column-color: {color}",
                            div { class: "kanban-column-header",
                                span { "{column.name}" }
                                span { class: "kanban-count", "{count}" }
                            }
                            if column.is_done_column {
                                div { class: "list-item-sub", "Done column" }
                            }
                            div { class: "button-row",
                                button {
                                    class: "link-button",
                                    onclick: move |_| editing.set(Some(edit_column.clone())),
                                    "Edit"
                                }
                                button {
                                    class: "link-button",
                                    onclick: move |_| match guard_delete(&delete_column) {
                                        Ok(()) => {
                                            notice.set(None);
                                            deleting.set(Some(delete_column.clone()));
                                        }
                                        Err(e) => notice.set(Some(e.to_string())),
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(column) = editing() {
            ColumnForm {
                column,
                callbacks: callbacks.clone(),
                on_close: move |_| editing.set(None),
            }
        }

        if let Some(column) = deleting() {
            ConfirmDelete {
                what: format!("column \"{}\"", column.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn ColumnForm(
    column: KanbanColumn,
    callbacks: CrudCallbacks<ColumnUpdate>,
    on_close: EventHandler<()>,
) -> Element {
    let seed = column.clone();
    let mut name = use_signal(|| seed.name.clone());
    let seed = column.clone();
    let mut color = use_signal(|| seed.color.clone().unwrap_or_default());
    let seed = column.clone();
    let mut wip = use_signal(|| seed.wip_limit.map(|w| w.to_string()).unwrap_or_default());
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let wip_limit = match optional(&wip()) {
            None => None,
            Some(text) => match text.parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    error.set(Some("wip_limit: Must be a whole number".to_string()));
                    return;
                }
            },
        };
        let update = ColumnUpdate {
            name: name().trim().to_string(),
            color: optional(&color()),
            wip_limit,
        };
        let column = column.clone();
        let callbacks = callbacks.clone();
        spawn(async move {
            match kanban::update_column(&column, update, &callbacks).await {
                Ok(()) => on_close.call(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        datacore_ui::Modal { title: "Column settings", on_close: move |_| on_close.call(()),
            div { class: "form",
                div { class: "field",
                    label { "Name" }
                    input { value: "{name}", oninput: move |e| name.set(e.value()) }
                }
                div { class: "field-row",
                    div { class: "field",
                        label { "Color (#RRGGBB)" }
                        input { value: "{color}", oninput: move |e| color.set(e.value()) }
                    }
                    div { class: "field",
                        label { "WIP limit" }
                        input { value: "{wip}", oninput: move |e| wip.set(e.value()) }
                    }
                }
                if let Some(message) = error() {
                    div { class: "field-error", "{message}" }
                }
                div { class: "button-row",
                    button { class: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button { class: "button primary", onclick: submit, "Save" }
                }
            }
        }
    }
}
