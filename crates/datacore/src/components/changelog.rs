//! Changelog timeline shared by the standard and console project pages.

use chrono::{NaiveDate, Utc};
use datacore_core::contract::changelog::{
    ChangelogDraft, ChangelogEntry, EntryType, filter_entries, group_by_month,
};
use datacore_core::contract::{Confirmation, CrudCallbacks};
use dioxus::prelude::*;

use crate::components::common::{ConfirmDelete, EmptyState, optional};

fn entry_color(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Release => "var(--color-accent, var(--lcars-sunflower))",
        EntryType::Milestone => "var(--color-info, var(--lcars-ice))",
        EntryType::Feature => "var(--color-success, var(--lcars-green))",
        EntryType::Fix => "var(--color-warning, var(--lcars-gold))",
        EntryType::Note => "var(--color-subtext, var(--lcars-gray))",
        EntryType::BreakingChange => "var(--status-error, var(--lcars-tomato))",
    }
}

/// Which dialog is open.
#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(ChangelogEntry),
}

/// Filterable, month-grouped, newest-first timeline with add/edit/delete.
#[component]
pub fn ChangelogTimeline(
    entries: Vec<ChangelogEntry>,
    callbacks: CrudCallbacks<ChangelogDraft>,
) -> Element {
    let mut filter = use_signal(|| None::<EntryType>);
    let mut editing = use_signal(|| None::<Editing>);
    let mut deleting = use_signal(|| None::<ChangelogEntry>);
    let mut error = use_signal(|| None::<String>);

    let sorted = filter_entries(&entries, filter());
    let groups: Vec<(String, Vec<ChangelogEntry>)> = group_by_month(&sorted)
        .into_iter()
        .map(|(month, items)| (month, items.into_iter().cloned().collect()))
        .collect();

    let delete_callbacks = callbacks.clone();
    let confirm_delete = move |confirmation: Confirmation| {
        let Some(entry) = deleting() else { return };
        deleting.set(None);
        if let Some(pending) = delete_callbacks.delete_confirmed(entry.id, confirmation) {
            spawn(async move {
                if let Err(e) = pending.await {
                    error.set(Some(e.message));
                }
            });
        }
    };
    let mut confirm = confirm_delete.clone();
    let mut cancel = confirm_delete;

    rsx! {
        div { class: "changelog",
            div { class: "filter-bar",
                button {
                    class: if filter().is_none() { "chip active" } else { "chip" },
                    onclick: move |_| filter.set(None),
                    "All"
                }
                for t in EntryType::all().iter().copied() {
                    {
                        let label = t.label();
                        rsx! {
                            button {
                                key: "{label}",
                                class: if filter() == Some(t) { "chip active" } else { "chip" },
                                onclick: move |_| filter.set(Some(t)),
                                "{label}"
                            }
                        }
                    }
                }
                button {
                    class: "button primary",
                    onclick: move |_| editing.set(Some(Editing::New)),
                    "+ Entry"
                }
            }

            if let Some(message) = error() {
                div { class: "inline-error", "{message}" }
            }

            if groups.is_empty() {
                EmptyState {
                    message: "No changelog entries",
                    action_label: "Add the first one".to_string(),
                    on_action: move |_| editing.set(Some(Editing::New)),
                }
            }

            for (month, items) in groups {
                div { key: "{month}", class: "timeline-group",
                    div { class: "timeline-month", "{month}" }
                    for entry in items {
                        {
                            let color = entry_color(entry.entry_type);
                            let label = entry.entry_type.label();
                            let day = entry.entry_date.format("%b %d").to_string();
                            let edit_entry = entry.clone();
                            let delete_entry = entry.clone();
                            rsx! {
                                div {
                                    key: "{entry.id}",
                                    class: "timeline-entry",
                                    style: "--entry-color: {color}",
                                    div { class: "timeline-date", "{day}" }
                                    div {
                                        div {
                                            span { class: "badge", style: "--badge-color: {color}", "{label}" }
                                            " "
                                            strong { "{entry.title}" }
                                        }
                                        if let Some(description) = entry.description.as_deref() {
                                            div { class: "list-item-sub", "{description}" }
                                        }
                                    }
                                    div {
                                        if let Some(version) = entry.version.as_deref() {
                                            span { class: "timeline-version", "{version} " }
                                        }
                                        button {
                                            class: "link-button",
                                            onclick: move |_| editing.set(Some(Editing::Existing(edit_entry.clone()))),
                                            "Edit"
                                        }
                                        " "
                                        button {
                                            class: "link-button",
                                            onclick: move |_| deleting.set(Some(delete_entry.clone())),
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(mode) = editing() {
                ChangelogForm {
                    initial: match &mode {
                        Editing::New => None,
                        Editing::Existing(entry) => Some(ChangelogDraft::from(entry)),
                    },
                    entry_id: match &mode {
                        Editing::New => None,
                        Editing::Existing(entry) => Some(entry.id),
                    },
                    callbacks: callbacks.clone(),
                    on_close: move |_| editing.set(None),
                }
            }

            if let Some(entry) = deleting() {
                ConfirmDelete {
                    what: format!("\"{}\"", entry.title),
                    on_confirm: move |_| confirm(Confirmation::Confirmed),
                    on_cancel: move |_| cancel(Confirmation::Cancelled),
                }
            }
        }
    }
}

/// Add or edit dialog. Validation failures keep the dialog open with the
/// entered values intact.
#[component]
fn ChangelogForm(
    initial: Option<ChangelogDraft>,
    entry_id: Option<u64>,
    callbacks: CrudCallbacks<ChangelogDraft>,
    on_close: EventHandler<()>,
) -> Element {
    let seed = initial.clone();
    let mut entry_type = use_signal(|| seed.as_ref().map_or(EntryType::Feature, |d| d.entry_type));
    let seed = initial.clone();
    let mut title = use_signal(|| seed.as_ref().map(|d| d.title.clone()).unwrap_or_default());
    let seed = initial.clone();
    let mut description = use_signal(|| {
        seed.as_ref()
            .and_then(|d| d.description.clone())
            .unwrap_or_default()
    });
    let seed = initial.clone();
    let mut version = use_signal(|| seed.as_ref().and_then(|d| d.version.clone()).unwrap_or_default());
    let seed = initial.clone();
    let mut entry_date = use_signal(|| {
        seed.as_ref()
            .map_or_else(|| Utc::now().date_naive(), |d| d.entry_date)
            .format("%Y-%m-%d")
            .to_string()
    });
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let Ok(date) = NaiveDate::parse_from_str(&entry_date(), "%Y-%m-%d") else {
            error.set(Some("entry_date: Use YYYY-MM-DD".to_string()));
            return;
        };
        let draft = ChangelogDraft {
            entry_type: entry_type(),
            title: title().trim().to_string(),
            description: optional(&description()),
            version: optional(&version()),
            entry_date: date,
        };
        if let Err(e) = draft.validate() {
            error.set(Some(e.to_string()));
            return;
        }
        let pending = match entry_id {
            Some(id) => callbacks.update(id, draft),
            None => callbacks.add(draft),
        };
        saving.set(true);
        spawn(async move {
            match pending.await {
                Ok(()) => on_close.call(()),
                Err(e) => error.set(Some(e.message)),
            }
            saving.set(false);
        });
    };

    let heading = if entry_id.is_some() { "Edit entry" } else { "New entry" }.to_string();
    let current_type = entry_type().as_str();
    let type_options: Vec<(&'static str, &'static str)> = EntryType::all()
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect();

    rsx! {
        datacore_ui::Modal { title: heading, on_close: move |_| on_close.call(()),
            div { class: "form",
                div { class: "field",
                    label { "Type" }
                    select {
                        value: "{current_type}",
                        onchange: move |e| {
                            if let Some(t) = EntryType::parse(&e.value()) {
                                entry_type.set(t);
                            }
                        },
                        for (value, label) in type_options {
                            option { key: "{value}", value: "{value}", selected: value == current_type, "{label}" }
                        }
                    }
                }
                div { class: "field",
                    label { "Title" }
                    input { value: "{title}", oninput: move |e| title.set(e.value()) }
                }
                div { class: "field-row",
                    div { class: "field",
                        label { "Version" }
                        input { value: "{version}", oninput: move |e| version.set(e.value()) }
                    }
                    div { class: "field",
                        label { "Date" }
                        input { r#type: "date", value: "{entry_date}", oninput: move |e| entry_date.set(e.value()) }
                    }
                }
                div { class: "field",
                    label { "Description" }
                    textarea { value: "{description}", oninput: move |e| description.set(e.value()) }
                }
                if let Some(message) = error() {
                    div { class: "field-error", "{message}" }
                }
                div { class: "button-row",
                    button { class: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button { class: "button primary", disabled: saving(), onclick: submit, "Save" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_changes_use_error_color() {
        assert!(entry_color(EntryType::BreakingChange).contains("status-error"));
        assert_ne!(entry_color(EntryType::Fix), entry_color(EntryType::Feature));
    }
}
