//! Hosts, their containers and services, and the host form.

use chrono::Utc;
use datacore_core::contract::infra::{Container, Host, HostDraft, Service, StatusColor};
use datacore_core::contract::{Confirmation, CrudCallbacks};
use datacore_ui::{DataRow, use_nav};
use dioxus::prelude::*;

use crate::components::common::{ConfirmDelete, EmptyState, optional, status_badge};

#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(u64, HostDraft),
}

fn draft_of(host: &Host) -> HostDraft {
    HostDraft {
        name: host.name.clone(),
        host_type: host.host_type.clone(),
        hostname: host.hostname.clone(),
        ip_address: host.ip_address.clone(),
        mac_address: host.mac_address.clone(),
        location: host.location.clone(),
    }
}

/// Hosts with status, staleness, and add/edit/delete.
#[component]
pub fn HostList(hosts: Vec<Host>, callbacks: CrudCallbacks<HostDraft>) -> Element {
    let mut nav = use_nav();
    let mut editing = use_signal(|| None::<Editing>);
    let mut deleting = use_signal(|| None::<(u64, String)>);
    let mut error = use_signal(|| None::<String>);
    let now = Utc::now();

    let delete_callbacks = callbacks.clone();
    let mut resolve_delete = move |confirmation: Confirmation| {
        let Some((id, _)) = deleting() else { return };
        deleting.set(None);
        if let Some(pending) = delete_callbacks.delete_confirmed(id, confirmation) {
            spawn(async move {
                if let Err(e) = pending.await {
                    error.set(Some(e.message));
                }
            });
        }
    };
    let mut resolve_cancel = resolve_delete.clone();

    rsx! {
        div { class: "button-row",
            button { class: "button primary", onclick: move |_| editing.set(Some(Editing::New)), "+ Host" }
        }
        if let Some(message) = error() {
            div { class: "inline-error", "{message}" }
        }
        if hosts.is_empty() {
            EmptyState {
                message: "No hosts registered",
                action_label: "Add a host".to_string(),
                on_action: move |_| editing.set(Some(Editing::New)),
            }
        }
        ul { class: "list",
            for host in hosts {
                {
                    let stale = host.is_stale(now);
                    let class = if stale { "list-item stale" } else { "list-item" };
                    let detail = format!("/infrastructure/hosts/{}", host.id);
                    let sub = [host.ip_address.clone().unwrap_or_default(), host.os_label(), host.location.clone().unwrap_or_default()]
                        .into_iter()
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(" \u{00B7} ");
                    let draft = draft_of(&host);
                    let id = host.id;
                    let name = host.name.clone();
                    rsx! {
                        li { key: "{host.id}", class: "{class}",
                            {status_badge(&host.status)}
                            div { class: "list-item-main",
                                button { class: "link-button", onclick: move |_| nav.navigate(&detail), "{host.name}" }
                                div { class: "list-item-sub", "{sub}" }
                            }
                            if stale {
                                span { class: "list-item-sub", "stale" }
                            }
                            button {
                                class: "link-button",
                                onclick: move |_| editing.set(Some(Editing::Existing(id, draft.clone()))),
                                "Edit"
                            }
                            button {
                                class: "link-button",
                                onclick: move |_| deleting.set(Some((id, name.clone()))),
                                "Delete"
                            }
                        }
                    }
                }
            }
        }

        if let Some(mode) = editing() {
            HostForm {
                initial: match &mode {
                    Editing::New => None,
                    Editing::Existing(_, draft) => Some(draft.clone()),
                },
                host_id: match &mode {
                    Editing::New => None,
                    Editing::Existing(id, _) => Some(*id),
                },
                callbacks: callbacks.clone(),
                on_close: move |_| editing.set(None),
            }
        }

        if let Some((_, name)) = deleting() {
            ConfirmDelete {
                what: format!("host \"{}\"", name),
                on_confirm: move |_| resolve_delete(Confirmation::Confirmed),
                on_cancel: move |_| resolve_cancel(Confirmation::Cancelled),
            }
        }
    }
}

/// Add or edit a host. Keeps the entered values when validation or the
/// back-end rejects them.
#[component]
pub fn HostForm(
    initial: Option<HostDraft>,
    host_id: Option<u64>,
    callbacks: CrudCallbacks<HostDraft>,
    on_close: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone().unwrap_or_default());
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let current = draft();
        let cleaned = HostDraft {
            name: current.name.trim().to_string(),
            host_type: current.host_type.trim().to_string(),
            hostname: current.hostname.as_deref().and_then(optional),
            ip_address: current.ip_address.as_deref().and_then(optional),
            mac_address: current.mac_address.as_deref().and_then(optional),
            location: current.location.as_deref().and_then(optional),
        };
        if let Err(e) = cleaned.validate() {
            error.set(Some(e.reason));
            return;
        }
        let pending = match host_id {
            Some(id) => callbacks.update(id, cleaned),
            None => callbacks.add(cleaned),
        };
        spawn(async move {
            match pending.await {
                Ok(()) => on_close.call(()),
                Err(e) => error.set(Some(e.message)),
            }
        });
    };

    let title = if host_id.is_some() { "Edit host" } else { "New host" }.to_string();
    let d = draft();
    let hostname = d.hostname.clone().unwrap_or_default();
    let ip = d.ip_address.clone().unwrap_or_default();
    let mac = d.mac_address.clone().unwrap_or_default();
    let location = d.location.clone().unwrap_or_default();

    rsx! {
        datacore_ui::Modal { title, on_close: move |_| on_close.call(()),
            div { class: "form",
                div { class: "field-row",
                    div { class: "field",
                        label { "Name" }
                        input { value: "{d.name}", oninput: move |e| draft.write().name = e.value() }
                    }
                    div { class: "field",
                        label { "Type" }
                        input {
                            value: "{d.host_type}",
                            placeholder: "server, sbc, nas\u{2026}",
                            oninput: move |e| draft.write().host_type = e.value(),
                        }
                    }
                }
                div { class: "field-row",
                    div { class: "field",
                        label { "Hostname" }
                        input { value: "{hostname}", oninput: move |e| draft.write().hostname = Some(e.value()) }
                    }
                    div { class: "field",
                        label { "Location" }
                        input { value: "{location}", oninput: move |e| draft.write().location = Some(e.value()) }
                    }
                }
                div { class: "field-row",
                    div { class: "field",
                        label { "IP address" }
                        input { value: "{ip}", oninput: move |e| draft.write().ip_address = Some(e.value()) }
                    }
                    div { class: "field",
                        label { "MAC address" }
                        input { value: "{mac}", oninput: move |e| draft.write().mac_address = Some(e.value()) }
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

/// Identity and hardware rows for a host detail page.
#[component]
pub fn HostFacts(host: Host) -> Element {
    let now = Utc::now();
    let last_seen = match host.last_seen_at {
        Some(seen) => {
            let minutes = (now - seen).num_minutes();
            if minutes < 1 {
                "just now".to_string()
            } else {
                format!("{} min ago", minutes)
            }
        }
        None => "never".to_string(),
    };
    let status_color = host.status.color().to_string();
    let hardware = host.hardware.clone().unwrap_or_default();

    rsx! {
        DataRow { label: "Status", value: host.status.label().to_string(), color: status_color }
        DataRow { label: "Type", value: host.host_type.clone() }
        if let Some(hostname) = host.hostname.clone() {
            DataRow { label: "Hostname", value: hostname }
        }
        if let Some(ip) = host.ip_address.clone() {
            DataRow { label: "IP", value: ip }
        }
        if let Some(mac) = host.mac_address.clone() {
            DataRow { label: "MAC", value: mac }
        }
        if !host.os_label().is_empty() {
            DataRow { label: "OS", value: host.os_label() }
        }
        if let Some(cpu) = hardware.cpu_model {
            DataRow { label: "CPU", value: cpu }
        }
        if let Some(cores) = hardware.cpu_cores {
            DataRow { label: "Cores", value: cores.to_string() }
        }
        if let Some(memory) = hardware.memory_gb {
            DataRow { label: "Memory", value: format!("{:.0} GB", memory) }
        }
        DataRow { label: "Last seen", value: last_seen, rolling: true }
    }
}

#[component]
pub fn ContainerTable(containers: Vec<Container>) -> Element {
    if containers.is_empty() {
        return rsx! {
            EmptyState { message: "No containers reported" }
        };
    }
    rsx! {
        table { class: "table",
            thead {
                tr {
                    th { "Status" }
                    th { "Name" }
                    th { "Image" }
                    th { "Compose" }
                }
            }
            tbody {
                for container in containers {
                    {
                        let compose = container.compose_project.clone().unwrap_or_default();
                        rsx! {
                            tr { key: "{container.id}",
                                td { {status_badge(&container.status)} }
                                td { "{container.name}" }
                                td { "{container.image}" }
                                td { "{compose}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Monitored services first, then the rest.
#[component]
pub fn ServiceTable(services: Vec<Service>) -> Element {
    if services.is_empty() {
        return rsx! {
            EmptyState { message: "No services configured" }
        };
    }
    let mut rows = services.clone();
    rows.sort_by_key(|s| (!s.is_monitored, s.name.to_lowercase()));

    rsx! {
        table { class: "table",
            thead {
                tr {
                    th { "Status" }
                    th { "Name" }
                    th { "Check" }
                    th { "Response" }
                }
            }
            tbody {
                for service in rows {
                    {
                        let check = format!(
                            "{} every {}s",
                            service.service_type.as_str(),
                            service.check_interval_seconds
                        );
                        let response = service
                            .last_response_time_ms
                            .map(|ms| format!("{} ms", ms))
                            .unwrap_or_else(|| "\u{2014}".to_string());
                        let class = if service.is_monitored { "" } else { "stale" };
                        rsx! {
                            tr { key: "{service.id}", class: "{class}",
                                td { {status_badge(&service.status)} }
                                td { "{service.name}" }
                                td { "{check}" }
                                td { "{response}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datacore_core::contract::infra::HostStatus;

    #[test]
    fn test_draft_of_copies_editable_fields() {
        let host = Host {
            id: 9,
            name: "atlas".into(),
            host_type: "server".into(),
            hostname: Some("atlas.lan".into()),
            os_name: None,
            os_version: None,
            ip_address: Some("10.0.0.10".into()),
            mac_address: None,
            location: Some("Rack".into()),
            status: HostStatus::Online,
            hardware: None,
            containers: None,
            services: None,
            has_docker_integration: false,
            host_stats_available: false,
            last_seen_at: None,
        };
        let draft = draft_of(&host);
        assert_eq!(draft.name, "atlas");
        assert_eq!(draft.ip_address.as_deref(), Some("10.0.0.10"));
        assert!(draft.validate().is_ok());
    }
}
