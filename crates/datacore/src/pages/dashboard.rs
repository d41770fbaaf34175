//! Dashboard: domain counts, infrastructure health, and the selected vehicle.

use datacore_core::contract::StatusRollup;
use datacore_core::{DashboardSummary, VehicleSelection};
use datacore_ui::{Gauge, Panel, Stat, use_backend};
use dioxus::prelude::*;

use crate::components::fuel::FuelStatsPanel;
use crate::pages::data::{use_containers, use_fuel, use_hosts, use_services, use_vehicle_selection, use_vehicles};
use crate::pages::resource_view;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        h1 { class: "page-title", "Dashboard" }
        SummaryStats {}
        div { class: "page-columns",
            Panel { title: "Infrastructure", InfraHealth {} }
            Panel { title: "Vehicle", VehicleSummary {} }
        }
    }
}

/// Counts per domain.
#[component]
pub fn SummaryStats() -> Element {
    let backend = use_backend();
    let summary = use_resource(move || {
        let backend = backend.clone();
        async move { backend.dashboard_summary().await }
    });

    resource_view(summary, |summary: DashboardSummary| {
        rsx! {
            div { class: "stat-grid",
                Stat { label: "Vehicles", value: summary.vehicles.to_string(), icon: "\u{1F697}".to_string() }
                Stat { label: "Notes", value: summary.notes.to_string(), icon: "\u{270E}".to_string() }
                Stat { label: "Projects", value: summary.projects.to_string(), icon: "\u{25C8}".to_string() }
                Stat { label: "Knowledge", value: summary.knowledge_base.to_string(), icon: "\u{2630}".to_string() }
                Stat { label: "Hosts", value: summary.hosts.to_string(), icon: "\u{2395}".to_string() }
                Stat { label: "Devices", value: summary.devices.to_string(), icon: "\u{2302}".to_string() }
            }
        }
    })
}

fn rollup_caption(label: &str, rollup: &StatusRollup) -> String {
    format!("{} {}/{}", label, rollup.healthy, rollup.total)
}

/// Healthy share of hosts, containers, and monitored services.
#[component]
pub fn InfraHealth() -> Element {
    let (hosts, _) = use_hosts();
    let containers = use_containers();
    let services = use_services();

    let rollups: Vec<(String, f64)> = [
        hosts
            .read()
            .clone()
            .and_then(Result::ok)
            .map(|h| StatusRollup::hosts(&h))
            .map(|r| (rollup_caption("Hosts", &r), r.healthy_percent())),
        containers
            .read()
            .clone()
            .and_then(Result::ok)
            .map(|c| StatusRollup::containers(c.iter()))
            .map(|r| (rollup_caption("Containers", &r), r.healthy_percent())),
        services
            .read()
            .clone()
            .and_then(Result::ok)
            .map(|s| StatusRollup::services(&s))
            .map(|r| (rollup_caption("Services", &r), r.healthy_percent())),
    ]
    .into_iter()
    .flatten()
    .collect();

    rsx! {
        for (caption, percent) in rollups {
            Gauge { key: "{caption}", label: caption.clone(), value: percent, unit: "%", color: "var(--status-ok)".to_string() }
        }
    }
}

/// Vehicle picker with fuel stats for the chosen one.
#[component]
pub fn VehicleSummary() -> Element {
    let vehicles = use_vehicles();
    let (selection, mut select) = use_vehicle_selection();

    resource_view(vehicles, move |vehicles| {
        let current = selection().to_string();
        let tracked = format!("{} vehicles tracked", vehicles.len());
        let chosen = selection()
            .vehicle_id()
            .filter(|id| vehicles.iter().any(|v| v.id == *id));
        rsx! {
            div { class: "field",
                label { "Summarize" }
                select {
                    value: "{current}",
                    onchange: move |e| select(VehicleSelection::parse(&e.value())),
                    option { value: "all", selected: current == "all", "All vehicles" }
                    for vehicle in vehicles.iter() {
                        {
                            let id = vehicle.id.to_string();
                            let selected = current == id;
                            let title = vehicle.title();
                            rsx! {
                                option { key: "{id}", value: "{id}", selected, "{title}" }
                            }
                        }
                    }
                }
            }
            if let Some(id) = chosen {
                for key in std::iter::once(id) {
                    VehicleFuel { key: "{key}", vehicle_id: key }
                }
            } else {
                div { class: "list-item-sub", "{tracked}" }
            }
        }
    })
}

#[component]
fn VehicleFuel(vehicle_id: u64) -> Element {
    let (entries, _) = use_fuel(vehicle_id);
    resource_view(entries, |entries| rsx! {
        FuelStatsPanel { entries }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollup_caption() {
        let rollup = StatusRollup {
            total: 4,
            healthy: 3,
            degraded: 1,
            down: 0,
            unknown: 0,
        };
        assert_eq!(rollup_caption("Hosts", &rollup), "Hosts 3/4");
    }
}
