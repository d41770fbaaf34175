//! Infrastructure overview and host detail.

use datacore_core::contract::StatusRollup;
use datacore_core::contract::metrics::SourceType;
use datacore_ui::{NavLink, Panel, Stat};
use dioxus::prelude::*;

use crate::components::common::LoadError;
use crate::components::hosts::{ContainerTable, HostFacts, HostList, ServiceTable};
use crate::components::metrics::MetricSparkline;
use crate::pages::data::{use_containers, use_hosts, use_metric, use_services};
use crate::pages::{NotFound, resource_view};
use crate::routes::use_route_id;

/// Window shown by the host charts.
const METRIC_HOURS: i64 = 6;

fn rollup_value(rollup: &StatusRollup) -> String {
    if rollup.total == 0 {
        "0".to_string()
    } else {
        format!("{}/{}", rollup.healthy, rollup.total)
    }
}

fn rollup_color(rollup: &StatusRollup) -> String {
    if rollup.down > 0 {
        "var(--status-error)"
    } else if rollup.degraded > 0 || rollup.unknown > 0 {
        "var(--status-warn)"
    } else {
        "var(--status-ok)"
    }
    .to_string()
}

/// Healthy-over-total for each kind.
#[component]
pub fn RollupStats(hosts: StatusRollup, containers: StatusRollup, services: StatusRollup) -> Element {
    rsx! {
        div { class: "stat-grid",
            Stat { label: "Hosts up", value: rollup_value(&hosts), color: rollup_color(&hosts) }
            Stat { label: "Containers running", value: rollup_value(&containers), color: rollup_color(&containers) }
            Stat { label: "Services up", value: rollup_value(&services), color: rollup_color(&services) }
        }
    }
}

#[component]
pub fn Infrastructure() -> Element {
    let (hosts, callbacks) = use_hosts();
    let containers = use_containers();
    let services = use_services();

    let host_rollup = hosts
        .read()
        .clone()
        .and_then(Result::ok)
        .map(|h| StatusRollup::hosts(&h))
        .unwrap_or_default();
    let container_rollup = containers
        .read()
        .clone()
        .and_then(Result::ok)
        .map(|c| StatusRollup::containers(c.iter()))
        .unwrap_or_default();
    let service_rollup = services
        .read()
        .clone()
        .and_then(Result::ok)
        .map(|s| StatusRollup::services(&s))
        .unwrap_or_default();

    rsx! {
        h1 { class: "page-title", "Infrastructure" }
        RollupStats { hosts: host_rollup, containers: container_rollup, services: service_rollup }
        div { class: "button-row",
            NavLink { to: "/infrastructure/printer", "\u{1F5A8} Printer" }
        }
        Panel { title: "Hosts",
            {resource_view(hosts, move |hosts| rsx! {
                HostList { hosts, callbacks: callbacks.clone() }
            })}
        }
        div { class: "page-columns",
            Panel { title: "Containers",
                {resource_view(containers, |containers| rsx! {
                    ContainerTable { containers }
                })}
            }
            Panel { title: "Services",
                {resource_view(services, |services| rsx! {
                    ServiceTable { services }
                })}
            }
        }
    }
}

#[component]
pub fn HostDetail() -> Element {
    match use_route_id() {
        Some(id) => rsx! {
            HostPage { host_id: id }
        },
        None => rsx! {
            NotFound { path: "/infrastructure" }
        },
    }
}

#[component]
fn HostPage(host_id: u64) -> Element {
    let (hosts, _) = use_hosts();

    rsx! {
        div { class: "button-row",
            NavLink { to: "/infrastructure", "\u{2190} Infrastructure" }
        }
        {resource_view(hosts, move |hosts| {
            match hosts.into_iter().find(|h| h.id == host_id) {
                Some(host) => {
                    let name = host.name.clone();
                    let containers = host.containers().to_vec();
                    let services = host.services().to_vec();
                    let has_docker = host.has_docker_integration;
                    let has_stats = host.host_stats_available;
                    rsx! {
                        h1 { class: "page-title", "{name}" }
                        div { class: "page-columns",
                            Panel { title: "Host", HostFacts { host } }
                            if has_stats {
                                Panel { title: "Last {METRIC_HOURS} h", HostMetrics { host_id } }
                            }
                        }
                        if has_docker {
                            Panel { title: "Containers", ContainerTable { containers } }
                        }
                        Panel { title: "Services", ServiceTable { services } }
                    }
                }
                None => rsx! {
                    LoadError { message: format!("Host {} not found", host_id) }
                },
            }
        })}
    }
}

/// CPU, memory, and temperature charts of one host.
#[component]
pub fn HostMetrics(host_id: u64) -> Element {
    let cpu = use_metric(SourceType::Host, host_id, "cpu_percent", METRIC_HOURS);
    let memory = use_metric(SourceType::Host, host_id, "memory_percent", METRIC_HOURS);
    let temperature = use_metric(SourceType::Host, host_id, "temperature", METRIC_HOURS);

    rsx! {
        {resource_view(cpu, |points| rsx! {
            MetricSparkline { label: "CPU", points, color: "var(--lcars-sunflower, var(--accent))".to_string() }
        })}
        {resource_view(memory, |points| rsx! {
            MetricSparkline { label: "Memory", points, color: "var(--lcars-ice, var(--accent))".to_string() }
        })}
        {resource_view(temperature, |points| rsx! {
            MetricSparkline { label: "Temperature", points, color: "var(--lcars-tomato, var(--status-error))".to_string() }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollup_color_prefers_worst() {
        let mut rollup = StatusRollup {
            total: 3,
            healthy: 3,
            ..StatusRollup::default()
        };
        assert_eq!(rollup_color(&rollup), "var(--status-ok)");
        rollup.degraded = 1;
        assert_eq!(rollup_color(&rollup), "var(--status-warn)");
        rollup.down = 1;
        assert_eq!(rollup_color(&rollup), "var(--status-error)");
        assert_eq!(rollup_value(&rollup), "3/3");
        assert_eq!(rollup_value(&StatusRollup::default()), "0");
    }
}
