use datacore_core::contract::StatusRollup;
use datacore_ui::{NavLink, Panel};
use dioxus::prelude::*;

use crate::components::hosts::{ContainerTable, HostList, ServiceTable};
use crate::pages::data::{use_containers, use_hosts, use_services};
use crate::pages::infrastructure::RollupStats;
use crate::pages::resource_view;

#[component]
pub fn ConsoleInfrastructure() -> Element {
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
        Panel { title: "SYSTEMS STATUS",
            header_right: rsx! {
                NavLink { to: "/infrastructure/printer", "REPLICATOR" }
            },
            RollupStats { hosts: host_rollup, containers: container_rollup, services: service_rollup }
        }
        Panel { title: "COMPUTER CORES", color: "var(--lcars-ice)".to_string(),
            {resource_view(hosts, move |hosts| rsx! {
                HostList { hosts, callbacks: callbacks.clone() }
            })}
        }
        div { class: "page-columns",
            Panel { title: "PODS", color: "var(--lcars-butterscotch)".to_string(), no_padding: true,
                {resource_view(containers, |containers| rsx! {
                    ContainerTable { containers }
                })}
            }
            Panel { title: "SUBSPACE LINKS", color: "var(--lcars-lilac)".to_string(), no_padding: true,
                {resource_view(services, |services| rsx! {
                    ServiceTable { services }
                })}
            }
        }
    }
}
