//! Vehicle list and per-vehicle fuel log.

use datacore_ui::{NavLink, Panel};
use dioxus::prelude::*;

use crate::components::common::EmptyState;
use crate::components::fuel::{FuelLog, FuelStatsPanel};
use crate::pages::data::{use_fuel, use_vehicles};
use crate::pages::{NotFound, resource_view};
use crate::routes::use_route_id;

#[component]
pub fn Vehicles() -> Element {
    let vehicles = use_vehicles();

    rsx! {
        h1 { class: "page-title", "Vehicles" }
        {resource_view(vehicles, |vehicles| rsx! {
            if vehicles.is_empty() {
                EmptyState { message: "No vehicles yet" }
            }
            ul { class: "list",
                for vehicle in vehicles {
                    {
                        let to = format!("/vehicles/{}", vehicle.id);
                        let title = vehicle.title();
                        rsx! {
                            li { key: "{vehicle.id}", class: "list-item",
                                div { class: "list-item-main",
                                    NavLink { to, "{vehicle.name}" }
                                    div { class: "list-item-sub", "{title}" }
                                }
                            }
                        }
                    }
                }
            }
        })}
    }
}

#[component]
pub fn VehicleDetail() -> Element {
    match use_route_id() {
        Some(id) => rsx! {
            VehicleFuelPage { vehicle_id: id }
        },
        None => rsx! {
            NotFound { path: "/vehicles" }
        },
    }
}

#[component]
fn VehicleFuelPage(vehicle_id: u64) -> Element {
    let vehicles = use_vehicles();
    let (entries, callbacks) = use_fuel(vehicle_id);

    let title = vehicles
        .read()
        .clone()
        .and_then(Result::ok)
        .and_then(|list| list.into_iter().find(|v| v.id == vehicle_id))
        .map(|v| v.title())
        .unwrap_or_else(|| format!("Vehicle {}", vehicle_id));

    rsx! {
        div { class: "button-row",
            NavLink { to: "/vehicles", "\u{2190} Vehicles" }
        }
        h1 { class: "page-title", "{title}" }
        {resource_view(entries, move |entries| rsx! {
            FuelStatsPanel { entries: entries.clone() }
            Panel { title: "Fuel log",
                FuelLog { entries, callbacks: callbacks.clone() }
            }
        })}
    }
}
