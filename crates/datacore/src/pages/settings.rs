//! Settings: theme, color scheme, and the dashboard vehicle.

use datacore_core::VehicleSelection;
use datacore_ui::{DataRow, PalettePicker, Panel, ThemeSwitcher, use_reduced_motion, use_theme_state};
use dioxus::prelude::*;

use crate::launch_options;
use crate::pages::data::{use_vehicle_selection, use_vehicles};
use crate::pages::resource_view;

#[component]
pub fn Settings() -> Element {
    let state = use_theme_state();
    let reduced = use_reduced_motion();
    let vehicles = use_vehicles();
    let (selection, mut select) = use_vehicle_selection();

    let storage = launch_options()
        .settings_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "in memory".to_string());
    let motion = if reduced { "reduced" } else { "full" }.to_string();
    let scheme = state.color_scheme.to_string();

    rsx! {
        h1 { class: "page-title", "Settings" }
        div { class: "page-columns",
            Panel { title: "Theme",
                ThemeSwitcher {}
            }
            Panel { title: "Dashboard",
                div { class: "field",
                    label { "Vehicle summarized on the dashboard" }
                    {resource_view(vehicles, move |vehicles| {
                        let current = selection().to_string();
                        rsx! {
                            select {
                                value: "{current}",
                                onchange: move |e| select(VehicleSelection::parse(&e.value())),
                                option { value: "all", selected: current == "all", "All vehicles" }
                                for vehicle in vehicles {
                                    {
                                        let id = vehicle.id.to_string();
                                        let selected = current == id;
                                        rsx! {
                                            option { key: "{id}", value: "{id}", selected, "{vehicle.name}" }
                                        }
                                    }
                                }
                            }
                        }
                    })}
                }
                DataRow { label: "Motion", value: motion }
                DataRow { label: "Settings file", value: storage }
            }
        }
        if !state.theme.is_console() {
            Panel { title: "Color scheme \u{00B7} {scheme}",
                PalettePicker {}
            }
        }
    }
}
