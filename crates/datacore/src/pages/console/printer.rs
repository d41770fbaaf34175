use datacore_ui::{NavLink, Panel};
use dioxus::prelude::*;

use crate::components::printer::{PrinterView, use_printer_feed};

#[component]
pub fn ConsolePrinter() -> Element {
    let feed = use_printer_feed();
    let state = feed();
    let status = state
        .telemetry()
        .and_then(|t| t.status.state.clone())
        .unwrap_or_else(|| "OFFLINE".to_string())
        .to_uppercase();

    rsx! {
        Panel { title: "REPLICATOR \u{00B7} {status}",
            header_right: rsx! {
                NavLink { to: "/infrastructure", "SYSTEMS" }
            },
            PrinterView { state }
        }
    }
}
