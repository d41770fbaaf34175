//! 3D printer page.

use datacore_ui::NavLink;
use dioxus::prelude::*;

use crate::components::printer::{PrinterView, use_printer_feed};

#[component]
pub fn Printer() -> Element {
    let feed = use_printer_feed();

    rsx! {
        div { class: "button-row",
            NavLink { to: "/infrastructure", "\u{2190} Infrastructure" }
        }
        h1 { class: "page-title", "Printer" }
        PrinterView { state: feed() }
    }
}
