use datacore_ui::Panel;
use dioxus::prelude::*;

use crate::pages::dashboard::{InfraHealth, SummaryStats, VehicleSummary};

#[component]
pub fn ConsoleDashboard() -> Element {
    rsx! {
        Panel { title: "OPERATIONS SUMMARY",
            SummaryStats {}
        }
        div { class: "page-columns",
            Panel { title: "ENGINEERING", color: "var(--lcars-ice)".to_string(),
                InfraHealth {}
            }
            Panel { title: "SHUTTLEBAY", color: "var(--lcars-butterscotch)".to_string(),
                VehicleSummary {}
            }
        }
    }
}
