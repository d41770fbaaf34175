//! Astrometrics (ship clock and alert condition) and the Trek lounge.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use datacore_core::{AlertCondition, ConsoleVariant};
use datacore_core::clock::{format_stardate, format_utc, stardate};
use datacore_ui::{Cascade, DataRow, Panel, use_theme, use_theme_state};
use dioxus::prelude::*;

const CONDITIONS: [AlertCondition; 3] = [
    AlertCondition::Nominal,
    AlertCondition::Caution,
    AlertCondition::Critical,
];

/// Stardate at UTC midnight of `date`, or `None` when unparsable.
fn stardate_of(date: &str) -> Option<String> {
    let date: NaiveDate = date.trim().parse().ok()?;
    let at = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    Some(format!("{:.1}", stardate(at)))
}

#[component]
pub fn Astrometrics() -> Element {
    let mut store = use_theme().store;
    let condition = use_theme_state().alert_condition;
    let mut now = use_signal(Utc::now);

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            now.set(Utc::now());
        }
    });

    let sd = format_stardate(now());
    let utc = format_utc(now());
    let date = now().format("%Y-%m-%d").to_string();
    let current_label = condition.label();

    rsx! {
        h1 { class: "page-title", "Astrometrics" }
        div { class: "page-columns",
            Panel { title: "Chronometer",
                DataRow { label: "Stardate", value: sd, rolling: true }
                DataRow { label: "UTC", value: utc, rolling: true }
                DataRow { label: "Earth date", value: date }
            }
            Panel { title: "Condition",
                header_right: rsx! {
                    span { class: "badge", "{current_label}" }
                },
                div { class: "button-row",
                    for c in CONDITIONS {
                        {
                            let label = c.label();
                            let class = if c == condition { "button primary" } else { "button" };
                            rsx! {
                                button {
                                    key: "{label}",
                                    class: "{class}",
                                    onclick: move |_| store.write().set_alert_condition(c),
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Trek() -> Element {
    let mut date = use_signal(|| Utc::now().date_naive().to_string());
    let converted = stardate_of(&date()).unwrap_or_else(|| "\u{2014}".to_string());
    let theme = use_theme_state().theme;
    let variant = theme.variant().unwrap_or(ConsoleVariant::Classic);

    rsx! {
        h1 { class: "page-title", "Trek" }
        div { class: "page-columns",
            Panel { title: "Stardate converter",
                div { class: "field",
                    label { "Earth date" }
                    input {
                        r#type: "date",
                        value: "{date}",
                        oninput: move |e| date.set(e.value()),
                    }
                }
                DataRow { label: "Stardate", value: converted, rolling: true }
            }
            Panel { title: "Sensor sweep", no_padding: true,
                div { class: "trek-cascade",
                    Cascade { seed: 74656, variant, labels: true }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stardate_of_new_year() {
        assert_eq!(stardate_of("2026-01-01"), Some("80000.0".to_string()));
        assert_eq!(stardate_of("not a date"), None);
    }
}
