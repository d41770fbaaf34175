//! Fuel log: stats, history table, and the fill-up form.

use chrono::{NaiveDate, Utc};
use datacore_core::contract::CrudCallbacks;
use datacore_core::contract::fuel::{FuelDraft, FuelEntry, FuelStats};
use datacore_ui::Stat;
use dioxus::prelude::*;

use crate::components::common::EmptyState;

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

fn mpg_label(mpg: Option<f64>) -> String {
    mpg.map(|m| format!("{:.1}", m))
        .unwrap_or_else(|| "\u{2014}".to_string())
}

/// Raw text of the form fields, parsed on submit.
#[derive(Clone, Debug, Default, PartialEq)]
struct FuelInput {
    date: String,
    mileage: String,
    gallons: String,
    price: String,
    missed_previous: bool,
}

impl FuelInput {
    fn today() -> Self {
        Self {
            date: Utc::now().date_naive().to_string(),
            ..Self::default()
        }
    }

    fn parse(&self) -> Result<FuelDraft, String> {
        let date: NaiveDate = self
            .date
            .trim()
            .parse()
            .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;
        let number = |text: &str, what: &str| -> Result<f64, String> {
            text.trim()
                .parse::<f64>()
                .map_err(|_| format!("{} must be a number", what))
        };
        let draft = FuelDraft {
            date,
            mileage: number(&self.mileage, "Mileage")?,
            gallons_added: number(&self.gallons, "Gallons")?,
            cost_per_gallon: number(&self.price, "Price")?,
            missed_previous: self.missed_previous,
        };
        draft.validate().map_err(|e| e.reason)?;
        Ok(draft)
    }
}

/// Totals and MPG figures for a vehicle.
#[component]
pub fn FuelStatsPanel(entries: Vec<FuelEntry>) -> Element {
    let stats = FuelStats::from_entries(&entries);
    let fill_ups = stats.fill_ups.to_string();
    let total_cost = money(stats.total_cost);
    let gallons = format!("{:.1}", stats.total_gallons);
    let average = mpg_label(stats.average_mpg);
    let best = mpg_label(stats.best_mpg);
    let worst = mpg_label(stats.worst_mpg);

    rsx! {
        div { class: "stat-grid",
            Stat { label: "Fill-ups", value: fill_ups, icon: "\u{26FD}".to_string() }
            Stat { label: "Total spent", value: total_cost }
            Stat { label: "Gallons", value: gallons }
            Stat { label: "Avg MPG", value: average, color: "var(--status-ok)".to_string() }
            Stat { label: "Best MPG", value: best }
            Stat { label: "Worst MPG", value: worst }
        }
    }
}

/// Fill-up history, newest first, with an add form.
#[component]
pub fn FuelLog(entries: Vec<FuelEntry>, callbacks: CrudCallbacks<FuelDraft>) -> Element {
    let mut adding = use_signal(|| false);
    let mut rows = entries.clone();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.mileage.total_cmp(&a.mileage)));

    rsx! {
        div { class: "button-row",
            button { class: "button primary", onclick: move |_| adding.set(true), "+ Fill-up" }
        }
        if adding() {
            FuelForm { callbacks: callbacks.clone(), on_close: move |_| adding.set(false) }
        }
        if rows.is_empty() {
            EmptyState { message: "No fill-ups logged" }
        } else {
            table { class: "table",
                thead {
                    tr {
                        th { "Date" }
                        th { "Odometer" }
                        th { "Gallons" }
                        th { "$/gal" }
                        th { "Total" }
                        th { "MPG" }
                    }
                }
                tbody {
                    for entry in rows {
                        {
                            let total = money(entry.total_cost);
                            let mpg = if entry.missed_previous.unwrap_or(false) {
                                "missed".to_string()
                            } else {
                                mpg_label(entry.mpg)
                            };
                            rsx! {
                                tr { key: "{entry.id}",
                                    td { "{entry.date}" }
                                    td { "{entry.mileage:.0}" }
                                    td { "{entry.gallons_added:.2}" }
                                    td { "{entry.cost_per_gallon:.3}" }
                                    td { "{total}" }
                                    td { "{mpg}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Fill-up form. Invalid input keeps what was typed and shows why.
#[component]
pub fn FuelForm(callbacks: CrudCallbacks<FuelDraft>, on_close: EventHandler<()>) -> Element {
    let mut input = use_signal(FuelInput::today);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        let draft = match input.read().parse() {
            Ok(draft) => draft,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        let pending = callbacks.add(draft);
        spawn(async move {
            match pending.await {
                Ok(()) => on_close.call(()),
                Err(e) => error.set(Some(e.message)),
            }
        });
    };

    let current = input();
    let preview = current
        .parse()
        .map(|d| money(d.total_cost()))
        .unwrap_or_default();

    rsx! {
        div { class: "form",
            div { class: "field-row",
                div { class: "field",
                    label { "Date" }
                    input {
                        r#type: "date",
                        value: "{current.date}",
                        oninput: move |e| input.write().date = e.value(),
                    }
                }
                div { class: "field",
                    label { "Odometer" }
                    input {
                        inputmode: "decimal",
                        value: "{current.mileage}",
                        oninput: move |e| input.write().mileage = e.value(),
                    }
                }
            }
            div { class: "field-row",
                div { class: "field",
                    label { "Gallons" }
                    input {
                        inputmode: "decimal",
                        value: "{current.gallons}",
                        oninput: move |e| input.write().gallons = e.value(),
                    }
                }
                div { class: "field",
                    label { "Price per gallon" }
                    input {
                        inputmode: "decimal",
                        value: "{current.price}",
                        oninput: move |e| input.write().price = e.value(),
                    }
                }
            }
            label { class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: current.missed_previous,
                    onchange: move |e| input.write().missed_previous = e.checked(),
                }
                "Missed the previous fill-up"
            }
            if !preview.is_empty() {
                div { class: "list-item-sub", "Total {preview}" }
            }
            if let Some(message) = error() {
                div { class: "field-error", "{message}" }
            }
            div { class: "button-row",
                button { class: "button", onclick: move |_| on_close.call(()), "Cancel" }
                button { class: "button primary", onclick: submit, "Log fill-up" }
            }
        }
    }
}
