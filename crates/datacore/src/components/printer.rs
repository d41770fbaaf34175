//! Printer telemetry feed and its shared view.

use std::time::Duration;

use datacore_core::contract::printer::{FilamentSlot, PrinterTelemetry, Temperature};
use datacore_core::poll::PrinterState;
use datacore_ui::{DataRow, Gauge, Panel, use_backend, use_poll_intervals};
use dioxus::prelude::*;
use futures::StreamExt;

use crate::components::common::{EmptyState, LoadError, Loading};

/// Wait before reopening a closed event stream.
const RECONNECT_AFTER: Duration = Duration::from_secs(10);

/// Live printer state: a snapshot poll plus the event stream patching it
/// in between. Both loops stop when the calling page unmounts.
pub fn use_printer_feed() -> Signal<PrinterState> {
    let backend = use_backend();
    let intervals = use_poll_intervals();
    let mut state = use_signal(PrinterState::new);

    let poll_backend = backend.clone();
    use_future(move || {
        let backend = poll_backend.clone();
        async move {
            loop {
                let result = backend.printer().await;
                if let Err(e) = &result {
                    tracing::warn!("Printer poll failed: {}", e);
                }
                state.write().apply_snapshot(result);
                tokio::time::sleep(intervals.printer).await;
            }
        }
    });

    use_future(move || {
        let backend = backend.clone();
        async move {
            loop {
                let mut events = backend.printer_events();
                while let Some(event) = events.next().await {
                    state.write().apply_event(&event);
                }
                tracing::debug!("Printer event stream closed, reopening");
                tokio::time::sleep(RECONNECT_AFTER).await;
            }
        }
    });

    state
}

fn temperature_gauge(label: &str, temp: &Temperature) -> Option<(String, f64, f64, String)> {
    let current = temp.current?;
    let max = temp.target.filter(|t| *t > 0.0).or(temp.max).unwrap_or(300.0);
    let caption = match temp.target {
        Some(target) if target > 0.0 => format!("{} \u{2192} {:.0}\u{00B0}", label, target),
        _ => label.to_string(),
    };
    Some((caption, current, max, "\u{00B0}".to_string()))
}

fn remaining_label(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes?;
    Some(if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    })
}

fn slot_label(slot: &FilamentSlot) -> String {
    let material = slot.material.clone().unwrap_or_else(|| "Empty".to_string());
    match &slot.name {
        Some(name) if name != &material => format!("{} {}", material, name),
        _ => material,
    }
}

/// Telemetry, or the right placeholder for the feed's state.
#[component]
pub fn PrinterView(state: PrinterState) -> Element {
    if let Some(telemetry) = state.telemetry() {
        let stale = state.last_error().map(str::to_string);
        return rsx! {
            if let Some(message) = stale {
                div { class: "inline-error", "Showing last known data: {message}" }
            }
            PrinterTelemetryView { telemetry: telemetry.clone() }
        };
    }
    if state.not_configured() {
        return rsx! {
            EmptyState { message: "No printer configured" }
        };
    }
    match state.last_error() {
        Some(message) => rsx! {
            LoadError { message: message.to_string() }
        },
        None => rsx! {
            Loading {}
        },
    }
}

#[component]
pub fn PrinterTelemetryView(telemetry: PrinterTelemetry) -> Element {
    let status = &telemetry.status;
    let state_label = status.state.clone().unwrap_or_else(|| "unknown".to_string());
    let stage = status.stage.clone();
    let file = status.file_name.clone();
    let progress = status.progress.unwrap_or(0.0);
    let remaining = remaining_label(status.remaining_minutes);
    let printing = status.is_printing();
    let layers = telemetry.layer_label();
    let model = telemetry.device.model.clone().unwrap_or_default();
    let title = telemetry.device.name.clone();

    let temps: Vec<(String, f64, f64, String)> = [
        temperature_gauge("Nozzle", &telemetry.temperatures.nozzle),
        temperature_gauge("Bed", &telemetry.temperatures.bed),
        temperature_gauge("Chamber", &telemetry.temperatures.chamber),
    ]
    .into_iter()
    .flatten()
    .collect();

    let position = &telemetry.position;
    let axes: Vec<(&'static str, String)> = [("X", position.x), ("Y", position.y), ("Z", position.z)]
        .into_iter()
        .filter_map(|(axis, v)| v.map(|v| (axis, format!("{:.1}", v))))
        .collect();

    let light = telemetry.controls.light.as_ref().map(|c| c.state.clone());
    let fans: Vec<(String, String)> = telemetry
        .controls
        .fans
        .iter()
        .map(|(name, c)| (name.clone(), c.state.clone()))
        .collect();

    rsx! {
        div { class: "page-columns",
            Panel { title: "{title}", color: "var(--lcars-sunflower)".to_string(),
                DataRow { label: "State", value: state_label, rolling: true }
                if let Some(stage) = stage {
                    DataRow { label: "Stage", value: stage }
                }
                if !model.is_empty() {
                    DataRow { label: "Model", value: model }
                }
                if let Some(file) = file {
                    DataRow { label: "File", value: file }
                }
                if printing {
                    Gauge { label: "Progress", value: progress, unit: "%" }
                }
                if let Some(remaining) = remaining {
                    DataRow { label: "Remaining", value: remaining, rolling: true }
                }
                if let Some(layers) = layers {
                    DataRow { label: "Layer", value: layers, rolling: true }
                }
            }
            Panel { title: "Temperatures", color: "var(--lcars-tomato, var(--status-error))".to_string(),
                if temps.is_empty() {
                    div { class: "list-item-sub", "No readings" }
                }
                for (label, current, max, unit) in temps {
                    Gauge {
                        key: "{label}",
                        label: label.clone(),
                        value: current,
                        max,
                        unit,
                        color: "var(--lcars-tomato, var(--status-error))".to_string(),
                    }
                }
            }
        }
        div { class: "page-columns",
            Panel { title: "Filament", color: "var(--lcars-african-violet, var(--accent))".to_string(),
                if telemetry.filament.is_empty() {
                    div { class: "list-item-sub", "No AMS detected" }
                }
                for slot in telemetry.filament.iter() {
                    {
                        let label = slot_label(slot);
                        let swatch = slot.color.clone().unwrap_or_else(|| "transparent".to_string());
                        let class = if slot.active { "filament-slot active" } else { "filament-slot" };
                        let remaining = slot.remaining_percent.unwrap_or(0.0);
                        rsx! {
                            div { key: "{slot.index}", class: "{class}",
                                span { class: "filament-swatch", style: "background: {swatch}" }
                                Gauge { label, value: remaining, unit: "%", color: swatch.clone() }
                            }
                        }
                    }
                }
            }
            Panel { title: "Motion", color: "var(--lcars-ice, var(--accent))".to_string(),
                for (axis, value) in axes {
                    DataRow { key: "{axis}", label: axis.to_string(), value, rolling: true }
                }
                if let Some(light) = light {
                    DataRow { label: "Light", value: light }
                }
                for (name, state) in fans {
                    DataRow { key: "{name}", label: name.clone(), value: state }
                }
            }
        }
    }
}
