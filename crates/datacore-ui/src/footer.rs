//! Console footer: stardate clock and domain counts.

use std::time::Duration;

use chrono::Utc;
use datacore_core::clock::{format_stardate, format_utc};
use datacore_core::{ConsoleVariant, SummaryState};
use dioxus::prelude::*;

use crate::backend::{use_backend, use_poll_intervals};
use crate::provider::use_theme_state;
use crate::rolling::RollingText;

const SEGMENT_COLORS: [&str; 8] = [
    "var(--lcars-sunflower)",
    "var(--lcars-african-violet)",
    "var(--lcars-butterscotch)",
    "var(--lcars-sky)",
    "var(--lcars-lilac)",
    "var(--lcars-tanoi)",
    "var(--lcars-ice)",
    "var(--lcars-almond-creme)",
];

#[component]
pub fn Footer() -> Element {
    let backend = use_backend();
    let intervals = use_poll_intervals();
    let state = use_theme_state();

    let mut now = use_signal(Utc::now);
    let mut summary = use_signal(SummaryState::new);

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            now.set(Utc::now());
        }
    });

    use_future(move || {
        let backend = backend.clone();
        async move {
            loop {
                let result = backend.dashboard_summary().await;
                summary.write().apply(result);
                tokio::time::sleep(intervals.summary).await;
            }
        }
    });

    let stardate = format_stardate(now());
    let utc = format_utc(now());
    let segments = summary
        .read()
        .value()
        .map(|s| s.segments().to_vec())
        .unwrap_or_default();
    let cap_class = match state.theme.variant() {
        Some(ConsoleVariant::Modern) => "footer-cap flat",
        _ => "footer-cap rounded",
    };

    rsx! {
        footer { class: "console-footer",
            div { class: "footer-segment footer-clock",
                span { class: "footer-label", "SD" }
                RollingText { text: stardate, class: "footer-value" }
                span { class: "footer-label", "UTC" }
                RollingText { text: utc, class: "footer-value" }
            }
            for ((label, count), color) in segments.into_iter().zip(SEGMENT_COLORS) {
                div {
                    key: "{label}",
                    class: "footer-segment",
                    style: "--segment-color: {color}",
                    span { class: "footer-label", "{label}" }
                    span { class: "footer-value", "{count}" }
                }
            }
            div { class: "footer-filler" }
            div { class: "{cap_class}" }
        }
    }
}
