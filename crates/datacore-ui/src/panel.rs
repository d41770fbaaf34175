//! Panel, data row, stat, and gauge.

use dioxus::prelude::*;

use crate::rolling::RollingText;

/// Titled container with a colored header stripe.
#[component]
pub fn Panel(
    title: String,
    color: Option<String>,
    header_right: Option<Element>,
    footer: Option<Element>,
    #[props(default)] no_padding: bool,
    children: Element,
) -> Element {
    let color = color.unwrap_or_else(|| "var(--accent, var(--lcars-sunflower))".to_string());
    let body_class = if no_padding {
        "panel-body no-padding"
    } else {
        "panel-body"
    };

    rsx! {
        section { class: "panel", style: "--panel-color: {color}",
            header { class: "panel-header",
                span { class: "panel-title", "{title}" }
                if let Some(right) = header_right {
                    div { class: "panel-header-right", {right} }
                }
            }
            div { class: "{body_class}", {children} }
            if let Some(extra) = footer {
                div { class: "panel-footer", {extra} }
            }
        }
    }
}

/// Label/value pair.
#[component]
pub fn DataRow(
    label: String,
    value: String,
    icon: Option<String>,
    color: Option<String>,
    #[props(default)] rolling: bool,
) -> Element {
    let style = color
        .map(|c| format!("--row-color: {}", c))
        .unwrap_or_default();

    rsx! {
        div { class: "data-row", style: "{style}",
            if let Some(icon) = icon {
                span { class: "data-row-icon", "{icon}" }
            }
            span { class: "data-row-label", "{label}" }
            span { class: "data-row-value",
                if rolling {
                    RollingText { text: value.clone() }
                } else {
                    "{value}"
                }
            }
        }
    }
}

/// Compact figure with label, large value, and icon.
#[component]
pub fn Stat(
    label: String,
    value: String,
    icon: Option<String>,
    color: Option<String>,
) -> Element {
    let color = color.unwrap_or_else(|| "var(--accent)".to_string());

    rsx! {
        div { class: "stat", style: "--stat-color: {color}",
            if let Some(icon) = icon {
                div { class: "stat-icon", "{icon}" }
            }
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

/// Fill percentage for a gauge, bounded to `0..=100`.
pub fn gauge_percent(value: f64, max: f64) -> f64 {
    if !(max > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Labeled progress bar with a value overlay.
#[component]
pub fn Gauge(
    label: String,
    value: f64,
    #[props(default = 100.0)] max: f64,
    #[props(default)] unit: String,
    color: Option<String>,
) -> Element {
    let pct = gauge_percent(value, max);
    let fill_color = color.unwrap_or_else(|| "var(--accent)".to_string());
    let display_val = format!("{:.0}{}", value, unit);

    rsx! {
        div { class: "gauge",
            span { class: "gauge-label", "{label}" }
            div { class: "gauge-track",
                div {
                    class: "gauge-fill",
                    style: "width: {pct:.1}%; background: {fill_color}",
                }
                span { class: "gauge-value", "{display_val}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_percent_is_bounded() {
        assert_eq!(gauge_percent(50.0, 200.0), 25.0);
        assert_eq!(gauge_percent(300.0, 200.0), 100.0);
        assert_eq!(gauge_percent(-5.0, 100.0), 0.0);
        assert_eq!(gauge_percent(5.0, 0.0), 0.0);
        assert_eq!(gauge_percent(f64::NAN, 100.0), 0.0);
    }
}
