//! Metric sparklines.

use datacore_core::contract::metrics::{MetricPoint, chronological, latest};
use dioxus::prelude::*;

const WIDTH: f64 = 240.0;
const HEIGHT: f64 = 48.0;

/// SVG polyline points for `values`, scaled to fill the box. A flat series
/// sits on the vertical middle.
fn polyline(values: &[f64], width: f64, height: f64) -> String {
    match values {
        [] => String::new(),
        [_] => format!("0,{mid:.1} {width:.1},{mid:.1}", mid = height / 2.0),
        _ => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            let step = width / (values.len() - 1) as f64;
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let y = if span > 0.0 {
                        height - (v - min) / span * height
                    } else {
                        height / 2.0
                    };
                    format!("{:.1},{:.1}", i as f64 * step, y)
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// Latest value and a sparkline of a newest-first series.
#[component]
pub fn MetricSparkline(label: String, points: Vec<MetricPoint>, color: Option<String>) -> Element {
    let color = color.unwrap_or_else(|| "var(--accent)".to_string());
    let current = latest(&points)
        .map(|p| format!("{:.1}{}", p.value, p.unit.clone().unwrap_or_default()))
        .unwrap_or_else(|| "\u{2014}".to_string());
    let values: Vec<f64> = chronological(points)
        .into_iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .collect();
    let line = polyline(&values, WIDTH, HEIGHT);

    rsx! {
        div { class: "sparkline",
            div { class: "data-row",
                span { class: "data-row-label", "{label}" }
                span { class: "data-row-value", "{current}" }
            }
            if line.is_empty() {
                div { class: "list-item-sub", "No samples in range" }
            } else {
                svg {
                    view_box: "0 0 {WIDTH} {HEIGHT}",
                    preserve_aspect_ratio: "none",
                    width: "100%",
                    height: "{HEIGHT}",
                    polyline {
                        points: "{line}",
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "2",
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_scales_to_box() {
        assert_eq!(polyline(&[0.0, 5.0, 10.0], 100.0, 10.0), "0.0,10.0 50.0,5.0 100.0,0.0");
    }

    #[test]
    fn test_polyline_flat_and_empty() {
        assert_eq!(polyline(&[], 100.0, 10.0), "");
        assert_eq!(polyline(&[3.0], 100.0, 10.0), "0,5.0 100.0,5.0");
        assert_eq!(polyline(&[2.0, 2.0], 100.0, 10.0), "0.0,5.0 100.0,5.0");
    }
}
