//! Time-series metric points and queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub metric_name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Host,
    Container,
    Service,
    Device,
    Printer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Raw,
    Minute,
    Hour,
    Day,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricQuery {
    pub source_type: SourceType,
    pub source_id: u64,
    pub metric_name: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub resolution: Resolution,
}

impl MetricQuery {
    /// Resolution that keeps a chart under a few hundred points.
    pub fn suggested_resolution(from: DateTime<Utc>, to: DateTime<Utc>) -> Resolution {
        let hours = (to - from).num_hours();
        match hours {
            h if h <= 6 => Resolution::Raw,
            h if h <= 48 => Resolution::Minute,
            h if h <= 24 * 30 => Resolution::Hour,
            _ => Resolution::Day,
        }
    }
}

/// The back-end returns newest first; charts want oldest first.
pub fn chronological(mut points: Vec<MetricPoint>) -> Vec<MetricPoint> {
    points.reverse();
    points
}

/// Latest value in a newest-first response.
pub fn latest(points: &[MetricPoint]) -> Option<&MetricPoint> {
    points.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn point(minute: u32, value: f64) -> MetricPoint {
        MetricPoint {
            metric_name: "cpu_percent".into(),
            value,
            unit: Some("%".into()),
            recorded_at: Utc.with_ymd_and_hms(2026, 10, 16, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_chronological_reverses() {
        let desc = vec![point(3, 30.0), point(2, 20.0), point(1, 10.0)];
        assert_eq!(latest(&desc).unwrap().value, 30.0);

        let asc = chronological(desc);
        let values: Vec<_> = asc.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
        assert!(asc.windows(2).all(|w| w[0].recorded_at < w[1].recorded_at));
    }

    #[test]
    fn test_suggested_resolution() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(
            MetricQuery::suggested_resolution(now - Duration::hours(1), now),
            Resolution::Raw
        );
        assert_eq!(
            MetricQuery::suggested_resolution(now - Duration::days(7), now),
            Resolution::Hour
        );
        assert_eq!(
            MetricQuery::suggested_resolution(now - Duration::days(90), now),
            Resolution::Day
        );
    }
}
