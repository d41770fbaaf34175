//! Back-end client seam.
//!
//! The REST/SSE client lives outside this crate; pages and pollers only see
//! this trait. Every call resolves to the shapes in [`crate::contract`] or
//! an [`ApiError`] carrying the server's message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, LocalBoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::contract::changelog::{ChangelogDraft, ChangelogEntry};
use crate::contract::fuel::{FuelDraft, FuelEntry};
use crate::contract::infra::{Container, Host, HostDraft, Service};
use crate::contract::kanban::{ColumnUpdate, KanbanColumn};
use crate::contract::metrics::{MetricPoint, MetricQuery};
use crate::contract::printer::{PrinterTelemetry, StreamEvent};
use crate::error::ApiError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Counts shown in the footer segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub vehicles: u32,
    pub notes: u32,
    pub projects: u32,
    pub knowledge_base: u32,
    pub hosts: u32,
    pub containers: u32,
    pub services: u32,
    pub devices: u32,
}

impl DashboardSummary {
    /// `(label, count)` pairs in footer order.
    pub fn segments(&self) -> [(&'static str, u32); 8] {
        [
            ("VEH", self.vehicles),
            ("NOTES", self.notes),
            ("PROJ", self.projects),
            ("KB", self.knowledge_base),
            ("HOSTS", self.hosts),
            ("CTR", self.containers),
            ("SVC", self.services),
            ("DEV", self.devices),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Vehicle {
    /// `2019 Subaru Outback`, or the nickname when details are missing.
    pub fn title(&self) -> String {
        let parts: Vec<String> = [
            self.year.map(|y| y.to_string()),
            self.make.clone(),
            self.model.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            self.name.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The slice of the back-end the front-end consumes.
#[async_trait(?Send)]
pub trait Backend {
    // Notifications
    async fn unread_count(&self) -> ApiResult<u32>;
    async fn notification_feed(&self) -> ApiResult<Vec<Notification>>;
    async fn mark_read(&self, id: u64) -> ApiResult<()>;
    async fn mark_all_read(&self) -> ApiResult<()>;

    // Dashboard
    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary>;

    // Vehicles
    async fn vehicles(&self) -> ApiResult<Vec<Vehicle>>;
    async fn fuel_entries(&self, vehicle_id: u64) -> ApiResult<Vec<FuelEntry>>;
    async fn add_fuel(&self, vehicle_id: u64, draft: FuelDraft) -> ApiResult<()>;

    // Projects
    async fn projects(&self) -> ApiResult<Vec<Project>>;
    async fn changelog(&self, project_id: u64) -> ApiResult<Vec<ChangelogEntry>>;
    async fn add_changelog(&self, project_id: u64, draft: ChangelogDraft) -> ApiResult<()>;
    async fn update_changelog(&self, id: u64, draft: ChangelogDraft) -> ApiResult<()>;
    async fn delete_changelog(&self, id: u64) -> ApiResult<()>;
    async fn kanban_columns(&self, project_id: u64) -> ApiResult<Vec<KanbanColumn>>;
    async fn update_column(&self, id: u64, update: ColumnUpdate) -> ApiResult<()>;
    async fn delete_column(&self, id: u64) -> ApiResult<()>;

    // Infrastructure
    async fn hosts(&self) -> ApiResult<Vec<Host>>;
    async fn add_host(&self, draft: HostDraft) -> ApiResult<()>;
    async fn update_host(&self, id: u64, draft: HostDraft) -> ApiResult<()>;
    async fn delete_host(&self, id: u64) -> ApiResult<()>;
    async fn containers(&self) -> ApiResult<Vec<Container>>;
    async fn services(&self) -> ApiResult<Vec<Service>>;
    async fn metrics(&self, query: MetricQuery) -> ApiResult<Vec<MetricPoint>>;

    /// `None` when no printer integration is configured.
    async fn printer(&self) -> ApiResult<Option<PrinterTelemetry>>;

    /// Live `state_changed` events. Ends when the connection closes; the
    /// default has no live feed and the page falls back to polling.
    fn printer_events(&self) -> LocalBoxStream<'static, StreamEvent> {
        stream::empty().boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"vehicles": 2, "hosts": 5}"#).unwrap();
        assert_eq!(summary.vehicles, 2);
        assert_eq!(summary.devices, 0);
        assert_eq!(summary.segments()[4], ("HOSTS", 5));
    }

    #[test]
    fn test_vehicle_title() {
        let mut v = Vehicle {
            id: 1,
            name: "Daily".into(),
            year: Some(2019),
            make: Some("Subaru".into()),
            model: Some("Outback".into()),
        };
        assert_eq!(v.title(), "2019 Subaru Outback");
        v.year = None;
        v.make = None;
        v.model = None;
        assert_eq!(v.title(), "Daily");
    }
}
