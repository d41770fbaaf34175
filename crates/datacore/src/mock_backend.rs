//! Seeded in-memory back-end, used when no server is configured.
//!
//! Data is deterministic so a fresh start always shows the same hub.
//! Mutations apply immediately; nothing survives a restart.

use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use datacore_core::backend::Project;
use datacore_core::contract::changelog::{ChangelogDraft, ChangelogEntry, EntryType};
use datacore_core::contract::fuel::{FuelDraft, FuelEntry};
use datacore_core::contract::infra::{
    Container, ContainerStatus, Host, HostDraft, HostHardware, HostStatus, Service, ServiceStatus,
    ServiceType,
};
use datacore_core::contract::kanban::{ColumnUpdate, KanbanColumn};
use datacore_core::contract::metrics::{MetricPoint, MetricQuery};
use datacore_core::contract::printer::{DeviceIdentity, PrinterTelemetry, StreamEvent};
use datacore_core::{ApiError, ApiResult, Backend, DashboardSummary, Notification, Vehicle};
use futures::stream::{self, LocalBoxStream, StreamExt};
use serde_json::json;

const PRINTER_TICK: Duration = Duration::from_secs(5);

struct MockData {
    notifications: Vec<Notification>,
    vehicles: Vec<Vehicle>,
    /// `(vehicle_id, entry)`
    fuel: Vec<(u64, FuelEntry)>,
    projects: Vec<Project>,
    /// `(project_id, entry)`
    changelog: Vec<(u64, ChangelogEntry)>,
    /// `(project_id, column)`
    columns: Vec<(u64, KanbanColumn)>,
    hosts: Vec<Host>,
    containers: Vec<Container>,
    services: Vec<Service>,
    next_id: u64,
}

impl MockData {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MockBackend {
    data: RefCell<MockData>,
    printer: Option<PrinterTelemetry>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn fuel(id: u64, day: NaiveDate, mileage: f64, gallons: f64, price: f64, mpg: Option<f64>) -> FuelEntry {
    FuelEntry {
        id,
        date: day,
        mileage,
        gallons_added: gallons,
        cost_per_gallon: price,
        total_cost: (gallons * price * 100.0).round() / 100.0,
        mpg,
        missed_previous: None,
    }
}

fn changelog(id: u64, entry_type: EntryType, title: &str, version: Option<&str>, day: NaiveDate) -> ChangelogEntry {
    ChangelogEntry {
        id,
        entry_type,
        title: title.to_string(),
        description: None,
        version: version.map(str::to_string),
        entry_date: day,
    }
}

fn column(id: u64, name: &str, color: &str, wip: Option<u32>, done: bool, tasks: u32) -> KanbanColumn {
    KanbanColumn {
        id,
        name: name.to_string(),
        color: Some(color.to_string()),
        wip_limit: wip,
        is_done_column: done,
        task_count: tasks,
    }
}

fn container(id: u64, name: &str, image: &str, status: ContainerStatus) -> Container {
    Container {
        id,
        name: name.to_string(),
        image: image.to_string(),
        status,
        compose_project: Some("homelab".to_string()),
    }
}

fn service(id: u64, name: &str, host_id: u64, status: ServiceStatus, ms: Option<u32>) -> Service {
    Service {
        id,
        name: name.to_string(),
        url: Some(format!("http://{}.lan", name.to_lowercase())),
        service_type: ServiceType::Http,
        host_id: Some(host_id),
        status,
        last_response_time_ms: ms,
        check_interval_seconds: 60,
        expected_status: 200,
        is_monitored: true,
        notes: None,
    }
}

fn printer_entity(entity_id: &str, state: &str, attributes: serde_json::Value) -> StreamEvent {
    StreamEvent::StateChanged {
        entity_id: entity_id.to_string(),
        state: state.to_string(),
        attributes,
    }
}

fn seed_printer() -> PrinterTelemetry {
    let snapshot = [
        printer_entity("sensor.p1s_nozzle_temperature", "219.6", json!({"max": 300})),
        printer_entity("sensor.p1s_nozzle_target_temperature", "220", json!({})),
        printer_entity("sensor.p1s_bed_temperature", "64.8", json!({"max": 110})),
        printer_entity("sensor.p1s_target_bed_temperature", "65", json!({})),
        printer_entity("sensor.p1s_chamber_temperature", "31", json!({})),
        printer_entity("sensor.p1s_print_status", "running", json!({})),
        printer_entity("sensor.p1s_current_stage", "printing", json!({})),
        printer_entity("sensor.p1s_print_progress", "42", json!({})),
        printer_entity("sensor.p1s_remaining_time", "87", json!({})),
        printer_entity("sensor.p1s_task_name", "bracket_v3.gcode", json!({})),
        printer_entity("sensor.p1s_current_layer", "118", json!({})),
        printer_entity("sensor.p1s_total_layer_count", "284", json!({})),
        printer_entity("sensor.p1s_print_weight", "38.2", json!({})),
        printer_entity("sensor.p1s_position_x", "128.0", json!({})),
        printer_entity("sensor.p1s_position_y", "96.5", json!({})),
        printer_entity("sensor.p1s_position_z", "23.6", json!({})),
        printer_entity("sensor.p1s_firmware_version", "01.07.00.00", json!({})),
        printer_entity(
            "sensor.p1s_ams_tray_1",
            "PLA",
            json!({"name": "Bambu PLA Basic", "color": "#FF6A13", "remain": 64, "active": true}),
        ),
        printer_entity(
            "sensor.p1s_ams_tray_2",
            "PETG",
            json!({"name": "PETG HF", "color": "#1F1F1F", "remain": 22, "active": false}),
        ),
        printer_entity("light.p1s_chamber_light", "on", json!({})),
        printer_entity("fan.p1s_cooling_fan", "on", json!({})),
        printer_entity("fan.p1s_aux_fan", "off", json!({})),
        printer_entity("button.p1s_pause_printing", "unknown", json!({})),
        printer_entity("number.p1s_print_speed", "100", json!({})),
    ];
    PrinterTelemetry::from_snapshot(
        DeviceIdentity {
            name: "Workshop P1S".to_string(),
            model: Some("P1S".to_string()),
            serial: Some("01P00A000000000".to_string()),
            firmware: None,
        },
        snapshot.iter(),
    )
}

impl MockBackend {
    pub fn new() -> Self {
        let now = Utc::now();
        let notifications = vec![
            Notification {
                id: 1,
                title: "Oil change due".to_string(),
                message: Some("Outback is 300 mi from its next service".to_string()),
                link: Some("/vehicles/1".to_string()),
                is_read: false,
                created_at: now - ChronoDuration::hours(2),
            },
            Notification {
                id: 2,
                title: "Service degraded".to_string(),
                message: Some("Jellyfin response time above 2 s".to_string()),
                link: Some("/infrastructure".to_string()),
                is_read: false,
                created_at: now - ChronoDuration::minutes(25),
            },
            Notification {
                id: 3,
                title: "Print started".to_string(),
                message: None,
                link: Some("/infrastructure/printer".to_string()),
                is_read: true,
                created_at: now - ChronoDuration::days(1),
            },
        ];

        let vehicles = vec![
            Vehicle {
                id: 1,
                name: "Daily".to_string(),
                year: Some(2019),
                make: Some("Subaru".to_string()),
                model: Some("Outback".to_string()),
            },
            Vehicle {
                id: 2,
                name: "Weekend".to_string(),
                year: Some(1996),
                make: Some("Mazda".to_string()),
                model: Some("Miata".to_string()),
            },
        ];

        let fuel = vec![
            (1, fuel(1, date(2026, 8, 30), 41_210.0, 13.2, 3.59, None)),
            (1, fuel(2, date(2026, 9, 12), 41_598.0, 13.9, 3.49, Some(27.9))),
            (1, fuel(3, date(2026, 9, 27), 41_990.0, 14.1, 3.55, Some(27.8))),
            (1, fuel(4, date(2026, 10, 10), 42_371.0, 13.4, 3.45, Some(28.4))),
            (2, fuel(5, date(2026, 9, 20), 88_004.0, 9.1, 3.99, None)),
            (2, fuel(6, date(2026, 10, 4), 88_251.0, 8.7, 4.09, Some(28.4))),
        ];

        let projects = vec![
            Project {
                id: 1,
                name: "Datacore".to_string(),
                description: Some("This hub".to_string()),
                status: Some("active".to_string()),
            },
            Project {
                id: 2,
                name: "Garage shelving".to_string(),
                description: None,
                status: Some("planning".to_string()),
            },
        ];

        let changelog = vec![
            (1, changelog(1, EntryType::Release, "Console theme", Some("1.0.0"), date(2026, 10, 1))),
            (1, changelog(2, EntryType::Feature, "Printer telemetry page", None, date(2026, 9, 22))),
            (1, changelog(3, EntryType::Fix, "Bell badge stuck at 99+", None, date(2026, 9, 18))),
            (1, changelog(4, EntryType::Milestone, "All sections ported", None, date(2026, 8, 30))),
            (1, changelog(5, EntryType::BreakingChange, "Settings moved to settings.json", Some("0.9.0"), date(2026, 8, 12))),
            (2, changelog(6, EntryType::Note, "Measured the back wall", None, date(2026, 10, 5))),
        ];

        let columns = vec![
            (1, column(1, "Backlog", "#8aadf4", None, false, 7)),
            (1, column(2, "In progress", "#eed49f", Some(2), false, 3)),
            (1, column(3, "Review", "#c6a0f6", Some(3), false, 0)),
            (1, column(4, "Done", "#a6da95", None, true, 12)),
            (2, column(5, "Ideas", "#f5a97f", None, false, 2)),
            (2, column(6, "Done", "#a6da95", None, true, 0)),
        ];

        let hosts = vec![
            Host {
                id: 1,
                name: "atlas".to_string(),
                host_type: "server".to_string(),
                hostname: Some("atlas.lan".to_string()),
                os_name: Some("Debian".to_string()),
                os_version: Some("13".to_string()),
                ip_address: Some("10.0.0.10".to_string()),
                mac_address: Some("3c:7c:3f:12:9a:01".to_string()),
                location: Some("Rack".to_string()),
                status: HostStatus::Online,
                hardware: Some(HostHardware {
                    cpu_model: Some("Ryzen 7 5700G".to_string()),
                    cpu_cores: Some(8),
                    memory_gb: Some(64.0),
                    storage_gb: Some(8000.0),
                }),
                containers: None,
                services: None,
                has_docker_integration: true,
                host_stats_available: true,
                last_seen_at: Some(now - ChronoDuration::seconds(40)),
            },
            Host {
                id: 2,
                name: "pi-garage".to_string(),
                host_type: "sbc".to_string(),
                hostname: Some("pi-garage.lan".to_string()),
                os_name: Some("Raspberry Pi OS".to_string()),
                os_version: None,
                ip_address: Some("10.0.0.31".to_string()),
                mac_address: None,
                location: Some("Garage".to_string()),
                status: HostStatus::Degraded,
                hardware: None,
                containers: None,
                services: None,
                has_docker_integration: false,
                host_stats_available: false,
                last_seen_at: Some(now - ChronoDuration::minutes(12)),
            },
            Host {
                id: 3,
                name: "nas".to_string(),
                host_type: "nas".to_string(),
                hostname: None,
                os_name: None,
                os_version: None,
                ip_address: Some("10.0.0.5".to_string()),
                mac_address: None,
                location: Some("Closet".to_string()),
                status: HostStatus::Offline,
                hardware: None,
                containers: None,
                services: None,
                has_docker_integration: false,
                host_stats_available: false,
                last_seen_at: None,
            },
        ];

        let containers = vec![
            container(1, "jellyfin", "jellyfin/jellyfin:10.10", ContainerStatus::Running),
            container(2, "homeassistant", "ghcr.io/home-assistant/home-assistant:stable", ContainerStatus::Running),
            container(3, "paperless", "ghcr.io/paperless-ngx/paperless-ngx:2", ContainerStatus::Restarting),
            container(4, "backup", "restic/restic:0.17", ContainerStatus::Exited),
        ];

        let services = vec![
            service(1, "Jellyfin", 1, ServiceStatus::Degraded, Some(2140)),
            service(2, "HomeAssistant", 1, ServiceStatus::Up, Some(48)),
            service(3, "Paperless", 1, ServiceStatus::Up, Some(131)),
            service(4, "Octoprint", 2, ServiceStatus::Down, None),
        ];

        Self {
            data: RefCell::new(MockData {
                notifications,
                vehicles,
                fuel,
                projects,
                changelog,
                columns,
                hosts,
                containers,
                services,
                next_id: 100,
            }),
            printer: Some(seed_printer()),
        }
    }

    /// Same data without a printer integration.
    pub fn without_printer() -> Self {
        Self {
            printer: None,
            ..Self::new()
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(what: &str, id: u64) -> ApiError {
    ApiError::new(format!("{} {} not found", what, id))
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn unread_count(&self) -> ApiResult<u32> {
        let data = self.data.borrow();
        Ok(data.notifications.iter().filter(|n| !n.is_read).count() as u32)
    }

    async fn notification_feed(&self) -> ApiResult<Vec<Notification>> {
        let mut feed = self.data.borrow().notifications.clone();
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(feed)
    }

    async fn mark_read(&self, id: u64) -> ApiResult<()> {
        let mut data = self.data.borrow_mut();
        let item = data
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found("Notification", id))?;
        item.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        for item in self.data.borrow_mut().notifications.iter_mut() {
            item.is_read = true;
        }
        Ok(())
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        let data = self.data.borrow();
        Ok(DashboardSummary {
            vehicles: data.vehicles.len() as u32,
            notes: 42,
            projects: data.projects.len() as u32,
            knowledge_base: 17,
            hosts: data.hosts.len() as u32,
            containers: data.containers.len() as u32,
            services: data.services.len() as u32,
            devices: u32::from(self.printer.is_some()) + 9,
        })
    }

    async fn vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        Ok(self.data.borrow().vehicles.clone())
    }

    async fn fuel_entries(&self, vehicle_id: u64) -> ApiResult<Vec<FuelEntry>> {
        let data = self.data.borrow();
        let mut entries: Vec<FuelEntry> = data
            .fuel
            .iter()
            .filter(|(v, _)| *v == vehicle_id)
            .map(|(_, e)| e.clone())
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    async fn add_fuel(&self, vehicle_id: u64, draft: FuelDraft) -> ApiResult<()> {
        draft.validate().map_err(|e| ApiError::new(e.to_string()))?;
        let mut data = self.data.borrow_mut();
        if !data.vehicles.iter().any(|v| v.id == vehicle_id) {
            return Err(not_found("Vehicle", vehicle_id));
        }
        let previous = data
            .fuel
            .iter()
            .filter(|(v, e)| *v == vehicle_id && e.mileage < draft.mileage)
            .map(|(_, e)| e.mileage)
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))));
        let mpg = match (previous, draft.missed_previous) {
            (Some(prev), false) if draft.gallons_added > 0.0 => {
                Some(((draft.mileage - prev) / draft.gallons_added * 10.0).round() / 10.0)
            }
            _ => None,
        };
        let id = data.next_id();
        let total_cost = draft.total_cost();
        data.fuel.push((
            vehicle_id,
            FuelEntry {
                id,
                date: draft.date,
                mileage: draft.mileage,
                gallons_added: draft.gallons_added,
                cost_per_gallon: draft.cost_per_gallon,
                total_cost,
                mpg,
                missed_previous: Some(draft.missed_previous),
            },
        ));
        Ok(())
    }

    async fn projects(&self) -> ApiResult<Vec<Project>> {
        Ok(self.data.borrow().projects.clone())
    }

    async fn changelog(&self, project_id: u64) -> ApiResult<Vec<ChangelogEntry>> {
        let data = self.data.borrow();
        Ok(data
            .changelog
            .iter()
            .filter(|(p, _)| *p == project_id)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn add_changelog(&self, project_id: u64, draft: ChangelogDraft) -> ApiResult<()> {
        draft.validate().map_err(|e| ApiError::new(e.to_string()))?;
        let mut data = self.data.borrow_mut();
        let id = data.next_id();
        data.changelog.push((
            project_id,
            ChangelogEntry {
                id,
                entry_type: draft.entry_type,
                title: draft.title,
                description: draft.description,
                version: draft.version,
                entry_date: draft.entry_date,
            },
        ));
        Ok(())
    }

    async fn update_changelog(&self, id: u64, draft: ChangelogDraft) -> ApiResult<()> {
        draft.validate().map_err(|e| ApiError::new(e.to_string()))?;
        let mut data = self.data.borrow_mut();
        let (_, entry) = data
            .changelog
            .iter_mut()
            .find(|(_, e)| e.id == id)
            .ok_or_else(|| not_found("Changelog entry", id))?;
        entry.entry_type = draft.entry_type;
        entry.title = draft.title;
        entry.description = draft.description;
        entry.version = draft.version;
        entry.entry_date = draft.entry_date;
        Ok(())
    }

    async fn delete_changelog(&self, id: u64) -> ApiResult<()> {
        let mut data = self.data.borrow_mut();
        let before = data.changelog.len();
        data.changelog.retain(|(_, e)| e.id != id);
        if data.changelog.len() == before {
            return Err(not_found("Changelog entry", id));
        }
        Ok(())
    }

    async fn kanban_columns(&self, project_id: u64) -> ApiResult<Vec<KanbanColumn>> {
        let data = self.data.borrow();
        Ok(data
            .columns
            .iter()
            .filter(|(p, _)| *p == project_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn update_column(&self, id: u64, update: ColumnUpdate) -> ApiResult<()> {
        let mut data = self.data.borrow_mut();
        let (_, column) = data
            .columns
            .iter_mut()
            .find(|(_, c)| c.id == id)
            .ok_or_else(|| not_found("Column", id))?;
        column.name = update.name;
        column.color = update.color;
        column.wip_limit = update.wip_limit;
        Ok(())
    }

    async fn delete_column(&self, id: u64) -> ApiResult<()> {
        let mut data = self.data.borrow_mut();
        let (name, task_count) = data
            .columns
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(_, c)| (c.name.clone(), c.task_count))
            .ok_or_else(|| not_found("Column", id))?;
        if task_count > 0 {
            return Err(ApiError::new(format!("Column {} is not empty", name)));
        }
        data.columns.retain(|(_, c)| c.id != id);
        Ok(())
    }

    async fn hosts(&self) -> ApiResult<Vec<Host>> {
        let data = self.data.borrow();
        let hosts = data
            .hosts
            .iter()
            .map(|h| {
                let mut host = h.clone();
                if host.has_docker_integration {
                    host.containers = Some(data.containers.clone());
                }
                host.services = Some(
                    data.services
                        .iter()
                        .filter(|s| s.host_id == Some(h.id))
                        .cloned()
                        .collect(),
                );
                host
            })
            .collect();
        Ok(hosts)
    }

    async fn add_host(&self, draft: HostDraft) -> ApiResult<()> {
        draft.validate().map_err(|e| ApiError::new(e.to_string()))?;
        let mut data = self.data.borrow_mut();
        let id = data.next_id();
        data.hosts.push(Host {
            id,
            name: draft.name,
            host_type: draft.host_type,
            hostname: draft.hostname,
            os_name: None,
            os_version: None,
            ip_address: draft.ip_address,
            mac_address: draft.mac_address,
            location: draft.location,
            status: HostStatus::Unknown,
            hardware: None,
            containers: None,
            services: None,
            has_docker_integration: false,
            host_stats_available: false,
            last_seen_at: None,
        });
        Ok(())
    }

    async fn update_host(&self, id: u64, draft: HostDraft) -> ApiResult<()> {
        draft.validate().map_err(|e| ApiError::new(e.to_string()))?;
        let mut data = self.data.borrow_mut();
        let host = data
            .hosts
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| not_found("Host", id))?;
        host.name = draft.name;
        host.host_type = draft.host_type;
        host.hostname = draft.hostname;
        host.ip_address = draft.ip_address;
        host.mac_address = draft.mac_address;
        host.location = draft.location;
        Ok(())
    }

    async fn delete_host(&self, id: u64) -> ApiResult<()> {
        let mut data = self.data.borrow_mut();
        let before = data.hosts.len();
        data.hosts.retain(|h| h.id != id);
        if data.hosts.len() == before {
            return Err(not_found("Host", id));
        }
        data.services.retain(|s| s.host_id != Some(id));
        Ok(())
    }

    async fn containers(&self) -> ApiResult<Vec<Container>> {
        Ok(self.data.borrow().containers.clone())
    }

    async fn services(&self) -> ApiResult<Vec<Service>> {
        Ok(self.data.borrow().services.clone())
    }

    /// Synthetic series, newest first like the real endpoint.
    async fn metrics(&self, query: MetricQuery) -> ApiResult<Vec<MetricPoint>> {
        let span = (query.to - query.from).num_minutes().max(1);
        let steps = 48i64;
        let step = (span / steps).max(1);
        let base = match query.metric_name.as_str() {
            "cpu_percent" => 22.0,
            "memory_percent" => 61.0,
            "temperature" => 48.0,
            _ => 10.0,
        };
        let seed = query.source_id as f64;
        let unit = match query.metric_name.as_str() {
            "temperature" => Some("°C".to_string()),
            _ => Some("%".to_string()),
        };
        let points = (0..steps)
            .map(|i| {
                let t = query.to - ChronoDuration::minutes(i * step);
                let wave = ((i as f64 + seed) / 5.0).sin() * 8.0;
                MetricPoint {
                    metric_name: query.metric_name.clone(),
                    value: ((base + wave) * 10.0).round() / 10.0,
                    unit: unit.clone(),
                    recorded_at: t,
                }
            })
            .collect();
        Ok(points)
    }

    async fn printer(&self) -> ApiResult<Option<PrinterTelemetry>> {
        Ok(self.printer.clone())
    }

    /// Advances progress and the working layer every few seconds.
    fn printer_events(&self) -> LocalBoxStream<'static, StreamEvent> {
        let Some(printer) = self.printer.as_ref() else {
            return stream::empty().boxed_local();
        };
        let progress = printer.status.progress.unwrap_or(0.0);
        let layer = printer.layers.working.unwrap_or(0);
        let total = printer.layers.total.unwrap_or(1).max(1);

        stream::unfold((progress, layer), move |(progress, layer)| async move {
            tokio::time::sleep(PRINTER_TICK).await;
            let layer = (layer + 1).min(total);
            let progress = (f64::from(layer) / f64::from(total) * 100.0).max(progress);
            let events = vec![
                printer_entity("sensor.p1s_current_layer", &layer.to_string(), json!({})),
                printer_entity("sensor.p1s_print_progress", &format!("{:.0}", progress), json!({})),
            ];
            Some((stream::iter(events), (progress, layer)))
        })
        .flatten()
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_seed_summary_matches_collections() {
        let backend = MockBackend::new();
        let summary = block_on(backend.dashboard_summary()).unwrap();
        assert_eq!(summary.vehicles, 2);
        assert_eq!(summary.hosts, 3);
        assert_eq!(summary.containers, 4);
        assert_eq!(summary.services, 4);
    }

    #[test]
    fn test_mark_all_read_clears_count() {
        let backend = MockBackend::new();
        assert_eq!(block_on(backend.unread_count()).unwrap(), 2);
        block_on(backend.mark_all_read()).unwrap();
        assert_eq!(block_on(backend.unread_count()).unwrap(), 0);
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let backend = MockBackend::new();
        let err = block_on(backend.mark_read(999)).unwrap_err();
        assert!(err.message.contains("999"));
    }

    #[test]
    fn test_add_fuel_computes_mpg() {
        let backend = MockBackend::new();
        let draft = FuelDraft {
            date: date(2026, 10, 16),
            mileage: 42_651.0,
            gallons_added: 10.0,
            cost_per_gallon: 3.50,
            missed_previous: false,
        };
        block_on(backend.add_fuel(1, draft)).unwrap();
        let entries = block_on(backend.fuel_entries(1)).unwrap();
        assert_eq!(entries[0].mileage, 42_651.0);
        assert_eq!(entries[0].mpg, Some(28.0));
        assert_eq!(entries[0].total_cost, 35.0);
    }

    #[test]
    fn test_add_fuel_missed_previous_has_no_mpg() {
        let backend = MockBackend::new();
        let draft = FuelDraft {
            date: date(2026, 10, 16),
            mileage: 42_651.0,
            gallons_added: 10.0,
            cost_per_gallon: 3.50,
            missed_previous: true,
        };
        block_on(backend.add_fuel(1, draft)).unwrap();
        let entries = block_on(backend.fuel_entries(1)).unwrap();
        assert_eq!(entries[0].mpg, None);
    }

    #[test]
    fn test_nonempty_column_refused() {
        let backend = MockBackend::new();
        assert!(block_on(backend.delete_column(1)).is_err());
        block_on(backend.delete_column(3)).unwrap();
        let columns = block_on(backend.kanban_columns(1)).unwrap();
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_hosts_join_services() {
        let backend = MockBackend::new();
        let hosts = block_on(backend.hosts()).unwrap();
        assert_eq!(hosts[0].services().len(), 3);
        assert_eq!(hosts[0].containers().len(), 4);
        assert!(hosts[1].containers().is_empty());
    }

    #[test]
    fn test_metrics_newest_first() {
        let backend = MockBackend::new();
        let to = Utc::now();
        let query = MetricQuery {
            source_type: datacore_core::contract::metrics::SourceType::Host,
            source_id: 1,
            metric_name: "cpu_percent".to_string(),
            from: to - ChronoDuration::hours(4),
            to,
            resolution: Default::default(),
        };
        let points = block_on(backend.metrics(query)).unwrap();
        assert!(points[0].recorded_at > points[1].recorded_at);
    }

    #[test]
    fn test_printer_seed_routes_entities() {
        let printer = seed_printer();
        assert_eq!(printer.temperatures.nozzle.target, Some(220.0));
        assert_eq!(printer.temperatures.bed.max, Some(110.0));
        assert_eq!(printer.filament.len(), 2);
        assert!(printer.filament[0].active);
        assert_eq!(printer.layer_label().as_deref(), Some("118 / 284"));
        assert_eq!(printer.controls.fans.len(), 2);
    }

    #[test]
    fn test_without_printer() {
        let backend = MockBackend::without_printer();
        assert_eq!(block_on(backend.printer()).unwrap(), None);
    }
}
