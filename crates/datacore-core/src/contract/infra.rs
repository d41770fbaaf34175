//! Infrastructure hosts, containers, and monitored services.

use std::net::IpAddr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes without contact after which a host is shown as stale.
pub const STALE_AFTER_MINUTES: i64 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
    Degraded,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Running,
    Stopped,
    Exited,
    Restarting,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Http,
    Tcp,
    Ping,
    Docker,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Http => "http",
            ServiceType::Tcp => "tcp",
            ServiceType::Ping => "ping",
            ServiceType::Docker => "docker",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
    Degraded,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Status → CSS accent, shared by every status badge.
pub trait StatusColor {
    fn color(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

impl StatusColor for HostStatus {
    fn color(&self) -> &'static str {
        match self {
            HostStatus::Online => "var(--status-ok)",
            HostStatus::Degraded => "var(--status-warn)",
            HostStatus::Offline => "var(--status-error)",
            HostStatus::Unknown => "var(--status-muted)",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            HostStatus::Online => "online",
            HostStatus::Offline => "offline",
            HostStatus::Degraded => "degraded",
            HostStatus::Unknown => "unknown",
        }
    }
}

impl StatusColor for ContainerStatus {
    fn color(&self) -> &'static str {
        match self {
            ContainerStatus::Running => "var(--status-ok)",
            ContainerStatus::Restarting => "var(--status-warn)",
            ContainerStatus::Stopped | ContainerStatus::Exited => "var(--status-error)",
            ContainerStatus::Unknown => "var(--status-muted)",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ContainerStatus::Running => "running",
            ContainerStatus::Stopped => "stopped",
            ContainerStatus::Exited => "exited",
            ContainerStatus::Restarting => "restarting",
            ContainerStatus::Unknown => "unknown",
        }
    }
}

impl StatusColor for ServiceStatus {
    fn color(&self) -> &'static str {
        match self {
            ServiceStatus::Up => "var(--status-ok)",
            ServiceStatus::Degraded => "var(--status-warn)",
            ServiceStatus::Down => "var(--status-error)",
            ServiceStatus::Unknown => "var(--status-muted)",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Up => "up",
            ServiceStatus::Down => "down",
            ServiceStatus::Degraded => "degraded",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostHardware {
    #[serde(default)]
    pub cpu_model: Option<String>,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    #[serde(default)]
    pub memory_gb: Option<f64>,
    #[serde(default)]
    pub storage_gb: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: u64,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub status: ContainerStatus,
    #[serde(default)]
    pub compose_project: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub service_type: ServiceType,
    #[serde(default)]
    pub host_id: Option<u64>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default)]
    pub last_response_time_ms: Option<u32>,
    pub check_interval_seconds: u32,
    pub expected_status: u16,
    pub is_monitored: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    pub host_type: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub os_name: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: HostStatus,
    #[serde(default)]
    pub hardware: Option<HostHardware>,
    #[serde(default)]
    pub containers: Option<Vec<Container>>,
    #[serde(default)]
    pub services: Option<Vec<Service>>,
    #[serde(default)]
    pub has_docker_integration: bool,
    #[serde(default)]
    pub host_stats_available: bool,
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Host {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.last_seen_at {
            Some(seen) => now - seen > Duration::minutes(STALE_AFTER_MINUTES),
            None => true,
        }
    }

    /// `Ubuntu 24.04`, `Ubuntu`, or empty.
    pub fn os_label(&self) -> String {
        match (&self.os_name, &self.os_version) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name.clone(),
            _ => String::new(),
        }
    }

    pub fn containers(&self) -> &[Container] {
        self.containers.as_deref().unwrap_or_default()
    }

    pub fn services(&self) -> &[Service] {
        self.services.as_deref().unwrap_or_default()
    }
}

/// Host form payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostDraft {
    pub name: String,
    pub host_type: String,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub location: Option<String>,
}

impl HostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Host name is required"));
        }
        if self.host_type.trim().is_empty() {
            return Err(ValidationError::new("host_type", "Host type is required"));
        }
        if self
            .ip_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .is_some_and(|ip| ip.parse::<IpAddr>().is_err())
        {
            return Err(ValidationError::new("ip_address", "Not a valid IP address"));
        }
        if self
            .mac_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .is_some_and(|mac| !is_mac(mac))
        {
            return Err(ValidationError::new("mac_address", "Expected AA:BB:CC:DD:EE:FF"));
        }
        Ok(())
    }
}

fn is_mac(value: &str) -> bool {
    let parts: Vec<&str> = value.split([':', '-']).collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Status counts for dashboard stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusRollup {
    pub total: u32,
    pub healthy: u32,
    pub degraded: u32,
    pub down: u32,
    pub unknown: u32,
}

impl StatusRollup {
    pub fn hosts(hosts: &[Host]) -> Self {
        hosts.iter().fold(Self::default(), |mut r, h| {
            r.total += 1;
            match h.status {
                HostStatus::Online => r.healthy += 1,
                HostStatus::Degraded => r.degraded += 1,
                HostStatus::Offline => r.down += 1,
                HostStatus::Unknown => r.unknown += 1,
            }
            r
        })
    }

    pub fn containers<'a>(containers: impl IntoIterator<Item = &'a Container>) -> Self {
        containers.into_iter().fold(Self::default(), |mut r, c| {
            r.total += 1;
            match c.status {
                ContainerStatus::Running => r.healthy += 1,
                ContainerStatus::Restarting => r.degraded += 1,
                ContainerStatus::Stopped | ContainerStatus::Exited => r.down += 1,
                ContainerStatus::Unknown => r.unknown += 1,
            }
            r
        })
    }

    pub fn services(services: &[Service]) -> Self {
        services
            .iter()
            .filter(|s| s.is_monitored)
            .fold(Self::default(), |mut r, s| {
                r.total += 1;
                match s.status {
                    ServiceStatus::Up => r.healthy += 1,
                    ServiceStatus::Degraded => r.degraded += 1,
                    ServiceStatus::Down => r.down += 1,
                    ServiceStatus::Unknown => r.unknown += 1,
                }
                r
            })
    }

    /// Healthy share in `0.0..=100.0`; empty sets report 0.
    pub fn healthy_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.healthy) * 100.0 / f64::from(self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn host_json() -> &'static str {
        r#"{
            "id": 1,
            "name": "atlas",
            "host_type": "server",
            "os_name": "Ubuntu",
            "os_version": "24.04",
            "status": "online",
            "has_docker_integration": true,
            "host_stats_available": false,
            "last_seen_at": "2026-10-16T12:00:00Z",
            "containers": [
                {"id": 10, "name": "db", "image": "postgres:16", "status": "running"},
                {"id": 11, "name": "cache", "image": "redis:7", "status": "exited", "compose_project": "core"}
            ]
        }"#
    }

    #[test]
    fn test_parse_host() {
        let host: Host = serde_json::from_str(host_json()).unwrap();
        assert_eq!(host.os_label(), "Ubuntu 24.04");
        assert_eq!(host.containers().len(), 2);
        assert!(host.services().is_empty());
    }

    #[test]
    fn test_unknown_status_strings() {
        let c: Container =
            serde_json::from_str(r#"{"id":1,"name":"x","image":"y","status":"paused"}"#).unwrap();
        assert_eq!(c.status, ContainerStatus::Unknown);
    }

    #[test]
    fn test_stale_host() {
        let host: Host = serde_json::from_str(host_json()).unwrap();
        let fresh = Utc.with_ymd_and_hms(2026, 10, 16, 12, 4, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2026, 10, 16, 12, 6, 0).unwrap();
        assert!(!host.is_stale(fresh));
        assert!(host.is_stale(old));
    }

    #[test]
    fn test_container_rollup() {
        let host: Host = serde_json::from_str(host_json()).unwrap();
        let rollup = StatusRollup::containers(host.containers());
        assert_eq!(rollup.total, 2);
        assert_eq!(rollup.healthy, 1);
        assert_eq!(rollup.down, 1);
        assert_eq!(rollup.healthy_percent(), 50.0);
    }

    #[test]
    fn test_host_draft_validation() {
        let mut draft = HostDraft {
            name: "atlas".into(),
            host_type: "server".into(),
            ip_address: Some("10.0.0.300".into()),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "ip_address");

        draft.ip_address = Some("10.0.0.30".into());
        draft.mac_address = Some("aa:bb:cc:dd:ee:ff".into());
        assert!(draft.validate().is_ok());

        draft.mac_address = Some("aa:bb".into());
        assert_eq!(draft.validate().unwrap_err().field, "mac_address");
    }
}
