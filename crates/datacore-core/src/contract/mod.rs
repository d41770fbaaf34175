//! Data shapes and callbacks shared by standard and console pages.

pub mod changelog;
pub mod crud;
pub mod fuel;
pub mod infra;
pub mod kanban;
pub mod metrics;
pub mod printer;

pub use changelog::{ChangelogDraft, ChangelogEntry, EntryType};
pub use crud::{Confirmation, CrudCallbacks, Pending};
pub use fuel::{FuelDraft, FuelEntry, FuelStats};
pub use infra::{Container, Host, HostDraft, HostStatus, Service, StatusRollup};
pub use kanban::{ColumnUpdate, KanbanColumn};
pub use metrics::{MetricPoint, MetricQuery};
pub use printer::{PrinterTelemetry, StreamEvent};
