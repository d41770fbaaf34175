//! Core of the Datacore life-hub front-end.
//!
//! Theme engine (store, palettes, DOM projection, boot sequence), the
//! theme-aware route table, widget state (rolling text, cascade, clock,
//! pollers), persistence, configuration, and the data shapes shared by
//! standard and console pages. Nothing here depends on a UI framework.

pub mod backend;
pub mod boot;
pub mod cascade;
pub mod clock;
pub mod config;
pub mod contract;
pub mod dismiss;
pub mod dom;
pub mod error;
pub mod events;
pub mod media;
pub mod palette;
pub mod poll;
pub mod rolling;
pub mod routing;
pub mod storage;
pub mod store;
pub mod theme;
pub mod vehicle;

pub use backend::{ApiResult, Backend, DashboardSummary, Notification, Vehicle};
pub use boot::{BootEvent, BootPhase, MotionPreference, Scheduler, TimerFired, TimerId};
pub use config::DatacoreConfig;
pub use dom::{CONSOLE_CLASS, ConsoleAssets, RootAttributes};
pub use error::{
    ApiError, ConfigError, DatacoreError, PreconditionError, Result, StorageError,
    ValidationError,
};
pub use events::{DocumentEvent, EventBus, FullscreenWatch};
pub use palette::{ColorSchemeKey, Palette, PaletteFamily, PaletteKind};
pub use poll::{NotificationState, PrinterState, SummaryState};
pub use routing::{PageTransition, RouteKey, RouteTable};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{ObserverToken, ThemeState, ThemeStore};
pub use theme::{AlertCondition, ConsoleVariant, Theme};
pub use vehicle::VehicleSelection;
