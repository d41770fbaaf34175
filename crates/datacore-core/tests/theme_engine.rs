//! End-to-end scenarios for the theme engine and its neighbours.
//!
//! Tests cover:
//! - First load defaults and color-scheme selection
//! - Console activation with and without reduced motion
//! - Persistence across restarts (file-backed store)
//! - Notification polling against a scripted back-end
//! - Page-out on pathname change
//! - Kanban delete precondition

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use datacore_core::backend::{ApiResult, Backend, DashboardSummary, Notification, Project, Vehicle};
use datacore_core::boot::{BOOT_SCHEDULE, BootEvent, BootPhase, MotionPreference, RecordingScheduler};
use datacore_core::contract::changelog::{self, ChangelogDraft, ChangelogEntry, EntryType};
use datacore_core::contract::crud::{CrudCallbacks, ready};
use datacore_core::contract::fuel::{FuelDraft, FuelEntry};
use datacore_core::contract::infra::{Container, Host, HostDraft, Service};
use datacore_core::contract::kanban::{self, ColumnUpdate, KanbanColumn};
use datacore_core::contract::metrics::{MetricPoint, MetricQuery};
use datacore_core::contract::printer::PrinterTelemetry;
use datacore_core::routing::{PAGE_OUT_DURATION, PageTransition, RouteKey, RouteTable};
use datacore_core::storage::{COLOR_SCHEME_KEY, FileStore, KeyValueStore, MemoryStore, THEME_KEY};
use datacore_core::{
    ApiError, ConsoleAssets, DatacoreError, NotificationState, PreconditionError, Theme,
    ThemeStore,
};
use tempfile::TempDir;

fn recording_store(
    storage: Box<dyn KeyValueStore>,
) -> (ThemeStore, Rc<RefCell<RecordingScheduler>>) {
    let scheduler = Rc::new(RefCell::new(RecordingScheduler::new()));
    let store = ThemeStore::bootstrap(storage, Box::new(scheduler.clone()));
    (store, scheduler)
}

// ============================================================
// Scenario 1 + 2: first load, color-scheme selection
// ============================================================

#[test]
fn test_first_load_then_select_latte() {
    let (mut store, scheduler) = recording_store(Box::new(MemoryStore::new()));

    let state = store.get();
    assert_eq!(state.theme, Theme::Standard);
    assert_eq!(state.color_scheme.as_str(), "mocha");
    assert!(!store.root().has_class("console-theme"));
    assert_eq!(store.root().attribute("data-color-scheme"), Some("mocha"));

    store.set_color_scheme("latte");
    assert_eq!(store.root().attribute("data-color-scheme"), Some("latte"));
    assert_eq!(store.storage().get(COLOR_SCHEME_KEY).as_deref(), Some("latte"));
    assert!(scheduler.borrow().scheduled().is_empty());
}

#[test]
fn test_every_registered_scheme_reaches_the_root() {
    let (mut store, _) = recording_store(Box::new(MemoryStore::new()));
    for palette in datacore_core::palette::all() {
        store.set_color_scheme(palette.key);
        assert_eq!(store.root().color_scheme(), palette.key);
    }
    store.set_color_scheme("");
    assert_eq!(store.root().color_scheme(), "mocha");
}

// ============================================================
// Scenario 3 + 4: console activation and return
// ============================================================

#[test]
fn test_console_boot_runs_full_schedule() {
    let (mut store, scheduler) = recording_store(Box::new(MemoryStore::new()));

    store.set_theme(Theme::ClassicConsole);
    assert!(store.get().booting);
    assert_eq!(store.root().class_string(), "console-theme classic");
    assert_eq!(store.console_assets(), ConsoleAssets::Active);
    assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("classic-console"));

    let offsets: Vec<Duration> = scheduler
        .borrow()
        .scheduled()
        .iter()
        .map(|(_, after, _)| *after)
        .collect();
    let expected: Vec<Duration> = BOOT_SCHEDULE.iter().map(|(after, _)| *after).collect();
    assert_eq!(offsets, expected);
    assert_eq!(offsets.last(), Some(&Duration::from_millis(1500)));

    let live = scheduler.borrow().live();
    for fired in live {
        if let BootEvent::Advance(phase) = fired.event {
            store.handle_timer(fired);
            assert_eq!(store.boot_phase(), Some(phase));
            assert!(store.get().booting);
        } else {
            store.handle_timer(fired);
        }
    }
    assert!(!store.get().booting);
    assert_eq!(store.boot_completions(), 1);
    assert!(store.boot_state().is_none());

    // Scenario 4
    store.set_theme(Theme::Standard);
    assert!(!store.root().has_class("console-theme"));
    assert!(!store.root().has_class("classic"));
    assert!(!store.get().booting);
    assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("standard"));
    // Assets stay loaded once activated.
    assert_eq!(store.console_assets(), ConsoleAssets::Active);
}

#[test]
fn test_reduced_motion_schedules_nothing() {
    let (mut store, scheduler) = recording_store(Box::new(MemoryStore::new()));
    let completed = Rc::new(Cell::new(0));
    let sink = completed.clone();
    store.observe(move |state| {
        if !state.booting {
            sink.set(sink.get() + 1);
        }
    });

    store.set_motion_preference(MotionPreference::Reduced);
    store.set_theme(Theme::ModernConsole);

    assert!(scheduler.borrow().scheduled().is_empty());
    assert_eq!(store.boot_completions(), 1);
    assert_eq!(completed.get(), 1);
}

#[test]
fn test_reactivation_cancels_prior_timers() {
    let (mut store, scheduler) = recording_store(Box::new(MemoryStore::new()));

    store.set_theme(Theme::ClassicConsole);
    let stale = scheduler.borrow().live();
    store.set_theme(Theme::Standard);
    store.set_theme(Theme::ModernConsole);

    assert_eq!(scheduler.borrow().cancelled().len(), 5);

    // Stale deliveries from the first activation are ignored.
    for fired in stale {
        store.handle_timer(fired);
    }
    assert!(store.get().booting);
    assert_eq!(store.boot_phase(), Some(BootPhase::Black));

    let live = scheduler.borrow().live();
    for fired in live {
        store.handle_timer(fired);
    }
    assert_eq!(store.boot_completions(), 1);
}

// ============================================================
// Round-trip through the file store
// ============================================================

#[test]
fn test_settings_survive_restart() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");

    {
        let (mut store, _) = recording_store(Box::new(FileStore::open(&path)));
        store.set_theme(Theme::ModernConsole);
        store.set_color_scheme("tokyo-night");
    }

    let (store, scheduler) = recording_store(Box::new(FileStore::open(&path)));
    assert_eq!(store.get().theme, Theme::ModernConsole);
    assert_eq!(store.get().color_scheme.as_str(), "tokyo-night");
    assert!(!store.get().booting);
    assert!(scheduler.borrow().scheduled().is_empty());
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, "][").unwrap();

    let (store, _) = recording_store(Box::new(FileStore::open(&path)));
    assert_eq!(store.get().theme, Theme::Standard);
    assert_eq!(store.get().color_scheme.as_str(), "mocha");
}

// ============================================================
// Scenario 5: notification polling
// ============================================================

/// Back-end that replays scripted unread counts and records calls.
#[derive(Default)]
struct ScriptedBackend {
    counts: RefCell<VecDeque<ApiResult<u32>>>,
    mark_all_calls: Cell<u32>,
}

impl ScriptedBackend {
    fn with_counts(counts: Vec<ApiResult<u32>>) -> Self {
        Self {
            counts: RefCell::new(counts.into()),
            ..Self::default()
        }
    }
}

fn unsupported<T>() -> ApiResult<T> {
    Err(ApiError::new("not scripted"))
}

#[async_trait(?Send)]
impl Backend for ScriptedBackend {
    async fn unread_count(&self) -> ApiResult<u32> {
        self.counts
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::new("script exhausted")))
    }
    async fn notification_feed(&self) -> ApiResult<Vec<Notification>> {
        Ok(Vec::new())
    }
    async fn mark_read(&self, _id: u64) -> ApiResult<()> {
        Ok(())
    }
    async fn mark_all_read(&self) -> ApiResult<()> {
        self.mark_all_calls.set(self.mark_all_calls.get() + 1);
        Ok(())
    }
    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        unsupported()
    }
    async fn vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        unsupported()
    }
    async fn fuel_entries(&self, _vehicle_id: u64) -> ApiResult<Vec<FuelEntry>> {
        unsupported()
    }
    async fn add_fuel(&self, _vehicle_id: u64, _draft: FuelDraft) -> ApiResult<()> {
        unsupported()
    }
    async fn projects(&self) -> ApiResult<Vec<Project>> {
        unsupported()
    }
    async fn changelog(&self, _project_id: u64) -> ApiResult<Vec<ChangelogEntry>> {
        unsupported()
    }
    async fn add_changelog(&self, _project_id: u64, _draft: ChangelogDraft) -> ApiResult<()> {
        unsupported()
    }
    async fn update_changelog(&self, _id: u64, _draft: ChangelogDraft) -> ApiResult<()> {
        unsupported()
    }
    async fn delete_changelog(&self, _id: u64) -> ApiResult<()> {
        unsupported()
    }
    async fn kanban_columns(&self, _project_id: u64) -> ApiResult<Vec<KanbanColumn>> {
        unsupported()
    }
    async fn update_column(&self, _id: u64, _update: ColumnUpdate) -> ApiResult<()> {
        unsupported()
    }
    async fn delete_column(&self, _id: u64) -> ApiResult<()> {
        unsupported()
    }
    async fn hosts(&self) -> ApiResult<Vec<Host>> {
        unsupported()
    }
    async fn add_host(&self, _draft: HostDraft) -> ApiResult<()> {
        unsupported()
    }
    async fn update_host(&self, _id: u64, _draft: HostDraft) -> ApiResult<()> {
        unsupported()
    }
    async fn delete_host(&self, _id: u64) -> ApiResult<()> {
        unsupported()
    }
    async fn containers(&self) -> ApiResult<Vec<Container>> {
        unsupported()
    }
    async fn services(&self) -> ApiResult<Vec<Service>> {
        unsupported()
    }
    async fn metrics(&self, _query: MetricQuery) -> ApiResult<Vec<MetricPoint>> {
        unsupported()
    }
    async fn printer(&self) -> ApiResult<Option<PrinterTelemetry>> {
        Ok(None)
    }
}

#[test]
fn test_bell_badge_flash_and_clear() {
    let backend = ScriptedBackend::with_counts(vec![
        Ok(3),
        Err(ApiError::new("gateway timeout")),
    ]);
    let mut bell = NotificationState::new();

    tokio_test::block_on(async {
        bell.apply_count(backend.unread_count().await);
        assert_eq!(bell.badge().as_deref(), Some("3"));
        assert!(bell.flashing_at(Duration::from_secs(10)));
        assert!(!bell.flashing_at(Duration::from_millis(10_700)));

        // A failed poll keeps the badge.
        bell.apply_count(backend.unread_count().await);
        assert_eq!(bell.badge().as_deref(), Some("3"));

        backend.mark_all_read().await.unwrap();
        bell.mark_all_read();
    });

    assert_eq!(backend.mark_all_calls.get(), 1);
    assert_eq!(bell.badge(), None);
    assert!(!bell.should_flash());
}

// ============================================================
// Scenario 6: page-out on pathname change
// ============================================================

#[test]
fn test_page_out_between_sections() {
    let table = RouteTable::new()
        .route("vehicles", "/vehicles", "Vehicles")
        .route("projects", "/projects", "Projects")
        .console("projects", "ConsoleProjects");

    let mut transition = PageTransition::new();
    assert!(transition.navigate("/vehicles").is_none());

    let page_out = transition.navigate("/projects").unwrap();
    assert!(transition.is_page_out());
    assert_eq!(page_out.duration, PAGE_OUT_DURATION);
    assert_eq!(
        table.resolve_path("/projects", Theme::ClassicConsole).map(|(_, p)| *p),
        Some("ConsoleProjects")
    );
    assert_eq!(
        table.resolve(RouteKey("vehicles"), Theme::ModernConsole),
        Some(&"Vehicles")
    );

    transition.finish(page_out);
    assert!(!transition.is_page_out());
}

// ============================================================
// Page contract properties
// ============================================================

#[test]
fn test_changelog_fix_filter_and_order() {
    let entry = |id: u64, entry_type: EntryType, date: &str| ChangelogEntry {
        id,
        entry_type,
        title: format!("Entry {}", id),
        description: None,
        version: None,
        entry_date: date.parse().unwrap(),
    };
    let entries = vec![
        entry(1, EntryType::Fix, "2026-01-04"),
        entry(2, EntryType::Feature, "2026-03-01"),
        entry(3, EntryType::Fix, "2026-02-10"),
    ];

    let fixes: Vec<u64> = changelog::filter_entries(&entries, Some(EntryType::Fix))
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(fixes, vec![3, 1]);

    let all = changelog::filter_entries(&entries, None);
    assert!(all.windows(2).all(|w| w[0].entry_date >= w[1].entry_date));
}

#[test]
fn test_nonempty_column_never_reaches_backend() {
    let deletes = Rc::new(Cell::new(0));
    let d = deletes.clone();
    let callbacks = CrudCallbacks::new(
        |_: ColumnUpdate| ready(Ok(())),
        |_, _| ready(Ok(())),
        move |_| {
            d.set(d.get() + 1);
            ready(Ok(()))
        },
    );
    let column = KanbanColumn {
        id: 9,
        name: "Review".into(),
        color: None,
        wip_limit: None,
        is_done_column: false,
        task_count: 4,
    };

    let result = tokio_test::block_on(kanban::delete_column(&column, &callbacks));
    assert!(matches!(
        result,
        Err(DatacoreError::Precondition(PreconditionError::ColumnNotEmpty { .. }))
    ));
    assert_eq!(deletes.get(), 0);
}

#[test]
fn test_rolling_clock_flags_seconds() {
    let mut clock = datacore_core::rolling::RollingText::new("12:00:00");
    let t0 = Instant::now();
    assert_eq!(clock.update("12:00:01", t0), &[6, 7]);
    assert!(clock.rolling_at(t0 + Duration::from_millis(250)).is_empty());
}
