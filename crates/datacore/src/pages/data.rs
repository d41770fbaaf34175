//! Back-end resources and CRUD callbacks, built once per page mount.

use chrono::{Duration, Utc};
use datacore_core::contract::crud::ready;
use datacore_core::contract::metrics::{MetricPoint, MetricQuery, SourceType};
use datacore_core::backend::Project;
use datacore_core::contract::{
    ChangelogDraft, ChangelogEntry, ColumnUpdate, Container, CrudCallbacks, FuelDraft, FuelEntry,
    Host, HostDraft, KanbanColumn, Service,
};
use datacore_core::{ApiError, ApiResult, DocumentEvent, Vehicle, VehicleSelection};
use datacore_ui::{BackendHandle, use_backend, use_theme};
use dioxus::prelude::*;

use crate::components::refreshing;

/// One list fetched from the back-end.
macro_rules! list_resource {
    ($backend:expr, |$b:ident| $call:expr) => {{
        let backend: BackendHandle = $backend;
        use_resource(move || {
            let $b = backend.clone();
            async move { $call.await }
        })
    }};
}

pub fn use_vehicles() -> Resource<ApiResult<Vec<Vehicle>>> {
    list_resource!(use_backend(), |b| b.vehicles())
}

pub fn use_projects() -> Resource<ApiResult<Vec<Project>>> {
    list_resource!(use_backend(), |b| b.projects())
}

pub fn use_containers() -> Resource<ApiResult<Vec<Container>>> {
    list_resource!(use_backend(), |b| b.containers())
}

pub fn use_services() -> Resource<ApiResult<Vec<Service>>> {
    list_resource!(use_backend(), |b| b.services())
}

/// The last `hours` of one metric, at a resolution suited to the span.
pub fn use_metric(
    source_type: SourceType,
    source_id: u64,
    metric_name: &'static str,
    hours: i64,
) -> Resource<ApiResult<Vec<MetricPoint>>> {
    let backend = use_backend();
    use_resource(move || {
        let backend = backend.clone();
        let to = Utc::now();
        let from = to - Duration::hours(hours);
        let query = MetricQuery {
            source_type,
            source_id,
            metric_name: metric_name.to_string(),
            from,
            to,
            resolution: MetricQuery::suggested_resolution(from, to),
        };
        async move { backend.metrics(query).await }
    })
}

/// Fuel log of one vehicle. Only adding is offered.
pub fn use_fuel(vehicle_id: u64) -> (Resource<ApiResult<Vec<FuelEntry>>>, CrudCallbacks<FuelDraft>) {
    let backend = use_backend();
    let entries = list_resource!(backend.clone(), |b| b.fuel_entries(vehicle_id));
    let callbacks = use_hook(move || {
        CrudCallbacks::new(
            move |draft: FuelDraft| {
                let backend = backend.clone();
                refreshing(async move { backend.add_fuel(vehicle_id, draft).await }, entries)
            },
            |_, _| ready(Err(ApiError::new("Fuel entries cannot be edited"))),
            |_| ready(Err(ApiError::new("Fuel entries cannot be deleted"))),
        )
    });
    (entries, callbacks)
}

/// Changelog and board of one project.
#[derive(Clone)]
pub struct ProjectBoard {
    pub changelog: Resource<ApiResult<Vec<ChangelogEntry>>>,
    pub columns: Resource<ApiResult<Vec<KanbanColumn>>>,
    pub changelog_callbacks: CrudCallbacks<ChangelogDraft>,
    pub column_callbacks: CrudCallbacks<ColumnUpdate>,
}

pub fn use_project_board(project_id: u64) -> ProjectBoard {
    let backend = use_backend();
    let changelog = list_resource!(backend.clone(), |b| b.changelog(project_id));
    let columns = list_resource!(backend.clone(), |b| b.kanban_columns(project_id));

    let changelog_backend = backend.clone();
    let changelog_callbacks = use_hook(move || {
        let (add, update, delete) = (
            changelog_backend.clone(),
            changelog_backend.clone(),
            changelog_backend,
        );
        CrudCallbacks::new(
            move |draft: ChangelogDraft| {
                let backend = add.clone();
                refreshing(async move { backend.add_changelog(project_id, draft).await }, changelog)
            },
            move |id, draft: ChangelogDraft| {
                let backend = update.clone();
                refreshing(async move { backend.update_changelog(id, draft).await }, changelog)
            },
            move |id| {
                let backend = delete.clone();
                refreshing(async move { backend.delete_changelog(id).await }, changelog)
            },
        )
    });

    let column_callbacks = use_hook(move || {
        let (update, delete) = (backend.clone(), backend);
        CrudCallbacks::new(
            |_: ColumnUpdate| ready(Err(ApiError::new("Columns are added from the board server"))),
            move |id, column: ColumnUpdate| {
                let backend = update.clone();
                refreshing(async move { backend.update_column(id, column).await }, columns)
            },
            move |id| {
                let backend = delete.clone();
                refreshing(async move { backend.delete_column(id).await }, columns)
            },
        )
    });

    ProjectBoard {
        changelog,
        columns,
        changelog_callbacks,
        column_callbacks,
    }
}

/// Hosts and their add/edit/delete callbacks.
pub fn use_hosts() -> (Resource<ApiResult<Vec<Host>>>, CrudCallbacks<HostDraft>) {
    let backend = use_backend();
    let hosts = list_resource!(backend.clone(), |b| b.hosts());
    let callbacks = use_hook(move || {
        let (add, update, delete) = (backend.clone(), backend.clone(), backend);
        CrudCallbacks::new(
            move |draft: HostDraft| {
                let backend = add.clone();
                refreshing(async move { backend.add_host(draft).await }, hosts)
            },
            move |id, draft: HostDraft| {
                let backend = update.clone();
                refreshing(async move { backend.update_host(id, draft).await }, hosts)
            },
            move |id| {
                let backend = delete.clone();
                refreshing(async move { backend.delete_host(id).await }, hosts)
            },
        )
    });
    (hosts, callbacks)
}

/// Persisted dashboard vehicle, kept current through the event bus so
/// every mounted reader follows a change made anywhere.
pub fn use_vehicle_selection() -> (Signal<VehicleSelection>, impl FnMut(VehicleSelection) + Copy) {
    let theme = use_theme();
    let mut bus = theme.bus;
    let mut store = theme.store;
    let mut selection = use_signal(|| store.peek().vehicle_selection());

    let token = use_hook(move || {
        bus.write().subscribe("vehicle-selection-changed", move |event| {
            if let DocumentEvent::VehicleSelectionChanged(next) = event {
                selection.set(*next);
            }
        })
    });
    use_drop(move || {
        if let Ok(mut bus) = bus.try_write() {
            bus.unsubscribe(token);
        }
    });

    let select = move |next: VehicleSelection| {
        store.write().select_vehicle(next, &mut *bus.write());
    };
    (selection, select)
}
