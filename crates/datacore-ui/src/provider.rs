//! Theme provider: owns the process-wide [`ThemeStore`] and drives its
//! boot timers on the Dioxus runtime.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use datacore_core::boot::{BootEvent, MotionPreference, Scheduler, TimerFired, TimerId};
use datacore_core::media::REDUCED_MOTION_QUERY;
use datacore_core::storage::{FileStore, KeyValueStore, MemoryStore};
use datacore_core::{EventBus, ThemeState, ThemeStore};
use dioxus::prelude::*;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};

use crate::dismiss::DismissContext;
use crate::media::use_media_query;

/// Requests from the store's scheduler to the timer loop.
#[derive(Debug)]
enum TimerCommand {
    Schedule(TimerId, Duration, BootEvent),
    Cancel(TimerId),
}

/// [`Scheduler`] backed by `tokio::time`. Timers run in the provider's
/// timer loop, so they survive the components that triggered them.
#[derive(Debug)]
pub struct ChannelScheduler {
    tx: UnboundedSender<TimerCommand>,
    next_id: u64,
}

impl ChannelScheduler {
    fn new(tx: UnboundedSender<TimerCommand>) -> Self {
        Self { tx, next_id: 0 }
    }
}

impl Scheduler for ChannelScheduler {
    fn schedule(&mut self, after: Duration, event: BootEvent) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        if self
            .tx
            .unbounded_send(TimerCommand::Schedule(id, after, event))
            .is_err()
        {
            tracing::warn!("Timer loop gone, boot timer {} dropped", id.0);
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let _ = self.tx.unbounded_send(TimerCommand::Cancel(id));
    }
}

/// Shared theme state, available to every component below [`ThemeProvider`].
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub store: Signal<ThemeStore>,
    pub bus: Signal<EventBus>,
}

impl ThemeContext {
    pub fn state(&self) -> ThemeState {
        self.store.read().get()
    }
}

/// Access the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}

/// Snapshot of the theme state; re-renders the caller on change.
pub fn use_theme_state() -> ThemeState {
    use_theme().state()
}

/// Reduced-motion gate consulted by every animated primitive.
pub fn use_reduced_motion() -> bool {
    use_theme().store.read().motion_preference().is_reduced()
}

fn open_storage(settings_path: Option<PathBuf>) -> Box<dyn KeyValueStore> {
    match settings_path {
        Some(path) => {
            tracing::info!("Settings at {}", path.display());
            Box::new(FileStore::open(path))
        }
        None => {
            tracing::info!("Ephemeral settings (nothing is persisted)");
            Box::new(MemoryStore::new())
        }
    }
}

async fn run_timers(mut commands: UnboundedReceiver<TimerCommand>, mut store: Signal<ThemeStore>) {
    let mut timers: FuturesUnordered<LocalBoxFuture<'static, TimerFired>> = FuturesUnordered::new();
    let mut cancelled: HashSet<TimerId> = HashSet::new();

    loop {
        futures::select! {
            command = commands.next() => match command {
                Some(TimerCommand::Schedule(id, after, event)) => {
                    timers.push(
                        async move {
                            tokio::time::sleep(after).await;
                            TimerFired { id, event }
                        }
                        .boxed_local(),
                    );
                }
                Some(TimerCommand::Cancel(id)) => {
                    cancelled.insert(id);
                }
                None => break,
            },
            fired = timers.select_next_some() => {
                if !cancelled.remove(&fired.id) {
                    store.write().handle_timer(fired);
                }
            }
        }
    }
}

/// Root provider. Bootstraps the store from `settings_path` (in-memory when
/// `None`), applies an optional initial theme, and keeps the reduced-motion
/// preference in sync with the platform probe.
#[component]
pub fn ThemeProvider(
    settings_path: Option<PathBuf>,
    initial_theme: Option<String>,
    #[props(default)] force_reduced_motion: bool,
    children: Element,
) -> Element {
    let (tx, rx) = use_hook(|| {
        let (tx, rx) = unbounded::<TimerCommand>();
        (tx, std::rc::Rc::new(std::cell::RefCell::new(Some(rx))))
    });

    let mut store = use_signal(move || {
        let mut store = ThemeStore::bootstrap(
            open_storage(settings_path.clone()),
            Box::new(ChannelScheduler::new(tx.clone())),
        );
        if force_reduced_motion {
            store.set_motion_preference(MotionPreference::Reduced);
        }
        if let Some(theme) = initial_theme.as_deref() {
            // Applied at startup, so no boot animation.
            store.set_motion_preference(MotionPreference::Reduced);
            store.set_theme_key(theme);
            store.set_motion_preference(MotionPreference::from_reduced(force_reduced_motion));
        }
        store
    });
    let bus = use_signal(EventBus::new);

    use_context_provider(|| ThemeContext { store, bus });
    use_context_provider(|| DismissContext::new());

    use_future(move || {
        let rx = rx.borrow_mut().take();
        async move {
            if let Some(rx) = rx {
                run_timers(rx, store).await;
            }
        }
    });

    let reduced = use_media_query(REDUCED_MOTION_QUERY);
    use_effect(move || {
        let reduced = reduced() || force_reduced_motion;
        store
            .write()
            .set_motion_preference(MotionPreference::from_reduced(reduced));
    });

    use_drop(move || {
        if let Ok(mut store) = store.try_write() {
            store.cancel_boot();
        }
    });

    rsx! {
        {children}
    }
}
