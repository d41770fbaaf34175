//! Theme store: the single owner of theme state.
//!
//! Every accepted mutation runs in the same order:
//! 1. in-memory state changes (and the boot sequencer starts or stops),
//! 2. the new value is written through to persistence,
//! 3. the DOM binder projects the state onto the themed root,
//! 4. observers are called with the new snapshot.
//!
//! Storage failures are logged and otherwise ignored; the in-memory state
//! still advances.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use crate::boot::{
    BootPhase, BootSequencer, BootStart, BootState, BootStep, MotionPreference, Scheduler,
    TimerFired,
};
use crate::dom::{ConsoleAssets, DomBinder, RootAttributes};
use crate::palette::ColorSchemeKey;
use crate::storage::{COLOR_SCHEME_KEY, KeyValueStore, THEME_KEY};
use crate::theme::{AlertCondition, Theme};

/// Snapshot of the theme state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
    pub color_scheme: ColorSchemeKey,
    pub alert_condition: AlertCondition,
    pub booting: bool,
}

/// Registration handle returned by [`ThemeStore::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverToken(u64);

type Observer = Box<dyn FnMut(&ThemeState)>;

/// Process-wide theme state with persisted backing.
pub struct ThemeStore {
    state: ThemeState,
    storage: Box<dyn KeyValueStore>,
    scheduler: Box<dyn Scheduler>,
    binder: DomBinder,
    boot: BootSequencer,
    motion: MotionPreference,
    observers: BTreeMap<ObserverToken, Observer>,
    next_token: u64,
    boot_completions: u64,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state)
            .field("root", self.binder.root())
            .field("boot", &self.boot)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Build the store from persisted values.
    ///
    /// Missing or unknown values fall back to `standard` and the registry's
    /// default scheme. A console theme restored here never boots.
    pub fn bootstrap(storage: Box<dyn KeyValueStore>, scheduler: Box<dyn Scheduler>) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .map(|v| Theme::coerce(&v))
            .unwrap_or_default();
        let color_scheme = storage
            .get(COLOR_SCHEME_KEY)
            .map(|v| ColorSchemeKey::coerce(&v))
            .unwrap_or_default();

        let state = ThemeState {
            theme,
            color_scheme,
            alert_condition: AlertCondition::Nominal,
            booting: false,
        };

        let mut binder = DomBinder::new();
        binder.project(&state);

        tracing::debug!(
            "Theme store bootstrapped: theme={} scheme={}",
            theme.as_str(),
            color_scheme
        );

        Self {
            state,
            storage,
            scheduler,
            binder,
            boot: BootSequencer::new(),
            motion: MotionPreference::default(),
            observers: BTreeMap::new(),
            next_token: 0,
            boot_completions: 0,
        }
    }

    pub fn get(&self) -> ThemeState {
        self.state
    }

    pub fn root(&self) -> &RootAttributes {
        self.binder.root()
    }

    pub fn binder(&self) -> &DomBinder {
        &self.binder
    }

    pub fn console_assets(&self) -> ConsoleAssets {
        self.binder.console_assets()
    }

    pub fn boot_state(&self) -> Option<BootState> {
        self.boot.state()
    }

    pub fn boot_phase(&self) -> Option<BootPhase> {
        self.boot.phase()
    }

    /// Number of boot activations that reached their terminal phase.
    pub fn boot_completions(&self) -> u64 {
        self.boot_completions
    }

    pub fn motion_preference(&self) -> MotionPreference {
        self.motion
    }

    /// Update the reduced-motion probe result used for the next activation.
    pub fn set_motion_preference(&mut self, motion: MotionPreference) {
        self.motion = motion;
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Switch theme. Entering a console variant from the standard theme
    /// starts the boot sequence; leaving the console cancels it.
    pub fn set_theme(&mut self, theme: Theme) {
        let previous = self.state.theme;
        self.state.theme = theme;

        if !previous.is_console() && theme.is_console() {
            match self
                .boot
                .start(self.scheduler.as_mut(), self.motion, Instant::now())
            {
                BootStart::Running => self.state.booting = true,
                BootStart::Completed => {
                    self.state.booting = false;
                    self.boot_completions += 1;
                }
            }
        } else if !theme.is_console() && self.boot.cancel(self.scheduler.as_mut()) {
            self.state.booting = false;
        }

        tracing::debug!("Theme {} -> {}", previous.as_str(), theme.as_str());
        self.persist(THEME_KEY, theme.as_str());
        self.commit();
    }

    /// Switch theme from an untrusted string; unknown values become `standard`.
    pub fn set_theme_key(&mut self, key: &str) {
        self.set_theme(Theme::coerce(key));
    }

    /// Select a color scheme; unknown keys become the registry default.
    pub fn set_color_scheme(&mut self, key: &str) {
        let scheme = ColorSchemeKey::coerce(key);
        if scheme.as_str() != key {
            tracing::debug!("Unknown color scheme {:?}, using {}", key, scheme);
        }
        self.state.color_scheme = scheme;
        self.persist(COLOR_SCHEME_KEY, scheme.as_str());
        self.commit();
    }

    /// Externally-driven alert condition. Not persisted.
    pub fn set_alert_condition(&mut self, condition: AlertCondition) {
        self.state.alert_condition = condition;
        self.commit();
    }

    /// Deliver a boot timer.
    pub fn handle_timer(&mut self, fired: TimerFired) {
        match self.boot.handle(fired) {
            BootStep::Ignored => {}
            BootStep::Advanced(phase) => {
                tracing::trace!("Boot phase {}", phase.index());
                self.notify();
            }
            BootStep::Completed => {
                self.state.booting = false;
                self.boot_completions += 1;
                tracing::debug!("Boot sequence complete");
                self.commit();
            }
        }
    }

    /// Tear down a running boot (overlay unmounted).
    pub fn cancel_boot(&mut self) {
        if self.boot.cancel(self.scheduler.as_mut()) {
            self.state.booting = false;
            self.commit();
        }
    }

    pub fn observe(&mut self, observer: impl FnMut(&ThemeState) + 'static) -> ObserverToken {
        self.next_token += 1;
        let token = ObserverToken(self.next_token);
        self.observers.insert(token, Box::new(observer));
        token
    }

    /// Remove an observer. Returns whether the token was registered.
    pub fn unobserve(&mut self, token: ObserverToken) -> bool {
        self.observers.remove(&token).is_some()
    }

    pub(crate) fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn commit(&mut self) {
        self.binder.project(&self.state);
        self.notify();
    }

    fn notify(&mut self) {
        for observer in self.observers.values_mut() {
            observer(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::RecordingScheduler;
    use crate::storage::{MemoryStore, ReadOnlyStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_with(entries: &[(&str, &str)]) -> ThemeStore {
        ThemeStore::bootstrap(
            Box::new(MemoryStore::with_entries(entries.iter().copied())),
            Box::new(RecordingScheduler::new()),
        )
    }

    #[test]
    fn test_first_load_defaults() {
        let store = store_with(&[]);
        let state = store.get();
        assert_eq!(state.theme, Theme::Standard);
        assert_eq!(state.color_scheme.as_str(), "mocha");
        assert!(!state.booting);
        assert_eq!(store.root().class_string(), "");
        assert_eq!(store.root().color_scheme(), "mocha");
    }

    #[test]
    fn test_restored_console_theme_does_not_boot() {
        let store = store_with(&[(THEME_KEY, "modern-console")]);
        assert_eq!(store.get().theme, Theme::ModernConsole);
        assert!(!store.get().booting);
        assert!(store.boot_state().is_none());
        assert_eq!(store.root().class_string(), "console-theme modern");
    }

    #[test]
    fn test_bootstrap_coerces_garbage() {
        let store = store_with(&[(THEME_KEY, "holodeck"), (COLOR_SCHEME_KEY, "")]);
        assert_eq!(store.get().theme, Theme::Standard);
        assert_eq!(store.get().color_scheme.as_str(), "mocha");
    }

    #[test]
    fn test_set_color_scheme_writes_through() {
        let mut store = store_with(&[]);
        store.set_color_scheme("latte");
        assert_eq!(store.root().color_scheme(), "latte");
        assert_eq!(store.storage().get(COLOR_SCHEME_KEY).as_deref(), Some("latte"));

        store.set_color_scheme("not-a-scheme");
        assert_eq!(store.root().color_scheme(), "mocha");
        assert_eq!(store.storage().get(COLOR_SCHEME_KEY).as_deref(), Some("mocha"));
    }

    #[test]
    fn test_observers_see_persisted_and_projected_state() {
        let mut store = store_with(&[]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.observe(move |state| sink.borrow_mut().push(state.theme));

        store.set_theme(Theme::ClassicConsole);
        assert_eq!(*seen.borrow(), vec![Theme::ClassicConsole]);
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("classic-console"));
        assert_eq!(store.root().class_string(), "console-theme classic");
    }

    #[test]
    fn test_unobserve_stops_notifications() {
        let mut store = store_with(&[]);
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let token = store.observe(move |_| *sink.borrow_mut() += 1);

        store.set_alert_condition(AlertCondition::Caution);
        assert!(store.unobserve(token));
        assert!(!store.unobserve(token));
        store.set_alert_condition(AlertCondition::Critical);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.root().class_string(), "alert-critical");
    }

    #[test]
    fn test_same_theme_twice_notifies_without_mutation() {
        let mut store = store_with(&[]);
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        store.observe(move |_| *sink.borrow_mut() += 1);

        store.set_theme(Theme::Standard);
        let mutations = store.binder().mutation_count();
        store.set_theme(Theme::Standard);

        assert_eq!(*count.borrow(), 2);
        assert_eq!(store.binder().mutation_count(), mutations);
    }

    #[test]
    fn test_storage_failure_still_mutates() {
        let mut store = ThemeStore::bootstrap(
            Box::new(ReadOnlyStore::new(MemoryStore::new())),
            Box::new(RecordingScheduler::new()),
        );
        store.set_color_scheme("dracula");
        assert_eq!(store.get().color_scheme.as_str(), "dracula");
        assert_eq!(store.root().color_scheme(), "dracula");
    }

    #[test]
    fn test_reduced_motion_completes_synchronously() {
        let mut store = store_with(&[]);
        store.set_motion_preference(MotionPreference::Reduced);
        store.set_theme(Theme::ClassicConsole);

        assert!(!store.get().booting);
        assert_eq!(store.boot_completions(), 1);
        assert!(store.boot_state().is_none());
    }

    #[test]
    fn test_console_to_console_does_not_boot() {
        let mut store = store_with(&[(THEME_KEY, "classic-console")]);
        store.set_theme(Theme::ModernConsole);
        assert!(!store.get().booting);
        assert_eq!(store.root().class_string(), "console-theme modern");
    }

    #[test]
    fn test_leaving_console_cancels_boot() {
        let mut store = store_with(&[]);
        store.set_theme(Theme::ClassicConsole);
        assert!(store.get().booting);

        store.set_theme(Theme::Standard);
        assert!(!store.get().booting);
        assert!(store.boot_state().is_none());
        assert_eq!(store.boot_completions(), 0);
    }

    #[test]
    fn test_cancel_boot_on_unmount() {
        let mut store = store_with(&[]);
        store.set_theme(Theme::ModernConsole);
        store.cancel_boot();
        assert!(!store.get().booting);
        assert_eq!(store.get().theme, Theme::ModernConsole);
    }
}
