//! Document-level event bus.
//!
//! Stands in for custom DOM events: publishers fire after their write is
//! complete, subscribers hold a token and drop it on teardown.

use std::collections::BTreeMap;

use crate::vehicle::VehicleSelection;

/// Events broadcast to the whole document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    /// `dashboard_vehicle_id` was written.
    VehicleSelectionChanged(VehicleSelection),
    /// The window entered or left fullscreen.
    FullscreenChange { fullscreen: bool },
    /// The router started a content fade.
    PageOut { generation: u64 },
}

impl DocumentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentEvent::VehicleSelectionChanged(_) => "vehicle-selection-changed",
            DocumentEvent::FullscreenChange { .. } => "fullscreenchange",
            DocumentEvent::PageOut { .. } => "page-out",
        }
    }
}

/// Subscription handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken(u64);

type Listener = Box<dyn FnMut(&DocumentEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: BTreeMap<SubscriptionToken, (&'static str, Listener)>,
    next_token: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for events named `name`.
    pub fn subscribe(
        &mut self,
        name: &'static str,
        listener: impl FnMut(&DocumentEvent) + 'static,
    ) -> SubscriptionToken {
        self.next_token += 1;
        let token = SubscriptionToken(self.next_token);
        self.listeners.insert(token, (name, Box::new(listener)));
        token
    }

    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.listeners.remove(&token).is_some()
    }

    /// Deliver `event` to every matching listener. Returns the delivery count.
    pub fn publish(&mut self, event: &DocumentEvent) -> usize {
        let name = event.name();
        let mut delivered = 0;
        for (listen_for, listener) in self.listeners.values_mut() {
            if *listen_for == name {
                listener(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Last fullscreen state announced on the bus.
///
/// Window readings arrive from the header toggle and from window events
/// (OS shortcut, window manager); only real changes are published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullscreenWatch {
    announced: bool,
}

impl FullscreenWatch {
    pub fn new(initial: bool) -> Self {
        Self { announced: initial }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.announced
    }

    /// Fold in a fresh reading. Publishes `fullscreenchange` and returns
    /// `true` when it differs from the last one announced.
    pub fn observe(&mut self, fullscreen: bool, bus: &mut EventBus) -> bool {
        if fullscreen == self.announced {
            return false;
        }
        self.announced = fullscreen;
        bus.publish(&DocumentEvent::FullscreenChange { fullscreen });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_matches_by_name() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe("fullscreenchange", move |e| sink.borrow_mut().push(e.clone()));

        let delivered = bus.publish(&DocumentEvent::VehicleSelectionChanged(VehicleSelection::All));
        assert_eq!(delivered, 0);

        bus.publish(&DocumentEvent::FullscreenChange { fullscreen: true });
        assert_eq!(
            *seen.borrow(),
            vec![DocumentEvent::FullscreenChange { fullscreen: true }]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let token = bus.subscribe("fullscreenchange", |_| {});
        assert_eq!(bus.len(), 1);
        assert!(bus.unsubscribe(token));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_fullscreen_watch_publishes_external_changes_once() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe("fullscreenchange", move |e| {
            if let DocumentEvent::FullscreenChange { fullscreen } = e {
                sink.borrow_mut().push(*fullscreen);
            }
        });
        let mut watch = FullscreenWatch::new(false);

        // Toggle, then the resize it causes reports the same state.
        assert!(watch.observe(true, &mut bus));
        assert!(!watch.observe(true, &mut bus));
        // Left fullscreen from outside the app: only a resize reports it.
        assert!(watch.observe(false, &mut bus));
        assert!(!watch.observe(false, &mut bus));

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!watch.is_fullscreen());
    }
}
