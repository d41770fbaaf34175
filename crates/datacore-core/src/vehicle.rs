//! Dashboard vehicle filter, persisted under `dashboard_vehicle_id`.

use std::fmt;

use crate::events::{DocumentEvent, EventBus};
use crate::storage::VEHICLE_KEY;
use crate::store::ThemeStore;

/// Which vehicle the dashboard summarizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VehicleSelection {
    #[default]
    All,
    Vehicle(u64),
}

impl VehicleSelection {
    /// Parse a persisted value. Anything that is not `all` or an integer id
    /// falls back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "all" => VehicleSelection::All,
            other => other
                .parse::<u64>()
                .map(VehicleSelection::Vehicle)
                .unwrap_or(VehicleSelection::All),
        }
    }

    pub fn vehicle_id(&self) -> Option<u64> {
        match self {
            VehicleSelection::All => None,
            VehicleSelection::Vehicle(id) => Some(*id),
        }
    }
}

impl fmt::Display for VehicleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleSelection::All => f.write_str("all"),
            VehicleSelection::Vehicle(id) => write!(f, "{}", id),
        }
    }
}

impl ThemeStore {
    pub fn vehicle_selection(&self) -> VehicleSelection {
        self.storage()
            .get(VEHICLE_KEY)
            .map(|v| VehicleSelection::parse(&v))
            .unwrap_or_default()
    }

    /// Persist the selection, then announce it on the bus.
    pub fn select_vehicle(&mut self, selection: VehicleSelection, bus: &mut EventBus) {
        self.persist(VEHICLE_KEY, &selection.to_string());
        bus.publish(&DocumentEvent::VehicleSelectionChanged(selection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::RecordingScheduler;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_parse() {
        assert_eq!(VehicleSelection::parse("all"), VehicleSelection::All);
        assert_eq!(VehicleSelection::parse("42"), VehicleSelection::Vehicle(42));
        assert_eq!(VehicleSelection::parse("-1"), VehicleSelection::All);
        assert_eq!(VehicleSelection::parse(""), VehicleSelection::All);
    }

    #[test]
    fn test_event_fires_after_write() {
        let mut store = ThemeStore::bootstrap(
            Box::new(MemoryStore::new()),
            Box::new(RecordingScheduler::new()),
        );
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        bus.subscribe("vehicle-selection-changed", move |e| {
            *sink.borrow_mut() = Some(e.clone());
        });

        store.select_vehicle(VehicleSelection::Vehicle(7), &mut bus);

        assert_eq!(store.vehicle_selection(), VehicleSelection::Vehicle(7));
        assert_eq!(store.storage().get(VEHICLE_KEY).as_deref(), Some("7"));
        assert_eq!(
            *seen.borrow(),
            Some(DocumentEvent::VehicleSelectionChanged(VehicleSelection::Vehicle(7)))
        );
    }
}
