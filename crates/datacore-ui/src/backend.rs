//! Back-end handle and poll cadence shared through context.

use std::rc::Rc;
use std::time::Duration;

use datacore_core::Backend;
use datacore_core::contract::printer::PRINTER_POLL_INTERVAL;
use datacore_core::poll::{NOTIFICATION_POLL_INTERVAL, SUMMARY_POLL_INTERVAL};
use dioxus::prelude::*;

/// Newtype so `Rc<dyn Backend>` satisfies the `PartialEq` bound on props.
/// Equality is by pointer identity.
#[derive(Clone)]
pub struct BackendHandle(pub Rc<dyn Backend>);

impl BackendHandle {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self(Rc::new(backend))
    }
}

impl PartialEq for BackendHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for BackendHandle {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollIntervals {
    pub notifications: Duration,
    pub summary: Duration,
    pub printer: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            notifications: NOTIFICATION_POLL_INTERVAL,
            summary: SUMMARY_POLL_INTERVAL,
            printer: PRINTER_POLL_INTERVAL,
        }
    }
}

pub fn use_backend() -> BackendHandle {
    use_context::<BackendHandle>()
}

pub fn use_poll_intervals() -> PollIntervals {
    try_use_context::<PollIntervals>().unwrap_or_default()
}
