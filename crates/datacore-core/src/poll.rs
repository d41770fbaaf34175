//! State behind the background pollers (notification bell, footer counts,
//! printer fallback poll).
//!
//! The UI owns the timers and the requests; results are folded in here. A
//! failed poll never clears data: the last-known value stays on screen and
//! the next interval retries.

use std::time::Duration;

use crate::backend::{ApiResult, DashboardSummary, Notification};
use crate::contract::printer::{PrinterTelemetry, StreamEvent};

pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const SUMMARY_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The bell pulses this often while anything is unread...
pub const FLASH_EVERY: Duration = Duration::from_secs(10);
/// ...for this long.
pub const FLASH_FOR: Duration = Duration::from_millis(600);

/// Time from `elapsed` until the pulse next switches on or off. The bell's
/// loop sleeps this long between calls to
/// [`NotificationState::flashing_at`]. Never zero.
pub fn next_flash_edge(elapsed: Duration) -> Duration {
    let period = FLASH_EVERY.as_millis();
    let phase = elapsed.as_millis() % period;
    let until = if phase < FLASH_FOR.as_millis() {
        FLASH_FOR.as_millis() - phase
    } else {
        period - phase
    };
    Duration::from_millis(until as u64)
}

/// A polled value that survives failed polls.
#[derive(Clone, Debug, PartialEq)]
pub struct LastKnown<T> {
    value: Option<T>,
    failures: u32,
    last_error: Option<String>,
}

impl<T> Default for LastKnown<T> {
    fn default() -> Self {
        Self {
            value: None,
            failures: 0,
            last_error: None,
        }
    }
}

impl<T: PartialEq> LastKnown<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a poll result in. Returns whether the visible value changed.
    pub fn apply(&mut self, result: ApiResult<T>) -> bool {
        match result {
            Ok(value) => {
                self.failures = 0;
                self.last_error = None;
                if self.value.as_ref() == Some(&value) {
                    return false;
                }
                self.value = Some(value);
                true
            }
            Err(e) => {
                self.failures += 1;
                tracing::warn!("Poll failed ({} in a row): {}", self.failures, e);
                self.last_error = Some(e.message);
                false
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Bell badge and dropdown feed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationState {
    unread: LastKnown<u32>,
    feed: LastKnown<Vec<Notification>>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unread(&self) -> u32 {
        self.unread.value().copied().unwrap_or(0)
    }

    pub fn items(&self) -> &[Notification] {
        self.feed.value().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn apply_count(&mut self, result: ApiResult<u32>) -> bool {
        self.unread.apply(result)
    }

    pub fn apply_feed(&mut self, result: ApiResult<Vec<Notification>>) -> bool {
        self.feed.apply(result)
    }

    /// Badge text, hidden at zero.
    pub fn badge(&self) -> Option<String> {
        match self.unread() {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }

    pub fn should_flash(&self) -> bool {
        self.unread() > 0
    }

    /// Whether the pulse is lit `elapsed` after the bell mounted.
    pub fn flashing_at(&self, elapsed: Duration) -> bool {
        if !self.should_flash() || elapsed < FLASH_EVERY {
            return false;
        }
        let period = FLASH_EVERY.as_millis();
        elapsed.as_millis() % period < FLASH_FOR.as_millis()
    }

    /// Local effect of a successful mark-read call.
    pub fn mark_read(&mut self, id: u64) {
        let Some(items) = self.feed.value.as_mut() else {
            return;
        };
        if let Some(item) = items.iter_mut().find(|n| n.id == id && !n.is_read) {
            item.is_read = true;
            if let Some(unread) = self.unread.value.as_mut() {
                *unread = unread.saturating_sub(1);
            }
        }
    }

    /// Local effect of a successful mark-all-read call.
    pub fn mark_all_read(&mut self) {
        self.unread.value = Some(0);
        if let Some(items) = self.feed.value.as_mut() {
            for item in items.iter_mut() {
                item.is_read = true;
            }
        }
    }
}

/// Footer domain counts.
pub type SummaryState = LastKnown<DashboardSummary>;

/// Printer page data: snapshot from the 60 s poll, patched by stream events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrinterState {
    snapshot: LastKnown<Option<PrinterTelemetry>>,
}

impl PrinterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_snapshot(&mut self, result: ApiResult<Option<PrinterTelemetry>>) -> bool {
        self.snapshot.apply(result)
    }

    /// Patch the live tree. Events before the first snapshot are dropped.
    pub fn apply_event(&mut self, event: &StreamEvent) -> bool {
        match self.snapshot.value.as_mut() {
            Some(Some(telemetry)) => telemetry.apply(event),
            _ => false,
        }
    }

    pub fn telemetry(&self) -> Option<&PrinterTelemetry> {
        self.snapshot.value().and_then(Option::as_ref)
    }

    /// A poll succeeded and reported no printer.
    pub fn not_configured(&self) -> bool {
        matches!(self.snapshot.value(), Some(None))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.snapshot.last_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::printer::DeviceIdentity;
    use crate::error::ApiError;
    use chrono::{TimeZone, Utc};

    fn note(id: u64, is_read: bool) -> Notification {
        Notification {
            id,
            title: format!("Note {}", id),
            message: None,
            link: None,
            is_read,
            created_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_failed_poll_keeps_last_known() {
        let mut state = NotificationState::new();
        assert!(state.apply_count(Ok(3)));
        assert!(!state.apply_count(Err(ApiError::new("connection refused"))));
        assert_eq!(state.unread(), 3);
        assert_eq!(state.unread.failures(), 1);
        assert_eq!(state.unread.last_error(), Some("connection refused"));

        state.apply_count(Ok(3));
        assert_eq!(state.unread.failures(), 0);
    }

    #[test]
    fn test_badge() {
        let mut state = NotificationState::new();
        assert_eq!(state.badge(), None);
        state.apply_count(Ok(3));
        assert_eq!(state.badge().as_deref(), Some("3"));
        state.apply_count(Ok(250));
        assert_eq!(state.badge().as_deref(), Some("99+"));
    }

    #[test]
    fn test_flash_cadence() {
        let mut state = NotificationState::new();
        state.apply_count(Ok(3));
        assert!(!state.flashing_at(Duration::from_secs(5)));
        assert!(state.flashing_at(Duration::from_millis(10_000)));
        assert!(state.flashing_at(Duration::from_millis(10_599)));
        assert!(!state.flashing_at(Duration::from_millis(10_600)));
        assert!(state.flashing_at(Duration::from_millis(20_100)));

        state.mark_all_read();
        assert!(!state.flashing_at(Duration::from_millis(20_100)));
        assert_eq!(state.badge(), None);
    }

    #[test]
    fn test_flash_edges_follow_the_bell_loop() {
        let mut state = NotificationState::new();
        state.apply_count(Ok(1));

        // Walk the loop: read the pulse, sleep to the next edge, repeat.
        let mut elapsed = Duration::ZERO;
        let mut lit = Vec::new();
        while elapsed < Duration::from_secs(21) {
            if state.flashing_at(elapsed) {
                lit.push(elapsed.as_millis());
            }
            elapsed += next_flash_edge(elapsed);
        }
        assert_eq!(lit, vec![10_000, 20_000]);

        assert_eq!(next_flash_edge(Duration::ZERO), FLASH_FOR);
        assert_eq!(next_flash_edge(Duration::from_millis(10_600)), Duration::from_millis(9_400));
        assert_eq!(next_flash_edge(Duration::from_millis(10_250)), Duration::from_millis(350));
    }

    #[test]
    fn test_mark_read_once() {
        let mut state = NotificationState::new();
        state.apply_count(Ok(2));
        state.apply_feed(Ok(vec![note(1, false), note(2, false), note(3, true)]));

        state.mark_read(1);
        state.mark_read(1);
        state.mark_read(3);
        assert_eq!(state.unread(), 1);
        assert!(state.items()[0].is_read);
    }

    #[test]
    fn test_summary_state() {
        let mut summary = SummaryState::new();
        assert!(summary.value().is_none());
        summary.apply(Ok(DashboardSummary {
            vehicles: 2,
            ..DashboardSummary::default()
        }));
        summary.apply(Err(ApiError::new("timeout")));
        assert_eq!(summary.value().map(|s| s.vehicles), Some(2));
    }

    #[test]
    fn test_printer_state() {
        let mut printer = PrinterState::new();
        let event = StreamEvent::StateChanged {
            entity_id: "sensor.p1s_bed_temperature".into(),
            state: "60".into(),
            attributes: serde_json::Value::Null,
        };
        assert!(!printer.apply_event(&event));

        printer.apply_snapshot(Ok(None));
        assert!(printer.not_configured());

        printer.apply_snapshot(Ok(Some(PrinterTelemetry::new(DeviceIdentity::default()))));
        assert!(printer.apply_event(&event));
        assert!(!printer.apply_event(&event));
        assert_eq!(
            printer.telemetry().and_then(|t| t.temperatures.bed.current),
            Some(60.0)
        );
    }
}
