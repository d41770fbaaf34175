//! Boot sequencer for transitions into a console variant.
//!
//! An activation schedules one timer per phase boundary up front, all offset
//! from the activation instant:
//!
//! | offset  | event                         |
//! |---------|-------------------------------|
//! | 200 ms  | P0 black → P1 frame drawing   |
//! | 500 ms  | P1 → P2 sidebar bars appear   |
//! | 900 ms  | P2 → P3 content brightens     |
//! | 1300 ms | P3 → P4 fade out              |
//! | 1500 ms | overlay removed (terminal)    |
//!
//! With reduced motion nothing is scheduled and the activation completes
//! synchronously.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Visible phase of the boot overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BootPhase {
    Black,
    FrameDrawing,
    SidebarBars,
    ContentBrightens,
    FadeOut,
}

impl BootPhase {
    pub fn index(&self) -> u8 {
        match self {
            BootPhase::Black => 0,
            BootPhase::FrameDrawing => 1,
            BootPhase::SidebarBars => 2,
            BootPhase::ContentBrightens => 3,
            BootPhase::FadeOut => 4,
        }
    }

    /// Class applied to the overlay for this phase.
    pub fn css_class(&self) -> &'static str {
        match self {
            BootPhase::Black => "boot-phase-0",
            BootPhase::FrameDrawing => "boot-phase-1",
            BootPhase::SidebarBars => "boot-phase-2",
            BootPhase::ContentBrightens => "boot-phase-3",
            BootPhase::FadeOut => "boot-phase-4",
        }
    }
}

/// What a boot timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BootEvent {
    Advance(BootPhase),
    Complete,
}

/// Phase boundaries, as offsets from activation.
pub const BOOT_SCHEDULE: [(Duration, BootEvent); 5] = [
    (Duration::from_millis(200), BootEvent::Advance(BootPhase::FrameDrawing)),
    (Duration::from_millis(500), BootEvent::Advance(BootPhase::SidebarBars)),
    (Duration::from_millis(900), BootEvent::Advance(BootPhase::ContentBrightens)),
    (Duration::from_millis(1300), BootEvent::Advance(BootPhase::FadeOut)),
    (Duration::from_millis(1500), BootEvent::Complete),
];

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Delivery of a timer back to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFired {
    pub id: TimerId,
    pub event: BootEvent,
}

/// Timer source bound to the document clock.
pub trait Scheduler {
    /// Arrange for `event` to be delivered after `after`.
    fn schedule(&mut self, after: Duration, event: BootEvent) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Shared scheduler, so a caller can keep a handle to the one the store owns.
impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn schedule(&mut self, after: Duration, event: BootEvent) -> TimerId {
        self.borrow_mut().schedule(after, event)
    }

    fn cancel(&mut self, id: TimerId) {
        self.borrow_mut().cancel(id)
    }
}

/// User motion preference, read from the reduced-motion probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    pub fn is_reduced(&self) -> bool {
        *self == MotionPreference::Reduced
    }
}

/// Live boot state; exists only while booting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootState {
    pub phase: BootPhase,
    pub started_at: Instant,
}

/// Outcome of starting an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStart {
    /// Timers are pending; completion arrives through [`BootSequencer::handle`].
    Running,
    /// Reduced motion: already terminal, nothing scheduled.
    Completed,
}

/// Outcome of delivering a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStep {
    /// Timer did not belong to the current activation.
    Ignored,
    Advanced(BootPhase),
    Completed,
}

/// Phase machine driving the boot overlay.
#[derive(Debug, Default)]
pub struct BootSequencer {
    state: Option<BootState>,
    pending: Vec<TimerId>,
}

impl BootSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<BootState> {
        self.state
    }

    pub fn phase(&self) -> Option<BootPhase> {
        self.state.map(|s| s.phase)
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    pub fn pending_timers(&self) -> &[TimerId] {
        &self.pending
    }

    /// Begin an activation. A running activation is cancelled first.
    pub fn start(
        &mut self,
        scheduler: &mut dyn Scheduler,
        motion: MotionPreference,
        now: Instant,
    ) -> BootStart {
        self.cancel(scheduler);

        if motion.is_reduced() {
            tracing::debug!("Reduced motion preferred, skipping boot sequence");
            return BootStart::Completed;
        }

        self.state = Some(BootState {
            phase: BootPhase::Black,
            started_at: now,
        });
        self.pending = BOOT_SCHEDULE
            .iter()
            .map(|(after, event)| scheduler.schedule(*after, *event))
            .collect();
        tracing::debug!("Boot sequence started with {} timers", self.pending.len());
        BootStart::Running
    }

    /// Deliver a fired timer.
    pub fn handle(&mut self, fired: TimerFired) -> BootStep {
        let Some(pos) = self.pending.iter().position(|id| *id == fired.id) else {
            return BootStep::Ignored;
        };
        self.pending.remove(pos);

        match fired.event {
            BootEvent::Advance(phase) => {
                if let Some(state) = self.state.as_mut() {
                    state.phase = phase;
                }
                BootStep::Advanced(phase)
            }
            BootEvent::Complete => {
                self.state = None;
                self.pending.clear();
                BootStep::Completed
            }
        }
    }

    /// Cancel every pending timer and drop the boot state.
    ///
    /// Returns whether an activation was running.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        for id in self.pending.drain(..) {
            scheduler.cancel(id);
        }
        self.state.take().is_some()
    }
}

/// Test double: records requests instead of running them.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    next_id: u64,
    scheduled: Vec<(TimerId, Duration, BootEvent)>,
    cancelled: Vec<TimerId>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every timer ever scheduled, in request order.
    pub fn scheduled(&self) -> &[(TimerId, Duration, BootEvent)] {
        &self.scheduled
    }

    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Timers scheduled and not cancelled, as deliveries in offset order.
    pub fn live(&self) -> Vec<TimerFired> {
        let mut live: Vec<_> = self
            .scheduled
            .iter()
            .filter(|(id, _, _)| !self.cancelled.contains(id))
            .collect();
        live.sort_by_key(|(_, after, _)| *after);
        live.into_iter()
            .map(|(id, _, event)| TimerFired { id: *id, event: *event })
            .collect()
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule(&mut self, after: Duration, event: BootEvent) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.scheduled.push((id, after, event));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.cancelled.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_motion_schedules_five_timers() {
        let mut scheduler = RecordingScheduler::new();
        let mut boot = BootSequencer::new();

        let start = boot.start(&mut scheduler, MotionPreference::Full, Instant::now());
        assert_eq!(start, BootStart::Running);

        let offsets: Vec<u128> = scheduler
            .scheduled()
            .iter()
            .map(|(_, after, _)| after.as_millis())
            .collect();
        assert_eq!(offsets, vec![200, 500, 900, 1300, 1500]);
        assert_eq!(boot.phase(), Some(BootPhase::Black));
    }

    #[test]
    fn test_reduced_motion_schedules_nothing() {
        let mut scheduler = RecordingScheduler::new();
        let mut boot = BootSequencer::new();

        let start = boot.start(&mut scheduler, MotionPreference::Reduced, Instant::now());
        assert_eq!(start, BootStart::Completed);
        assert!(scheduler.scheduled().is_empty());
        assert!(!boot.is_running());
    }

    #[test]
    fn test_phases_advance_in_order_then_complete() {
        let mut scheduler = RecordingScheduler::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut scheduler, MotionPreference::Full, Instant::now());

        let steps: Vec<_> = scheduler.live().into_iter().map(|f| boot.handle(f)).collect();
        assert_eq!(
            steps,
            vec![
                BootStep::Advanced(BootPhase::FrameDrawing),
                BootStep::Advanced(BootPhase::SidebarBars),
                BootStep::Advanced(BootPhase::ContentBrightens),
                BootStep::Advanced(BootPhase::FadeOut),
                BootStep::Completed,
            ]
        );
        assert!(!boot.is_running());
        assert!(boot.pending_timers().is_empty());
    }

    #[test]
    fn test_restart_cancels_prior_timers() {
        let mut scheduler = RecordingScheduler::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut scheduler, MotionPreference::Full, Instant::now());
        let first: Vec<_> = scheduler.live();

        boot.start(&mut scheduler, MotionPreference::Full, Instant::now());
        assert_eq!(scheduler.cancelled().len(), 5);

        // Stale deliveries from the first activation are ignored.
        for fired in first {
            assert_eq!(boot.handle(fired), BootStep::Ignored);
        }
        assert_eq!(boot.phase(), Some(BootPhase::Black));
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut scheduler = RecordingScheduler::new();
        let mut boot = BootSequencer::new();
        boot.start(&mut scheduler, MotionPreference::Full, Instant::now());

        assert!(boot.cancel(&mut scheduler));
        assert!(!boot.is_running());
        assert!(scheduler.live().is_empty());
        assert!(!boot.cancel(&mut scheduler));
    }
}
