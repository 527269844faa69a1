//! Virtual clock and pending timers

use std::time::Duration;

/// Deferred work the controller schedules for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Finish the scroll-to-top fade-out
    HideScrollToTop,
    /// Nudge the API pane so its scrollspy reports the settled layout
    ApiNudge,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    seq: u64,
    action: TimerAction,
}

/// Timers ordered by due time, ties broken by scheduling order
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    next_seq: u64,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, action: TimerAction) {
        let timer = Timer {
            due: self.now + delay,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.pending.push(timer);
        tracing::trace!(?action, due = ?timer.due, "Timer scheduled");
    }

    pub fn pending(&self) -> Vec<TimerAction> {
        let mut timers = self.pending.clone();
        timers.sort_by_key(|t| (t.due, t.seq));
        timers.into_iter().map(|t| t.action).collect()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerAction> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.action)
    }

    /// Move the clock forward once every due timer has fired
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_order() {
        let mut timers = Timers::new();
        timers.schedule(Duration::from_millis(300), TimerAction::HideScrollToTop);
        timers.schedule(Duration::from_millis(100), TimerAction::ApiNudge);
        timers.schedule(Duration::from_millis(300), TimerAction::ApiNudge);

        let until = Duration::from_millis(250);
        assert_eq!(timers.pop_due(until), Some(TimerAction::ApiNudge));
        assert_eq!(timers.now(), Duration::from_millis(100));
        assert_eq!(timers.pop_due(until), None);
        timers.advance_to(until);
        assert_eq!(timers.now(), until);

        let until = Duration::from_millis(300);
        assert_eq!(timers.pop_due(until), Some(TimerAction::HideScrollToTop));
        assert_eq!(timers.pop_due(until), Some(TimerAction::ApiNudge));
        assert!(timers.pending().is_empty());
    }

    #[test]
    fn test_schedule_is_relative_to_now() {
        let mut timers = Timers::new();
        timers.advance_to(Duration::from_secs(1));
        timers.schedule(Duration::from_millis(100), TimerAction::ApiNudge);
        assert_eq!(timers.pop_due(Duration::from_millis(1050)), None);
        assert_eq!(
            timers.pop_due(Duration::from_millis(1100)),
            Some(TimerAction::ApiNudge)
        );
    }
}
