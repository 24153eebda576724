use std::time::{Duration, Instant};

use tracing::debug;

/// Cancellable repeating tick timer.
///
/// Holds at most one pending deadline. The interval only changes through
/// [`TickScheduler::rearm`]; firing a tick reuses the current interval.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    interval: Option<Duration>,
    next_due: Option<Instant>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking every `interval`, first firing one interval after `now`.
    pub fn arm(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval);
        self.next_due = Some(now + interval);
    }

    /// Replaces the pending deadline with one based on the new interval.
    pub fn rearm(&mut self, interval: Duration, now: Instant) {
        debug!(?interval, "tick timer re-armed");
        self.arm(interval, now);
    }

    /// Drops the pending tick; nothing fires until armed again.
    pub fn cancel(&mut self) {
        self.interval = None;
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Returns true when a tick is due, scheduling the following one.
    ///
    /// Ticks missed while the caller was busy collapse into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let (Some(interval), Some(due)) = (self.interval, self.next_due) else {
            return false;
        };

        if now < due {
            return false;
        }

        let mut next = due + interval;
        if next <= now {
            next = now + interval;
        }
        self.next_due = Some(next);
        true
    }

    /// Time left until the pending tick, or `None` when not armed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;

    const INTERVAL: Duration = Duration::from_millis(160);

    #[test]
    fn unarmed_scheduler_never_fires() {
        let mut scheduler = TickScheduler::new();
        let now = Instant::now();

        assert!(!scheduler.poll(now + Duration::from_secs(10)));
        assert_eq!(scheduler.time_until_due(now), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(INTERVAL, start);

        assert!(!scheduler.poll(start + Duration::from_millis(100)));
        assert!(scheduler.poll(start + INTERVAL));
        assert!(!scheduler.poll(start + INTERVAL));
        assert!(scheduler.poll(start + INTERVAL * 2));
    }

    #[test]
    fn missed_ticks_collapse_into_one() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(INTERVAL, start);

        let late = start + INTERVAL * 5;
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.time_until_due(late), Some(INTERVAL));
    }

    #[test]
    fn rearm_applies_new_interval_from_now() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(INTERVAL, start);
        assert!(scheduler.poll(start + INTERVAL));

        let faster = Duration::from_millis(150);
        scheduler.rearm(faster, start + INTERVAL);

        assert_eq!(scheduler.interval(), Some(faster));
        assert!(!scheduler.poll(start + INTERVAL + Duration::from_millis(149)));
        assert!(scheduler.poll(start + INTERVAL + faster));
    }

    #[test]
    fn cancel_stops_pending_tick() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(INTERVAL, start);

        scheduler.cancel();

        assert!(!scheduler.is_armed());
        assert!(!scheduler.poll(start + INTERVAL * 3));
    }
}
