use std::time::{Duration, Instant};

use tracing::trace;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic one-second tick source, armed only while the timer runs.
///
/// Deadlines advance from the previous deadline rather than from the time the
/// tick was observed, so a late frame never stretches the countdown.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { next_due: None }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Arm one period from `now`. Already armed schedulers keep their deadline.
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            trace!("arming tick source");
            self.next_due = Some(now + TICK_PERIOD);
        }
    }

    pub fn disarm(&mut self) {
        if self.next_due.take().is_some() {
            trace!("disarming tick source");
        }
    }

    /// Armed iff `running`.
    pub fn sync(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Returns true when one tick is due at `now` and schedules the next one.
    /// Call repeatedly to catch up after a long frame.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + TICK_PERIOD);
                true
            }
            _ => false,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fires() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        assert!(!scheduler.is_armed());
        assert!(!scheduler.poll(t0 + Duration::from_secs(100)));
    }

    #[test]
    fn test_fires_after_one_period() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.arm(t0);
        assert!(!scheduler.poll(t0 + Duration::from_millis(999)));
        assert!(scheduler.poll(t0 + Duration::from_secs(1)));
        assert!(!scheduler.poll(t0 + Duration::from_secs(1)));
        assert_eq!(scheduler.next_due(), Some(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_no_drift_on_late_poll() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.arm(t0);
        // observed 300ms late, next deadline still lands on the 2s mark
        assert!(scheduler.poll(t0 + Duration::from_millis(1300)));
        assert_eq!(scheduler.next_due(), Some(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_catches_up_missed_ticks() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.arm(t0);
        let now = t0 + Duration::from_millis(3500);
        let mut fired = 0;
        while scheduler.poll(now) {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_arm_is_idempotent() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.arm(t0);
        scheduler.arm(t0 + Duration::from_millis(500));
        assert_eq!(scheduler.next_due(), Some(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_disarm_cancels_pending_tick() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.arm(t0);
        scheduler.disarm();
        assert!(!scheduler.poll(t0 + Duration::from_secs(5)));

        // rearming starts a fresh period
        scheduler.arm(t0 + Duration::from_secs(5));
        assert!(!scheduler.poll(t0 + Duration::from_millis(5500)));
        assert!(scheduler.poll(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn test_sync_follows_running_flag() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.sync(true, t0);
        assert!(scheduler.is_armed());
        scheduler.sync(true, t0 + Duration::from_millis(400));
        assert_eq!(scheduler.next_due(), Some(t0 + Duration::from_secs(1)));
        scheduler.sync(false, t0);
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn test_default_is_disarmed() {
        let scheduler = TickScheduler::default();
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.next_due(), None);
    }
}
