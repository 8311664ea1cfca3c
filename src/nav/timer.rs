use std::time::Duration;

use tokio::time::{self, Instant};

/// One-shot auto-advance schedule. Holds at most one deadline; arming again
/// replaces it, so two advances can never be pending at once.
#[derive(Debug, Clone)]
pub struct AdvanceTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AdvanceTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.interval;
        self.deadline = Some(deadline);
        deadline
    }

    /// Returns whether a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Consumes the deadline if it has passed. A fire is reported once.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.deadline = None;
        true
    }
}

/// Resolves at `deadline`, or never when nothing is armed.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{AdvanceTimer, sleep_until_deadline};

    #[test]
    fn arm_replaces_previous_deadline() {
        let mut timer = AdvanceTimer::new(Duration::from_secs(5));
        let now = Instant::now();

        let first = timer.arm(now);
        let second = timer.arm(now + Duration::from_secs(2));

        assert_ne!(first, second);
        assert_eq!(timer.deadline(), Some(second));
        assert!(!timer.is_due(first));
    }

    #[test]
    fn take_due_fires_exactly_once() {
        let mut timer = AdvanceTimer::new(Duration::from_secs(5));
        let now = Instant::now();
        timer.arm(now);

        assert!(!timer.take_due(now + Duration::from_secs(4)));
        assert!(timer.take_due(now + Duration::from_secs(5)));
        assert!(!timer.take_due(now + Duration::from_secs(6)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_reports_whether_anything_was_pending() {
        let mut timer = AdvanceTimer::new(Duration::from_secs(5));
        assert!(!timer.cancel());
        timer.arm(Instant::now());
        assert!(timer.cancel());
        assert!(timer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_until_deadline_waits_for_interval() {
        let mut timer = AdvanceTimer::new(Duration::from_secs(5));
        let started = Instant::now();
        timer.arm(started);

        sleep_until_deadline(timer.deadline()).await;

        assert!(Instant::now() >= started + Duration::from_secs(5));
        assert!(timer.take_due(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_until_deadline_never_fires_when_disarmed() {
        let outcome = tokio::time::timeout(
            Duration::from_secs(60),
            sleep_until_deadline(None),
        )
        .await;
        assert!(outcome.is_err());
    }
}
