//! Quiet-period debouncing with explicit time
//!
//! Every input pushes the deadline to `now + quiet`; [`Debouncer::poll`] fires
//! once after the deadline passes. Time is always passed in, so the event loop
//! and the tests drive it the same way.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record an input event, restarting the wait
    pub fn input(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether the quiet period has elapsed since the last input.
    ///
    /// Returns true at most once per burst of input.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop a pending run
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.input(start);
        assert!(!debouncer.poll(start + Duration::from_millis(499)));
        assert!(debouncer.poll(start + QUIET));
        assert!(!debouncer.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn input_mid_wait_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.input(start);
        debouncer.input(start + Duration::from_millis(400));
        assert!(!debouncer.poll(start + Duration::from_millis(600)));
        assert!(debouncer.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(Instant::now()));
    }

    #[test]
    fn cancel_drops_pending_run() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.input(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + QUIET));
    }
}
