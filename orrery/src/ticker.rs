//! Fixed-rate tick source for hosts without their own event loop.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Deadlines are measured from the start instant, so a late tick does not
/// push back every later one.
#[derive(Debug, Clone)]
pub struct Ticker {
    start: Instant,
    interval: Duration,
    ticks: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    pub fn starting_at(start: Instant, interval: Duration) -> Self {
        Ticker {
            start,
            interval,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// When tick number `tick` (1-based) is due
    pub fn deadline(&self, tick: u64) -> Instant {
        let nanos = self.interval.as_nanos().saturating_mul(u128::from(tick));
        self.start + Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Sleeps until the next deadline.
    ///
    /// Returns true when the deadline had already passed.
    pub fn wait(&mut self) -> bool {
        self.ticks += 1;
        let deadline = self.deadline(self.ticks);
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadlines_do_not_drift() {
        let start = Instant::now();
        let t = Ticker::starting_at(start, Duration::from_millis(20));
        assert_eq!(t.deadline(0), start);
        assert_eq!(t.deadline(50), start + Duration::from_secs(1));
    }

    #[test]
    fn late_ticks_are_reported_without_sleeping() {
        let start = Instant::now() - Duration::from_secs(10);
        let mut t = Ticker::starting_at(start, Duration::from_millis(10));
        assert!(t.wait());
        assert!(t.wait());
        assert_eq!(t.ticks(), 2);
    }

    #[test]
    fn waits_for_the_deadline() {
        let mut t = Ticker::new(Duration::from_millis(50));
        assert!(!t.wait());
        assert!(Instant::now() >= t.deadline(1));
    }
}
