//! Interval gate for batch progress events.

use std::time::{Duration, Instant};

/// Admits at most one progress event per interval.
///
/// Snapshots on the `watch` channel are never throttled; only emitter
/// events go through the gate. Skipped events are counted so the final
/// tally can be logged when the batch settles.
#[derive(Debug)]
pub struct ProgressThrottle {
    interval: Duration,
    last_admitted: Option<Instant>,
    skipped: u64,
}

impl ProgressThrottle {
    /// Gate with the given minimum spacing. `Duration::ZERO` admits everything.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
            skipped: 0,
        }
    }

    /// Whether an event observed now may be emitted.
    pub fn admit(&mut self) -> bool {
        self.admit_at(Instant::now())
    }

    /// Whether an event observed at `now` may be emitted.
    pub fn admit_at(&mut self, now: Instant) -> bool {
        let due = self
            .last_admitted
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_admitted = Some(now);
        } else {
            self.skipped += 1;
        }
        due
    }

    /// Events dropped by the gate so far.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_admitted() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.admit());
        assert!(!throttle.admit());
        assert_eq!(throttle.skipped(), 1);
    }

    #[test]
    fn test_admits_again_after_interval() {
        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(Duration::from_millis(100));

        assert!(throttle.admit_at(start));
        assert!(!throttle.admit_at(start + Duration::from_millis(40)));
        assert!(!throttle.admit_at(start + Duration::from_millis(99)));
        assert!(throttle.admit_at(start + Duration::from_millis(100)));
        assert!(!throttle.admit_at(start + Duration::from_millis(150)));
        assert_eq!(throttle.skipped(), 3);
    }

    #[test]
    fn test_zero_interval_admits_everything() {
        let mut throttle = ProgressThrottle::new(Duration::ZERO);
        let now = Instant::now();
        for _ in 0..5 {
            assert!(throttle.admit_at(now));
        }
        assert_eq!(throttle.skipped(), 0);
    }
}
