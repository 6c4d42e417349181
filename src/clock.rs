use std::time::{Duration, Instant};

use log::warn;

/// Fixed-rate tick schedule for the driver loop.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    next_tick: Instant,
}

impl TickClock {
    /// Schedules the first tick one interval after `now`.
    #[must_use]
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
        }
    }

    /// Time left before the next tick, or `None` once it is due.
    ///
    /// The driver must step as soon as this returns `None`, before reading
    /// more input.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if now >= self.next_tick {
            None
        } else {
            Some(self.next_tick - now)
        }
    }

    /// Books the tick that just ran. Missed ticks are skipped, not replayed.
    pub fn advance(&mut self, now: Instant) {
        self.next_tick += self.interval;
        if self.next_tick <= now {
            warn!("tick loop fell behind, skipping missed ticks");
            self.next_tick = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickClock;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn waits_until_the_first_interval_elapses() {
        let start = Instant::now();
        let clock = TickClock::start(INTERVAL, start);

        assert_eq!(clock.time_until_tick(start), Some(INTERVAL));
        assert_eq!(
            clock.time_until_tick(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(clock.time_until_tick(start + INTERVAL), None);
    }

    #[test]
    fn overdue_tick_stays_due_until_booked() {
        let start = Instant::now();
        let mut clock = TickClock::start(INTERVAL, start);
        let late = start + Duration::from_millis(150);

        // Repeated checks while input keeps arriving never push the tick back.
        for _ in 0..5 {
            assert_eq!(clock.time_until_tick(late), None);
        }

        clock.advance(late);
        assert_eq!(
            clock.time_until_tick(late),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn falling_far_behind_skips_missed_ticks() {
        let start = Instant::now();
        let mut clock = TickClock::start(INTERVAL, start);
        let stalled = start + Duration::from_millis(1_000);

        clock.advance(stalled);

        assert_eq!(clock.time_until_tick(stalled), Some(INTERVAL));
    }
}
