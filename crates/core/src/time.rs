use chrono::{DateTime, Duration, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Whole seconds left of a `duration_secs` countdown that began at `started_at`.
///
/// Partial seconds already elapsed are dropped, so the value only reaches zero
/// once the full duration has passed. A `now` earlier than `started_at` reports
/// the full duration.
#[must_use]
pub fn seconds_remaining(started_at: DateTime<Utc>, now: DateTime<Utc>, duration_secs: u32) -> u32 {
    let elapsed = (now - started_at).num_seconds().max(0);
    let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
    duration_secs.saturating_sub(elapsed)
}

//
// ─── STUDY TIMER ───────────────────────────────────────────────────────────────
//

/// Countdown gating the first study stage.
///
/// The timer never ticks on its own; callers poll it with the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyTimer {
    duration_secs: u32,
    started_at: Option<DateTime<Utc>>,
    finished: bool,
}

impl StudyTimer {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            started_at: None,
            finished: false,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Starts the countdown. Restarting an already running timer is a no-op.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Seconds left at `now`. An unstarted timer reports its full duration.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> u32 {
        if self.finished {
            return 0;
        }
        match self.started_at {
            Some(started_at) => seconds_remaining(started_at, now, self.duration_secs),
            None => self.duration_secs,
        }
    }

    /// True once the countdown ran out or was skipped.
    #[must_use]
    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.finished || (self.is_started() && self.remaining(now) == 0)
    }

    /// Marks the timer as finished regardless of the time left.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_counts_whole_seconds() {
        let start = fixed_now();
        assert_eq!(seconds_remaining(start, start, 180), 180);
        assert_eq!(
            seconds_remaining(start, start + Duration::milliseconds(1_500), 180),
            179
        );
        assert_eq!(seconds_remaining(start, start + Duration::seconds(180), 180), 0);
        assert_eq!(seconds_remaining(start, start + Duration::seconds(900), 180), 0);
    }

    #[test]
    fn remaining_ignores_clock_skew_backwards() {
        let start = fixed_now();
        assert_eq!(seconds_remaining(start, start - Duration::seconds(5), 60), 60);
    }

    #[test]
    fn timer_finishes_when_elapsed_or_skipped() {
        let mut clock = fixed_clock();
        let mut timer = StudyTimer::new(3);
        assert!(!timer.is_finished(clock.now()));
        assert_eq!(timer.remaining(clock.now()), 3);

        timer.start(clock.now());
        clock.advance(Duration::seconds(2));
        assert_eq!(timer.remaining(clock.now()), 1);
        assert!(!timer.is_finished(clock.now()));

        clock.advance(Duration::seconds(1));
        assert!(timer.is_finished(clock.now()));

        let mut skipped = StudyTimer::new(180);
        skipped.start(fixed_now());
        skipped.finish();
        assert!(skipped.is_finished(fixed_now()));
        assert_eq!(skipped.remaining(fixed_now()), 0);
    }

    #[test]
    fn start_is_not_reset_by_second_call() {
        let mut timer = StudyTimer::new(10);
        timer.start(fixed_now());
        timer.start(fixed_now() + Duration::seconds(8));
        assert_eq!(timer.remaining(fixed_now() + Duration::seconds(8)), 2);
    }
}
