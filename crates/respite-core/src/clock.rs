//! Injected time source.
//!
//! The scheduler never reads the system clock directly. Everything flows
//! through a [`Clock`] so state-machine tests can run on synthetic time.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Time source consumed by the scheduler.
pub trait Clock: Send + Sync {
    /// Current instant, used for all countdown and scheduling arithmetic.
    fn now(&self) -> DateTime<Utc>;

    /// Local wall-clock time, used only for working-hours evaluation.
    fn now_local(&self) -> NaiveDateTime;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests.
///
/// Stores an epoch-millisecond instant; `now_local` reports the same instant
/// as naive UTC, so tests can pick weekdays and minutes directly.
#[derive(Debug)]
pub struct ManualClock {
    epoch_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            epoch_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.epoch_ms
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.epoch_ms.fetch_add(secs * 1000, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.epoch_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.epoch_ms.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance_secs(90);
        assert_eq!(clock.now(), start + chrono::Duration::seconds(90));
    }

    #[test]
    fn manual_clock_local_tracks_instant() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now_local(), start.naive_utc());
    }
}
