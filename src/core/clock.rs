use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so commands remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and simulations.
///
/// `now()` advances by one millisecond per call so consecutive minted entry
/// ids stay distinct, matching how wall-clock commands behave in practice.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock().unwrap() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap();
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap();
        let at = *current;
        *current += Duration::milliseconds(1);
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_ticks_per_read() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap());
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::milliseconds(1));
    }

    #[test]
    fn manual_clock_jumps_on_set() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap());
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.today(), later.date_naive());
    }
}
