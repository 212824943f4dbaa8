use chrono::{Local, NaiveDateTime};

/// Source of the current instant.
///
/// The engine reads it exactly once per invocation, so every rule in a run
/// sees the same `now`.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time. Persisted timestamps carry no zone, so local
/// naive time is what gets compared against them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Fractional hours as a chrono duration, rounded to the millisecond.
pub fn hours(h: f64) -> chrono::Duration {
    chrono::Duration::milliseconds((h * 3_600_000.0).round() as i64)
}
