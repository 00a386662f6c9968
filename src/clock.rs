//! Wall-clock abstraction
//!
//! Timestamps are local naive datetimes and all date arithmetic works on
//! whole-day differences. Overdue status is always derived lazily from the
//! current time, never by a background sweep, so injecting the clock is
//! enough to make every time-dependent rule deterministic under test.

use chrono::{Local, NaiveDateTime};
use std::sync::Mutex;

/// Capability returning the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock reading the system's local time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Controllable clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
