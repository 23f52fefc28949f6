//! Time source for audit timestamps.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};

use crate::entity::Timestamped;

/// Source of "now". Services take one so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|g| *g).unwrap_or_else(|e| *e.into_inner())
    }
}

/// Next update timestamp for `record`: never earlier than its current one.
pub fn next_update_at(record: &impl Timestamped, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(record.updated_at())
}
