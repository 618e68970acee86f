//! Wall-clock access for the time-of-day heuristics

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current local time at the destinations
pub trait Clock: Send + Sync {
    /// Wall time in the destinations' timezone
    fn now(&self) -> NaiveDateTime;

    /// The same instant as an absolute timestamp
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the system clock and converts it into a fixed timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Tz>);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}
