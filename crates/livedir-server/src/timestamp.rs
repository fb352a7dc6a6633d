//! Most recent change time seen by the file watcher.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Wall-clock instant of the latest file modification.
///
/// Stored as nanoseconds since the UNIX epoch. Writes go through
/// `fetch_max`, so the value never moves backwards even when several
/// threads record changes at once.
#[derive(Debug)]
pub struct ChangeTimestamp {
    nanos: AtomicI64,
}

impl ChangeTimestamp {
    /// Create a timestamp initialized to the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a timestamp initialized to `time`.
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            nanos: AtomicI64::new(to_nanos(time)),
        }
    }

    /// Record a change happening now and return the recorded time.
    pub fn touch(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.advance_to(now);
        now
    }

    /// Move the timestamp forward to `time`. Earlier values are ignored.
    pub fn advance_to(&self, time: DateTime<Utc>) {
        self.nanos.fetch_max(to_nanos(time), Ordering::AcqRel);
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.nanos.load(Ordering::Acquire))
    }
}

impl Default for ChangeTimestamp {
    fn default() -> Self {
        Self::new()
    }
}

/// Nanoseconds since the epoch, saturating outside the representable range.
fn to_nanos(time: DateTime<Utc>) -> i64 {
    time.timestamp_nanos_opt().unwrap_or(if time.timestamp() < 0 {
        i64::MIN
    } else {
        i64::MAX
    })
}
