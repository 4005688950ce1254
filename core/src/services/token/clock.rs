//! Wall clock used for issuance and expiry checks

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current UTC time. `None` means the clock could not be read,
/// which verification treats as a failure.
pub trait Clock: Send + Sync {
    fn now(&self) -> Option<DateTime<Utc>>;
}

/// Reads the system clock on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        let seconds = i64::try_from(elapsed.as_secs()).ok()?;
        Utc.timestamp_opt(seconds, elapsed.subsec_nanos()).single()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_chrono() {
        let before = Utc::now();
        let now = SystemClock.now().unwrap();
        assert!((now - before).num_seconds().abs() <= 1);
    }
}
