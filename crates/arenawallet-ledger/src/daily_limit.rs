//! Daily withdrawal frequency guard.
//!
//! Caps how many withdrawal requests an account may create per local day.
//! "Today" is the half-open window `[local_midnight, local_midnight + 24h)`
//! in the configured fixed offset, converted back to UTC for comparison
//! against request creation times.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use arenawallet_types::{Result, WalletError};

/// Counts same-day withdrawal requests and rejects the attempt that would
/// exceed the cap.
#[derive(Debug, Clone)]
pub struct DailyLimitGuard {
    limit: usize,
    offset: FixedOffset,
}

impl DailyLimitGuard {
    #[must_use]
    pub fn new(limit: usize, offset: FixedOffset) -> Self {
        Self { limit, offset }
    }

    /// The UTC bounds of the local day containing `now`: `[start, end)`.
    #[must_use]
    pub fn day_window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_midnight = now
            .with_timezone(&self.offset)
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_local_timezone(self.offset)
            .single()
            .expect("fixed offsets have no DST gaps");
        let start = local_midnight.with_timezone(&Utc);
        (start, start + Duration::days(1))
    }

    /// Whether `created_at` falls inside the local day containing `now`.
    #[must_use]
    pub fn is_same_day(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.day_window(now);
        created_at >= start && created_at < end
    }

    /// Check whether one more withdrawal is allowed given `prior_count`
    /// requests already created today.
    ///
    /// # Errors
    /// Returns `DailyLimitExceeded` when the cap is already reached.
    pub fn check(&self, prior_count: usize) -> Result<()> {
        if prior_count >= self.limit {
            return Err(WalletError::DailyLimitExceeded {
                count: prior_count,
                limit: self.limit,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
