//! System-wide constants for the ArenaWallet core.

/// Minimum withdrawal amount in whole currency units.
pub const MIN_WITHDRAWAL_UNITS: i64 = 10;

/// Maximum withdrawal requests an account may create per local day.
/// The (N+1)th same-day attempt is rejected.
pub const MAX_WITHDRAWALS_PER_DAY: usize = 4;

/// Bounded retries for a storage-conflicted balance transaction before
/// the operation surfaces a failure.
pub const MAX_CONFLICT_RETRIES: u32 = 3;

/// Default UTC offset (seconds) for the daily-limit local-midnight window.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 0;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "ArenaWallet";
