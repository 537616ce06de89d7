//! Configuration for the wallet core.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable business rules for the ledger, settlement, and join engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Minimum amount a withdrawal request may ask for.
    pub min_withdrawal: Decimal,
    /// Maximum withdrawal requests per account per local day.
    pub max_withdrawals_per_day: usize,
    /// UTC offset (seconds east) defining local midnight for the daily
    /// withdrawal window.
    pub utc_offset_secs: i32,
    /// Bounded retries for storage-conflicted balance transactions.
    pub max_conflict_retries: u32,
}

impl WalletConfig {
    /// The local timezone offset as a `chrono` type.
    ///
    /// Falls back to UTC if the configured offset is out of range.
    #[must_use]
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            min_withdrawal: Decimal::new(constants::MIN_WITHDRAWAL_UNITS, 0),
            max_withdrawals_per_day: constants::MAX_WITHDRAWALS_PER_DAY,
            utc_offset_secs: constants::DEFAULT_UTC_OFFSET_SECS,
            max_conflict_retries: constants::MAX_CONFLICT_RETRIES,
        }
    }
}
