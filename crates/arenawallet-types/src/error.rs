//! Error types for the ArenaWallet ledger core.
//!
//! All errors use the `AW_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Input validation errors
//! - 2xx: Balance errors
//! - 3xx: Fund request lifecycle errors
//! - 4xx: Match-join errors
//! - 5xx: Account / storage errors
//! - 6xx: Authorization errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, MatchId, RequestId};

/// Central error enum for all ArenaWallet operations.
///
/// Every failure in this core is a structured, recoverable result — none is
/// fatal to the embedding process.
#[derive(Debug, Error)]
pub enum WalletError {
    // =================================================================
    // Input Validation Errors (1xx)
    // =================================================================
    /// Missing or malformed input, client-fixable.
    #[error("AW_ERR_100: Validation failed: {reason}")]
    Validation { reason: String },

    /// An amount that must be strictly positive wasn't.
    #[error("AW_ERR_101: Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    /// Withdrawal amount below the configured minimum.
    #[error("AW_ERR_102: Amount {amount} below minimum withdrawal of {minimum}")]
    BelowMinimum { amount: Decimal, minimum: Decimal },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("AW_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// A balance operation would produce a negative value.
    #[error("AW_ERR_201: Balance underflow on {0}")]
    BalanceUnderflow(AccountId),

    // =================================================================
    // Fund Request Lifecycle Errors (3xx)
    // =================================================================
    /// The fund request was not found in the log.
    #[error("AW_ERR_300: Fund request not found: {0}")]
    RequestNotFound(RequestId),

    /// The request already reached a terminal state (idempotency guard).
    #[error("AW_ERR_301: Fund request already processed: {0}")]
    AlreadyProcessed(RequestId),

    /// Too many withdrawal requests created today.
    #[error("AW_ERR_302: Daily withdrawal limit reached: {count} of {limit} today")]
    DailyLimitExceeded { count: usize, limit: usize },

    // =================================================================
    // Match-Join Errors (4xx)
    // =================================================================
    /// The match does not exist in the tournament catalog.
    #[error("AW_ERR_400: Match not found: {0}")]
    MatchNotFound(MatchId),

    /// An entry already exists for this (account, match) pair.
    #[error("AW_ERR_401: Account {account_id} already joined {match_id}")]
    AlreadyJoined {
        account_id: AccountId,
        match_id: MatchId,
    },

    /// The submitted entry fee doesn't match the catalog's configured fee.
    #[error("AW_ERR_402: Entry fee mismatch: match charges {expected}, got {submitted}")]
    EntryFeeMismatch {
        expected: Decimal,
        submitted: Decimal,
    },

    /// The entry is not in a state that allows the requested transition.
    #[error("AW_ERR_403: Entry not settleable: {reason}")]
    EntryNotSettleable { reason: String },

    // =================================================================
    // Account / Storage Errors (5xx)
    // =================================================================
    /// The account does not exist in the ledger store.
    #[error("AW_ERR_500: Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The account was mutated between snapshot and commit. Retry signal,
    /// not user-visible as-is.
    #[error("AW_ERR_501: Storage conflict on {0}, retry")]
    StorageConflict(AccountId),

    /// Bounded conflict retries exhausted without a clean commit.
    #[error("AW_ERR_502: Conflict retries exhausted on {account_id} after {attempts} attempts")]
    ConflictRetriesExhausted {
        account_id: AccountId,
        attempts: u32,
    },

    // =================================================================
    // Authorization Errors (6xx)
    // =================================================================
    /// The presented identity lacks the required capability.
    #[error("AW_ERR_600: Unauthorized: {reason}")]
    Unauthorized { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("AW_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("AW_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (disk, network).
    #[error("AW_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, WalletError>;

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
