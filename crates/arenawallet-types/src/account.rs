//! The wallet account aggregate.
//!
//! `Account` is the sole mutable aggregate for money. `balance` never goes
//! negative, and the lifetime accumulators (`total_deposits`,
//! `total_withdrawals`, `total_wagered`, `total_win`, `total_loss`) only
//! ever grow. All mutations are check-then-apply: either the full mutation
//! succeeds or the account is unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, MatchId, Result, WalletError};

/// A user's wallet and lifetime statistics record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Spendable balance. Invariant: never negative.
    pub balance: Decimal,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_wagered: Decimal,
    pub total_win: Decimal,
    pub total_loss: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh zero-balance account.
    #[must_use]
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            total_withdrawals: Decimal::ZERO,
            total_wagered: Decimal::ZERO,
            total_win: Decimal::ZERO,
            total_loss: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Apply an approved deposit: credit the balance and the deposit total.
    pub fn apply_deposit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.total_deposits += amount;
    }

    /// Apply an approved withdrawal: debit the balance and bump the
    /// withdrawal total.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `balance < amount`; the account is
    /// unchanged in that case.
    pub fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        self.checked_debit(amount)?;
        self.total_withdrawals += amount;
        Ok(())
    }

    /// Debit a tournament entry fee and bump the wagered total.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `balance < entry_fee`.
    pub fn apply_entry_fee(&mut self, entry_fee: Decimal) -> Result<()> {
        self.checked_debit(entry_fee)?;
        self.total_wagered += entry_fee;
        Ok(())
    }

    /// Credit a match prize and bump the win total.
    pub fn apply_prize(&mut self, prize: Decimal) {
        self.balance += prize;
        self.total_win += prize;
    }

    /// Record a lost wager. The entry fee was already debited at join time,
    /// so only the loss accumulator moves.
    pub fn apply_loss(&mut self, entry_fee: Decimal) {
        self.total_loss += entry_fee;
    }

    /// Whether the account can cover `amount` right now.
    #[must_use]
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    fn checked_debit(&mut self, amount: Decimal) -> Result<()> {
        if self.balance < amount {
            return Err(WalletError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

/// Read-side view of an account: balance, accumulators, and the matches the
/// account has entered. Joined matches live in the entry book and are merged
/// in at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub balance: Decimal,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_wagered: Decimal,
    pub total_win: Decimal,
    pub total_loss: Decimal,
    pub joined_matches: Vec<MatchId>,
}

impl AccountSummary {
    /// Build a summary from an account and its joined match ids.
    #[must_use]
    pub fn from_account(account: &Account, joined_matches: Vec<MatchId>) -> Self {
        Self {
            account_id: account.id,
            balance: account.balance,
            total_deposits: account.total_deposits,
            total_withdrawals: account.total_withdrawals,
            total_wagered: account.total_wagered,
            total_win: account.total_win,
            total_loss: account.total_loss,
            joined_matches,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Account {
    /// An account pre-funded with `balance`, bypassing the deposit flow.
    pub fn funded(balance: Decimal) -> Self {
        let mut account = Self::new(AccountId::new());
        account.balance = balance;
        account
    }
}
